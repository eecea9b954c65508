use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use kinship::config::{LoggingSettings, Settings, StoreBackend};
use kinship::core::Matcher;
use kinship::routes::{self, errors, AppState};
use kinship::services::{MemoryStore, PostgresStore, ProfileService, ProfileStore};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// RUST_LOG takes precedence over the configured level
fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting Kinship profile service...");
    info!("Configuration loaded successfully");

    let store: Arc<dyn ProfileStore> = match settings.database.backend {
        StoreBackend::Postgres => {
            let db = &settings.database;
            let postgres = PostgresStore::from_settings(
                &db.url,
                db.max_connections,
                db.min_connections,
                db.acquire_timeout_secs,
                db.idle_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;

            info!(
                "PostgreSQL store initialized (max: {} connections)",
                db.max_connections.unwrap_or(10)
            );
            Arc::new(postgres)
        }
        StoreBackend::Memory => {
            info!("Using in-memory store; profiles are lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    let matcher = Matcher::new(settings.matching.min_common_interests);

    info!(
        "Matcher initialized (min common interests: {})",
        matcher.min_common_interests()
    );

    // Build application state
    let app_state = AppState {
        profiles: ProfileService::new(store, settings.pagination.max_limit),
        matcher,
        default_page_size: settings.pagination.default_limit,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(errors::handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(errors::handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(errors::handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
