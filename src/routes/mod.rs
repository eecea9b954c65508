// Route exports
pub mod errors;
pub mod health;
pub mod profiles;

use actix_web::web;

pub use profiles::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(profiles::configure),
    );
}
