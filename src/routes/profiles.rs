use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{compute_matches, Matcher};
use crate::models::{CreateProfileRequest, ListProfilesQuery, MessageResponse, ProfileId, UpdateProfileRequest};
use crate::routes::errors::{error_response, match_error_response, profile_error_response};
use crate::services::ProfileService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub profiles: ProfileService,
    pub matcher: Matcher,
    pub default_page_size: u32,
}

/// Configure all profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/users", web::post().to(create_user))
        .route("/users", web::get().to(list_users))
        .route("/users/{user_id}", web::get().to(get_user))
        .route("/users/{user_id}", web::put().to(update_user))
        .route("/users/{user_id}", web::delete().to(delete_user))
        .route("/users/{user_id}/matches", web::get().to(find_matches));
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors);
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string())
}

/// Create profile endpoint
///
/// POST /api/v1/users
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "age": 30,
///   "gender": "string",
///   "email": "string",
///   "city": "string",
///   "interests": ["string"]
/// }
/// ```
async fn create_user(
    state: web::Data<AppState>,
    req: web::Json<CreateProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.profiles.create(req.into_inner()).await {
        Ok(profile) => HttpResponse::Created().json(profile),
        Err(e) => profile_error_response(&e),
    }
}

/// List profiles endpoint
///
/// GET /api/v1/users?skip={skip}&limit={limit}
async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<ListProfilesQuery>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(state.default_page_size);

    match state.profiles.list(query.skip, limit).await {
        Ok(profiles) => HttpResponse::Ok().json(profiles),
        Err(e) => profile_error_response(&e),
    }
}

/// GET /api/v1/users/{user_id}
async fn get_user(state: web::Data<AppState>, path: web::Path<ProfileId>) -> impl Responder {
    match state.profiles.get(path.into_inner()).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => profile_error_response(&e),
    }
}

/// Partial update endpoint
///
/// PUT /api/v1/users/{user_id}
///
/// Only fields present in the body are changed.
async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<ProfileId>,
    req: web::Json<UpdateProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.profiles.update(path.into_inner(), req.into_inner()).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => profile_error_response(&e),
    }
}

/// DELETE /api/v1/users/{user_id}
async fn delete_user(state: web::Data<AppState>, path: web::Path<ProfileId>) -> impl Responder {
    match state.profiles.delete(path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "User deleted successfully".to_string(),
        }),
        Err(e) => profile_error_response(&e),
    }
}

/// Find matches endpoint
///
/// GET /api/v1/users/{user_id}/matches
///
/// Returns every profile in the same city sharing at least the configured
/// number of interests, in store order. 404 when the user does not exist or
/// nothing qualifies.
async fn find_matches(state: web::Data<AppState>, path: web::Path<ProfileId>) -> impl Responder {
    let user_id = path.into_inner();

    tracing::info!("Finding matches for user: {}", user_id);

    let store = state.profiles.store();
    match compute_matches(store.as_ref(), &state.matcher, user_id).await {
        Ok(result) => {
            tracing::info!(
                "Returning {} matches for user {} (from {} candidates, {} skipped)",
                result.matches.len(),
                user_id,
                result.total_candidates,
                result.skipped.len()
            );
            HttpResponse::Ok().json(result.matches)
        }
        Err(e) => match_error_response(&e),
    }
}
