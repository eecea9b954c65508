use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse};
use crate::core::MatchError;
use crate::models::ErrorResponse;
use crate::services::ProfileError;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle path parameter errors, e.g. a non-numeric user id
pub fn handle_path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_path".to_string(),
        message: format!("Invalid path: {}", err),
        status_code: 400,
    }
    .into()
}

pub fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

pub fn profile_error_response(err: &ProfileError) -> HttpResponse {
    match err {
        ProfileError::NotFound(_) => {
            error_response(StatusCode::NOT_FOUND, "User not found", err.to_string())
        }
        ProfileError::DuplicateEmail(_) => {
            error_response(StatusCode::BAD_REQUEST, "Email already registered.", err.to_string())
        }
        ProfileError::MalformedInterests { .. } | ProfileError::Store(_) => {
            tracing::error!("Profile operation failed: {}", err);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
                err.to_string(),
            )
        }
    }
}

pub fn match_error_response(err: &MatchError) -> HttpResponse {
    match err {
        MatchError::NotFound(_) => {
            error_response(StatusCode::NOT_FOUND, "User not found", err.to_string())
        }
        MatchError::NoMatches(_) => {
            error_response(StatusCode::NOT_FOUND, "No matches found", err.to_string())
        }
        MatchError::MalformedInterests { .. } | MatchError::Store(_) => {
            tracing::error!("Match computation failed: {}", err);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to compute matches",
                err.to_string(),
            )
        }
    }
}
