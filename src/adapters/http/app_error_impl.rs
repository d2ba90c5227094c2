use crate::app_error::{AppError, ErrorCode, FieldError};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const GENERIC_FAILURE: &str = "Failed to process signup. Please try again.";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();

        match self {
            AppError::Validation(details) => {
                tracing::warn!(fields = ?details, "Request rejected by validation");
                validation_resp(details)
            }
            AppError::AlreadyRegistered => {
                tracing::info!("Signup rejected: email already registered");
                error_resp(
                    StatusCode::CONFLICT,
                    code,
                    "This email is already on the waitlist",
                )
            }
            AppError::NotFound => error_resp(StatusCode::NOT_FOUND, code, "Not found"),
            // Dependency failures: log the detail, return a generic body.
            err @ (AppError::Database(_) | AppError::Email(_)) => {
                tracing::error!(error = ?err, "Request failed");
                error_resp(StatusCode::INTERNAL_SERVER_ERROR, code, GENERIC_FAILURE)
            }
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: &str) -> Response {
    let body = serde_json::json!({ "code": code.as_str(), "message": message });
    (status, Json(body)).into_response()
}

fn validation_resp(details: Vec<FieldError>) -> Response {
    let body = serde_json::json!({
        "code": ErrorCode::ValidationError.as_str(),
        "message": "Invalid data",
        "details": details,
    });
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
