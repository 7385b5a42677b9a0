//! Error handler for converting AppError to HTTP responses.
//!
//! Rejected input renders as a 400 with a JSON `ErrorResponse`. Unexpected
//! failures are logged and surface as a bare 500 with no body, so storage
//! details never leak to clients.

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - Validation → 400 BAD_REQUEST
    /// - ValidationErrors → 400 BAD_REQUEST
    /// - BadRequest → 400 BAD_REQUEST
    /// - Database, Configuration, ConnectionPool, Internal → 500, empty body
    fn into_response(self) -> Response {
        match error_to_response_body(&self) {
            Some(error_response) => {
                (error_to_status_code(&self), Json(error_response)).into_response()
            }
            None => {
                tracing::error!(
                    code = error_to_code(&self),
                    error = ?self,
                    "Unhandled error while serving request"
                );
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Maps an AppError variant to its error code string.
///
/// Client error codes go into the response body. Server error codes are
/// only written to the log, since those responses have no body.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// Builds the JSON body for client errors. Server errors have no body.
fn error_to_response_body(error: &AppError) -> Option<ErrorResponse> {
    let response = match error {
        AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
        AppError::ValidationErrors { errors } => {
            let details: Vec<_> = errors
                .iter()
                .map(|e| json!({ "field": e.field, "message": e.message }))
                .collect();
            ErrorResponse::new(error_to_code(error), "Request validation failed")
                .with_details(json!({ "errors": details }))
        }
        AppError::BadRequest { message } => ErrorResponse::new(error_to_code(error), message),
        _ => return None,
    };
    Some(response)
}

/// Normalizes framework-generated client errors into `ErrorResponse` JSON.
///
/// Unknown routes, wrong methods and timeouts are produced outside the
/// handlers with plain or empty bodies. Responses that already carry a JSON
/// body (including the customer "not found" bodies) pass through untouched,
/// and 5xx responses keep their empty body.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let request_id = request.extensions().get::<RequestId>().map(|r| r.0.clone());
    let response = next.run(request).await;

    let status = response.status();
    if !status.is_client_error() {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let (_parts, body) = response.into_parts();
    let original_message = axum::body::to_bytes(body, 64 * 1024)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();

    let (code, default_message) = match status {
        StatusCode::NOT_FOUND => ("NOT_FOUND", "The requested resource was not found"),
        StatusCode::METHOD_NOT_ALLOWED => {
            ("METHOD_NOT_ALLOWED", "HTTP method not allowed for this endpoint")
        }
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type"),
        StatusCode::REQUEST_TIMEOUT => ("REQUEST_TIMEOUT", "Request timed out"),
        _ => ("BAD_REQUEST", "Bad request - invalid or malformed request"),
    };
    let message = if original_message.is_empty() {
        default_message
    } else {
        original_message.as_str()
    };

    let mut error_response = ErrorResponse::new(code, message);
    if let Some(request_id) = request_id {
        error_response = error_response.with_request_id(&request_id);
    }

    (status, Json(error_response)).into_response()
}
