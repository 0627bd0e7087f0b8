use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::ApiError;
use crate::domain::Page;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(error: ApiError) -> Response {
    let (status, message) = match error {
        ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("Not found: {}", what)),
        ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        e @ (ApiError::Transport(_)
        | ApiError::Upstream { .. }
        | ApiError::InvalidResponse(_)) => {
            tracing::warn!(error = %e, "Backend call failed");
            (StatusCode::BAD_GATEWAY, e.to_string())
        }
        e @ ApiError::Internal(_) => {
            tracing::error!(error = %e, "Request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    };

    (status, Json(ErrorResponse { error: message })).into_response()
}

/// Extractor rejections keep axum's status but use the JSON error body.
pub fn rejection_response(status: StatusCode, message: String) -> Response {
    tracing::debug!(status = %status, error = %message, "Request rejected");
    (status, Json(ErrorResponse { error: message })).into_response()
}

pub fn json_response<T: Serialize>(status: StatusCode, result: Result<T, ApiError>) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Wire pages count from zero; the facade counts from one.
pub fn from_wire_page_number(page: Option<usize>) -> Option<usize> {
    page.map(|p| p.saturating_add(1))
}

/// Wire pages count from zero.
pub fn to_wire_page<T>(page: Page<T>) -> Page<T> {
    Page {
        page: page.page.saturating_sub(1),
        ..page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_page_number_shifts_by_one_without_overflow() {
        assert_eq!(from_wire_page_number(None), None);
        assert_eq!(from_wire_page_number(Some(0)), Some(1));
        assert_eq!(from_wire_page_number(Some(usize::MAX)), Some(usize::MAX));
    }
}
