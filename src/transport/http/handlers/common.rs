use crate::app::person_service::ServiceError;
use crate::domain::enrichment::EnrichmentError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

pub fn ok_json<T: Serialize>(status: StatusCode, data: &T) -> (StatusCode, Json<ApiResponse>) {
    match serde_json::to_value(data) {
        Ok(value) => (
            status,
            Json(ApiResponse {
                success: true,
                data: Some(value),
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse {
                success: false,
                data: None,
                error: Some(format!("failed to encode response: {}", e)),
            }),
        ),
    }
}

/// Maps a service failure onto a status code and a machine-readable `code`.
pub fn service_error_response(err: &ServiceError) -> (StatusCode, Json<ApiResponse>) {
    let (status, code) = match err {
        ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ServiceError::Enrichment(EnrichmentError::UpstreamUnavailable { .. }) => {
            (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE")
        }
        ServiceError::Enrichment(EnrichmentError::NoNationalityFound { .. }) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "NO_NATIONALITY_FOUND")
        }
        ServiceError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
    };
    (
        status,
        Json(ApiResponse {
            success: false,
            data: Some(serde_json::json!({ "code": code })),
            error: Some(err.to_string()),
        }),
    )
}

pub fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ApiResponse>) {
    service_error_response(&ServiceError::Validation(message.into()))
}

/// Path ids that are not integers cannot name a row, so they are reported as
/// not found rather than as a validation failure.
pub fn parse_person_id(raw: &str) -> Result<i64, (StatusCode, Json<ApiResponse>)> {
    raw.trim().parse::<i64>().map_err(|_| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiResponse {
                success: false,
                data: Some(serde_json::json!({ "code": "NOT_FOUND" })),
                error: Some(format!("invalid person id {:?}", raw)),
            }),
        )
    })
}
