use crate::domain::person::{EnrichedPerson, PersonInput, PersonPatch};
use crate::transport::http::handlers::{health, people};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EnrichInfo service",
        description = "Receives a full name, enriches it with the most probable age, gender and nationality, and stores the result."
    ),
    paths(
        health::ping_handler,
        health::healthcheck_handler,
        people::create_person_handler,
        people::search_people_handler,
        people::get_person_handler,
        people::update_person_handler,
        people::delete_person_handler
    ),
    components(schemas(ApiResponse, PersonInput, PersonPatch, EnrichedPerson)),
    tags((name = "people", description = "Enriched person records"))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/ping", get(health::ping_handler))
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/v1/people",
            get(people::search_people_handler).post(people::create_person_handler),
        )
        .route(
            "/v1/people/:id",
            get(people::get_person_handler)
                .put(people::update_person_handler)
                .delete(people::delete_person_handler),
        )
        .with_state(app_state)
}

/// The full application: routes, Swagger UI, CORS, tracing and the
/// request-scoped timeout.
///
/// A request that exceeds `request_timeout` has its handler future dropped,
/// which abandons any in-flight upstream lookups before anything is stored.
pub fn create_app(app_state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::map_response(timeout_envelope))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// `TimeoutLayer` answers with an empty 408; wrap it in the API envelope.
async fn timeout_envelope(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    (
        StatusCode::REQUEST_TIMEOUT,
        Json(ApiResponse {
            success: false,
            data: Some(serde_json::json!({ "code": "REQUEST_TIMEOUT" })),
            error: Some("request timed out".to_string()),
        }),
    )
        .into_response()
}
