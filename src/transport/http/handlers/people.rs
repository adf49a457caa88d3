use crate::domain::person::{EnrichedPerson, PersonInput, PersonPatch};
use crate::transport::http::handlers::common::{
    bad_request, ok_json, parse_person_id, service_error_response,
};
use crate::transport::http::types::{json_422, ApiResponse, AppState, SearchQuery};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::debug;

#[utoipa::path(
    post,
    path = "/v1/people",
    request_body = PersonInput,
    responses(
        (status = 201, description = "Person enriched and created", body = ApiResponse),
        (status = 400, description = "Missing name or surname", body = ApiResponse),
        (status = 422, description = "Invalid JSON body, or no nationality data for the name", body = ApiResponse),
        (status = 502, description = "An enrichment service is unavailable", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn create_person_handler(
    State(state): State<AppState>,
    request: Result<Json<PersonInput>, JsonRejection>,
) -> impl IntoResponse {
    let Json(input) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"name\": ..., \"surname\": ..., \"patronymic\"?: ...}")
                .into_response()
        }
    };

    match state.people.create_and_enrich(input).await {
        Ok(person) => ok_json(StatusCode::CREATED, &person).into_response(),
        Err(e) => {
            debug!(error = %e, "create person failed");
            service_error_response(&e).into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/people",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching people (unspecified but stable order)", body = ApiResponse),
        (status = 400, description = "Invalid filter or malformed query string", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn search_people_handler(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(v) => v,
        Err(e) => {
            return bad_request(format!("invalid query string: {}", e.body_text()))
                .into_response()
        }
    };
    let (filters, page) = match query.into_search() {
        Ok(v) => v,
        Err(msg) => return bad_request(msg).into_response(),
    };

    match state.people.search(&filters, page).await {
        Ok(people) => ok_json::<Vec<EnrichedPerson>>(StatusCode::OK, &people).into_response(),
        Err(e) => {
            debug!(error = %e, "search people failed");
            service_error_response(&e).into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/people/{id}",
    params(("id" = i64, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_person_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_person_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp.into_response(),
    };

    match state.people.get(id).await {
        Ok(person) => ok_json(StatusCode::OK, &person).into_response(),
        Err(e) => service_error_response(&e).into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/v1/people/{id}",
    params(("id" = i64, Path, description = "Person ID")),
    request_body = PersonPatch,
    responses(
        (status = 200, description = "Person updated (re-enriched if name changed)", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse),
        (status = 422, description = "Invalid JSON body, or no nationality data for the new name", body = ApiResponse),
        (status = 502, description = "An enrichment service is unavailable", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn update_person_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<PersonPatch>, JsonRejection>,
) -> impl IntoResponse {
    let id = match parse_person_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp.into_response(),
    };
    let Json(patch) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "partial person object").into_response(),
    };

    match state.people.update_with_merge(id, patch).await {
        Ok(person) => ok_json(StatusCode::OK, &person).into_response(),
        Err(e) => {
            debug!(person_id = id, error = %e, "update person failed");
            service_error_response(&e).into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/v1/people/{id}",
    params(("id" = i64, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person deleted", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn delete_person_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_person_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp.into_response(),
    };

    match state.people.delete(id).await {
        Ok(()) => ok_json(StatusCode::OK, &serde_json::json!({ "id": id })).into_response(),
        Err(e) => {
            debug!(person_id = id, error = %e, "delete person failed");
            service_error_response(&e).into_response()
        }
    }
}
