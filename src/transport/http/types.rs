use crate::app::person_service::PersonService;
use crate::storage::people::{Pagination, SearchFilters};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub people: Arc<PersonService>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Query string of `GET /v1/people`.
///
/// Every value is taken as a string so that an unparsable `page`/`perPage`
/// falls back to the default instead of rejecting the request.
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    /// Exact age; must be an integer when present.
    pub age: Option<String>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Page size (default 10, max 100).
    #[serde(rename = "perPage")]
    pub per_page: Option<String>,
}

impl SearchQuery {
    pub fn into_search(self) -> Result<(SearchFilters, Pagination), String> {
        let age = match self.age.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<i32>()
                    .map_err(|_| format!("age filter must be an integer, got {:?}", raw))?,
            ),
        };
        let filters = SearchFilters {
            name: self.name,
            surname: self.surname,
            patronymic: self.patronymic,
            age,
            gender: self.gender,
            nationality: self.nationality,
        };

        let parse = |v: Option<String>| v.and_then(|s| s.trim().parse::<u64>().ok());
        let defaults = Pagination::default();
        let page = Pagination::new(
            parse(self.page).unwrap_or(defaults.page),
            parse(self.per_page).unwrap_or(defaults.per_page),
        );
        Ok((filters, page))
    }
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_paging_values_fall_back_to_defaults() {
        let query = SearchQuery {
            page: Some("abc".into()),
            per_page: Some("-3".into()),
            ..Default::default()
        };
        let (filters, page) = query.into_search().unwrap();
        assert!(filters.is_empty());
        assert_eq!(page, Pagination::default());
    }

    #[test]
    fn age_filter_must_be_numeric() {
        let query = SearchQuery {
            age: Some("thirty".into()),
            ..Default::default()
        };
        assert!(query.into_search().is_err());

        let query = SearchQuery {
            age: Some(" 30 ".into()),
            page: Some("2".into()),
            per_page: Some("5".into()),
            ..Default::default()
        };
        let (filters, page) = query.into_search().unwrap();
        assert_eq!(filters.age, Some(30));
        assert_eq!(page.offset(), 5);
    }
}
