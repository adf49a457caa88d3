//! HTTP clients for the agify / genderize / nationalize style services.
//!
//! Every service is queried as `GET {base_url}?name={name}`; only the response
//! body differs, so a single `HttpLookup` is parameterized by the body type.

use crate::domain::enrichment::{
    AgeEstimate, AttributeLookup, EnrichmentError, GenderEstimate, NationalityEstimate, Upstream,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::marker::PhantomData;
use tracing::debug;

/// Decoded response body of one upstream service.
pub trait UpstreamBody: DeserializeOwned + Send + 'static {
    type Output: Send;

    const UPSTREAM: Upstream;

    fn into_output(self, name: &str) -> Result<Self::Output, EnrichmentError>;
}

/// `{"age": number|null}`. Null and missing both mean unknown (0); a
/// negative age is a malformed body.
#[derive(Deserialize, Debug)]
pub struct AgeBody {
    #[serde(default)]
    pub age: Option<i32>,
}

impl UpstreamBody for AgeBody {
    type Output = AgeEstimate;

    const UPSTREAM: Upstream = Upstream::Age;

    fn into_output(self, _name: &str) -> Result<AgeEstimate, EnrichmentError> {
        match self.age {
            Some(age) if age < 0 => Err(EnrichmentError::unavailable(
                Self::UPSTREAM,
                format!("malformed body: negative age {}", age),
            )),
            age => Ok(AgeEstimate {
                age: age.unwrap_or(0),
            }),
        }
    }
}

/// `{"gender": string|null}`. Null and missing both mean unknown ("").
#[derive(Deserialize, Debug)]
pub struct GenderBody {
    #[serde(default)]
    pub gender: Option<String>,
}

impl UpstreamBody for GenderBody {
    type Output = GenderEstimate;

    const UPSTREAM: Upstream = Upstream::Gender;

    fn into_output(self, _name: &str) -> Result<GenderEstimate, EnrichmentError> {
        Ok(GenderEstimate {
            gender: self.gender.unwrap_or_default(),
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct CountryCandidate {
    pub country_id: String,
}

/// `{"country": [{"country_id": .., "probability": ..}, ..]}`.
///
/// The first candidate wins; an empty (or missing) list is a hard failure.
#[derive(Deserialize, Debug)]
pub struct NationalityBody {
    #[serde(default)]
    pub country: Vec<CountryCandidate>,
}

impl UpstreamBody for NationalityBody {
    type Output = NationalityEstimate;

    const UPSTREAM: Upstream = Upstream::Nationality;

    fn into_output(self, name: &str) -> Result<NationalityEstimate, EnrichmentError> {
        match self.country.into_iter().next() {
            Some(first) => Ok(NationalityEstimate {
                country_code: first.country_id,
            }),
            None => Err(EnrichmentError::NoNationalityFound {
                name: name.to_string(),
            }),
        }
    }
}

pub struct HttpLookup<B> {
    client: Client,
    base_url: String,
    _body: PhantomData<fn() -> B>,
}

impl<B> HttpLookup<B> {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            _body: PhantomData,
        }
    }
}

pub type AgeLookup = HttpLookup<AgeBody>;
pub type GenderLookup = HttpLookup<GenderBody>;
pub type NationalityLookup = HttpLookup<NationalityBody>;

#[async_trait]
impl<B: UpstreamBody> AttributeLookup for HttpLookup<B> {
    type Output = B::Output;

    async fn lookup(&self, name: &str) -> Result<B::Output, EnrichmentError> {
        let upstream = B::UPSTREAM;
        debug!(%upstream, url = %self.base_url, first_name = name, "upstream lookup");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("name", name)])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| EnrichmentError::unavailable(upstream, e))?;

        let body: B = response
            .json()
            .await
            .map_err(|e| EnrichmentError::unavailable(upstream, format!("malformed body: {}", e)))?;

        body.into_output(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn age_lookup_reads_age_and_sends_name() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/").query_param("name", "Dmitriy");
                then.status(200)
                    .json_body(json!({"count": 100, "name": "Dmitriy", "age": 42}));
            })
            .await;

        let lookup = AgeLookup::new(Client::new(), server.base_url());
        let age = lookup.lookup("Dmitriy").await.unwrap();
        assert_eq!(age, AgeEstimate { age: 42 });
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn null_age_and_gender_are_unknown() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/age");
                then.status(200).json_body(json!({"count": 0, "age": null}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/gender");
                then.status(200).json_body(json!({"gender": null, "probability": 0.0}));
            })
            .await;

        let age = AgeLookup::new(Client::new(), server.url("/age"))
            .lookup("Zzyzx")
            .await
            .unwrap();
        let gender = GenderLookup::new(Client::new(), server.url("/gender"))
            .lookup("Zzyzx")
            .await
            .unwrap();
        assert_eq!(age.age, 0);
        assert_eq!(gender.gender, "");
    }

    #[tokio::test]
    async fn nationality_takes_first_candidate() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).json_body(json!({
                    "country": [
                        {"country_id": "UA", "probability": 0.4},
                        {"country_id": "RU", "probability": 0.3}
                    ]
                }));
            })
            .await;

        let nationality = NationalityLookup::new(Client::new(), server.base_url())
            .lookup("Dmitriy")
            .await
            .unwrap();
        assert_eq!(nationality.country_code, "UA");
    }

    #[tokio::test]
    async fn negative_age_is_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).json_body(json!({"name": "Jane", "age": -3}));
            })
            .await;

        let err = AgeLookup::new(Client::new(), server.base_url())
            .lookup("Jane")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EnrichmentError::UpstreamUnavailable {
                upstream: Upstream::Age,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn null_probability_does_not_reject_candidate() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).json_body(json!({
                    "country": [{"country_id": "PL", "probability": null}]
                }));
            })
            .await;

        let nationality = NationalityLookup::new(Client::new(), server.base_url())
            .lookup("Jan")
            .await
            .unwrap();
        assert_eq!(nationality.country_code, "PL");
    }

    #[tokio::test]
    async fn empty_country_list_is_no_nationality_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).json_body(json!({"count": 0, "name": "Qwx", "country": []}));
            })
            .await;

        let err = NationalityLookup::new(Client::new(), server.base_url())
            .lookup("Qwx")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EnrichmentError::NoNationalityFound {
                name: "Qwx".to_string()
            }
        );
    }

    #[tokio::test]
    async fn server_error_and_malformed_body_are_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/down");
                then.status(503);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/garbage");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let down = GenderLookup::new(Client::new(), server.url("/down"))
            .lookup("Jane")
            .await
            .unwrap_err();
        assert!(matches!(
            down,
            EnrichmentError::UpstreamUnavailable {
                upstream: Upstream::Gender,
                ..
            }
        ));

        let garbage = AgeLookup::new(Client::new(), server.url("/garbage"))
            .lookup("Jane")
            .await
            .unwrap_err();
        assert!(matches!(
            garbage,
            EnrichmentError::UpstreamUnavailable {
                upstream: Upstream::Age,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unreachable_service_is_unavailable() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let lookup = NationalityLookup::new(Client::new(), "http://127.0.0.1:9");
        let err = lookup.lookup("Jane").await.unwrap_err();
        assert!(matches!(
            err,
            EnrichmentError::UpstreamUnavailable {
                upstream: Upstream::Nationality,
                ..
            }
        ));
    }
}
