pub mod http;

pub use http::{AgeLookup, GenderLookup, HttpLookup, NationalityLookup};

use crate::domain::enrichment::Enricher;
use crate::infra::config::UpstreamConfig;
use std::sync::Arc;

/// Builds an `Enricher` backed by the configured HTTP services.
///
/// The three lookups share one connection pool.
pub fn http_enricher(config: &UpstreamConfig) -> Result<Enricher, reqwest::Error> {
    let client = reqwest::Client::builder().timeout(config.timeout).build()?;
    Ok(Enricher::new(
        Arc::new(AgeLookup::new(client.clone(), config.age_url.clone())),
        Arc::new(GenderLookup::new(client.clone(), config.gender_url.clone())),
        Arc::new(NationalityLookup::new(client, config.nationality_url.clone())),
    ))
}
