//! Enrichment: the lookup contract and the orchestrator that fans out to the
//! age, gender and nationality services.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub mod orchestrator;
#[cfg(test)]
pub(crate) mod testing;

pub use orchestrator::Enricher;

/// Which upstream a lookup talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Age,
    Gender,
    Nationality,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Upstream::Age => "age",
            Upstream::Gender => "gender",
            Upstream::Nationality => "nationality",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentError {
    #[error("{upstream} service unavailable: {reason}")]
    UpstreamUnavailable { upstream: Upstream, reason: String },

    #[error("no nationality found for {name}")]
    NoNationalityFound { name: String },
}

impl EnrichmentError {
    pub fn unavailable(upstream: Upstream, reason: impl fmt::Display) -> Self {
        EnrichmentError::UpstreamUnavailable {
            upstream,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeEstimate {
    /// 0 when the service has no data for the name.
    pub age: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenderEstimate {
    /// Empty when the service has no data for the name.
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationalityEstimate {
    pub country_code: String,
}

/// A single-attribute lookup keyed by first name.
///
/// Implementations issue exactly one outbound request per call and never
/// retry on their own.
#[async_trait]
pub trait AttributeLookup: Send + Sync {
    type Output: Send;

    async fn lookup(&self, name: &str) -> Result<Self::Output, EnrichmentError>;
}
