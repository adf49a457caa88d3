//! In-process lookups for exercising the orchestrator without network access.

use crate::domain::enrichment::{
    AgeEstimate, AttributeLookup, Enricher, EnrichmentError, GenderEstimate, NationalityEstimate,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Records every name passed to any lookup sharing it.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn names(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

/// Returns the same canned result on every call.
pub struct StaticLookup<T> {
    result: Result<T, EnrichmentError>,
    calls: CallLog,
}

impl<T> StaticLookup<T> {
    pub fn new(result: Result<T, EnrichmentError>) -> Self {
        Self {
            result,
            calls: CallLog::default(),
        }
    }

    pub fn with_log(result: Result<T, EnrichmentError>, calls: CallLog) -> Self {
        Self { result, calls }
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> AttributeLookup for StaticLookup<T> {
    type Output = T;

    async fn lookup(&self, name: &str) -> Result<T, EnrichmentError> {
        self.calls.0.lock().unwrap().push(name.to_string());
        self.result.clone()
    }
}

pub fn fake_enricher(
    age: Result<AgeEstimate, EnrichmentError>,
    gender: Result<GenderEstimate, EnrichmentError>,
    nationality: Result<NationalityEstimate, EnrichmentError>,
) -> (Enricher, CallLog) {
    let calls = CallLog::default();
    let enricher = Enricher::new(
        Arc::new(StaticLookup::with_log(age, calls.clone())),
        Arc::new(StaticLookup::with_log(gender, calls.clone())),
        Arc::new(StaticLookup::with_log(nationality, calls.clone())),
    );
    (enricher, calls)
}

/// An enricher whose lookups all succeed with the given values.
pub fn ok_enricher(age: i32, gender: &str, country_code: &str) -> (Enricher, CallLog) {
    fake_enricher(
        Ok(AgeEstimate { age }),
        Ok(GenderEstimate {
            gender: gender.to_string(),
        }),
        Ok(NationalityEstimate {
            country_code: country_code.to_string(),
        }),
    )
}
