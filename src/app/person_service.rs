//! The person service.
//!
//! This module sits between the HTTP layer and the record store. It is
//! responsible for:
//! 1.  Validating and normalizing identity input before any network I/O.
//! 2.  Running the enrichment pipeline on create.
//! 3.  Merging partial updates and deciding when a changed name requires a
//!     fresh enrichment.

use crate::domain::enrichment::{Enricher, EnrichmentError};
use crate::domain::merge::merge_fields;
use crate::domain::person::{EnrichedPerson, PersonInput, PersonPatch};
use crate::storage::people::{Pagination, PersonStore, SearchFilters, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),

    #[error("person {0} not found")]
    NotFound(i64),

    #[error("store error: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServiceError::NotFound(id),
            other => ServiceError::Store(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

pub struct PersonService {
    store: Arc<dyn PersonStore>,
    enricher: Enricher,
}

impl PersonService {
    pub fn new(store: Arc<dyn PersonStore>, enricher: Enricher) -> Self {
        Self { store, enricher }
    }

    pub fn store(&self) -> &Arc<dyn PersonStore> {
        &self.store
    }

    /// Validates `input`, enriches it and persists the result.
    ///
    /// Nothing is written unless all three lookups succeed.
    pub async fn create_and_enrich(&self, input: PersonInput) -> Result<EnrichedPerson> {
        let identity = input.into_identity().map_err(ServiceError::Validation)?;
        let mut person = self.enricher.enrich(&identity).await?;
        person.id = self.store.create(&person).await?;
        info!(person_id = person.id, first_name = %person.name, "person created");
        Ok(person)
    }

    /// Merges `patch` into the stored record `id` and persists the outcome.
    ///
    /// The target must exist before anything else happens. If the patch
    /// carries a non-empty name, the merged identity is enriched again and
    /// the fresh age/gender/nationality replace whatever the patch supplied.
    /// A negative age is rejected before the merge.
    pub async fn update_with_merge(&self, id: i64, patch: PersonPatch) -> Result<EnrichedPerson> {
        let existing = self.store.get(id).await?;
        if let Some(age) = patch.age.filter(|age| *age < 0) {
            return Err(ServiceError::Validation(format!(
                "age must not be negative, got {}",
                age
            )));
        }
        let patch = patch.normalized();
        let record = self.apply_update(existing, &patch).await?;
        self.store.update(id, &record).await?;
        info!(person_id = id, "person updated");
        Ok(record)
    }

    /// Computes the record that an update would persist, without writing it.
    pub async fn apply_update(
        &self,
        existing: EnrichedPerson,
        patch: &PersonPatch,
    ) -> Result<EnrichedPerson> {
        let id = existing.id;
        let (merged, changed) = merge_fields(existing, patch);
        debug!(person_id = id, ?changed, "merged patch");

        if !patch.changes_name() {
            return Ok(merged);
        }

        debug!(person_id = id, first_name = %merged.name, "re-enriching person");
        let mut fresh = self.enricher.enrich(&merged.identity()).await?;
        fresh.id = id;
        Ok(fresh)
    }

    pub async fn get(&self, id: i64) -> Result<EnrichedPerson> {
        Ok(self.store.get(id).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete(id).await?;
        info!(person_id = id, "person deleted");
        Ok(())
    }

    pub async fn search(
        &self,
        filters: &SearchFilters,
        page: Pagination,
    ) -> Result<Vec<EnrichedPerson>> {
        debug!(?filters, ?page, "searching people");
        Ok(self.store.search(filters, page).await?)
    }
}
