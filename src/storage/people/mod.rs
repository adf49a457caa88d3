//! Persistence for enriched people.

use crate::domain::person::EnrichedPerson;
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;
pub mod query;

pub use memory::InMemoryPersonStore;
pub use postgres::PgPersonStore;
pub use query::{FilterValue, Pagination, PersonField, SearchFilters};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("person {0} not found")]
    NotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The record store behind the person service.
///
/// Writes are not guarded against concurrent updates to the same id: the
/// last write wins.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Inserts `person` (its `id` is ignored) and returns the assigned id.
    async fn create(&self, person: &EnrichedPerson) -> Result<i64, StoreError>;

    /// Overwrites all six mutable fields of row `id`.
    async fn update(&self, id: i64, person: &EnrichedPerson) -> Result<(), StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    async fn get(&self, id: i64) -> Result<EnrichedPerson, StoreError>;

    /// Exact-match search. Result order is store-defined; callers must not
    /// rely on it beyond it being stable between pages.
    async fn search(
        &self,
        filters: &SearchFilters,
        page: Pagination,
    ) -> Result<Vec<EnrichedPerson>, StoreError>;

    /// Cheap liveness probe used by `/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}
