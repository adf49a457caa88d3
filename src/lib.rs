pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::person_service::{PersonService, ServiceError};
pub use domain::enrichment::{Enricher, EnrichmentError};
pub use domain::person::{EnrichedPerson, PersonInput, PersonPatch};
pub use infra::config::{AppConfig, UpstreamConfig};
pub use infra::enrichment::http_enricher;
pub use storage::people::{InMemoryPersonStore, Pagination, PersonStore, PgPersonStore, SearchFilters};
