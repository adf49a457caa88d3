pub mod people;

pub use people::{InMemoryPersonStore, PersonStore, PgPersonStore, StoreError};
