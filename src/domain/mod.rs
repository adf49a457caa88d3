pub mod enrichment;
pub mod merge;
pub mod person;

pub use person::{EnrichedPerson, Identity, PersonInput, PersonPatch};
