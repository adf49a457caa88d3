use crate::domain::enrichment::{
    AgeEstimate, AttributeLookup, EnrichmentError, GenderEstimate, NationalityEstimate,
};
use crate::domain::person::{EnrichedPerson, Identity};
use std::sync::Arc;
use tracing::{debug, warn};

pub type AgeLookupRef = Arc<dyn AttributeLookup<Output = AgeEstimate>>;
pub type GenderLookupRef = Arc<dyn AttributeLookup<Output = GenderEstimate>>;
pub type NationalityLookupRef = Arc<dyn AttributeLookup<Output = NationalityEstimate>>;

/// Turns an identity into an `EnrichedPerson` using the three lookups.
///
/// Enrichment is all-or-nothing: any lookup failure aborts the whole call and
/// no partially populated record is ever returned.
#[derive(Clone)]
pub struct Enricher {
    age: AgeLookupRef,
    gender: GenderLookupRef,
    nationality: NationalityLookupRef,
}

impl Enricher {
    pub fn new(
        age: AgeLookupRef,
        gender: GenderLookupRef,
        nationality: NationalityLookupRef,
    ) -> Self {
        Self {
            age,
            gender,
            nationality,
        }
    }

    /// Runs the three lookups concurrently and joins them before aggregating.
    ///
    /// All three futures are driven to completion, then errors are reported
    /// in a fixed order (age, gender, nationality) so the same upstream state
    /// always yields the same error.
    pub async fn enrich(&self, identity: &Identity) -> Result<EnrichedPerson, EnrichmentError> {
        let name = identity.name.as_str();
        debug!(first_name = name, "enriching person");

        let (age, gender, nationality) = tokio::join!(
            self.age.lookup(name),
            self.gender.lookup(name),
            self.nationality.lookup(name),
        );

        let (age, gender, nationality) = match (age, gender, nationality) {
            (Ok(a), Ok(g), Ok(n)) => (a, g, n),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                warn!(first_name = name, error = %e, "enrichment failed");
                return Err(e);
            }
        };

        let person = EnrichedPerson {
            id: 0,
            name: identity.name.clone(),
            surname: identity.surname.clone(),
            patronymic: identity.patronymic.clone(),
            age: age.age,
            gender: gender.gender,
            nationality: nationality.country_code,
        };
        debug!(
            name,
            age = person.age,
            gender = %person.gender,
            nationality = %person.nationality,
            "person enriched"
        );
        Ok(person)
    }
}
