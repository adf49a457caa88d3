//! In-memory person store with the same semantics as the Postgres one.
//!
//! Rows are kept in insertion order, which is also id order.

use crate::domain::person::EnrichedPerson;
use crate::storage::people::{
    FilterValue, Pagination, PersonField, PersonStore, SearchFilters, StoreError,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
struct Rows {
    last_id: i64,
    people: Vec<EnrichedPerson>,
}

#[derive(Default)]
pub struct InMemoryPersonStore {
    rows: RwLock<Rows>,
}

impl InMemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.people.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn row_matches(person: &EnrichedPerson, field: PersonField, value: &FilterValue) -> bool {
    let text = match field {
        PersonField::Name => &person.name,
        PersonField::Surname => &person.surname,
        PersonField::Patronymic => &person.patronymic,
        PersonField::Gender => &person.gender,
        PersonField::Nationality => &person.nationality,
        PersonField::Age => {
            return matches!(value, FilterValue::Int(age) if *age == person.age);
        }
    };
    matches!(value, FilterValue::Text(v) if v == text)
}

#[async_trait]
impl PersonStore for InMemoryPersonStore {
    async fn create(&self, person: &EnrichedPerson) -> Result<i64, StoreError> {
        let mut rows = self.rows.write().await;
        rows.last_id += 1;
        let id = rows.last_id;
        rows.people.push(EnrichedPerson {
            id,
            ..person.clone()
        });
        Ok(id)
    }

    async fn update(&self, id: i64, person: &EnrichedPerson) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .people
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *row = EnrichedPerson {
            id,
            ..person.clone()
        };
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.people.len();
        rows.people.retain(|p| p.id != id);
        if rows.people.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<EnrichedPerson, StoreError> {
        let rows = self.rows.read().await;
        rows.people
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn search(
        &self,
        filters: &SearchFilters,
        page: Pagination,
    ) -> Result<Vec<EnrichedPerson>, StoreError> {
        let conditions = filters.conditions();
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        let rows = self.rows.read().await;
        Ok(rows
            .people
            .iter()
            .filter(|p| conditions.iter().all(|(f, v)| row_matches(p, *f, v)))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
