//! PostgreSQL-backed person store.

use crate::domain::person::EnrichedPerson;
use crate::storage::people::{FilterValue, Pagination, PersonStore, SearchFilters, StoreError};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::debug;

const SELECT_PEOPLE: &str =
    "SELECT id, name, surname, patronymic, age, gender, nationality FROM people";

/// A person store over a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgPersonStore {
    pool: PgPool,
}

impl PgPersonStore {
    /// Connects to `database_url` and makes sure the `people` table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: PgPool) -> Result<Self, StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS people (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                surname TEXT NOT NULL,
                patronymic TEXT NOT NULL DEFAULT '',
                age INTEGER NOT NULL DEFAULT 0,
                gender TEXT NOT NULL DEFAULT '',
                nationality TEXT NOT NULL DEFAULT ''
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

fn person_from_row(row: &PgRow) -> Result<EnrichedPerson, sqlx::Error> {
    Ok(EnrichedPerson {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        surname: row.try_get("surname")?,
        patronymic: row.try_get("patronymic")?,
        age: row.try_get("age")?,
        gender: row.try_get("gender")?,
        nationality: row.try_get("nationality")?,
    })
}

fn to_i64(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

#[async_trait]
impl PersonStore for PgPersonStore {
    async fn create(&self, person: &EnrichedPerson) -> Result<i64, StoreError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO people (name, surname, patronymic, age, gender, nationality)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(person.name.as_str())
        .bind(person.surname.as_str())
        .bind(person.patronymic.as_str())
        .bind(person.age)
        .bind(person.gender.as_str())
        .bind(person.nationality.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i64, person: &EnrichedPerson) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE people
             SET name = $1, surname = $2, patronymic = $3, age = $4, gender = $5, nationality = $6
             WHERE id = $7",
        )
        .bind(person.name.as_str())
        .bind(person.surname.as_str())
        .bind(person.patronymic.as_str())
        .bind(person.age)
        .bind(person.gender.as_str())
        .bind(person.nationality.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<EnrichedPerson, StoreError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_PEOPLE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))?;
        Ok(person_from_row(&row)?)
    }

    async fn search(
        &self,
        filters: &SearchFilters,
        page: Pagination,
    ) -> Result<Vec<EnrichedPerson>, StoreError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_PEOPLE);

        for (idx, (field, value)) in filters.conditions().into_iter().enumerate() {
            builder.push(if idx == 0 { " WHERE " } else { " AND " });
            builder.push(field.column()).push(" = ");
            match value {
                FilterValue::Text(v) => {
                    builder.push_bind(v);
                }
                FilterValue::Int(v) => {
                    builder.push_bind(v);
                }
            }
        }

        builder.push(" ORDER BY id LIMIT ");
        builder.push_bind(to_i64(page.limit()));
        if page.offset() > 0 {
            builder.push(" OFFSET ");
            builder.push_bind(to_i64(page.offset()));
        }

        debug!(sql = builder.sql(), "search people");
        let rows = builder.build().fetch_all(&self.pool).await?;
        let people = rows
            .iter()
            .map(person_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(people)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
