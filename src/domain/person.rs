//! Person records and the identity normalizer.
//!
//! `PersonInput` is what a client posts, `Identity` is the validated and
//! normalized name triple the enrichment pipeline accepts, and
//! `EnrichedPerson` is the row the store persists.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw create payload, before validation.
#[derive(Deserialize, Serialize, Debug, Clone, Default, ToSchema)]
pub struct PersonInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub patronymic: String,
}

impl PersonInput {
    /// Validates the required identity fields and normalizes all three.
    ///
    /// Fails when `name` or `surname` is empty after trimming, so no lookup is
    /// ever issued for an invalid request.
    pub fn into_identity(self) -> Result<Identity, String> {
        let identity = Identity::new(&self.name, &self.surname, &self.patronymic);
        if identity.name.is_empty() {
            return Err("missing required name field".to_string());
        }
        if identity.surname.is_empty() {
            return Err("missing required surname field".to_string());
        }
        Ok(identity)
    }
}

/// Normalized name triple. Only `name` is ever sent to the lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub surname: String,
    pub patronymic: String,
}

impl Identity {
    pub fn new(name: &str, surname: &str, patronymic: &str) -> Self {
        Self {
            name: normalize_name(name),
            surname: normalize_name(surname),
            patronymic: normalize_name(patronymic),
        }
    }
}

/// A person together with the predicted age, gender and nationality.
///
/// `id` is 0 until the store assigns one. `age` 0 means unknown.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq, ToSchema)]
pub struct EnrichedPerson {
    pub id: i64,
    pub name: String,
    pub surname: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub patronymic: String,
    pub age: i32,
    pub gender: String,
    pub nationality: String,
}

impl EnrichedPerson {
    pub fn identity(&self) -> Identity {
        Identity::new(&self.name, &self.surname, &self.patronymic)
    }
}

/// Partial update payload. Absent, empty and zero values all mean "keep".
#[derive(Deserialize, Serialize, Debug, Clone, Default, ToSchema)]
pub struct PersonPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub patronymic: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
}

impl PersonPatch {
    /// Trims and title-cases the identity fields, the same way create input is.
    pub fn normalized(mut self) -> Self {
        for field in [&mut self.name, &mut self.surname, &mut self.patronymic] {
            if let Some(value) = field.as_mut() {
                *value = normalize_name(value);
            }
        }
        self
    }

    /// The patch asks for re-enrichment iff it carries a non-empty name.
    pub fn changes_name(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

/// Trims surrounding whitespace and title-cases each word.
///
/// A letter is upper-cased when it starts the string or follows a character
/// that is neither alphanumeric nor an apostrophe; every other letter is
/// lower-cased. Inner whitespace is kept as is.
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for c in raw.trim().chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = c != '\'';
        }
    }
    out
}
