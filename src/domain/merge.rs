//! Field-by-field merge of a `PersonPatch` into a stored `EnrichedPerson`.
//!
//! A patch value overwrites the stored one only when it is non-empty (text)
//! or non-zero (age). A patch therefore cannot clear a field back to empty or
//! zero.

use crate::domain::person::{EnrichedPerson, PersonPatch};

/// One mergeable column: its name and how to copy it out of a patch.
///
/// `apply` returns true when the patch carried a value and it was written.
pub struct MergeField {
    pub name: &'static str,
    apply: fn(&mut EnrichedPerson, &PersonPatch) -> bool,
}

fn take_text(target: &mut String, value: &Option<String>) -> bool {
    match value.as_deref() {
        Some(v) if !v.is_empty() => {
            *target = v.to_string();
            true
        }
        _ => false,
    }
}

pub const MERGE_FIELDS: [MergeField; 6] = [
    MergeField {
        name: "name",
        apply: |p, patch| take_text(&mut p.name, &patch.name),
    },
    MergeField {
        name: "surname",
        apply: |p, patch| take_text(&mut p.surname, &patch.surname),
    },
    MergeField {
        name: "patronymic",
        apply: |p, patch| take_text(&mut p.patronymic, &patch.patronymic),
    },
    MergeField {
        name: "age",
        apply: |p, patch| match patch.age {
            Some(age) if age != 0 => {
                p.age = age;
                true
            }
            _ => false,
        },
    },
    MergeField {
        name: "gender",
        apply: |p, patch| take_text(&mut p.gender, &patch.gender),
    },
    MergeField {
        name: "nationality",
        apply: |p, patch| take_text(&mut p.nationality, &patch.nationality),
    },
];

/// Applies `patch` onto `existing`, returning the merged record and the names
/// of the fields that were overwritten.
pub fn merge_fields(
    mut existing: EnrichedPerson,
    patch: &PersonPatch,
) -> (EnrichedPerson, Vec<&'static str>) {
    let mut changed = Vec::new();
    for field in &MERGE_FIELDS {
        if (field.apply)(&mut existing, patch) {
            changed.push(field.name);
        }
    }
    (existing, changed)
}
