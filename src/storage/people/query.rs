//! Search filters and pagination for the `people` table.

/// The six filterable columns. Column names only ever come from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PersonField {
    Name,
    Surname,
    Patronymic,
    Age,
    Gender,
    Nationality,
}

impl PersonField {
    pub fn column(self) -> &'static str {
        match self {
            PersonField::Name => "name",
            PersonField::Surname => "surname",
            PersonField::Patronymic => "patronymic",
            PersonField::Age => "age",
            PersonField::Gender => "gender",
            PersonField::Nationality => "nationality",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Int(i32),
}

/// Exact-match AND filters. `None` and empty strings are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
}

impl SearchFilters {
    /// The active conditions in a fixed column order.
    pub fn conditions(&self) -> Vec<(PersonField, FilterValue)> {
        let text = [
            (PersonField::Name, &self.name),
            (PersonField::Surname, &self.surname),
            (PersonField::Patronymic, &self.patronymic),
            (PersonField::Gender, &self.gender),
            (PersonField::Nationality, &self.nationality),
        ];
        let mut out: Vec<(PersonField, FilterValue)> = text
            .into_iter()
            .filter_map(|(field, value)| match value.as_deref() {
                Some(v) if !v.is_empty() => Some((field, FilterValue::Text(v.to_string()))),
                _ => None,
            })
            .collect();
        if let Some(age) = self.age {
            out.push((PersonField::Age, FilterValue::Int(age)));
        }
        out.sort_by_key(|(field, _)| *field);
        out
    }

    pub fn is_empty(&self) -> bool {
        self.conditions().is_empty()
    }
}

pub const DEFAULT_PER_PAGE: u64 = 10;
pub const MAX_PER_PAGE: u64 = 100;

/// 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// `page <= 1` is the first page; `per_page` 0 falls back to the default
    /// and anything above `MAX_PER_PAGE` is capped.
    pub fn new(page: u64, per_page: u64) -> Self {
        let per_page = match per_page {
            0 => DEFAULT_PER_PAGE,
            n => n.min(MAX_PER_PAGE),
        };
        Self {
            page: page.max(1),
            per_page,
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }
}
