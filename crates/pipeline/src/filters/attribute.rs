//! Membership filter on the multi-valued movie attributes.

use crate::traits::Filter;
use data_loader::EvaluationRecord;

/// Multi-valued attributes a movie lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Genre,
    Country,
    Language,
}

impl Attribute {
    fn values(self, record: &EvaluationRecord) -> &[String] {
        match self {
            Attribute::Genre => &record.movie.genres,
            Attribute::Country => &record.movie.countries,
            Attribute::Language => &record.movie.languages,
        }
    }
}

/// Keeps evaluations whose movie lists `value` under the attribute.
///
/// Values are compared exactly ("Drama" does not match "drama").
pub struct AttributeFilter {
    attribute: Attribute,
    value: String,
}

impl AttributeFilter {
    pub fn new(attribute: Attribute, value: impl Into<String>) -> Self {
        Self {
            attribute,
            value: value.into(),
        }
    }
}

impl Filter for AttributeFilter {
    fn name(&self) -> &str {
        match self.attribute {
            Attribute::Genre => "GenreFilter",
            Attribute::Country => "CountryFilter",
            Attribute::Language => "LanguageFilter",
        }
    }

    fn apply<'a>(&self, rows: Vec<&'a EvaluationRecord>) -> Vec<&'a EvaluationRecord> {
        rows.into_iter()
            .filter(|record| {
                self.attribute
                    .values(record)
                    .iter()
                    .any(|value| *value == self.value)
            })
            .collect()
    }
}
