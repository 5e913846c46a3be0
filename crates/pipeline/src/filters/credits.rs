//! Filter on the people credited under a role.

use crate::traits::Filter;
use data_loader::{EvaluationRecord, Role};

/// Keeps evaluations where someone credited under `role` has a name
/// containing the search text (case-sensitive).
pub struct CreditFilter {
    role: Role,
    name: String,
    label: String,
}

impl CreditFilter {
    pub fn new(role: Role, name: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
            label: format!("CreditFilter({})", role),
        }
    }
}

impl Filter for CreditFilter {
    fn name(&self) -> &str {
        &self.label
    }

    fn apply<'a>(&self, rows: Vec<&'a EvaluationRecord>) -> Vec<&'a EvaluationRecord> {
        rows.into_iter()
            .filter(|record| {
                record
                    .movie
                    .people(self.role)
                    .any(|person| person.name.contains(self.name.as_str()))
            })
            .collect()
    }
}
