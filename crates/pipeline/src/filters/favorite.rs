//! Filter on the favorite flag.

use crate::traits::Filter;
use data_loader::EvaluationRecord;

pub struct FavoriteFilter {
    favorite: bool,
}

impl FavoriteFilter {
    pub fn new(favorite: bool) -> Self {
        Self { favorite }
    }

    /// "false" selects non-favorites; any other value selects favorites
    pub fn parse(value: &str) -> Self {
        Self::new(!value.trim().eq_ignore_ascii_case("false"))
    }
}

impl Filter for FavoriteFilter {
    fn name(&self) -> &str {
        "FavoriteFilter"
    }

    fn apply<'a>(&self, rows: Vec<&'a EvaluationRecord>) -> Vec<&'a EvaluationRecord> {
        rows.into_iter()
            .filter(|record| record.is_favorite == self.favorite)
            .collect()
    }
}
