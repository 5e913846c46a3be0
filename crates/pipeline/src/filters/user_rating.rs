//! Filter on the user's own rating.

use crate::traits::Filter;
use data_loader::EvaluationRecord;

/// Keeps evaluations rated exactly `rating`.
pub struct UserRatingFilter {
    rating: f64,
}

impl UserRatingFilter {
    pub fn new(rating: f64) -> Self {
        Self { rating }
    }

    /// Parse a rating such as "8" or "7.5"; `None` if it is not a number
    pub fn parse(value: &str) -> Option<Self> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|rating| rating.is_finite())
            .map(Self::new)
    }
}

impl Filter for UserRatingFilter {
    fn name(&self) -> &str {
        "UserRatingFilter"
    }

    fn apply<'a>(&self, rows: Vec<&'a EvaluationRecord>) -> Vec<&'a EvaluationRecord> {
        rows.into_iter()
            .filter(|record| (record.user_rating - self.rating).abs() < f64::EPSILON)
            .collect()
    }
}
