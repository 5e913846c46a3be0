//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! table filters together using the builder pattern.

use crate::traits::Filter;
use data_loader::EvaluationRecord;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(FavoriteFilter::new(true))
///     .add_filter(AttributeFilter::new(Attribute::Genre, "Drama"));
///
/// let rows = pipeline.apply(snapshot.records().iter().collect());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(self, filter: impl Filter + 'static) -> Self {
        self.add_boxed(Box::new(filter))
    }

    /// Add an already boxed filter, e.g. one chosen at runtime.
    pub fn add_boxed(mut self, filter: Box<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the rows.
    ///
    /// ## Algorithm
    /// 1. Start with the input rows
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return the remaining rows
    pub fn apply<'a>(&self, rows: Vec<&'a EvaluationRecord>) -> Vec<&'a EvaluationRecord> {
        let mut current = rows;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{FavoriteFilter, UserRatingFilter};

    fn create_test_rows() -> Vec<EvaluationRecord> {
        vec![
            EvaluationRecord {
                user_rating: 9.0,
                is_favorite: true,
                ..Default::default()
            },
            EvaluationRecord {
                user_rating: 9.0,
                ..Default::default()
            },
            EvaluationRecord {
                user_rating: 6.0,
                is_favorite: true,
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_empty_pipeline() {
        let records = create_test_rows();
        let pipeline = FilterPipeline::new();

        let rows = pipeline.apply(records.iter().collect());
        assert_eq!(rows.len(), 3);
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_filters_compose() {
        let records = create_test_rows();
        let pipeline = FilterPipeline::new()
            .add_filter(FavoriteFilter::new(true))
            .add_filter(UserRatingFilter::new(9.0));

        let rows = pipeline.apply(records.iter().collect());
        assert_eq!(pipeline.len(), 2);
        assert_eq!(rows.len(), 1);
        assert!(std::ptr::eq(rows[0], &records[0]));
    }
}
