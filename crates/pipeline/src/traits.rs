//! Core traits for the movie table.
//!
//! This module defines the Filter trait that lets table filters be
//! composed and applied one after another.

use data_loader::EvaluationRecord;

/// Core trait for filtering movie table rows.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across threads
/// - Filters take ownership of the row list and return the rows they keep
/// - Rows are borrowed evaluations, so filtering never copies a record
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Keep the rows that pass this filter, in their current order.
    fn apply<'a>(&self, rows: Vec<&'a EvaluationRecord>) -> Vec<&'a EvaluationRecord>;
}
