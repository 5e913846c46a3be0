//! # Stats Crate
//!
//! The aggregation and ranking engine over a user's evaluations.
//!
//! ## Components
//!
//! - **bucket**: `BucketAccumulator` (group-by counter) and the finalized `StatMap`
//! - **compose**: Full-stat composer for year, genre, country and language
//! - **decade**: Folds a per-year statistic into decade ranges
//! - **persons**: Per-person rates for a role, plus person profiles
//! - **lookup**: Single-property lookup with the matching evaluations
//! - **sort**: Mode-driven bucket and person ordering
//! - **modes**: Closed enums for dimensions and sort modes
//! - **config**: Thresholds, seeded year range and default modes
//! - **report**: Every breakdown at once, in parallel
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{EvaluationSnapshot, Role};
//! use stats::{compose_decade_stat, get_genre_stat, get_person_stat, SortMode};
//!
//! let snapshot = EvaluationSnapshot::load_from_file(path)?;
//! let evaluations = snapshot.records();
//!
//! let genres = get_genre_stat(evaluations, SortMode::QuantityDesc);
//! let decades = compose_decade_stat(evaluations, SortMode::KeyDesc);
//! let directors = get_person_stat(evaluations, Role::Director, SortMode::RatingDesc, 3);
//! ```
//!
//! Nothing here fails once the evaluations are loaded: unsupported inputs
//! log a warning and produce an empty result, and degenerate averages are
//! reported as 0 (empty bucket) or NaN (lookup without matches).

pub mod bucket;
pub mod compose;
pub mod config;
pub mod decade;
pub mod error;
pub mod lookup;
pub mod modes;
pub mod persons;
pub mod report;
pub mod sort;

// Re-export commonly used types
pub use bucket::{BucketAccumulator, BucketTally, StatBucket, StatEntry, StatMap, round_to};
pub use compose::{
    YearRange, compose_full_stat, get_country_stat, get_genre_stat, get_language_stat,
    get_year_stat, get_year_stat_in,
};
pub use config::{PersonThresholds, StatsConfig};
pub use decade::{compose_decade_stat, compose_decade_stat_in, fold_decades};
pub use error::{Result, StatsError};
pub use lookup::{PropertyLookup, get_single_property};
pub use modes::{Dimension, Direction, SortMode, TableSortMode, parse_role};
pub use persons::{
    Occupation, PersonProfile, PersonStat, compose_persons_rate, get_person_stat, person_profile,
};
pub use report::StatsReport;
pub use sort::{Ranked, sort_ranked, sort_stat, sort_stat_by_name};

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{EvaluationRecord, MovieSummary};

    #[test]
    fn test_stat_map_serializes_in_sort_order() {
        let evals: Vec<EvaluationRecord> = [("Drama", 9.0), ("Comedy", 6.0), ("Drama", 8.0)]
            .into_iter()
            .map(|(genre, rating)| EvaluationRecord {
                movie: MovieSummary {
                    genres: vec![genre.to_string()],
                    ..Default::default()
                },
                user_rating: rating,
                ..Default::default()
            })
            .collect();

        let stat = get_genre_stat(&evals, SortMode::KeyAsc);
        let json = serde_json::to_string(&stat).unwrap();
        assert_eq!(
            json,
            r#"{"Comedy":{"quantity":1,"percent":33.33,"rating":6.0},"Drama":{"quantity":2,"percent":66.67,"rating":8.5}}"#
        );
    }
}
