//! # Data Loader Crate
//!
//! This crate owns the evaluation data model and the ingestion boundary:
//! loading an exported evaluation snapshot into memory.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (EvaluationRecord, MovieSummary, Credit, PersonRef)
//! - **parser**: Value normalization (years, votes, dates, profile IDs) and snapshot decoding
//! - **snapshot**: `EvaluationSnapshot`, the loaded and validated collection
//! - **cache**: `PersonCache`, a bounded LRU used while resolving person references
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::EvaluationSnapshot;
//! use std::path::Path;
//!
//! let snapshot = EvaluationSnapshot::load_from_file(Path::new("data/evaluations.json"))?;
//! let counts = snapshot.counts();
//!
//! println!("{} evaluations, {} favorites", counts.evaluations, counts.favorites);
//! ```

// Public modules
pub mod cache;
pub mod error;
pub mod parser;
pub mod snapshot;
pub mod types;

// Re-export commonly used types for convenience
pub use cache::{PersonCache, PersonSource};
pub use error::{DataLoadError, Result};
pub use parser::{
    extract_profile_id, format_num, normalize_rating, normalize_votes, normalize_year,
    parse_eval_date, year_key,
};
pub use snapshot::{EvaluationSnapshot, SnapshotCounts};
pub use types::{Credit, EvaluationRecord, MediaType, MovieSummary, PersonRef, Role};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_creation() {
        let snapshot = EvaluationSnapshot::default();
        let counts = snapshot.counts();

        assert_eq!(counts.evaluations, 0);
        assert_eq!(counts.movies, 0);
        assert_eq!(counts.favorites, 0);
        assert!(snapshot.records().is_empty());
    }

    #[test]
    fn test_insert_record() {
        let mut snapshot = EvaluationSnapshot::default();

        let record = EvaluationRecord {
            movie: MovieSummary {
                title: "Toy Story".to_string(),
                media_type: MediaType::Movie,
                year: "1995".to_string(),
                genres: vec!["Animation".to_string(), "Comedy".to_string()],
                ..Default::default()
            },
            user_rating: 8.0,
            user_eval_date: "2024-05-01T12:00:00Z".to_string(),
            ..Default::default()
        };

        snapshot.insert_record(record);

        let retrieved = &snapshot.records()[0];
        assert_eq!(retrieved.movie.release_year(), 1995);
        assert_eq!(retrieved.movie.genres.len(), 2);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_unresolved_queries() {
        let snapshot = EvaluationSnapshot::default();

        assert!(snapshot.get_person("p999").is_none());
        assert!(extract_profile_id("not a url").is_none());
        assert_eq!(normalize_year("unknown"), 0);
    }
}
