//! Movie table sorting and filtering.
//!
//! This crate provides:
//! - Filter trait and one implementation per filterable dimension
//! - FilterPipeline for composing filters
//! - Table functions that sort and filter the raw evaluation list
//!
//! ## Architecture
//! The movie table is built in stages:
//! 1. Rows are put in recency order, then sorted by the requested mode
//! 2. The requested filter (if any) runs through a FilterPipeline
//! 3. The remaining rows are borrowed evaluations, ready to render
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{movie_table, FilterPipeline};
//! use pipeline::filters::*;
//! use stats::{Dimension, TableSortMode};
//!
//! // Sorted and filtered in one call
//! let rows = movie_table(snapshot.records(), TableSortMode::UserRatingDesc,
//!     Some((Dimension::Genre, "Drama")));
//!
//! // Or compose filters by hand
//! let pipeline = FilterPipeline::new()
//!     .add_filter(FavoriteFilter::new(true))
//!     .add_filter(DecadeFilter::new(1990, 1999));
//! let favorites = pipeline.apply(snapshot.records().iter().collect());
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod table;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use table::{
    default_sort_recent, filter_for, filter_movie_table, filter_movie_table_by_name, movie_table,
    sort_movie_table,
};
pub use traits::Filter;
