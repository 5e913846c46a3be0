//! Error types for the stats crate.
//!
//! Aggregation itself never fails. These errors only come from the string
//! boundary (parsing a dimension, mode or role name) and from reading
//! configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    /// Name does not match any dimension
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    /// Name does not match any bucket sort mode
    #[error("Unknown sort mode: {0}")]
    UnknownSortMode(String),

    /// Name does not match any movie table sort mode
    #[error("Unknown table sort mode: {0}")]
    UnknownTableSortMode(String),

    /// Name does not match any person role
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Configuration file could not be read or parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StatsError>;
