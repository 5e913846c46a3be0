//! Full-stat composer: group evaluations by one movie attribute.
//!
//! YEAR is single-valued (first four characters of the release year);
//! GENRE, COUNTRY and LANGUAGE are multi-valued, so one evaluation adds to
//! every value it lists. Multi-valued percentages are relative to the full
//! evaluation count, so they may sum past 100 (or fall short of it when some
//! movies list no value). YEAR percentages are relative to the evaluations
//! that carry a year.

use crate::bucket::{BucketAccumulator, StatMap};
use crate::modes::{Dimension, SortMode};
use crate::sort::sort_stat;
use chrono::Datelike;
use data_loader::EvaluationRecord;
use std::cmp::Ordering;
use std::ops::RangeInclusive;
use tracing::{debug, instrument, warn};

/// First year of the seeded YEAR range
pub const FIRST_SEEDED_YEAR: i32 = 1895;

/// Calendar years every YEAR statistic is seeded with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}

impl YearRange {
    pub fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    /// 1895 through next calendar year
    pub fn current() -> Self {
        Self::new(FIRST_SEEDED_YEAR, chrono::Local::now().year() + 1)
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.first..=self.last
    }

    /// Accumulator holding a zero bucket for every year in the range
    pub fn seed(&self) -> BucketAccumulator {
        BucketAccumulator::seeded(self.years().map(|year| year.to_string()))
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::current()
    }
}

/// Newest year first; keys that are not years go last
fn year_desc(a: &str, b: &str) -> Ordering {
    match (a.parse::<i32>(), b.parse::<i32>()) {
        (Ok(a), Ok(b)) => b.cmp(&a),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => Ordering::Equal,
    }
}

fn attribute_values(record: &EvaluationRecord, dimension: Dimension) -> &[String] {
    match dimension {
        Dimension::Genre => &record.movie.genres,
        Dimension::Country => &record.movie.countries,
        Dimension::Language => &record.movie.languages,
        _ => &[],
    }
}

/// Group `evaluations` by `dimension`, optionally on top of a seeded accumulator.
///
/// Supports YEAR, GENRE, COUNTRY and LANGUAGE. Any other dimension logs a
/// warning and returns `None`. YEAR results come back newest year first.
#[instrument(skip(evaluations, seed), fields(evaluations = evaluations.len()))]
pub fn compose_full_stat(
    evaluations: &[EvaluationRecord],
    dimension: Dimension,
    seed: Option<BucketAccumulator>,
) -> Option<StatMap> {
    let mut acc = seed.unwrap_or_default();
    let mut counted: u32 = 0;

    match dimension {
        Dimension::Year => {
            for record in evaluations {
                let key = record.movie.year_key();
                if !key.is_empty() {
                    acc.accumulate(key, record.user_rating, 1);
                    counted += 1;
                }
            }
            acc.sort_keys_by(year_desc);
        }
        Dimension::Genre | Dimension::Country | Dimension::Language => {
            for record in evaluations {
                for value in attribute_values(record, dimension) {
                    acc.accumulate(value, record.user_rating, 1);
                }
            }
            counted = u32::try_from(evaluations.len()).unwrap_or(u32::MAX);
        }
        other => {
            warn!("Cannot compose a full statistic by {}", other);
            return None;
        }
    }

    debug!(
        "Composed {} buckets from {} evaluations ({} counted)",
        acc.len(),
        evaluations.len(),
        counted
    );
    Some(acc.finalize(counted))
}

/// Year statistic over the default seeded range
pub fn get_year_stat(evaluations: &[EvaluationRecord], mode: SortMode) -> StatMap {
    get_year_stat_in(evaluations, mode, &YearRange::default())
}

/// Year statistic over `range`, sorted by `mode`, empty years dropped
pub fn get_year_stat_in(
    evaluations: &[EvaluationRecord],
    mode: SortMode,
    range: &YearRange,
) -> StatMap {
    compose_full_stat(evaluations, Dimension::Year, Some(range.seed()))
        .map(|stat| sort_stat(&stat, mode).without_empty())
        .unwrap_or_default()
}

fn get_attribute_stat(
    evaluations: &[EvaluationRecord],
    dimension: Dimension,
    mode: SortMode,
) -> StatMap {
    compose_full_stat(evaluations, dimension, None)
        .map(|stat| sort_stat(&stat, mode))
        .unwrap_or_default()
}

pub fn get_genre_stat(evaluations: &[EvaluationRecord], mode: SortMode) -> StatMap {
    get_attribute_stat(evaluations, Dimension::Genre, mode)
}

pub fn get_country_stat(evaluations: &[EvaluationRecord], mode: SortMode) -> StatMap {
    get_attribute_stat(evaluations, Dimension::Country, mode)
}

pub fn get_language_stat(evaluations: &[EvaluationRecord], mode: SortMode) -> StatMap {
    get_attribute_stat(evaluations, Dimension::Language, mode)
}
