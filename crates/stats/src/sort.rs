//! Sort engine for bucket maps and person rankings.
//!
//! Each mode has a primary key and a tie-break in the same direction:
//!
//! | mode       | primary  | tie-break |
//! |------------|----------|-----------|
//! | key-*      | key      | (none)    |
//! | quantity-* | quantity | rating    |
//! | rating-*   | rating   | quantity  |
//!
//! Sorting is stable and never touches its input; a new collection is
//! returned every time.

use crate::bucket::{StatEntry, StatMap};
use crate::modes::{Direction, SortMode};
use std::cmp::Ordering;
use tracing::warn;

/// Anything the sort engine can order
pub trait Ranked {
    /// Text compared by the key modes
    fn sort_key(&self) -> &str;
    fn quantity(&self) -> u32;
    fn rating(&self) -> f64;
}

impl Ranked for StatEntry {
    fn sort_key(&self) -> &str {
        &self.key
    }

    fn quantity(&self) -> u32 {
        self.bucket.quantity
    }

    fn rating(&self) -> f64 {
        self.bucket.rating
    }
}

fn by_quantity<T: Ranked>(a: &T, b: &T) -> Ordering {
    a.quantity()
        .cmp(&b.quantity())
        .then_with(|| a.rating().total_cmp(&b.rating()))
}

fn by_rating<T: Ranked>(a: &T, b: &T) -> Ordering {
    a.rating()
        .total_cmp(&b.rating())
        .then_with(|| a.quantity().cmp(&b.quantity()))
}

/// Return `items` ordered by `mode`
pub fn sort_ranked<T: Ranked + Clone>(items: &[T], mode: SortMode) -> Vec<T> {
    let mut sorted = items.to_vec();
    match mode {
        SortMode::KeyAsc => sorted.sort_by(|a, b| a.sort_key().cmp(b.sort_key())),
        SortMode::KeyDesc => {
            sorted.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
            sorted.reverse();
        }
        SortMode::QuantityAsc | SortMode::QuantityDesc => {
            sorted.sort_by(|a, b| oriented(by_quantity(a, b), mode.direction()))
        }
        SortMode::RatingAsc | SortMode::RatingDesc => {
            sorted.sort_by(|a, b| oriented(by_rating(a, b), mode.direction()))
        }
    }
    sorted
}

fn oriented(ordering: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

/// Return a copy of `map` ordered by `mode`
pub fn sort_stat(map: &StatMap, mode: SortMode) -> StatMap {
    StatMap::from_entries(sort_ranked(map.entries(), mode))
}

/// Sort by a mode name; an unknown name leaves the order unchanged
pub fn sort_stat_by_name(map: &StatMap, mode: &str) -> StatMap {
    match mode.parse::<SortMode>() {
        Ok(mode) => sort_stat(map, mode),
        Err(err) => {
            warn!("{}; keeping current order", err);
            map.clone()
        }
    }
}
