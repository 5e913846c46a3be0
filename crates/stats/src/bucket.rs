//! Bucket accumulation and finalization.
//!
//! Every aggregator in this crate works in two phases:
//!
//! 1. **Accumulate**: walk the evaluations and add `(rating, increment)` pairs
//!    into a [`BucketAccumulator`] keyed by the grouping value.
//! 2. **Finalize**: turn each tally into a [`StatBucket`] with a percentage of
//!    the running total and an average rating, producing a [`StatMap`].
//!
//! The accumulator keeps insertion order, so a seeded accumulator (all years
//! of a range, say) finalizes into a map with the seed order intact.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Decimal places of bucket ratings and of displayed percentages
pub const BUCKET_PRECISION: u32 = 2;

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

// =============================================================================
// Accumulation
// =============================================================================

/// Running sums for one key
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BucketTally {
    pub quantity: u32,
    pub rating_sum: f64,
}

/// Insertion-ordered group-by counter.
///
/// `total` counts every increment accepted across all keys. For multi-valued
/// dimensions one evaluation adds to several keys, so the composer reads the
/// evaluation count from the caller rather than from `total`.
#[derive(Debug, Clone, Default)]
pub struct BucketAccumulator {
    entries: Vec<(String, BucketTally)>,
    index: HashMap<String, usize>,
    total: u32,
}

impl BucketAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulator pre-filled with zero tallies for `keys`, in order
    pub fn seeded<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut acc = Self::new();
        for key in keys {
            acc.slot(key.into());
        }
        acc
    }

    /// Add `increment` to the quantity of `key` and `rating` to its rating sum.
    ///
    /// Empty keys are skipped. Returns the running total across all keys.
    pub fn accumulate(&mut self, key: &str, rating: f64, increment: u32) -> u32 {
        if key.is_empty() {
            return self.total;
        }
        let slot = self.slot(key.to_string());
        let tally = &mut self.entries[slot].1;
        tally.quantity += increment;
        tally.rating_sum += rating;
        self.total += increment;
        self.total
    }

    fn slot(&mut self, key: String) -> usize {
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.entries.len();
        self.index.insert(key.clone(), idx);
        self.entries.push((key, BucketTally::default()));
        idx
    }

    pub fn get(&self, key: &str) -> Option<&BucketTally> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BucketTally)> {
        self.entries.iter().map(|(key, tally)| (key.as_str(), tally))
    }

    /// Reorder entries with a stable sort on the keys
    pub fn sort_keys_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        self.entries.sort_by(|a, b| compare(&a.0, &b.0));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, (key, _))| (key.clone(), idx))
            .collect();
    }

    /// Convert sums into percentages and averages.
    ///
    /// percent = quantity / total * 100, kept exact so percentages still sum
    /// to 100; rating = rating_sum / quantity, rounded to two decimals. A zero
    /// total gives 0.0 percent and a zero quantity gives a 0.0 rating. Order
    /// is preserved.
    pub fn finalize(&self, total: u32) -> StatMap {
        let entries = self
            .entries
            .iter()
            .map(|(key, tally)| StatEntry {
                key: key.clone(),
                bucket: StatBucket::from_tally(tally, total),
            })
            .collect();
        StatMap { entries }
    }
}

impl From<&StatMap> for BucketAccumulator {
    /// Rebuild tallies from finished buckets, weighting each rating by its quantity
    fn from(map: &StatMap) -> Self {
        let mut acc = Self::new();
        for entry in map.iter() {
            let slot = acc.slot(entry.key.clone());
            acc.entries[slot].1 = BucketTally {
                quantity: entry.bucket.quantity,
                rating_sum: entry.bucket.rating * f64::from(entry.bucket.quantity),
            };
            acc.total += entry.bucket.quantity;
        }
        acc
    }
}

// =============================================================================
// Finished buckets
// =============================================================================

/// One finished statistic
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatBucket {
    pub quantity: u32,
    /// Unrounded; see [`StatBucket::percent_label`]
    #[serde(serialize_with = "serialize_rounded")]
    pub percent: f64,
    pub rating: f64,
}

fn serialize_rounded<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, BUCKET_PRECISION))
}

impl StatBucket {
    fn from_tally(tally: &BucketTally, total: u32) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            f64::from(tally.quantity) / f64::from(total) * 100.0
        };
        let rating = if tally.quantity == 0 {
            0.0
        } else {
            round_to(tally.rating_sum / f64::from(tally.quantity), BUCKET_PRECISION)
        };
        Self {
            quantity: tally.quantity,
            percent,
            rating,
        }
    }

    pub fn percent_label(&self) -> String {
        format!("{:.2}", self.percent)
    }

    /// Fixed two-decimal rating; an empty bucket shows a bare "0"
    pub fn rating_label(&self) -> String {
        if self.quantity == 0 {
            "0".to_string()
        } else {
            format!("{:.2}", self.rating)
        }
    }
}

impl fmt::Display for StatBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}%, rating {})",
            self.quantity,
            self.percent_label(),
            self.rating_label()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub key: String,
    pub bucket: StatBucket,
}

/// Ordered key -> bucket mapping; iteration order is the last applied sort
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatMap {
    entries: Vec<StatEntry>,
}

impl StatMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<StatEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&StatBucket> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.bucket)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StatEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[StatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of quantities over all buckets
    pub fn total_quantity(&self) -> u32 {
        self.entries.iter().map(|entry| entry.bucket.quantity).sum()
    }

    /// Copy without the zero-quantity buckets
    pub fn without_empty(&self) -> StatMap {
        self.entries
            .iter()
            .filter(|entry| entry.bucket.quantity > 0)
            .cloned()
            .collect()
    }
}

impl FromIterator<StatEntry> for StatMap {
    fn from_iter<T: IntoIterator<Item = StatEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for StatMap {
    type Item = StatEntry;
    type IntoIter = std::vec::IntoIter<StatEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a StatMap {
    type Item = &'a StatEntry;
    type IntoIter = std::slice::Iter<'a, StatEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// Serialized as a JSON object whose key order follows the current sort
impl Serialize for StatMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.bucket)?;
        }
        map.end()
    }
}
