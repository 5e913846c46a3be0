//! Decade bucketing.
//!
//! A complete per-year statistic is scanned once and consecutive years are
//! folded into decade groups. A group is flushed when the next year falls in
//! another decade (years divisible by 10 open a decade) or the scan ends.
//!
//! The scan runs in whichever direction the year statistic is ordered.
//! Group labels are clipped to the years that actually hold evaluations:
//!
//! - one year with data: `"2020"`
//! - several: `"2010-2014"`, lowest year first in either direction
//!
//! Group ratings are quantity-weighted: the sum of `rating * quantity` over
//! the folded years, divided by the group quantity.

use crate::bucket::{BucketAccumulator, StatBucket, StatMap};
use crate::compose::{YearRange, compose_full_stat};
use crate::modes::{Dimension, SortMode};
use crate::sort::sort_stat;
use data_loader::EvaluationRecord;
use tracing::{debug, instrument};

/// Order of the year statistic being scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    Ascending,
    Descending,
}

impl ScanDirection {
    /// Compare the first and last years; a single year scans ascending
    fn detect(years: &[(i32, StatBucket)]) -> Option<Self> {
        let first = years.first()?.0;
        let last = years.last()?.0;
        if first > last {
            Some(ScanDirection::Descending)
        } else {
            Some(ScanDirection::Ascending)
        }
    }
}

fn decade_of(year: i32) -> i32 {
    year - year.rem_euclid(10)
}

/// Years of one decade seen so far in the scan
#[derive(Debug, Default)]
struct DecadeGroup {
    quantity: u32,
    rating_sum: f64,
    lowest: Option<i32>,
    highest: Option<i32>,
}

impl DecadeGroup {
    fn add(&mut self, year: i32, bucket: &StatBucket) {
        if bucket.quantity == 0 {
            return;
        }
        self.quantity += bucket.quantity;
        self.rating_sum += bucket.rating * f64::from(bucket.quantity);
        self.lowest = Some(self.lowest.map_or(year, |low| low.min(year)));
        self.highest = Some(self.highest.map_or(year, |high| high.max(year)));
    }

    fn label(&self) -> Option<String> {
        match (self.lowest?, self.highest?) {
            (low, high) if low == high => Some(low.to_string()),
            (low, high) => Some(format!("{}-{}", low, high)),
        }
    }

    /// Move the group into `decades`, leaving an empty group behind
    fn flush(&mut self, decades: &mut BucketAccumulator) {
        let group = std::mem::take(self);
        if let Some(label) = group.label() {
            decades.accumulate(&label, group.rating_sum, group.quantity);
        }
    }
}

/// Fold a per-year statistic (ascending or descending) into decade buckets.
///
/// Keys that are not years are ignored. The result is finalized against the
/// summed quantity and holds no empty buckets; it is in scan order.
pub fn fold_decades(year_stat: &StatMap) -> StatMap {
    let years: Vec<(i32, StatBucket)> = year_stat
        .iter()
        .filter_map(|entry| entry.key.parse::<i32>().ok().map(|year| (year, entry.bucket)))
        .collect();

    let Some(direction) = ScanDirection::detect(&years) else {
        return StatMap::new();
    };
    debug!("Folding {} years into decades ({:?})", years.len(), direction);

    let mut decades = BucketAccumulator::new();
    let mut group = DecadeGroup::default();

    for (idx, (year, bucket)) in years.iter().enumerate() {
        group.add(*year, bucket);

        let boundary = match years.get(idx + 1) {
            Some((next, _)) => decade_of(*next) != decade_of(*year),
            None => true,
        };
        if boundary {
            group.flush(&mut decades);
        }
    }

    decades.finalize(decades.total()).without_empty()
}

/// Decade statistic over the default seeded year range
pub fn compose_decade_stat(evaluations: &[EvaluationRecord], mode: SortMode) -> StatMap {
    compose_decade_stat_in(evaluations, mode, &YearRange::default())
}

#[instrument(skip(evaluations, range), fields(evaluations = evaluations.len()))]
pub fn compose_decade_stat_in(
    evaluations: &[EvaluationRecord],
    mode: SortMode,
    range: &YearRange,
) -> StatMap {
    match compose_full_stat(evaluations, Dimension::Year, Some(range.seed())) {
        Some(year_stat) => sort_stat(&fold_decades(&year_stat), mode),
        None => StatMap::new(),
    }
}
