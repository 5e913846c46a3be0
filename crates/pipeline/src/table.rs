//! Movie table: the raw evaluation list, sorted and filtered.
//!
//! Unlike the bucket statistics this works on the evaluations themselves.
//! Every function borrows the caller's slice and returns a new list of
//! references, so the caller's order is never touched.
//!
//! ## Sorting
//! Rows are first put in recency order (latest rating change first), then
//! stably sorted by the requested mode. Composite modes break ties on a
//! second key in the same direction:
//!
//! | mode          | primary         | tie-break       |
//! |---------------|-----------------|-----------------|
//! | imdb-rating-* | external rating | vote count      |
//! | imdb-evalnum-*| vote count      | external rating |

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{
    Attribute, AttributeFilter, CreditFilter, DecadeFilter, FavoriteFilter, MediaTypeFilter,
    ReleaseYearFilter, UserRatingFilter,
};
use crate::traits::Filter;
use data_loader::EvaluationRecord;
use stats::{Dimension, Direction, TableSortMode};
use std::cmp::Ordering;
use tracing::{debug, instrument, warn};

/// Evaluations ordered by latest rating change, newest first
pub fn default_sort_recent(evaluations: &[EvaluationRecord]) -> Vec<&EvaluationRecord> {
    let mut rows: Vec<&EvaluationRecord> = evaluations.iter().collect();
    rows.sort_by(|a, b| b.last_changed_at().cmp(&a.last_changed_at()));
    rows
}

fn compare(a: &EvaluationRecord, b: &EvaluationRecord, mode: TableSortMode) -> Ordering {
    let (ma, mb) = (&a.movie, &b.movie);
    match mode {
        TableSortMode::EvalDatetimeAsc | TableSortMode::EvalDatetimeDesc => {
            a.last_changed_at().cmp(&b.last_changed_at())
        }
        TableSortMode::UserRatingAsc | TableSortMode::UserRatingDesc => {
            a.user_rating.total_cmp(&b.user_rating)
        }
        TableSortMode::YearAsc | TableSortMode::YearDesc => {
            ma.release_year().cmp(&mb.release_year())
        }
        TableSortMode::ImdbRatingAsc | TableSortMode::ImdbRatingDesc => ma
            .external_rating_value()
            .total_cmp(&mb.external_rating_value())
            .then_with(|| ma.external_votes_value().cmp(&mb.external_votes_value())),
        TableSortMode::ImdbEvalnumAsc | TableSortMode::ImdbEvalnumDesc => ma
            .external_votes_value()
            .cmp(&mb.external_votes_value())
            .then_with(|| {
                ma.external_rating_value()
                    .total_cmp(&mb.external_rating_value())
            }),
    }
}

/// Sort the movie table by `mode`
pub fn sort_movie_table(
    evaluations: &[EvaluationRecord],
    mode: TableSortMode,
) -> Vec<&EvaluationRecord> {
    let mut rows = default_sort_recent(evaluations);
    if mode == TableSortMode::EvalDatetimeDesc {
        return rows;
    }
    rows.sort_by(|a, b| {
        let ordering = compare(a, b, mode);
        match mode.direction() {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    });
    rows
}

fn boxed(filter: impl Filter + 'static) -> Box<dyn Filter> {
    Box::new(filter)
}

/// Build the filter for `dimension` = `value`.
///
/// `None` means "no filtering": an empty value, a value that does not parse
/// for the dimension (logged), or a dimension the table cannot filter by.
pub fn filter_for(dimension: Dimension, value: &str) -> Option<Box<dyn Filter>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let filter = match dimension {
        Dimension::UserRating => UserRatingFilter::parse(value).map(boxed),
        Dimension::Favorite => Some(boxed(FavoriteFilter::parse(value))),
        Dimension::Genre => Some(boxed(AttributeFilter::new(Attribute::Genre, value))),
        Dimension::Country => Some(boxed(AttributeFilter::new(Attribute::Country, value))),
        Dimension::Language => Some(boxed(AttributeFilter::new(Attribute::Language, value))),
        Dimension::Year => Some(boxed(ReleaseYearFilter::new(value))),
        Dimension::Type => MediaTypeFilter::parse(value).map(boxed),
        Dimension::Decade => DecadeFilter::parse(value).map(boxed),
        Dimension::Director
        | Dimension::Writer
        | Dimension::Producer
        | Dimension::Composer
        | Dimension::Actor => dimension
            .role()
            .map(|role| boxed(CreditFilter::new(role, value))),
    };

    if filter.is_none() {
        warn!("Ignoring filter {} = {:?}: value not understood", dimension, value);
    }
    filter
}

/// Filter rows by one dimension; no dimension or an empty value keeps every row
pub fn filter_movie_table<'a>(
    rows: Vec<&'a EvaluationRecord>,
    dimension: Option<Dimension>,
    value: &str,
) -> Vec<&'a EvaluationRecord> {
    let Some(dimension) = dimension else {
        debug!("No table filter requested");
        return rows;
    };
    match filter_for(dimension, value) {
        Some(filter) => FilterPipeline::new().add_boxed(filter).apply(rows),
        None => rows,
    }
}

/// Filter rows by dimension name ("genres", "cast", "isFavorite", ...).
///
/// An empty name is no filter; an unknown name is logged and ignored.
pub fn filter_movie_table_by_name<'a>(
    rows: Vec<&'a EvaluationRecord>,
    dimension: &str,
    value: &str,
) -> Vec<&'a EvaluationRecord> {
    if dimension.trim().is_empty() {
        return filter_movie_table(rows, None, value);
    }
    match dimension.parse::<Dimension>() {
        Ok(dimension) => filter_movie_table(rows, Some(dimension), value),
        Err(err) => {
            warn!("{}; table left unfiltered", err);
            rows
        }
    }
}

/// Sort then filter: the rows of the movie table view
#[instrument(skip(evaluations), fields(evaluations = evaluations.len()))]
pub fn movie_table<'a>(
    evaluations: &'a [EvaluationRecord],
    mode: TableSortMode,
    filter: Option<(Dimension, &str)>,
) -> Vec<&'a EvaluationRecord> {
    let rows = sort_movie_table(evaluations, mode);
    match filter {
        Some((dimension, value)) => filter_movie_table(rows, Some(dimension), value),
        None => rows,
    }
}
