//! Single-property lookup: every evaluation matching one value of one
//! dimension, with its count and average rating.

use crate::bucket::round_to;
use crate::modes::Dimension;
use data_loader::{EvaluationRecord, MediaType};
use serde::Serialize;
use tracing::{instrument, warn};

/// Lookup ratings carry one more decimal than bucket ratings
pub const LOOKUP_PRECISION: u32 = 3;

/// Result of [`get_single_property`]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyLookup<'a> {
    pub search_item: String,
    pub dimension: Dimension,
    pub quantity: u32,
    /// NaN when nothing matched
    pub rating: f64,
    /// Matching evaluations in input order
    pub films: Vec<&'a EvaluationRecord>,
}

impl PropertyLookup<'_> {
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}

fn is_searchable(dimension: Dimension) -> bool {
    !matches!(
        dimension,
        Dimension::Decade | Dimension::UserRating | Dimension::Favorite
    )
}

fn matches_value(record: &EvaluationRecord, value: &str, dimension: Dimension) -> bool {
    let movie = &record.movie;
    match dimension {
        Dimension::Year => movie.year_key() == value,
        Dimension::Type => value.parse::<MediaType>().ok() == Some(movie.media_type),
        Dimension::Genre => movie.genres.iter().any(|genre| genre == value),
        Dimension::Country => movie.countries.iter().any(|country| country == value),
        Dimension::Language => movie.languages.iter().any(|language| language == value),
        Dimension::Director
        | Dimension::Writer
        | Dimension::Producer
        | Dimension::Composer
        | Dimension::Actor => dimension.role().is_some_and(|role| {
            movie
                .people(role)
                .any(|person| person.canonical_id() == Some(value))
        }),
        Dimension::Decade | Dimension::UserRating | Dimension::Favorite => false,
    }
}

/// Collect the evaluations whose `dimension` matches `value`.
///
/// Year compares the four-digit year key, type the media type, and the
/// multi-valued attributes test membership. Person roles compare canonical
/// person IDs, never names. Each evaluation counts once.
///
/// Returns `None` for dimensions without a lookup (decade, user rating,
/// favorite). No match is not an error: quantity is 0 and rating NaN.
#[instrument(skip(evaluations), fields(evaluations = evaluations.len()))]
pub fn get_single_property<'a>(
    evaluations: &'a [EvaluationRecord],
    value: &str,
    dimension: Dimension,
) -> Option<PropertyLookup<'a>> {
    if !is_searchable(dimension) {
        warn!("Lookup by {} is not supported", dimension);
        return None;
    }

    let value = value.trim();
    let films: Vec<&EvaluationRecord> = evaluations
        .iter()
        .filter(|record| matches_value(record, value, dimension))
        .collect();
    let rating_sum: f64 = films.iter().map(|record| record.user_rating).sum();

    let quantity = films.len() as u32;
    if quantity == 0 {
        warn!("No evaluations match {} = {:?}", dimension, value);
    }
    let rating = round_to(rating_sum / f64::from(quantity), LOOKUP_PRECISION);

    Some(PropertyLookup {
        search_item: value.to_string(),
        dimension,
        quantity,
        rating,
        films,
    })
}
