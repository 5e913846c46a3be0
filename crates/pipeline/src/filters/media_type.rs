//! Filter on the kind of title (movie or TV series).

use crate::traits::Filter;
use data_loader::{EvaluationRecord, MediaType};

pub struct MediaTypeFilter {
    media_type: MediaType,
}

impl MediaTypeFilter {
    pub fn new(media_type: MediaType) -> Self {
        Self { media_type }
    }

    /// Accepts "movie" or "tv"
    pub fn parse(value: &str) -> Option<Self> {
        value.parse::<MediaType>().ok().map(Self::new)
    }
}

impl Filter for MediaTypeFilter {
    fn name(&self) -> &str {
        "MediaTypeFilter"
    }

    fn apply<'a>(&self, rows: Vec<&'a EvaluationRecord>) -> Vec<&'a EvaluationRecord> {
        rows.into_iter()
            .filter(|record| record.movie.media_type == self.media_type)
            .collect()
    }
}
