//! Filters on the release year.
//!
//! `ReleaseYearFilter` matches one year; `DecadeFilter` matches an
//! inclusive range written the way decade buckets are keyed ("2010-2019",
//! or a single year like "2020").

use crate::traits::Filter;
use data_loader::{EvaluationRecord, normalize_year, year_key};

pub struct ReleaseYearFilter {
    year: String,
}

impl ReleaseYearFilter {
    pub fn new(year: &str) -> Self {
        Self {
            year: year_key(year).to_string(),
        }
    }
}

impl Filter for ReleaseYearFilter {
    fn name(&self) -> &str {
        "ReleaseYearFilter"
    }

    fn apply<'a>(&self, rows: Vec<&'a EvaluationRecord>) -> Vec<&'a EvaluationRecord> {
        rows.into_iter()
            .filter(|record| record.movie.year_key() == self.year)
            .collect()
    }
}

/// Keeps evaluations released between `start` and `end`, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecadeFilter {
    start: i32,
    end: i32,
}

impl DecadeFilter {
    pub fn new(start: i32, end: i32) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Parse a decade key: "start-end" or a single year
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let (start, end) = value.split_once('-').unwrap_or((value, value));
        let start = start.trim().parse::<i32>().ok()?;
        let end = end.trim().parse::<i32>().ok()?;
        Some(Self::new(start, end))
    }
}

impl Filter for DecadeFilter {
    fn name(&self) -> &str {
        "DecadeFilter"
    }

    fn apply<'a>(&self, rows: Vec<&'a EvaluationRecord>) -> Vec<&'a EvaluationRecord> {
        rows.into_iter()
            .filter(|record| {
                let year = normalize_year(&record.movie.year);
                year != 0 && (self.start..=self.end).contains(&year)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{create_test_records, titles};

    #[test]
    fn test_release_year_filter() {
        let records = create_test_records();

        let rows = ReleaseYearFilter::new("1995").apply(records.iter().collect());
        assert_eq!(titles(&rows), vec!["Heat"]);
    }

    #[test]
    fn test_decade_filter() {
        let records = create_test_records();

        let rows = DecadeFilter::parse("1990-2009").unwrap().apply(records.iter().collect());
        assert_eq!(titles(&rows), vec!["Heat", "Amelie"]);

        let single = DecadeFilter::parse("2017").unwrap().apply(records.iter().collect());
        assert_eq!(titles(&single), vec!["Dark"]);
    }

    #[test]
    fn test_decade_parse() {
        assert_eq!(DecadeFilter::parse("2010-2019"), Some(DecadeFilter::new(2010, 2019)));
        assert_eq!(DecadeFilter::parse("2019-2010"), Some(DecadeFilter::new(2010, 2019)));
        assert!(DecadeFilter::parse("the nineties").is_none());
        assert!(DecadeFilter::parse("2010-").is_none());
    }
}
