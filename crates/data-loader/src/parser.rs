//! Parsing and normalization of raw evaluation values.
//!
//! Stored documents keep most values as loosely formatted strings: years
//! may be full release dates, vote counts carry thousands separators, and
//! evaluation dates come in more than one layout. Every helper here is
//! total: malformed input yields a neutral value (0, `None`) rather than an
//! error, so a single bad record only degrades its own bucket.

use crate::error::{DataLoadError, Result};
use crate::types::EvaluationRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// URL segments that precede an external ID
const PROFILE_SEGMENTS: [&str; 2] = ["/name/", "/title/"];

/// Extract the canonical ID from a profile URL.
///
/// Returns the text right after the first `/name/` (or, failing that,
/// `/title/`) segment, up to the next `/` or the end of the string.
///
/// Example: "https://imdb.com/name/nm0000093/bio" -> Some("nm0000093")
///          "https://example.com/people/42"      -> None
pub fn extract_profile_id(url: &str) -> Option<&str> {
    let start = PROFILE_SEGMENTS
        .iter()
        .find_map(|segment| url.find(segment).map(|idx| idx + segment.len()))?;
    let rest = &url[start..];
    let id = match rest.find('/') {
        Some(end) => &rest[..end],
        None => rest,
    };
    (!id.is_empty()).then_some(id)
}

/// First 4 characters of a year or release-date string
pub fn year_key(year: &str) -> &str {
    let trimmed = year.trim();
    match trimmed.char_indices().nth(4) {
        Some((end, _)) => &trimmed[..end],
        None => trimmed,
    }
}

/// Numeric year from a year or release-date string, 0 if invalid
///
/// Example: "2023-05-12" -> 2023, "N/A" -> 0
pub fn normalize_year(year: &str) -> i32 {
    year_key(year).parse().unwrap_or(0)
}

/// Vote count with thousands separators removed, 0 if invalid
///
/// Example: "2,345,111" -> 2345111
pub fn normalize_votes(votes: &str) -> u64 {
    votes.trim().replace(',', "").parse().unwrap_or(0)
}

/// External rating as a number, 0.0 if missing or "N/A"
pub fn normalize_rating(rating: &str) -> f64 {
    rating
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Expand short number notation, 0.0 if invalid
///
/// Example: "1.5K" -> 1500.0, "2M" -> 2000000.0, "120" -> 120.0
pub fn format_num(num: &str) -> f64 {
    let num = num.trim();
    let (digits, multiplier) = if let Some(pos) = num.find('K') {
        (&num[..pos], 1_000.0)
    } else if let Some(pos) = num.find('M') {
        (&num[..pos], 1_000_000.0)
    } else {
        (num, 1.0)
    };
    digits
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| value * multiplier)
        .unwrap_or(0.0)
}

/// Layouts evaluation dates have been stored in over time
const DATE_TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%d.%m.%Y, %H:%M:%S",
    "%d.%m.%Y, %H:%M",
];

/// Parse an evaluation date into a naive (UTC for zoned input) timestamp.
///
/// Accepts RFC 3339, ISO date-times with or without seconds, plain dates,
/// and the legacy locale format "15.03.2024, 18:42:10".
pub fn parse_eval_date(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }
    if let Ok(zoned) = DateTime::parse_from_rfc3339(date) {
        return Some(zoned.naive_utc());
    }
    if let Some(parsed) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date, format).ok())
    {
        return Some(parsed);
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
}

/// Top-level layouts of a snapshot file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SnapshotFile {
    /// Evaluations with people embedded in every credit
    Flat(Vec<EvaluationRecord>),
    /// Evaluations whose credits reference a shared persons table
    Normalized {
        #[serde(default)]
        persons: Vec<crate::types::PersonRef>,
        evaluations: Vec<EvaluationRecord>,
    },
}

/// Read and decode a snapshot file
pub(crate) fn parse_snapshot(path: &Path) -> Result<SnapshotFile> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    parse_snapshot_str(&content, &path.display().to_string())
}

pub(crate) fn parse_snapshot_str(content: &str, file: &str) -> Result<SnapshotFile> {
    serde_json::from_str(content).map_err(|source| DataLoadError::ParseError {
        file: file.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_profile_id() {
        assert_eq!(
            extract_profile_id("https://imdb.com/name/nm0000093/bio"),
            Some("nm0000093")
        );
        assert_eq!(
            extract_profile_id("https://www.imdb.com/title/tt0137523/"),
            Some("tt0137523")
        );
        // no trailing slash
        assert_eq!(extract_profile_id("/name/nm0000154"), Some("nm0000154"));
        assert_eq!(extract_profile_id("https://example.com/people/42/"), None);
        assert_eq!(extract_profile_id("https://imdb.com/name/"), None);
        assert_eq!(extract_profile_id(""), None);
    }

    #[test]
    fn test_name_segment_wins_over_title() {
        assert_eq!(
            extract_profile_id("https://imdb.com/title/tt01/name/nm02/"),
            Some("nm02")
        );
    }

    #[test]
    fn test_normalize_year() {
        assert_eq!(normalize_year("2023-05-12"), 2023);
        assert_eq!(normalize_year("1999"), 1999);
        assert_eq!(normalize_year("N/A"), 0);
        assert_eq!(normalize_year(""), 0);
        assert_eq!(year_key("2010-07-16"), "2010");
        assert_eq!(year_key("99"), "99");
    }

    #[test]
    fn test_normalize_votes_and_rating() {
        assert_eq!(normalize_votes("2,345,111"), 2_345_111);
        assert_eq!(normalize_votes(""), 0);
        assert_eq!(normalize_votes("many"), 0);
        assert_eq!(normalize_rating("8.8"), 8.8);
        assert_eq!(normalize_rating("N/A"), 0.0);
    }

    #[test]
    fn test_format_num() {
        assert_eq!(format_num("1.5K"), 1500.0);
        assert_eq!(format_num("2M"), 2_000_000.0);
        assert_eq!(format_num("120"), 120.0);
        assert_eq!(format_num("abc"), 0.0);
    }

    #[test]
    fn test_parse_eval_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(18, 42, 0)
            .unwrap();

        assert_eq!(parse_eval_date("2024-03-15T18:42:00Z"), Some(expected));
        assert_eq!(parse_eval_date("2024-03-15T18:42:00.000"), Some(expected));
        assert_eq!(parse_eval_date("2024-03-15T18:42"), Some(expected));
        assert_eq!(parse_eval_date("15.03.2024, 18:42:00"), Some(expected));
        assert_eq!(parse_eval_date("15.03.2024, 18:42"), Some(expected));
        assert_eq!(
            parse_eval_date("2024-03-15"),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_eval_date("yesterday"), None);
        assert_eq!(parse_eval_date(""), None);
    }

    #[test]
    fn test_parse_snapshot_layouts() {
        let flat = r#"[{ "movie": { "year": "2001" }, "userRating": 7 }]"#;
        assert!(matches!(
            parse_snapshot_str(flat, "flat.json").unwrap(),
            SnapshotFile::Flat(records) if records.len() == 1
        ));

        let normalized = r#"{ "persons": [], "evaluations": [] }"#;
        assert!(matches!(
            parse_snapshot_str(normalized, "normalized.json").unwrap(),
            SnapshotFile::Normalized { .. }
        ));

        assert!(parse_snapshot_str("{ not json", "broken.json").is_err());
    }
}
