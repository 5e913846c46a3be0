//! Core domain types for a user's evaluation history.
//!
//! These mirror the persisted evaluation documents: an evaluation embeds a
//! resolved movie summary, and the movie embeds its credited people. Field
//! names follow the stored camelCase layout so exported snapshots load as-is.

use crate::error::DataLoadError;
use crate::parser::{extract_profile_id, normalize_rating, normalize_votes, normalize_year, parse_eval_date, year_key};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// People
// =============================================================================

/// A person credited on a movie (director, cast member, ...).
///
/// The profile URL embeds a stable external ID in an inconsistent position,
/// so aggregation keys come from [`PersonRef::canonical_id`], never from the
/// display name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    /// Storage ID, used by normalized snapshots to reference people
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, alias = "imdbLink", deserialize_with = "nullable_string")]
    pub profile_url: String,
    /// Bare external ID, present in newer documents that carry no profile URL
    #[serde(default, rename = "imdbID", deserialize_with = "nullable_string")]
    pub imdb_id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub photo: String,
}

impl PersonRef {
    /// Stable aggregation key for this person.
    ///
    /// Extracted from the profile URL; falls back to the bare external ID.
    pub fn canonical_id(&self) -> Option<&str> {
        extract_profile_id(&self.profile_url).or_else(|| {
            let id = self.imdb_id.trim();
            (!id.is_empty()).then_some(id)
        })
    }
}

/// One credit line of a movie: a person plus an optional character name.
///
/// Normalized snapshots carry only `person_id`; the loader fills `person`
/// from the persons table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credit {
    #[serde(default)]
    pub person: Option<PersonRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
}

impl Credit {
    pub fn new(person: PersonRef) -> Self {
        Self {
            person: Some(person),
            person_id: None,
            character: None,
        }
    }
}

/// Crew and cast roles a movie credits people under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Director,
    Writer,
    Producer,
    Composer,
    Actor,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Director,
        Role::Writer,
        Role::Producer,
        Role::Composer,
        Role::Actor,
    ];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Director => "director",
            Role::Writer => "writer",
            Role::Producer => "producer",
            Role::Composer => "composer",
            Role::Actor => "actor",
        };
        f.write_str(label)
    }
}

impl FromStr for Role {
    type Err = DataLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "director" | "directors" => Ok(Role::Director),
            "writer" | "writers" => Ok(Role::Writer),
            "producer" | "producers" => Ok(Role::Producer),
            "composer" | "composers" => Ok(Role::Composer),
            "actor" | "actors" | "cast" => Ok(Role::Actor),
            _ => Err(DataLoadError::InvalidValue {
                field: "role".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Movies
// =============================================================================

/// Kind of title that was evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
    #[default]
    #[serde(other)]
    Unknown,
}

impl MediaType {
    /// Human readable label shown in tables
    pub fn label(self) -> &'static str {
        match self {
            MediaType::Movie => "Movie",
            MediaType::Tv => "TV Series",
            MediaType::Unknown => "",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MediaType {
    type Err = DataLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "tv" | "tv series" => Ok(MediaType::Tv),
            _ => Err(DataLoadError::InvalidValue {
                field: "type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Movie metadata as embedded in an evaluation.
///
/// External rating and vote count stay raw strings ("8.8", "2,345,111");
/// use the accessor methods for numeric comparison.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    #[serde(default, alias = "commTitle", deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, rename = "type")]
    pub media_type: MediaType,
    /// Release date or year; only the first 4 characters are significant
    #[serde(default, deserialize_with = "nullable_string")]
    pub year: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub directors: Vec<Credit>,
    #[serde(default)]
    pub writers: Vec<Credit>,
    #[serde(default)]
    pub producers: Vec<Credit>,
    #[serde(default)]
    pub composers: Vec<Credit>,
    #[serde(default)]
    pub cast: Vec<Credit>,
    #[serde(default, rename = "imdbRating", deserialize_with = "nullable_string")]
    pub external_rating: String,
    #[serde(default, rename = "imdbVotes", deserialize_with = "nullable_string")]
    pub external_vote_count: String,
}

impl MovieSummary {
    /// The YEAR bucket key: first 4 characters of the year field
    pub fn year_key(&self) -> &str {
        year_key(&self.year)
    }

    /// Release year as a number, 0 when the field is not a year
    pub fn release_year(&self) -> i32 {
        normalize_year(&self.year)
    }

    pub fn external_rating_value(&self) -> f64 {
        normalize_rating(&self.external_rating)
    }

    pub fn external_votes_value(&self) -> u64 {
        normalize_votes(&self.external_vote_count)
    }

    /// Credit list for a role
    pub fn credits(&self, role: Role) -> &[Credit] {
        match role {
            Role::Director => &self.directors,
            Role::Writer => &self.writers,
            Role::Producer => &self.producers,
            Role::Composer => &self.composers,
            Role::Actor => &self.cast,
        }
    }

    pub(crate) fn credits_mut(&mut self) -> [&mut Vec<Credit>; 5] {
        [
            &mut self.directors,
            &mut self.writers,
            &mut self.producers,
            &mut self.composers,
            &mut self.cast,
        ]
    }

    /// Resolved people credited under a role, skipping unresolved entries
    pub fn people(&self, role: Role) -> impl Iterator<Item = &PersonRef> {
        self.credits(role).iter().filter_map(|credit| credit.person.as_ref())
    }
}

// =============================================================================
// Evaluations
// =============================================================================

/// A user's rating of one title.
///
/// Dates are kept as stored; [`EvaluationRecord::last_changed_at`] parses
/// them on demand for chronological ordering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRecord {
    pub movie: MovieSummary,
    pub user_rating: f64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub user_eval_date: String,
    /// Empty until the rating is changed
    #[serde(default, deserialize_with = "nullable_string")]
    pub user_change_eval_date: String,
    #[serde(default)]
    pub is_favorite: bool,
}

impl EvaluationRecord {
    /// Change date if the rating was ever changed, else the first evaluation date
    pub fn last_changed(&self) -> &str {
        if self.user_change_eval_date.trim().is_empty() {
            &self.user_eval_date
        } else {
            &self.user_change_eval_date
        }
    }

    pub fn last_changed_at(&self) -> Option<NaiveDateTime> {
        parse_eval_date(self.last_changed())
    }

    pub fn evaluated_at(&self) -> Option<NaiveDateTime> {
        parse_eval_date(&self.user_eval_date)
    }
}

/// Treats an explicit JSON `null` like a missing string field
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
