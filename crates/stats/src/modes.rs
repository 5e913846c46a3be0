//! Closed enums for everything callers choose by name: the grouping
//! dimension, the bucket sort mode and the movie table sort mode.
//!
//! Names follow the stored field names (`countries`, `cast`, `isFavorite`)
//! so values coming from saved views parse directly. Parsing is the only
//! fallible step; every engine operation matches these exhaustively.

use crate::error::StatsError;
use data_loader::Role;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Dimension
// =============================================================================

/// Attribute evaluations can be grouped or filtered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Type,
    Year,
    Decade,
    Country,
    Language,
    Genre,
    Director,
    Writer,
    Producer,
    Composer,
    Actor,
    UserRating,
    Favorite,
}

impl Dimension {
    pub const ALL: [Dimension; 13] = [
        Dimension::Type,
        Dimension::Year,
        Dimension::Decade,
        Dimension::Country,
        Dimension::Language,
        Dimension::Genre,
        Dimension::Director,
        Dimension::Writer,
        Dimension::Producer,
        Dimension::Composer,
        Dimension::Actor,
        Dimension::UserRating,
        Dimension::Favorite,
    ];

    /// Person role behind a credit dimension
    pub fn role(self) -> Option<Role> {
        match self {
            Dimension::Director => Some(Role::Director),
            Dimension::Writer => Some(Role::Writer),
            Dimension::Producer => Some(Role::Producer),
            Dimension::Composer => Some(Role::Composer),
            Dimension::Actor => Some(Role::Actor),
            _ => None,
        }
    }

    /// Stored field name, used as the canonical string form
    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Type => "type",
            Dimension::Year => "year",
            Dimension::Decade => "decade",
            Dimension::Country => "countries",
            Dimension::Language => "languages",
            Dimension::Genre => "genres",
            Dimension::Director => "directors",
            Dimension::Writer => "writers",
            Dimension::Producer => "producers",
            Dimension::Composer => "composers",
            Dimension::Actor => "cast",
            Dimension::UserRating => "userRating",
            Dimension::Favorite => "isFavorite",
        }
    }
}

impl From<Role> for Dimension {
    fn from(role: Role) -> Self {
        match role {
            Role::Director => Dimension::Director,
            Role::Writer => Dimension::Writer,
            Role::Producer => Dimension::Producer,
            Role::Composer => Dimension::Composer,
            Role::Actor => Dimension::Actor,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace(['_', '-'], "");
        let dimension = match name.as_str() {
            "type" | "mediatype" => Dimension::Type,
            "year" | "years" => Dimension::Year,
            "decade" | "decades" => Dimension::Decade,
            "country" | "countries" => Dimension::Country,
            "language" | "languages" => Dimension::Language,
            "genre" | "genres" => Dimension::Genre,
            "director" | "directors" => Dimension::Director,
            "writer" | "writers" => Dimension::Writer,
            "producer" | "producers" => Dimension::Producer,
            "composer" | "composers" => Dimension::Composer,
            "actor" | "actors" | "cast" => Dimension::Actor,
            "userrating" | "rating" => Dimension::UserRating,
            "isfavorite" | "favorite" | "favorites" => Dimension::Favorite,
            _ => return Err(StatsError::UnknownDimension(s.to_string())),
        };
        Ok(dimension)
    }
}

/// Parse a role name ("director", "writers", "cast", ...)
pub fn parse_role(s: &str) -> Result<Role, StatsError> {
    s.parse::<Role>()
        .map_err(|_| StatsError::UnknownRole(s.to_string()))
}

// =============================================================================
// Bucket sort modes
// =============================================================================

/// Sort direction shared by every mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

/// How a bucket map is ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    KeyAsc,
    KeyDesc,
    QuantityAsc,
    #[default]
    QuantityDesc,
    RatingAsc,
    RatingDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 6] = [
        SortMode::KeyAsc,
        SortMode::KeyDesc,
        SortMode::QuantityAsc,
        SortMode::QuantityDesc,
        SortMode::RatingAsc,
        SortMode::RatingDesc,
    ];

    pub fn direction(self) -> Direction {
        match self {
            SortMode::KeyAsc | SortMode::QuantityAsc | SortMode::RatingAsc => Direction::Asc,
            SortMode::KeyDesc | SortMode::QuantityDesc | SortMode::RatingDesc => Direction::Desc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::KeyAsc => "key-asc",
            SortMode::KeyDesc => "key-desc",
            SortMode::QuantityAsc => "quantity-asc",
            SortMode::QuantityDesc => "quantity-desc",
            SortMode::RatingAsc => "rating-asc",
            SortMode::RatingDesc => "rating-desc",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize_mode_name(s);
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == name)
            .ok_or_else(|| StatsError::UnknownSortMode(s.to_string()))
    }
}

// =============================================================================
// Movie table sort modes
// =============================================================================

/// How the raw evaluation list of the movie table is ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableSortMode {
    EvalDatetimeAsc,
    #[default]
    EvalDatetimeDesc,
    UserRatingAsc,
    UserRatingDesc,
    YearAsc,
    YearDesc,
    ImdbRatingAsc,
    ImdbRatingDesc,
    ImdbEvalnumAsc,
    ImdbEvalnumDesc,
}

impl TableSortMode {
    pub const ALL: [TableSortMode; 10] = [
        TableSortMode::EvalDatetimeAsc,
        TableSortMode::EvalDatetimeDesc,
        TableSortMode::UserRatingAsc,
        TableSortMode::UserRatingDesc,
        TableSortMode::YearAsc,
        TableSortMode::YearDesc,
        TableSortMode::ImdbRatingAsc,
        TableSortMode::ImdbRatingDesc,
        TableSortMode::ImdbEvalnumAsc,
        TableSortMode::ImdbEvalnumDesc,
    ];

    pub fn direction(self) -> Direction {
        match self {
            TableSortMode::EvalDatetimeAsc
            | TableSortMode::UserRatingAsc
            | TableSortMode::YearAsc
            | TableSortMode::ImdbRatingAsc
            | TableSortMode::ImdbEvalnumAsc => Direction::Asc,
            _ => Direction::Desc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TableSortMode::EvalDatetimeAsc => "eval-datetime-asc",
            TableSortMode::EvalDatetimeDesc => "eval-datetime-desc",
            TableSortMode::UserRatingAsc => "user-rating-asc",
            TableSortMode::UserRatingDesc => "user-rating-desc",
            TableSortMode::YearAsc => "year-asc",
            TableSortMode::YearDesc => "year-desc",
            TableSortMode::ImdbRatingAsc => "imdb-rating-asc",
            TableSortMode::ImdbRatingDesc => "imdb-rating-desc",
            TableSortMode::ImdbEvalnumAsc => "imdb-evalnum-asc",
            TableSortMode::ImdbEvalnumDesc => "imdb-evalnum-desc",
        }
    }
}

impl fmt::Display for TableSortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableSortMode {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize_mode_name(s);
        TableSortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == name)
            .ok_or_else(|| StatsError::UnknownTableSortMode(s.to_string()))
    }
}

/// "QUANTITY_DESC", "quantity_desc" and "quantity-desc" all name the same mode
fn normalize_mode_name(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_parsing() {
        assert_eq!("countries".parse::<Dimension>().unwrap(), Dimension::Country);
        assert_eq!("cast".parse::<Dimension>().unwrap(), Dimension::Actor);
        assert_eq!("isFavorite".parse::<Dimension>().unwrap(), Dimension::Favorite);
        assert_eq!("user_rating".parse::<Dimension>().unwrap(), Dimension::UserRating);
        assert!(matches!(
            "mood".parse::<Dimension>(),
            Err(StatsError::UnknownDimension(_))
        ));
    }

    #[test]
    fn test_dimension_names_round_trip() {
        for dimension in Dimension::ALL {
            assert_eq!(dimension.as_str().parse::<Dimension>().unwrap(), dimension);
        }
    }

    #[test]
    fn test_dimension_role() {
        assert_eq!(Dimension::Actor.role(), Some(Role::Actor));
        assert_eq!(Dimension::Genre.role(), None);
        assert_eq!(Dimension::from(Role::Composer), Dimension::Composer);
    }

    #[test]
    fn test_sort_mode_parsing() {
        assert_eq!("QUANTITY_DESC".parse::<SortMode>().unwrap(), SortMode::QuantityDesc);
        assert_eq!("rating-asc".parse::<SortMode>().unwrap(), SortMode::RatingAsc);
        assert!("year-desc".parse::<SortMode>().is_err());
        assert_eq!(SortMode::default(), SortMode::QuantityDesc);
        assert_eq!(SortMode::KeyDesc.direction(), Direction::Desc);
    }

    #[test]
    fn test_table_sort_mode_parsing() {
        assert_eq!(
            "IMDB_EVALNUM_ASC".parse::<TableSortMode>().unwrap(),
            TableSortMode::ImdbEvalnumAsc
        );
        assert!(matches!(
            "quantity-desc".parse::<TableSortMode>(),
            Err(StatsError::UnknownTableSortMode(_))
        ));
        assert_eq!(TableSortMode::default(), TableSortMode::EvalDatetimeDesc);
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("writers").unwrap(), Role::Writer);
        assert!(matches!(parse_role("grip"), Err(StatsError::UnknownRole(_))));
    }
}
