//! Engine configuration.
//!
//! Every field has a default, so an empty (or missing) TOML file is valid:
//!
//! ```toml
//! first_year = 1895
//! # last_year = 2030          # default: next calendar year
//! sort = "quantity-desc"
//! table_sort = "eval-datetime-desc"
//!
//! [thresholds]
//! actor = 5
//! director = 1
//! ```

use crate::compose::{FIRST_SEEDED_YEAR, YearRange};
use crate::error::{Result, StatsError};
use crate::modes::{SortMode, TableSortMode};
use data_loader::Role;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Minimum appearances a person needs to be listed, per role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonThresholds {
    pub director: u32,
    pub writer: u32,
    pub producer: u32,
    pub composer: u32,
    pub actor: u32,
}

impl PersonThresholds {
    pub fn for_role(&self, role: Role) -> u32 {
        match role {
            Role::Director => self.director,
            Role::Writer => self.writer,
            Role::Producer => self.producer,
            Role::Composer => self.composer,
            Role::Actor => self.actor,
        }
    }

    pub fn set(&mut self, role: Role, threshold: u32) {
        match role {
            Role::Director => self.director = threshold,
            Role::Writer => self.writer = threshold,
            Role::Producer => self.producer = threshold,
            Role::Composer => self.composer = threshold,
            Role::Actor => self.actor = threshold,
        }
    }
}

impl Default for PersonThresholds {
    // Leads are credited far more often than one-off crew
    fn default() -> Self {
        Self {
            director: 1,
            writer: 1,
            producer: 1,
            composer: 1,
            actor: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// First year of the seeded YEAR range
    pub first_year: i32,
    /// Last seeded year; `None` means next calendar year
    pub last_year: Option<i32>,
    pub thresholds: PersonThresholds,
    /// Bucket order when none is requested
    pub sort: SortMode,
    /// Movie table order when none is requested
    pub table_sort: TableSortMode,
}

impl StatsConfig {
    pub fn new() -> Self {
        Self {
            first_year: FIRST_SEEDED_YEAR,
            last_year: None,
            thresholds: PersonThresholds::default(),
            sort: SortMode::default(),
            table_sort: TableSortMode::default(),
        }
    }

    pub fn with_first_year(mut self, year: i32) -> Self {
        self.first_year = year;
        self
    }

    pub fn with_last_year(mut self, year: i32) -> Self {
        self.last_year = Some(year);
        self
    }

    pub fn with_threshold(mut self, role: Role, threshold: u32) -> Self {
        self.thresholds.set(role, threshold);
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_table_sort(mut self, sort: TableSortMode) -> Self {
        self.table_sort = sort;
        self
    }

    /// Seeded year range this configuration describes
    pub fn year_range(&self) -> YearRange {
        let last = self.last_year.unwrap_or_else(|| YearRange::current().last);
        YearRange::new(self.first_year, last)
    }

    pub fn threshold(&self, role: Role) -> u32 {
        self.thresholds.for_role(role)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|err| StatsError::Config(err.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Read a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|err| StatsError::Config(format!("{}: {}", path.display(), err)))?;
        Self::from_toml_str(&content)
    }

    fn check(&self) -> Result<()> {
        if let Some(last) = self.last_year {
            if last < self.first_year {
                return Err(StatsError::Config(format!(
                    "last_year {} is before first_year {}",
                    last, self.first_year
                )));
            }
        }
        Ok(())
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self::new()
    }
}
