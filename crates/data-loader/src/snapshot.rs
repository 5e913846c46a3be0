//! In-memory evaluation snapshot.
//!
//! This is the ingestion boundary of the system: it reads an exported
//! evaluation collection, resolves person references, and validates it.
//! The statistics crates only ever borrow `snapshot.records()`.

use crate::cache::PersonCache;
use crate::error::{DataLoadError, Result};
use crate::parser::{self, SnapshotFile};
use crate::types::{EvaluationRecord, PersonRef};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

/// Highest rating a user can give
pub const MAX_USER_RATING: f64 = 10.0;

/// A user's evaluations plus the persons table they reference
#[derive(Debug, Clone, Default)]
pub struct EvaluationSnapshot {
    records: Vec<EvaluationRecord>,
    persons: HashMap<String, PersonRef>,
}

/// Summary counts of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotCounts {
    pub evaluations: usize,
    pub movies: usize,
    pub favorites: usize,
}

impl EvaluationSnapshot {
    /// Wrap already-resolved records
    pub fn from_records(records: Vec<EvaluationRecord>) -> Self {
        Self {
            records,
            persons: HashMap::new(),
        }
    }

    /// Load a snapshot file, resolve person references and validate it.
    ///
    /// Steps:
    /// 1. Decode the file (flat or normalized layout)
    /// 2. Resolve `personId` credits through a fresh `PersonCache`
    /// 3. Validate ratings and dates
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading evaluation snapshot from {:?}", path);

        let mut snapshot = match parser::parse_snapshot(path)? {
            SnapshotFile::Flat(records) => Self::from_records(records),
            SnapshotFile::Normalized {
                persons,
                evaluations,
            } => {
                let mut snapshot = Self::from_records(evaluations);
                for person in persons {
                    snapshot.insert_person(person)?;
                }
                snapshot
            }
        };

        let mut cache = PersonCache::default();
        let unresolved = snapshot.resolve_people(&mut cache);
        if unresolved > 0 {
            warn!("{} credits reference unknown persons and were dropped", unresolved);
        }

        snapshot.validate()?;

        let counts = snapshot.counts();
        info!(
            "Loaded {} evaluations of {} movies ({} favorites)",
            counts.evaluations, counts.movies, counts.favorites
        );
        Ok(snapshot)
    }

    /// Add a person to the persons table; the person must carry an ID
    pub fn insert_person(&mut self, person: PersonRef) -> Result<()> {
        let id = person
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| DataLoadError::InvalidValue {
                field: "person.id".to_string(),
                value: person.name.clone(),
            })?;
        self.persons.insert(id, person);
        Ok(())
    }

    pub fn insert_record(&mut self, record: EvaluationRecord) {
        self.records.push(record);
    }

    /// Fill every `personId`-only credit from the persons table.
    ///
    /// Credits whose ID is unknown are removed. Returns how many were removed.
    pub fn resolve_people(&mut self, cache: &mut PersonCache) -> usize {
        let persons = &self.persons;
        let mut unresolved = 0;

        for record in &mut self.records {
            for credits in record.movie.credits_mut() {
                credits.retain_mut(|credit| {
                    if credit.person.is_some() {
                        return true;
                    }
                    let Some(id) = credit.person_id.as_deref() else {
                        unresolved += 1;
                        return false;
                    };
                    match cache.resolve(id, persons) {
                        Some(person) => {
                            credit.person = Some(person);
                            true
                        }
                        None => {
                            unresolved += 1;
                            false
                        }
                    }
                });
            }
        }
        unresolved
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - Ratings are in the valid range (0 - 10)
    /// - Every evaluation carries an evaluation date
    pub fn validate(&self) -> Result<()> {
        for (idx, record) in self.records.iter().enumerate() {
            if !(0.0..=MAX_USER_RATING).contains(&record.user_rating) {
                return Err(DataLoadError::InvalidValue {
                    field: "userRating".to_string(),
                    value: record.user_rating.to_string(),
                });
            }
            if record.user_eval_date.trim().is_empty() {
                return Err(DataLoadError::ValidationError(format!(
                    "evaluation #{} ({}) has no evaluation date",
                    idx, record.movie.title
                )));
            }
        }
        Ok(())
    }

    pub fn records(&self) -> &[EvaluationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<EvaluationRecord> {
        self.records
    }

    pub fn get_person(&self, id: &str) -> Option<&PersonRef> {
        self.persons.get(id)
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> SnapshotCounts {
        let movies: HashSet<(&str, &str)> = self
            .records
            .iter()
            .map(|r| (r.movie.title.as_str(), r.movie.year.as_str()))
            .collect();
        SnapshotCounts {
            evaluations: self.records.len(),
            movies: movies.len(),
            favorites: self.records.iter().filter(|r| r.is_favorite).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Credit, Role};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_snapshot(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_flat_snapshot() {
        let file = write_snapshot(
            r#"[
                { "movie": { "title": "Heat", "year": "1995", "genres": ["Crime"] },
                  "userRating": 9, "userEvalDate": "2024-01-01", "isFavorite": true },
                { "movie": { "title": "Ronin", "year": "1998" },
                  "userRating": 7, "userEvalDate": "2024-01-02" }
            ]"#,
        );

        let snapshot = EvaluationSnapshot::load_from_file(file.path()).unwrap();
        let counts = snapshot.counts();
        assert_eq!(counts.evaluations, 2);
        assert_eq!(counts.movies, 2);
        assert_eq!(counts.favorites, 1);
    }

    #[test]
    fn test_load_normalized_snapshot_resolves_people() {
        let file = write_snapshot(
            r#"{
                "persons": [
                    { "_id": "p1", "name": "Michael Mann", "imdbLink": "https://imdb.com/name/nm0000520/" }
                ],
                "evaluations": [
                    { "movie": { "title": "Heat", "year": "1995",
                                 "directors": [ { "personId": "p1" } ],
                                 "cast": [ { "personId": "ghost" } ] },
                      "userRating": 9, "userEvalDate": "2024-01-01" },
                    { "movie": { "title": "Collateral", "year": "2004",
                                 "directors": [ { "personId": "p1" } ] },
                      "userRating": 8, "userEvalDate": "2024-01-02" }
                ]
            }"#,
        );

        let snapshot = EvaluationSnapshot::load_from_file(file.path()).unwrap();
        let records = snapshot.records();

        let director = records[1].movie.people(Role::Director).next().unwrap();
        assert_eq!(director.name, "Michael Mann");
        assert_eq!(director.canonical_id(), Some("nm0000520"));
        assert!(records[0].movie.cast.is_empty());
        assert!(snapshot.get_person("p1").is_some());
    }

    #[test]
    fn test_resolve_people_uses_cache() {
        let mut snapshot = EvaluationSnapshot::default();
        snapshot
            .insert_person(PersonRef {
                id: Some("p1".to_string()),
                name: "Hans Zimmer".to_string(),
                ..Default::default()
            })
            .unwrap();

        for _ in 0..3 {
            let mut record = EvaluationRecord::default();
            record.movie.composers.push(Credit {
                person_id: Some("p1".to_string()),
                ..Default::default()
            });
            snapshot.insert_record(record);
        }

        let mut cache = PersonCache::new(4);
        assert_eq!(snapshot.resolve_people(&mut cache), 0);
        assert_eq!(cache.stats(), (2, 1));
    }

    #[test]
    fn test_missing_file() {
        let result = EvaluationSnapshot::load_from_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }

    #[test]
    fn test_validate_rejects_out_of_range_rating() {
        let snapshot = EvaluationSnapshot::from_records(vec![EvaluationRecord {
            user_rating: 11.0,
            user_eval_date: "2024-01-01".to_string(),
            ..Default::default()
        }]);
        assert!(matches!(
            snapshot.validate(),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_requires_eval_date() {
        let snapshot = EvaluationSnapshot::from_records(vec![EvaluationRecord {
            user_rating: 5.0,
            ..Default::default()
        }]);
        assert!(matches!(
            snapshot.validate(),
            Err(DataLoadError::ValidationError(_))
        ));
    }

    #[test]
    fn test_insert_person_requires_id() {
        let mut snapshot = EvaluationSnapshot::default();
        assert!(snapshot.insert_person(PersonRef::default()).is_err());
    }
}
