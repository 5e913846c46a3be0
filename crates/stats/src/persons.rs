//! Person/role rate aggregation and person profiles.
//!
//! ## Algorithm
//! 1. Order evaluations by evaluation date, oldest first
//! 2. For every person credited under the role, key by canonical ID and add
//!    one appearance plus the evaluation's rating
//! 3. Average the rating per person (two decimals)
//! 4. Drop people below the minimum appearance count
//! 5. Order by most recent evaluation, newest first
//!
//! Names are display-only: two credits with the same name but different
//! profile IDs stay separate people.

use crate::bucket::{BUCKET_PRECISION, round_to};
use crate::lookup::get_single_property;
use crate::modes::SortMode;
use crate::sort::{Ranked, sort_ranked};
use chrono::NaiveDateTime;
use data_loader::{EvaluationRecord, PersonRef, Role};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Aggregated ratings of one person in one role
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonStat {
    /// Canonical person ID
    pub id: String,
    pub name: String,
    pub photo: String,
    pub quantity: u32,
    pub rating: f64,
    /// Latest rating change among this person's evaluations
    pub last_evaluated: Option<NaiveDateTime>,
}

impl Ranked for PersonStat {
    fn sort_key(&self) -> &str {
        &self.name
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn rating(&self) -> f64 {
        self.rating
    }
}

/// Running totals for one person
struct PersonTally {
    stat: PersonStat,
    rating_sum: f64,
}

impl PersonTally {
    fn new(id: &str) -> Self {
        Self {
            stat: PersonStat {
                id: id.to_string(),
                name: String::new(),
                photo: String::new(),
                quantity: 0,
                rating: 0.0,
                last_evaluated: None,
            },
            rating_sum: 0.0,
        }
    }

    fn add(&mut self, person: &PersonRef, record: &EvaluationRecord) {
        if !person.name.is_empty() {
            self.stat.name = person.name.clone();
        }
        if !person.photo.is_empty() {
            self.stat.photo = person.photo.clone();
        }
        self.stat.quantity += 1;
        self.rating_sum += record.user_rating;
        self.stat.last_evaluated = self.stat.last_evaluated.max(record.last_changed_at());
    }

    fn finish(mut self) -> PersonStat {
        if self.stat.quantity > 0 {
            self.stat.rating = round_to(
                self.rating_sum / f64::from(self.stat.quantity),
                BUCKET_PRECISION,
            );
        }
        self.stat
    }
}

/// Rate every person credited under `role`, keeping those with at least
/// `min_appearances` evaluations. Newest evaluated first.
#[instrument(skip(evaluations), fields(evaluations = evaluations.len()))]
pub fn compose_persons_rate(
    evaluations: &[EvaluationRecord],
    min_appearances: u32,
    role: Role,
) -> Vec<PersonStat> {
    let mut chronological: Vec<&EvaluationRecord> = evaluations.iter().collect();
    chronological.sort_by_key(|record| record.evaluated_at());

    let mut tallies: Vec<PersonTally> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut anonymous = 0usize;

    for record in chronological {
        for person in record.movie.people(role) {
            let Some(id) = person.canonical_id() else {
                anonymous += 1;
                continue;
            };
            let slot = *index.entry(id.to_string()).or_insert_with(|| {
                tallies.push(PersonTally::new(id));
                tallies.len() - 1
            });
            tallies[slot].add(person, record);
        }
    }

    if anonymous > 0 {
        debug!("Skipped {} {} credits without a profile ID", anonymous, role);
    }
    let credited = tallies.len();

    let mut persons: Vec<PersonStat> = tallies
        .into_iter()
        .map(PersonTally::finish)
        .filter(|person| person.quantity >= min_appearances)
        .collect();
    persons.sort_by(|a, b| b.last_evaluated.cmp(&a.last_evaluated));

    debug!(
        "{} {}s credited, {} with at least {} evaluations",
        credited,
        role,
        persons.len(),
        min_appearances
    );
    persons
}

/// Person ranking for `role` ordered by `mode`
pub fn get_person_stat(
    evaluations: &[EvaluationRecord],
    role: Role,
    mode: SortMode,
    min_appearances: u32,
) -> Vec<PersonStat> {
    sort_ranked(&compose_persons_rate(evaluations, min_appearances, role), mode)
}

// =============================================================================
// Profiles
// =============================================================================

/// What a person did in one role
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occupation<'a> {
    pub role: Role,
    pub quantity: u32,
    pub rating: f64,
    pub films: Vec<&'a EvaluationRecord>,
}

/// Everything the evaluations say about one person
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonProfile<'a> {
    pub id: String,
    pub name: String,
    pub photo: String,
    pub profile_url: String,
    pub occupations: Vec<Occupation<'a>>,
}

impl PersonProfile<'_> {
    pub fn occupation(&self, role: Role) -> Option<&Occupation<'_>> {
        self.occupations.iter().find(|occupation| occupation.role == role)
    }
}

/// Build the profile of the person with canonical ID `id`.
///
/// `None` when the person is not credited in any role.
pub fn person_profile<'a>(evaluations: &'a [EvaluationRecord], id: &str) -> Option<PersonProfile<'a>> {
    let id = id.trim();
    let mut profile = PersonProfile {
        id: id.to_string(),
        name: String::new(),
        photo: String::new(),
        profile_url: String::new(),
        occupations: Vec::new(),
    };

    for role in Role::ALL {
        let credited_in_role = evaluations
            .iter()
            .any(|record| record.movie.people(role).any(|p| p.canonical_id() == Some(id)));
        if !credited_in_role {
            continue;
        }
        let Some(lookup) = get_single_property(evaluations, id, role.into()) else {
            continue;
        };

        let credited = lookup
            .films
            .iter()
            .flat_map(|record| record.movie.people(role))
            .filter(|person| person.canonical_id() == Some(id));
        for person in credited {
            if profile.name.is_empty() {
                profile.name = person.name.clone();
            }
            if profile.photo.is_empty() {
                profile.photo = person.photo.clone();
            }
            if profile.profile_url.is_empty() {
                profile.profile_url = person.profile_url.clone();
            }
        }

        let rating_sum: f64 = lookup.films.iter().map(|record| record.user_rating).sum();
        let rating = if lookup.quantity == 0 {
            0.0
        } else {
            round_to(rating_sum / f64::from(lookup.quantity), BUCKET_PRECISION)
        };
        profile.occupations.push(Occupation {
            role,
            quantity: lookup.quantity,
            rating,
            films: lookup.films,
        });
    }

    if profile.occupations.is_empty() {
        warn!("Person {} is not credited in any evaluation", id);
        return None;
    }
    Some(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Credit, MovieSummary};

    fn person(name: &str, id: &str) -> PersonRef {
        PersonRef {
            name: name.to_string(),
            profile_url: format!("https://www.imdb.com/name/{}/", id),
            ..Default::default()
        }
    }

    fn record(title: &str, date: &str, rating: f64, directors: &[PersonRef]) -> EvaluationRecord {
        EvaluationRecord {
            movie: MovieSummary {
                title: title.to_string(),
                directors: directors.iter().cloned().map(Credit::new).collect(),
                ..Default::default()
            },
            user_rating: rating,
            user_eval_date: date.to_string(),
            ..Default::default()
        }
    }

    fn create_test_evaluations() -> Vec<EvaluationRecord> {
        let nolan = person("Christopher Nolan", "nm0634240");
        let villeneuve = person("Denis Villeneuve", "nm0898288");
        vec![
            record("Dune", "2024-03-01", 9.0, &[villeneuve.clone()]),
            record("Memento", "2020-01-01", 8.0, &[nolan.clone()]),
            record("Inception", "2021-06-01", 9.0, &[nolan.clone()]),
            record("Tenet", "2022-01-01", 6.5, &[nolan]),
            record("Arrival", "2019-05-01", 8.5, &[villeneuve]),
        ]
    }

    #[test]
    fn test_rate_per_person() {
        let evals = create_test_evaluations();
        let persons = compose_persons_rate(&evals, 1, Role::Director);

        assert_eq!(persons.len(), 2);
        let nolan = persons.iter().find(|p| p.id == "nm0634240").unwrap();
        assert_eq!(nolan.quantity, 3);
        assert_eq!(nolan.rating, 7.83);
        assert_eq!(nolan.name, "Christopher Nolan");
    }

    #[test]
    fn test_newest_evaluated_first() {
        let evals = create_test_evaluations();
        let persons = compose_persons_rate(&evals, 1, Role::Director);
        assert_eq!(persons[0].name, "Denis Villeneuve");
    }

    #[test]
    fn test_threshold_filters_people() {
        let evals = create_test_evaluations();

        let persons = compose_persons_rate(&evals, 3, Role::Director);
        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0].name, "Christopher Nolan");
        assert!(compose_persons_rate(&evals, 4, Role::Director).is_empty());
    }

    #[test]
    fn test_same_name_different_ids() {
        let evals = vec![
            record("A", "2020-01-01", 8.0, &[person("John Smith", "nm01")]),
            record("B", "2020-01-02", 6.0, &[person("John Smith", "nm02")]),
        ];
        assert_eq!(compose_persons_rate(&evals, 1, Role::Director).len(), 2);
    }

    #[test]
    fn test_person_without_profile_id_is_skipped() {
        let anonymous = PersonRef {
            name: "Unknown".to_string(),
            ..Default::default()
        };
        let evals = vec![record("A", "2020-01-01", 8.0, &[anonymous])];
        assert!(compose_persons_rate(&evals, 1, Role::Director).is_empty());
    }

    #[test]
    fn test_get_person_stat_sorts() {
        let evals = create_test_evaluations();
        let persons = get_person_stat(&evals, Role::Director, SortMode::RatingDesc, 1);
        assert_eq!(persons[0].name, "Denis Villeneuve");
        assert_eq!(persons[0].rating, 8.75);

        let by_name = get_person_stat(&evals, Role::Director, SortMode::KeyAsc, 1);
        assert_eq!(by_name[0].name, "Christopher Nolan");
    }

    #[test]
    fn test_person_profile() {
        let mut evals = create_test_evaluations();
        evals[1]
            .movie
            .writers
            .push(Credit::new(person("Christopher Nolan", "nm0634240")));

        let profile = person_profile(&evals, "nm0634240").unwrap();
        assert_eq!(profile.name, "Christopher Nolan");
        assert_eq!(profile.occupations.len(), 2);

        let directing = profile.occupation(Role::Director).unwrap();
        assert_eq!(directing.quantity, 3);
        assert_eq!(directing.rating, 7.83);
        let writing = profile.occupation(Role::Writer).unwrap();
        assert_eq!(writing.films[0].movie.title, "Memento");
        assert!(profile.occupation(Role::Actor).is_none());
    }

    #[test]
    fn test_profile_rating_is_rounded_once() {
        // mean 7.6249: 7.62 directly, 7.625 then 7.63 if rounded twice
        let mann = person("Michael Mann", "nm0000520");
        let evals = vec![
            record("Thief", "2020-01-01", 7.2498, &[mann.clone()]),
            record("Heat", "2020-02-01", 8.0, &[mann]),
        ];

        let profile = person_profile(&evals, "nm0000520").unwrap();
        assert_eq!(profile.occupation(Role::Director).unwrap().rating, 7.62);
    }

    #[test]
    fn test_unknown_person_has_no_profile() {
        let evals = create_test_evaluations();
        assert!(person_profile(&evals, "nm9999999").is_none());
    }
}
