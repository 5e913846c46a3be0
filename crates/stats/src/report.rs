//! Full statistics report.
//!
//! Every breakdown only reads the evaluation slice, so the independent
//! aggregations run in parallel with `rayon::join`.

use crate::bucket::StatMap;
use crate::compose::{get_country_stat, get_genre_stat, get_language_stat, get_year_stat_in};
use crate::config::StatsConfig;
use crate::decade::compose_decade_stat_in;
use crate::persons::{PersonStat, get_person_stat};
use data_loader::{EvaluationRecord, Role};
use serde::Serialize;
use tracing::{info, instrument};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub evaluations: usize,
    pub years: StatMap,
    pub decades: StatMap,
    pub genres: StatMap,
    pub countries: StatMap,
    pub languages: StatMap,
    pub directors: Vec<PersonStat>,
    pub writers: Vec<PersonStat>,
    pub producers: Vec<PersonStat>,
    pub composers: Vec<PersonStat>,
    pub actors: Vec<PersonStat>,
}

impl StatsReport {
    /// Compute every breakdown with the configured sort and thresholds
    #[instrument(skip(evaluations, config), fields(evaluations = evaluations.len()))]
    pub fn build(evaluations: &[EvaluationRecord], config: &StatsConfig) -> Self {
        let mode = config.sort;
        let range = config.year_range();
        let people = |role: Role| get_person_stat(evaluations, role, mode, config.threshold(role));

        let ((years, decades), (genres, (countries, languages))) = rayon::join(
            || {
                rayon::join(
                    || get_year_stat_in(evaluations, mode, &range),
                    || compose_decade_stat_in(evaluations, mode, &range),
                )
            },
            || {
                rayon::join(
                    || get_genre_stat(evaluations, mode),
                    || {
                        rayon::join(
                            || get_country_stat(evaluations, mode),
                            || get_language_stat(evaluations, mode),
                        )
                    },
                )
            },
        );

        let ((directors, writers), ((producers, composers), actors)) = rayon::join(
            || rayon::join(|| people(Role::Director), || people(Role::Writer)),
            || {
                rayon::join(
                    || rayon::join(|| people(Role::Producer), || people(Role::Composer)),
                    || people(Role::Actor),
                )
            },
        );

        info!(
            "Built report: {} years, {} decades, {} genres, {} directors, {} actors",
            years.len(),
            decades.len(),
            genres.len(),
            directors.len(),
            actors.len()
        );

        Self {
            evaluations: evaluations.len(),
            years,
            decades,
            genres,
            countries,
            languages,
            directors,
            writers,
            producers,
            composers,
            actors,
        }
    }

    pub fn people(&self, role: Role) -> &[PersonStat] {
        match role {
            Role::Director => &self.directors,
            Role::Writer => &self.writers,
            Role::Producer => &self.producers,
            Role::Composer => &self.composers,
            Role::Actor => &self.actors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::SortMode;
    use crate::persons::compose_persons_rate;
    use data_loader::{Credit, MovieSummary, PersonRef};

    fn create_test_evaluations() -> Vec<EvaluationRecord> {
        let lead = PersonRef {
            name: "Tom Hanks".to_string(),
            profile_url: "https://www.imdb.com/name/nm0000158/".to_string(),
            ..Default::default()
        };
        (0..6)
            .map(|i| EvaluationRecord {
                movie: MovieSummary {
                    title: format!("Film {}", i),
                    year: format!("{}", 1990 + i * 4),
                    genres: vec!["Drama".to_string()],
                    countries: vec!["USA".to_string()],
                    cast: vec![Credit::new(lead.clone())],
                    ..Default::default()
                },
                user_rating: 7.0,
                user_eval_date: format!("2024-01-0{}", i + 1),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_report_matches_individual_stats() {
        let evals = create_test_evaluations();
        let config = StatsConfig::default();
        let report = StatsReport::build(&evals, &config);

        assert_eq!(report.evaluations, 6);
        assert_eq!(report.years.len(), 6);
        assert_eq!(report.years.total_quantity(), 6);
        assert_eq!(report.decades.total_quantity(), 6);
        assert_eq!(report.genres.get("Drama").unwrap().percent, 100.0);
        assert!(report.languages.is_empty());
        assert_eq!(
            report.people(Role::Actor),
            compose_persons_rate(&evals, 5, Role::Actor).as_slice()
        );
    }

    #[test]
    fn test_report_respects_thresholds() {
        let evals = create_test_evaluations();
        let config = StatsConfig::default()
            .with_threshold(Role::Actor, 7)
            .with_sort(SortMode::KeyAsc);
        let report = StatsReport::build(&evals, &config);

        assert!(report.actors.is_empty());
        let keys: Vec<&str> = report.years.keys().collect();
        assert_eq!(keys[0], "1990");
    }
}
