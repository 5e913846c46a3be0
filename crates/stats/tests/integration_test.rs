//! Integration tests for the stats engine.
//!
//! These run the public entry points end to end over small evaluation sets
//! and check the properties every statistic must keep.

use data_loader::{Credit, EvaluationRecord, MovieSummary, PersonRef, Role};
use stats::{
    BucketAccumulator, Dimension, SortMode, StatBucket, StatEntry, StatMap, YearRange,
    compose_decade_stat_in, compose_full_stat, compose_persons_rate, get_year_stat_in, sort_stat,
};

fn evaluation(year: &str, genres: &[&str], rating: f64) -> EvaluationRecord {
    EvaluationRecord {
        movie: MovieSummary {
            title: format!("Film from {}", year),
            year: year.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        },
        user_rating: rating,
        user_eval_date: "2024-01-01T00:00:00Z".to_string(),
        ..Default::default()
    }
}

fn create_test_evaluations() -> Vec<EvaluationRecord> {
    vec![
        evaluation("1957", &["Drama"], 9.0),
        evaluation("1994-09-23", &["Drama", "Crime"], 9.5),
        evaluation("1994", &["Crime"], 8.0),
        evaluation("2003", &["Animation"], 7.0),
        evaluation("2010", &["Sci-Fi", "Thriller"], 8.5),
        evaluation("2019", &["Thriller"], 6.0),
        evaluation("2023", &["Drama"], 7.5),
    ]
}

fn entry(key: &str, quantity: u32, rating: f64) -> StatEntry {
    StatEntry {
        key: key.to_string(),
        bucket: StatBucket {
            quantity,
            percent: 0.0,
            rating,
        },
    }
}

fn sorted_keys(map: &StatMap, mode: SortMode) -> Vec<String> {
    sort_stat(map, mode).keys().map(str::to_string).collect()
}

#[test]
fn test_percent_conservation_for_years() {
    let evals = create_test_evaluations();
    let stat = get_year_stat_in(&evals, SortMode::QuantityDesc, &YearRange::new(1895, 2030));

    assert_eq!(stat.total_quantity() as usize, evals.len());
    let percent_sum: f64 = stat.iter().map(|entry| entry.bucket.percent).sum();
    assert!((percent_sum - 100.0).abs() <= 0.01, "sum was {}", percent_sum);
}

#[test]
fn test_decade_rating_is_weighted() {
    // 1994: two evaluations averaging 8.75, 1997: one evaluation of 5.0
    let evals = vec![
        evaluation("1994", &[], 9.5),
        evaluation("1994", &[], 8.0),
        evaluation("1997", &[], 5.0),
    ];
    let stat = compose_decade_stat_in(&evals, SortMode::KeyAsc, &YearRange::new(1990, 2000));

    let nineties = stat.get("1994-1997").unwrap();
    assert_eq!(nineties.quantity, 3);
    // (8.75 * 2 + 5.0 * 1) / 3
    assert_eq!(nineties.rating, 7.5);
}

#[test]
fn test_sort_tie_breaks() {
    let map = StatMap::from_entries(vec![
        entry("C", 10, 7.5),
        entry("A", 25, 8.2),
        entry("B", 15, 7.8),
    ]);

    assert_eq!(sorted_keys(&map, SortMode::QuantityDesc), vec!["A", "B", "C"]);
    assert_eq!(sorted_keys(&map, SortMode::RatingDesc), vec!["A", "B", "C"]);

    let tied = StatMap::from_entries(vec![entry("X", 10, 6.0), entry("Y", 10, 9.0)]);
    assert_eq!(sorted_keys(&tied, SortMode::QuantityDesc), vec!["Y", "X"]);
    assert_eq!(sorted_keys(&tied, SortMode::QuantityAsc), vec!["X", "Y"]);
}

#[test]
fn test_finalize_is_idempotent() {
    let evals = create_test_evaluations();
    let stat = compose_full_stat(&evals, Dimension::Genre, None).unwrap();

    let again = BucketAccumulator::from(&stat).finalize(evals.len() as u32);
    assert_eq!(again, stat);
}

#[test]
fn test_single_year_decade_key() {
    let evals = vec![evaluation("2020", &[], 8.0), evaluation("2020-05-01", &[], 6.0)];
    let stat = compose_decade_stat_in(&evals, SortMode::QuantityDesc, &YearRange::new(1895, 2027));

    let keys: Vec<&str> = stat.keys().collect();
    assert_eq!(keys, vec!["2020"]);
    assert_eq!(stat.get("2020").unwrap().rating, 7.0);
}

#[test]
fn test_genre_end_to_end() {
    let evals = vec![
        evaluation("1999", &["Drama", "Thriller"], 9.0),
        evaluation("2010", &["Drama"], 8.5),
    ];
    let stat = compose_full_stat(&evals, Dimension::Genre, None).unwrap();

    let keys: Vec<&str> = stat.keys().collect();
    assert_eq!(keys, vec!["Drama", "Thriller"]);

    let drama = stat.get("Drama").unwrap();
    assert_eq!(drama.quantity, 2);
    assert_eq!(drama.percent_label(), "100.00");
    assert_eq!(drama.rating_label(), "8.75");

    let thriller = stat.get("Thriller").unwrap();
    assert_eq!(thriller.quantity, 1);
    assert_eq!(thriller.percent_label(), "50.00");
    assert_eq!(thriller.rating_label(), "9.00");
}

#[test]
fn test_director_threshold() {
    let director = PersonRef {
        name: "Sidney Lumet".to_string(),
        profile_url: "https://www.imdb.com/name/nm0001486/".to_string(),
        ..Default::default()
    };
    let evals: Vec<EvaluationRecord> = (0..10)
        .map(|i| {
            let mut record = evaluation(&format!("{}", 1960 + i), &[], 7.0);
            if i < 2 {
                record.movie.directors.push(Credit::new(director.clone()));
            }
            record
        })
        .collect();

    assert!(compose_persons_rate(&evals, 3, Role::Director).is_empty());
    let included = compose_persons_rate(&evals, 2, Role::Director);
    assert_eq!(included.len(), 1);
    assert_eq!(included[0].quantity, 2);
}

#[test]
fn test_input_is_never_reordered() {
    let evals = create_test_evaluations();
    let before = evals.clone();

    let _ = compose_persons_rate(&evals, 1, Role::Actor);
    let _ = compose_decade_stat_in(&evals, SortMode::RatingAsc, &YearRange::new(1950, 2025));

    assert_eq!(evals, before);
}
