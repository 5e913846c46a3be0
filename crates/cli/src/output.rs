//! Terminal rendering of statistics.
//!
//! Values stay numeric everywhere else; this is the only place they are
//! turned into fixed-decimal text.

use chrono::NaiveDateTime;
use colored::Colorize;
use data_loader::{format_num, EvaluationRecord};
use stats::{Occupation, PersonProfile, PersonStat, PropertyLookup, StatMap, StatsReport};

/// "15.03.2024, 18:42", or "-" when the date is unknown
pub fn format_date(date: Option<NaiveDateTime>) -> String {
    date.map(|date| date.format("%d.%m.%Y, %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Vote counts as stored ("1,234,567"); short forms ("1.5K") are expanded
pub fn format_votes(votes: &str) -> String {
    if votes.contains(['K', 'M']) {
        format!("{}", format_num(votes) as u64)
    } else {
        votes.to_string()
    }
}

pub fn print_stat_map(title: &str, map: &StatMap, limit: Option<usize>) {
    println!("{}", title.bold().blue());
    if map.is_empty() {
        println!("  {}", "no data".dimmed());
        return;
    }
    for entry in map.iter().take(limit.unwrap_or(usize::MAX)) {
        println!(
            "  {:<14} {:>5}  {:>6}%  {}",
            entry.key.bold(),
            entry.bucket.quantity,
            entry.bucket.percent_label(),
            entry.bucket.rating_label().green()
        );
    }
}

pub fn print_people(title: &str, people: &[PersonStat], limit: Option<usize>) {
    println!("{}", title.bold().blue());
    if people.is_empty() {
        println!("  {}", "no data".dimmed());
        return;
    }
    for (rank, person) in people.iter().take(limit.unwrap_or(usize::MAX)).enumerate() {
        println!(
            "{:>3}. {} ({}) - {} evaluations, rating {:.2}, last {}",
            (rank + 1).to_string().green(),
            person.name.bold(),
            person.id,
            person.quantity,
            person.rating,
            format_date(person.last_evaluated)
        );
    }
}

fn print_occupation(occupation: &Occupation<'_>) {
    println!(
        "{}{}: {} evaluations, rating {:.2}",
        "• ".green(),
        occupation.role,
        occupation.quantity,
        occupation.rating
    );
    for record in &occupation.films {
        println!("    - {} ({}) {}", record.movie.title, record.movie.year_key(), record.user_rating);
    }
}

pub fn print_profile(profile: &PersonProfile<'_>) {
    println!("{}", format!("{} ({})", profile.name, profile.id).bold().blue());
    if !profile.profile_url.is_empty() {
        println!("  {}", profile.profile_url.dimmed());
    }
    for occupation in &profile.occupations {
        print_occupation(occupation);
    }
}

pub fn print_lookup(lookup: &PropertyLookup<'_>) {
    let rating = if lookup.rating.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.3}", lookup.rating)
    };
    println!(
        "{}",
        format!("{} = {}", lookup.dimension, lookup.search_item).bold().blue()
    );
    println!("{}Evaluations: {}", "• ".cyan(), lookup.quantity);
    println!("{}Average rating: {}", "• ".cyan(), rating);
    for record in &lookup.films {
        println!("  - {} ({})", record.movie.title, record.movie.year_key());
    }
}

pub fn print_table(rows: &[&EvaluationRecord]) {
    println!("{}", "Evaluations:".bold().blue());
    for record in rows {
        let movie = &record.movie;
        let favorite = if record.is_favorite { "★".yellow().to_string() } else { " ".to_string() };
        println!(
            "{} {:<18} {:>4}  {:<40} {:<9} {:>4}  imdb {:>4} ({})",
            favorite,
            format_date(record.last_changed_at()),
            movie.year_key(),
            movie.title,
            movie.media_type.label(),
            record.user_rating.to_string().green(),
            movie.external_rating,
            format_votes(&movie.external_vote_count)
        );
    }
    println!("{} rows", rows.len());
}

pub fn print_report(report: &StatsReport, limit: Option<usize>) {
    println!("{}", format!("Report over {} evaluations", report.evaluations).bold());
    print_stat_map("Years:", &report.years, limit);
    print_stat_map("Decades:", &report.decades, limit);
    print_stat_map("Genres:", &report.genres, limit);
    print_stat_map("Countries:", &report.countries, limit);
    print_stat_map("Languages:", &report.languages, limit);
    print_people("Directors:", &report.directors, limit);
    print_people("Writers:", &report.writers, limit);
    print_people("Producers:", &report.producers, limit);
    print_people("Composers:", &report.composers, limit);
    print_people("Actors:", &report.actors, limit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(8, 7, 0)
            .unwrap();
        assert_eq!(format_date(Some(date)), "05.03.2024, 08:07");
        assert_eq!(format_date(None), "-");
    }

    #[test]
    fn test_format_votes() {
        assert_eq!(format_votes("2,345,111"), "2,345,111");
        assert_eq!(format_votes("1.5K"), "1500");
        assert_eq!(format_votes(""), "");
    }
}
