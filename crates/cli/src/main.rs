mod output;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{EvaluationRecord, EvaluationSnapshot, Role};
use pipeline::movie_table;
use serde::Serialize;
use stats::{
    compose_decade_stat_in, get_country_stat, get_genre_stat, get_language_stat,
    get_person_stat, get_single_property, get_year_stat_in, parse_role, person_profile,
    Dimension, SortMode, StatsConfig, StatsReport, TableSortMode,
};
use std::path::PathBuf;
use std::time::Instant;

/// ReelStats - statistics over your movie and TV evaluations
#[derive(Parser)]
#[command(name = "reel-stats")]
#[command(about = "Aggregate statistics over a personal evaluation history", long_about = None)]
struct Cli {
    /// Path to the exported evaluation snapshot (JSON)
    #[arg(short, long, default_value = "data/evaluations.json")]
    data: PathBuf,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sort mode for statistic maps and person rankings (e.g. rating-desc)
    #[arg(short, long)]
    sort: Option<SortMode>,

    /// Print JSON instead of formatted text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluations per release year
    Years {
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Evaluations per release decade
    Decades,

    /// Evaluations per genre, country or language
    Breakdown {
        /// genre | country | language
        #[arg(long)]
        by: Dimension,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Ranking of people in one role
    People {
        /// director | writer | producer | composer | actor
        #[arg(long, value_parser = parse_role)]
        role: Role,

        /// Minimum evaluations to be listed (defaults to the configured threshold)
        #[arg(long)]
        min: Option<u32>,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Every role a person has across the history
    Person {
        /// Canonical person ID (e.g. nm0000093)
        #[arg(long)]
        id: String,
    },

    /// Quantity and average rating for a single value
    Lookup {
        /// year | type | genre | country | language | director | ...
        #[arg(long)]
        dimension: Dimension,

        #[arg(long)]
        value: String,
    },

    /// The evaluation table, sorted and optionally filtered
    Table {
        /// Table sort mode (e.g. eval-datetime-desc)
        #[arg(long)]
        sort: Option<TableSortMode>,

        /// Dimension to filter on
        #[arg(long)]
        filter: Option<Dimension>,

        /// Filter value
        #[arg(long, default_value = "")]
        value: String,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// All statistics at once
    Report {
        /// Rows shown per section
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => StatsConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => StatsConfig::default(),
    };
    if let Some(sort) = cli.sort {
        config = config.with_sort(sort);
    }

    let start = Instant::now();
    let snapshot = EvaluationSnapshot::load_from_file(&cli.data)
        .with_context(|| format!("Failed to load evaluations from {}", cli.data.display()))?;
    tracing::debug!("Snapshot loaded in {:.2?}", start.elapsed());

    let evaluations = snapshot.records();
    let json = cli.json;

    match cli.command {
        Commands::Years { limit } => handle_years(evaluations, &config, limit, json),
        Commands::Decades => handle_decades(evaluations, &config, json),
        Commands::Breakdown { by, limit } => handle_breakdown(evaluations, &config, by, limit, json),
        Commands::People { role, min, limit } => {
            handle_people(evaluations, &config, role, min, limit, json)
        }
        Commands::Person { id } => handle_person(evaluations, &id, json),
        Commands::Lookup { dimension, value } => handle_lookup(evaluations, dimension, &value, json),
        Commands::Table {
            sort,
            filter,
            value,
            limit,
        } => handle_table(
            evaluations,
            sort.unwrap_or(config.table_sort),
            filter,
            &value,
            limit,
            json,
        ),
        Commands::Report { limit } => handle_report(evaluations, &config, limit, json),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_years(
    evaluations: &[EvaluationRecord],
    config: &StatsConfig,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let stat = get_year_stat_in(evaluations, config.sort, &config.year_range());
    if json {
        return print_json(&stat);
    }
    output::print_stat_map("Release years:", &stat, limit);
    Ok(())
}

fn handle_decades(evaluations: &[EvaluationRecord], config: &StatsConfig, json: bool) -> Result<()> {
    let stat = compose_decade_stat_in(evaluations, config.sort, &config.year_range());
    if json {
        return print_json(&stat);
    }
    output::print_stat_map("Release decades:", &stat, None);
    Ok(())
}

fn handle_breakdown(
    evaluations: &[EvaluationRecord],
    config: &StatsConfig,
    by: Dimension,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let stat = match by {
        Dimension::Genre => get_genre_stat(evaluations, config.sort),
        Dimension::Country => get_country_stat(evaluations, config.sort),
        Dimension::Language => get_language_stat(evaluations, config.sort),
        other => return Err(anyhow!("No breakdown by {} (use genre, country or language)", other)),
    };
    if json {
        return print_json(&stat);
    }
    output::print_stat_map(&format!("Breakdown by {}:", by), &stat, limit);
    Ok(())
}

fn handle_people(
    evaluations: &[EvaluationRecord],
    config: &StatsConfig,
    role: Role,
    min: Option<u32>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let min = min.unwrap_or_else(|| config.threshold(role));
    let people = get_person_stat(evaluations, role, config.sort, min);
    if json {
        return print_json(&people);
    }
    output::print_people(&format!("{} (at least {} evaluations):", role, min), &people, limit);
    Ok(())
}

fn handle_person(evaluations: &[EvaluationRecord], id: &str, json: bool) -> Result<()> {
    let profile = person_profile(evaluations, id)
        .ok_or_else(|| anyhow!("Person {} is not credited in any evaluation", id))?;
    if json {
        return print_json(&profile);
    }
    output::print_profile(&profile);
    Ok(())
}

fn handle_lookup(
    evaluations: &[EvaluationRecord],
    dimension: Dimension,
    value: &str,
    json: bool,
) -> Result<()> {
    let lookup = get_single_property(evaluations, value, dimension)
        .ok_or_else(|| anyhow!("Lookup by {} is not supported", dimension))?;
    if json {
        return print_json(&lookup);
    }
    output::print_lookup(&lookup);
    Ok(())
}

fn handle_table(
    evaluations: &[EvaluationRecord],
    sort: TableSortMode,
    filter: Option<Dimension>,
    value: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut rows = movie_table(evaluations, sort, filter.map(|dimension| (dimension, value)));
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    if json {
        return print_json(&rows);
    }
    output::print_table(&rows);
    Ok(())
}

fn handle_report(
    evaluations: &[EvaluationRecord],
    config: &StatsConfig,
    limit: usize,
    json: bool,
) -> Result<()> {
    let start = Instant::now();
    let report = StatsReport::build(evaluations, config);
    let elapsed = start.elapsed();

    if json {
        return print_json(&report);
    }
    output::print_report(&report, Some(limit));
    println!("{}", format!("Computed in {:.2?}", elapsed).dimmed());
    Ok(())
}
