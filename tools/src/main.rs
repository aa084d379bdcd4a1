//! cluster-runner: monthly severity clustering over an incident CSV.
//!
//! Usage:
//!   cluster-runner --data ../data.csv
//!   cluster-runner --data data.csv --config analysis.json --plot out.png
//!   cluster-runner --data data.csv --seed 7 --clusters 4 --json --no-plot
//!   cluster-runner --data data.csv --yearly --counts country_txt

use anyhow::{Context, Result};
use incident_cluster_core::{
    aggregate::{prop_value_by_year, unique_counts},
    analysis::{format_centroids, run_analysis, ClusterReport},
    config::AnalysisConfig,
    dataset::IncidentTable,
    plot::render_scatter,
};
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data = string_arg(&args, "--data").unwrap_or("../data.csv");
    let json = has_flag(&args, "--json");

    let mut config = match string_arg(&args, "--config") {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("loading config {path}"))?,
        None => AnalysisConfig::default(),
    };
    config.kmeans.seed = parse_arg(&args, "--seed", config.kmeans.seed);
    config.kmeans.n_clusters = parse_arg(&args, "--clusters", config.kmeans.n_clusters);
    if let Some(path) = string_arg(&args, "--plot") {
        config.plot.path = PathBuf::from(path);
    }
    config.validate()?;
    log::debug!("Effective config: {config:?}");

    let table = IncidentTable::load(data).with_context(|| format!("reading {data}"))?;
    let report = run_analysis(&table, &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", format_centroids(&report.centroids));
    }

    if has_flag(&args, "--yearly") {
        print_yearly(&table, &config);
    }
    if let Some(column) = string_arg(&args, "--counts") {
        print_counts(&table, column)?;
    }

    if !has_flag(&args, "--no-plot") {
        plot(&report, &config)?;
    }
    Ok(())
}

fn plot(report: &ClusterReport, config: &AnalysisConfig) -> Result<()> {
    render_scatter(&config.plot.path, &report.points(), &report.labels, &config.plot)
        .with_context(|| format!("rendering {}", config.plot.path.display()))?;
    Ok(())
}

fn print_yearly(table: &IncidentTable, config: &AnalysisConfig) {
    println!();
    println!("=== PROPERTY VALUE BY YEAR ===");
    for year in config.years.years() {
        println!("  {year}: {:.0}", prop_value_by_year(table, year));
    }
}

fn print_counts(table: &IncidentTable, column: &str) -> Result<()> {
    let counts = unique_counts(table, column)?;
    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    println!();
    println!("=== VALUE COUNTS: {column} ===");
    for (value, count) in sorted {
        println!("  {count:>8}  {value}");
    }
    Ok(())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
