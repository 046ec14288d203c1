//! Store operations metrics reporter
//!
//! Loads the analysis dataset produced by the data retrieval job, runs the
//! metrics engine over it and writes CSV reports plus a console summary.

mod config;
mod constants;
mod reports;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use store_metrics::{Dataset, MetricsEngine, growth_points};

use config::FileConfig;

#[derive(Parser, Debug)]
#[command(name = "store-reporter")]
#[command(about = "Metrics reports for the store operations dashboard")]
struct Args {
    /// Dataset document produced by the data retrieval job
    #[arg(short, long, default_value = constants::DEFAULT_DATASET_PATH, global = true)]
    dataset: PathBuf,

    /// Output directory for generated CSV reports
    #[arg(short, long, default_value = constants::DEFAULT_OUTPUT_DIR, global = true)]
    output_dir: PathBuf,

    /// Config file with category label bindings
    #[arg(long, default_value = constants::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Filter reports to a specific year (e.g., 2024)
    #[arg(long)]
    year: Option<i32>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Period-over-period growth for any named category series
    Growth {
        /// Raw category label as it appears in the dataset
        #[arg(long)]
        category: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = FileConfig::load_or_default(&args.config)?;
    let dataset = load_dataset(&args.dataset)?;
    warn_on_period_disorder(&dataset);

    let mut engine = MetricsEngine::new(file_config.categories);
    engine.refresh(dataset);

    if let Some(command) = args.command {
        return handle_command(command, &engine);
    }

    run_report_generation(&args, &engine)
}

/// Load and validate the dataset document
fn load_dataset(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;

    let dataset = Dataset::from_json_str(&content)
        .with_context(|| format!("Rejected dataset document: {}", path.display()))?;

    println!(
        "Loaded {} periods, {} trend series, {} distribution entries\n",
        dataset.period_count(),
        dataset.category_trend.len(),
        dataset.category_distribution.len()
    );

    Ok(dataset)
}

/// Warn when calendar-month labels are out of order or duplicated.
///
/// Chronological order is the retrieval job's contract; this is a
/// diagnostic, not an error.
fn warn_on_period_disorder(dataset: &Dataset) {
    let parsed: Vec<_> = dataset
        .months
        .iter()
        .filter_map(|label| {
            chrono::NaiveDate::parse_from_str(&format!("{label}-01"), "%Y-%m-%d").ok()
        })
        .collect();

    if parsed.len() != dataset.months.len() {
        // labels are not calendar months, nothing to check
        return;
    }

    if parsed.windows(2).any(|pair| pair[0] >= pair[1]) {
        eprintln!(
            "Warning: period labels are not strictly increasing; trends may be misleading"
        );
    }
}

/// Handle subcommands
fn handle_command(command: Command, engine: &MetricsEngine) -> Result<()> {
    match command {
        Command::Growth { category } => {
            let store = engine.store()?;
            let series = store.series_for_label(&category);
            let points = growth_points(store.months(), &series);

            if points.is_empty() {
                println!("Not enough periods for growth rates (need at least 2).");
                return Ok(());
            }

            println!("{:<12} {:>10}", "Period", "Rate");
            println!("{}", "-".repeat(24));
            for point in &points {
                println!("{:<12} {:>9.2}%", point.period, point.rate_percent);
            }
            println!("\n{} period transition(s) for '{}'", points.len(), category);

            Ok(())
        }
    }
}

/// Run the main report generation workflow
fn run_report_generation(args: &Args, engine: &MetricsEngine) -> Result<()> {
    println!("Store Operations Metrics Reporter");
    println!("=============================================\n");

    if let Some(year) = args.year {
        println!("Generating reports for year {}...", year);
    } else {
        println!("Generating reports...");
    }

    std::fs::create_dir_all(&args.output_dir)?;
    reports::generate_all_reports(&args.output_dir, engine, args.year)?;

    reports::print_summary(engine)?;

    println!("\nDone! Reports written to: {}", args.output_dir.display());

    Ok(())
}
