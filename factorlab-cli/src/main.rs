//! FactorLab CLI: run and factor-table commands.
//!
//! Commands:
//! - `run`: execute a synthetic or live run and print the ranked table
//! - `factors`: list the 43-factor table with groups and weights

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use factorlab_core::model::factors::{factor_table, total_weight_pct};
use factorlab_runner::export::{export_json, format_table, save_artifacts};
use factorlab_runner::{run, DataMode, RunConfig};

#[derive(Parser)]
#[command(
    name = "factorlab",
    about = "FactorLab CLI — seeded factor-model stock screener"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a run and print the result table.
    Run {
        /// Path to a TOML config file. Flags below override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Data mode: synthetic or live.
        #[arg(long)]
        mode: Option<DataMode>,

        /// Model seed. Coerced to an unsigned 32-bit integer.
        #[arg(long, allow_negative_numbers = true)]
        seed: Option<f64>,

        /// Synthetic universe size. Clamped to the supported range.
        #[arg(long)]
        size: Option<f64>,

        /// Run date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        run_date: Option<String>,

        /// Print the result as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Save result.json, results.csv and report.md under this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// List the factor table.
    Factors,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            mode,
            seed,
            size,
            run_date,
            json,
            output_dir,
        } => run_cmd(RunArgs {
            config,
            mode,
            seed,
            size,
            run_date,
            json,
            output_dir,
        }),
        Commands::Factors => {
            print_factors();
            Ok(())
        }
    }
}

struct RunArgs {
    config: Option<PathBuf>,
    mode: Option<DataMode>,
    seed: Option<f64>,
    size: Option<f64>,
    run_date: Option<String>,
    json: bool,
    output_dir: Option<PathBuf>,
}

fn run_cmd(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.run.mode = mode;
    }
    if let Some(seed) = args.seed {
        config.run.seed = seed;
    }
    if let Some(size) = args.size {
        config.run.universe_size = size;
    }

    let run_date = match args.run_date.as_deref() {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid --run-date '{s}' (expected YYYY-MM-DD)"))?,
        None => chrono::Local::now().date_naive(),
    };

    let result = run(&config, run_date)?;

    if args.json {
        println!("{}", export_json(&result)?);
    } else {
        print!("{}", format_table(&result));
    }

    if let Some(dir) = &args.output_dir {
        let run_dir = save_artifacts(&result, dir)?;
        eprintln!("Artifacts saved to: {}", run_dir.display());
    }

    Ok(())
}

fn print_factors() {
    println!("{:>3}  {:<36} {:<11} {:>7}", "ID", "FACTOR", "GROUP", "WEIGHT");
    println!("{}", "-".repeat(61));
    for f in factor_table() {
        println!(
            "{:>3}  {:<36} {:<11} {:>6.2}%",
            f.id,
            f.name,
            f.group.to_string(),
            f.weight_pct
        );
    }
    println!("{}", "-".repeat(61));
    println!("{:>61}", format!("total {:.2}%", total_weight_pct()));
}
