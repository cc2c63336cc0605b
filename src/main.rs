use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod http;
mod import;
mod models;
mod report;
mod risk;
mod store;
mod validate;

use config::{ScoringWeights, ServerConfig};
use risk::ScoringEngine;
use store::RecordStore;

#[derive(Parser)]
#[command(name = "student-performance-predictor")]
#[command(about = "Weighted academic performance scoring and risk classification", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the prediction HTTP service
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "PORT", default_value_t = 5000)]
        port: u16,
        /// Built frontend to serve for non-API paths
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Score students from a CSV file and list the weakest
    Score {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Generate a markdown report for students in a CSV file
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let engine =
        ScoringEngine::new(ScoringWeights::standard()).context("invalid scoring weights")?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            static_dir,
        } => {
            let config = ServerConfig {
                host,
                port,
                static_dir,
            };
            let state = Arc::new(http::AppState::new(engine));
            http::serve(config, state).await?;
        }
        Commands::Score { csv, limit } => {
            let students = import::load_csv(&csv)?;
            let store = RecordStore::new();
            import::score_into(&engine, &store, &students);

            if store.is_empty() {
                println!("No students found in {}.", csv.display());
                return Ok(());
            }

            let listing = store.list_all();
            println!("Weakest students by performance score:");
            for record in report::rank_weakest(&listing.records).iter().take(limit) {
                println!(
                    "- {} ({}) score {:.2} [{}] {} insights",
                    record.student_name,
                    record.roll_number,
                    record.prediction.score,
                    record.prediction.risk_level.as_str(),
                    record.prediction.insights.len()
                );
            }

            let stats = store.statistics();
            println!();
            println!(
                "{} students, average score {:.2}",
                stats.total_predictions, stats.average_score
            );
            for (level, count) in &stats.risk_distribution {
                println!("  {}: {}", level.as_str(), count);
            }
        }
        Commands::Report { csv, out } => {
            let students = import::load_csv(&csv)?;
            let store = RecordStore::new();
            let scored = import::score_into(&engine, &store, &students);

            let label = csv
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| csv.display().to_string());
            let report = report::build_report(&label, &store);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report for {scored} students written to {}.", out.display());
        }
    }

    Ok(())
}
