use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

mod db;
mod error;
mod factors;
mod models;
mod notify;
mod pipeline;
mod report;
mod score;
mod sentiment;
mod store;
mod trend;

use crate::models::DashboardMetrics;
use crate::notify::{LogSink, ScoreSink};
use crate::store::Store;

#[derive(Parser)]
#[command(name = "burnout-monitor")]
#[command(about = "Burnout risk tracking from work activity and journal sentiment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic demo data for one user
    Seed,
    /// Import activity samples from a CSV file (upsert on user and date)
    Ingest {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Record or list journal entries
    Journal {
        #[command(subcommand)]
        command: JournalCommands,
    },
    /// Compute and persist a burnout score snapshot
    Score {
        #[arg(long)]
        user: Uuid,
        #[arg(long, default_value_t = 7)]
        window_days: i64,
    },
    /// Print the latest dashboard payload as JSON
    Metrics {
        #[arg(long)]
        user: Uuid,
    },
    /// Generate a markdown wellness report
    Report {
        #[arg(long)]
        user: Uuid,
        #[arg(long, default_value_t = 7)]
        window_days: i64,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
enum JournalCommands {
    /// Record a journal entry; sentiment is derived at submission
    Add {
        #[arg(long)]
        user: Uuid,
        #[arg(long)]
        content: String,
    },
    /// List recent entries, most recent first
    List {
        #[arg(long)]
        user: Uuid,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "burnout_monitor=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;
    let store = db::PgStore::new(pool);

    match cli.command {
        Commands::InitDb => {
            db::init_db(store.pool()).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let user_id = db::seed(&store).await?;
            println!("Seed data inserted for user {user_id}.");
        }
        Commands::Ingest { csv } => {
            let applied = db::import_csv(&store, &csv).await?;
            println!("Applied {applied} activity samples from {}.", csv.display());
        }
        Commands::Journal { command } => match command {
            JournalCommands::Add { user, content } => {
                let entry = pipeline::submit_journal(&store, user, &content).await?;
                println!(
                    "Recorded entry {} ({}, score {:+.1}, {} words).",
                    entry.id,
                    entry.sentiment_label.as_str(),
                    entry.sentiment_score,
                    entry.word_count
                );
            }
            JournalCommands::List { user, limit } => {
                let entries = store.journal_entries(user, limit).await?;
                if entries.is_empty() {
                    println!("No journal entries for this user.");
                    return Ok(());
                }
                for entry in entries {
                    println!(
                        "- {} ({}, {:+.1}): {}",
                        entry.created_at.date_naive(),
                        entry.sentiment_label.as_str(),
                        entry.sentiment_score,
                        entry.content
                    );
                }
            }
        },
        Commands::Score { user, window_days } => {
            let sink = LogSink;
            let sinks: [&dyn ScoreSink; 1] = [&sink];
            let record = pipeline::compute_score(&store, &sinks, user, window_days).await?;
            println!(
                "Overall {:.1} / 10 ({} risk), trend {} {:.1}%.",
                record.overall_score,
                record.risk_level.as_str(),
                record.trend_direction.as_str(),
                record.trend_percentage
            );
            println!(
                "Factors: work hours {:.1}, meetings {:.1}, email {:.1}, breaks {:.1}, sentiment {:.1}.",
                record.work_hours_score,
                record.meeting_load_score,
                record.email_stress_score,
                record.break_frequency_score,
                record.sentiment_score
            );
        }
        Commands::Metrics { user } => match store.latest_score(user).await? {
            None => println!("No burnout score recorded yet for this user."),
            Some(record) => {
                let metrics = DashboardMetrics::from(&record);
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            }
        },
        Commands::Report {
            user,
            window_days,
            out,
        } => {
            let cutoff = pipeline::cutoff_date(window_days);
            let today = chrono::Utc::now().date_naive();
            let samples = store.activity_samples(user, cutoff, today).await?;
            let entries = store.journal_entries(user, 20).await?;
            let latest = store.latest_score(user).await?;
            let report = report::build_report(
                user,
                window_days,
                cutoff,
                latest.as_ref(),
                &samples,
                &entries,
            );
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
