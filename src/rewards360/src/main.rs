//! Rewards360 analytics: operator CLI over the analytics engine.
//!
//! Loads configuration, seeds the record stores from a dataset file, opens
//! the report history log and runs a single command, printing JSON.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rewards_analytics::{AnalyticsService, RecordStores};
use rewards_core::config::{AppConfig, HistoryBackend};
use rewards_core::store::ReportStore;
use rewards_store::{Dataset, InMemoryReportLog, JsonlReportLog};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "rewards360")]
#[command(about = "KPIs, monthly trends and reports over users, offers and redemptions")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./rewards360.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dataset JSON with users, offers and redemptions (overrides config)
    #[arg(long, env = "REWARDS360__DATA__PATH")]
    data: Option<String>,

    /// Report history file (overrides config)
    #[arg(long, env = "REWARDS360__HISTORY__PATH")]
    history_path: Option<String>,

    /// Keep report history in memory only
    #[arg(long, default_value_t = false)]
    memory_history: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Headline counts and redemption rate
    Kpis,
    /// Monthly series for a metric (users, offers, redemption)
    Trend { metric: String },
    /// Generate a report for a metric over an inclusive date range
    Report {
        metric: String,
        /// Start date, YYYY-MM-DD
        start: String,
        /// End date, YYYY-MM-DD
        end: String,
    },
    /// List stored records
    History {
        #[arg(value_enum, default_value_t = Listing::Reports)]
        listing: Listing,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Listing {
    Reports,
    Users,
    Offers,
    Redemptions,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "rewards360=info,rewards_analytics=info,rewards_store=info".into()
            }),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config.as_deref() {
        Some(path) => AppConfig::load_from(Some(path))
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::load().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        }),
    };

    if let Some(data) = cli.data {
        config.data.path = Some(data);
    }
    if let Some(path) = cli.history_path {
        config.history.path = path;
    }
    if cli.memory_history {
        config.history.backend = HistoryBackend::Memory;
    }
    config.validate()?;

    info!(
        node_id = %config.node_id,
        data = ?config.data.path,
        history_backend = ?config.history.backend,
        history_path = %config.history.path,
        "Configuration loaded"
    );

    let dataset = match config.data.path.as_deref() {
        Some(path) => {
            Dataset::from_path(path).with_context(|| format!("loading dataset {path}"))?
        }
        None => {
            warn!("No dataset configured, record stores are empty");
            Dataset::default()
        }
    };
    let seeded = dataset.into_stores();
    let stores = RecordStores::new(
        Arc::new(seeded.users),
        Arc::new(seeded.offers),
        Arc::new(seeded.redemptions),
    );

    let history: Arc<dyn ReportStore> = match config.history.backend {
        HistoryBackend::Memory => Arc::new(InMemoryReportLog::new()),
        HistoryBackend::File => Arc::new(
            JsonlReportLog::open(&config.history.path)
                .with_context(|| format!("opening report history {}", config.history.path))?,
        ),
    };

    let service = AnalyticsService::new(stores, history);

    match cli.command {
        Command::Kpis => print_json(&service.get_kpis()),
        Command::Trend { metric } => print_json(&service.get_trend(&metric)?),
        Command::Report { metric, start, end } => {
            let result = service.generate_report(&metric, &start, &end).inspect_err(|e| {
                if e.is_date_parse() {
                    warn!(error = %e, "Report rejected, nothing recorded");
                }
            })?;
            print_json(&result)
        }
        Command::History { listing } => match listing {
            Listing::Reports => print_json(&service.get_reports_history()?),
            Listing::Users => print_json(&service.get_users_history()?),
            Listing::Offers => print_json(&service.get_offers_history()?),
            Listing::Redemptions => print_json(&service.get_redemptions_history()?),
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
