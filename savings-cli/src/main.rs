use std::path::PathBuf;

use clap::Parser;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use savings_cli::analytics::{AnalyticsSink, JsonLinesSink, TracingSink};
use savings_cli::csv_loader;
use savings_cli::presenter::Presenter;
use savings_cli::{config, format};
use savings_core::{EntityType, TaxRegime};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Tax savings estimator for business entities.
///
/// Computes the current tax liability under the progressive slab table and
/// the optimized liability after entity-specific restructuring, then prints
/// both along with the potential savings.
#[derive(Debug, Parser)]
struct Cli {
    /// Annual income in whole currency units. Commas are accepted
    /// (e.g. `12,50,000`).
    #[arg(long, value_parser = parse_income, required_unless_present = "batch", conflicts_with = "batch")]
    income: Option<Decimal>,

    /// Business entity type: proprietorship, partnership, private-limited,
    /// or llp. Unrecognized values fall back to proprietorship.
    #[arg(long, default_value = "proprietorship")]
    entity: String,

    /// TOML file overriding the built-in rate table.
    #[arg(long)]
    regime: Option<PathBuf>,

    /// CSV file of scenarios (`income,entity`) to estimate in bulk.
    #[arg(long)]
    batch: Option<PathBuf>,

    /// Append analytics events as JSON lines to this file instead of
    /// logging them.
    #[arg(long)]
    analytics_log: Option<PathBuf>,
}

fn parse_income(s: &str) -> Result<Decimal, String> {
    format::parse_amount(s).map_err(|e| e.to_string())
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let regime = match &cli.regime {
        Some(path) => config::load_regime(path)?,
        None => TaxRegime::default(),
    };

    let sink: Box<dyn AnalyticsSink> = match &cli.analytics_log {
        Some(path) => Box::new(JsonLinesSink::open(path)?),
        None => Box::new(TracingSink),
    };
    let presenter = Presenter::new(&regime, sink.as_ref());

    if let Some(batch) = &cli.batch {
        let scenarios = csv_loader::load_from_file(batch)?;
        debug!(count = scenarios.len(), "running batch scenarios");
        for block in presenter.run_batch(&scenarios)? {
            println!("{block}\n");
        }
    } else {
        // `required_unless_present` guarantees income is set on this path.
        let income = cli
            .income
            .ok_or_else(|| anyhow::anyhow!("--income is required"))?;
        let entity = EntityType::parse(&cli.entity).unwrap_or_else(|| {
            warn!(input = %cli.entity, "unrecognized entity type, using proprietorship");
            EntityType::SoleProprietorship
        });
        println!("{}", presenter.run_single(income, entity)?);
    }

    Ok(())
}
