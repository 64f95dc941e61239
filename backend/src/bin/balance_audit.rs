//! Reconcile every account's balances against its points ledger.
//!
//! Loads the bundled records (or `--records <path>`), prints the audit report
//! as JSON and exits with an error when any account does not reconcile.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Report, Result, eyre};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use pergamino::domain::{BalanceAuditService, SeedRecords};
use pergamino::outbound::memory::InMemoryRecordStore;

#[derive(Debug, Parser)]
#[command(name = "balance-audit", about = "Audit loyalty balances against the points ledger")]
struct Cli {
    /// Seed file to audit instead of the bundled records.
    #[arg(long)]
    records: Option<PathBuf>,
}

fn load_records(path: Option<&PathBuf>) -> Result<SeedRecords> {
    match path {
        Some(path) => SeedRecords::from_file(path)
            .with_context(|| format!("failed to load records from {}", path.display())),
        None => SeedRecords::bundled().context("failed to load bundled records"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let records = load_records(cli.records.as_ref())?;
    let store = Arc::new(InMemoryRecordStore::from_seed(records));
    let report = BalanceAuditService::new(store)
        .run()
        .await
        .map_err(|err| Report::msg(err.to_string()).wrap_err("balance audit failed"))?;

    let json = serde_json::to_string_pretty(&report).context("failed to serialise report")?;
    println!("{json}");

    if report.is_clean() {
        Ok(())
    } else {
        Err(eyre!(
            "{} account(s) do not reconcile with their ledger",
            report.mismatches.len()
        ))
    }
}
