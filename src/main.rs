use clap::Parser;
use miette::{IntoDiagnostic, Result};
use recurpay::application::contract::SubscriptionContract;
use recurpay::config::ContractConfig;
use recurpay::domain::ports::LedgerStoreBox;
use recurpay::infrastructure::in_memory::InMemoryLedgerStore;
use recurpay::infrastructure::tracing_sink::TracingEventSink;
use recurpay::interfaces::csv::invocation_reader::InvocationReader;
use recurpay::interfaces::jsonl::outcome_writer::{Outcome, OutcomeWriter};
use recurpay::logging::init_tracing;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input invocations CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "RECURPAY_DB_PATH")]
    db_path: Option<PathBuf>,

    /// JSON file with role assignments and create mode
    #[arg(long, env = "RECURPAY_CONFIG")]
    config: Option<PathBuf>,

    /// Role allowed to create subscriptions and record payments
    #[arg(long)]
    payer_role: Option<String>,

    /// Role allowed to confirm payments and query subscriptions
    #[arg(long)]
    payee_role: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ContractConfig::load(path).into_diagnostic()?,
        None => ContractConfig::default(),
    };
    if let Some(role) = cli.payer_role {
        config = config.with_payer_role(role);
    }
    if let Some(role) = cli.payee_role {
        config = config.with_payee_role(role);
    }
    config.validate().into_diagnostic()?;

    let store = open_store(cli.db_path)?;
    let contract = SubscriptionContract::new(store, config.access_policy(), Box::new(TracingEventSink))
        .with_create_mode(config.create_mode);

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = InvocationReader::new(file);
    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock());

    let mut processed = 0usize;
    let mut failed = 0usize;
    for (index, row) in reader.invocations().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!(invocation = index + 1, error = %e, "skipping unreadable row");
                failed += 1;
                let outcome = Outcome::unreadable(index + 1, &e);
                writer.write_outcome(&outcome).into_diagnostic()?;
                continue;
            }
        };

        let invocation = row.to_invocation();
        let result = contract.invoke(&row.identity(), &invocation).await;
        if let Err(e) = &result {
            warn!(
                invocation = index + 1,
                function = %row.function,
                subscription_id = %row.subscription,
                error = %e,
                "invocation rejected"
            );
            failed += 1;
        }
        processed += 1;

        let outcome = Outcome::from_result(index + 1, &row.function, &row.subscription, &result);
        writer.write_outcome(&outcome).into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;

    info!(processed, failed, "replay finished");
    Ok(())
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(db_path: Option<PathBuf>) -> Result<LedgerStoreBox> {
    use recurpay::infrastructure::rocksdb::RocksDBLedgerStore;

    match db_path {
        Some(path) => {
            info!(path = %path.display(), "using RocksDB ledger");
            let store = RocksDBLedgerStore::open(path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        None => Ok(Box::new(InMemoryLedgerStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(db_path: Option<PathBuf>) -> Result<LedgerStoreBox> {
    if db_path.is_some() {
        return Err(miette::miette!(
            "--db-path requires building with the storage-rocksdb feature"
        ));
    }
    Ok(Box::new(InMemoryLedgerStore::new()))
}
