use clap::Parser;
use invoice_ledger::application::engine::LifecycleEngine;
use invoice_ledger::config::EngineConfig;
use invoice_ledger::domain::identity::IdentityToken;
use invoice_ledger::domain::ports::{InvoiceStoreBox, PaymentRequestStoreBox};
use invoice_ledger::infrastructure::identity::StaticIdentityOracle;
use invoice_ledger::infrastructure::in_memory::{InMemoryInvoiceStore, InMemoryPaymentRequestStore};
#[cfg(feature = "storage-rocksdb")]
use invoice_ledger::infrastructure::rocksdb::RocksDBStore;
use invoice_ledger::interfaces::csv::invocation_reader::InvocationReader;
use invoice_ledger::interfaces::json::reply::Reply;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Operations CSV file, one `operationName,arg1,...` per line
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Base64 identity of the deploying supplier
    #[arg(long, env = "LEDGER_SUPPLIER_ROLE")]
    supplier_role: Option<String>,

    /// Require identity proof on every payment_info call
    #[arg(long)]
    strict_payment_reads: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .without_time()
        .init();

    let mut config = match &cli.supplier_role {
        Some(encoded) => {
            let role = IdentityToken::from_base64("supplier role", encoded).into_diagnostic()?;
            EngineConfig::from_oracle(&StaticIdentityOracle::new(role)).into_diagnostic()?
        }
        None => EngineConfig::new(),
    };
    config = config.with_strict_payment_reads(cli.strict_payment_reads);

    let (invoices, payment_requests) = open_stores(cli.db_path)?;
    let engine = LifecycleEngine::new(invoices, payment_requests, config);

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = InvocationReader::new(file);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for invocation in reader.invocations() {
        let reply = match invocation {
            Ok(invocation) => {
                let result = match invocation.parse() {
                    Ok(operation) => engine.execute(operation).await,
                    Err(e) => Err(e),
                };
                Reply::render(&invocation.operation, result)
            }
            Err(e) => {
                error!("Error reading invocation: {}", e);
                Reply::render("unknown", Err(e))
            }
        };

        if !reply.is_ok() {
            warn!(reply = %reply.payload, "call rejected");
        }
        writeln!(out, "{}", reply.payload).into_diagnostic()?;
    }

    info!("done");
    Ok(())
}

#[cfg(feature = "storage-rocksdb")]
fn open_stores(db_path: Option<PathBuf>) -> Result<(InvoiceStoreBox, PaymentRequestStoreBox)> {
    match db_path {
        Some(path) => {
            let store = RocksDBStore::open(path).into_diagnostic()?;
            Ok((Box::new(store.clone()), Box::new(store)))
        }
        None => Ok(in_memory_stores()),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_stores(db_path: Option<PathBuf>) -> Result<(InvoiceStoreBox, PaymentRequestStoreBox)> {
    if db_path.is_some() {
        warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(in_memory_stores())
}

fn in_memory_stores() -> (InvoiceStoreBox, PaymentRequestStoreBox) {
    (
        Box::new(InMemoryInvoiceStore::new()),
        Box::new(InMemoryPaymentRequestStore::new()),
    )
}
