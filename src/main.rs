use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use stockledger::application::config::EngineConfig;
use stockledger::application::engine::CommerceEngine;
use stockledger::application::payment::PaymentPolicy;
use stockledger::interfaces::csv::command_reader::CommandReader;
use stockledger::interfaces::csv::report_writer::ReportWriter;
use stockledger::interfaces::report::Report;
use stockledger::interfaces::runner::run_script;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    /// Count only the most recent ledger entry per product
    Latest,
    /// Count every ledger entry
    Cumulative,
}

impl From<PolicyArg> for PaymentPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Latest => PaymentPolicy::LatestPerProduct,
            PolicyArg::Cumulative => PaymentPolicy::Cumulative,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input command script (CSV)
    input: PathBuf,

    /// How totals owed are derived from each customer's ledger
    #[arg(long, value_enum, default_value_t = PolicyArg::Latest)]
    policy: PolicyArg,

    /// Give up on a product or customer lock after this many milliseconds
    #[arg(long)]
    lock_timeout_ms: Option<u64>,

    /// Output format of the final report
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);
    // Logs go to stderr so stdout only carries the report.
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| miette::miette!("Failed to initialize logging: {err}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json)?;

    let mut config = EngineConfig::default().with_payment_policy(cli.policy.into());
    if let Some(ms) = cli.lock_timeout_ms {
        config = config.with_lock_timeout(Duration::from_millis(ms));
    }
    let engine = CommerceEngine::in_memory(config);

    let file = File::open(&cli.input).into_diagnostic()?;
    let stats = run_script(&engine, CommandReader::new(file)).await;
    tracing::info!(
        applied = stats.applied,
        rejected = stats.rejected,
        unreadable = stats.unreadable,
        "Script finished"
    );

    let report = Report::collect(&engine).await.into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    match cli.format {
        Format::Csv => writer.write_csv(&report).into_diagnostic()?,
        Format::Json => writer.write_json(&report).into_diagnostic()?,
    }

    Ok(())
}
