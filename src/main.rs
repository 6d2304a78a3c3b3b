use anyhow::Result;
use clap::{Parser, ValueEnum};
use gcp_inventory::config::Config;
use gcp_inventory::gcp::client::{GcpClient, DEFAULT_COMPUTE_ENDPOINT, DEFAULT_STORAGE_ENDPOINT};
use gcp_inventory::{ExecContext, InventoryError, RunOptions, RunSummary, TextSink};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// List Compute Engine instances per zone and Cloud Storage buckets of a GCP project
#[derive(Parser, Debug)]
#[command(name = "gcp-inventory", version, about, long_about = None)]
struct Args {
    /// GCP project ID
    #[arg(short, long)]
    project: Option<String>,

    /// GCP zone (optional, all zones when omitted)
    #[arg(short, long)]
    zone: Option<String>,

    /// List Cloud Storage buckets
    #[arg(long)]
    buckets: bool,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Access token to use instead of Application Default Credentials
    #[arg(long, env = "CLOUDSDK_AUTH_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> Option<&'static str> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some("error"),
            LogLevel::Warn => Some("warn"),
            LogLevel::Info => Some("info"),
            LogLevel::Debug => Some("debug"),
            LogLevel::Trace => Some("trace"),
        }
    }
}

/// Log to a file so the report on stdout stays clean; RUST_LOG wins over --log-level
fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(level.as_filter()?),
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("gcp-inventory started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("gcp-inventory").join("gcp-inventory.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".gcp-inventory").join("gcp-inventory.log");
    }
    PathBuf::from("gcp-inventory.log")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    match run(&args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<InventoryError>() {
                Some(inventory_err) => eprintln!("{}", inventory_err.user_message()),
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<RunSummary> {
    let config = Config::load();

    let options = RunOptions::new(
        config.effective_project(args.project.as_deref()),
        config.effective_zone(args.zone.as_deref()),
        args.buckets,
    );
    tracing::info!(
        "Using project: {:?}, zone: {:?}, buckets: {}",
        options.project,
        options.zone,
        options.include_buckets
    );

    let mut client = GcpClient::with_endpoints(
        config
            .compute_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_COMPUTE_ENDPOINT),
        config
            .storage_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_STORAGE_ENDPOINT),
    )?;
    if let Some(page_size) = config.page_size {
        client = client.with_page_size(page_size);
    }

    let mut ctx = match &args.access_token {
        Some(token) if !token.is_empty() => ExecContext::with_token(token.clone()),
        _ => ExecContext::application_default(),
    };
    if let Some(timeout) = config.effective_timeout(args.timeout) {
        ctx = ctx.with_timeout(timeout);
    }

    let stdout = io::stdout();
    let mut sink = TextSink::new(stdout.lock());

    let summary = gcp_inventory::run(&ctx, &client, &client, &options, &mut sink).await?;
    Ok(summary)
}
