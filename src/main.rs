//! aiscout binary entrypoint. The query runtime lives in `app`.

use std::fmt;
use std::process::ExitCode;
use std::sync::OnceLock;

use aiscout::{app, args, config};
use clap::Parser;

/// Log timestamp formatter (`YYYY-MM-DDTHH:MM:SS.mmm`, local time).
struct ScoutTimer;

impl tracing_subscriber::fmt::time::FormatTime for ScoutTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now()
            .format("%Y-%m-%dT%H:%M:%S%.3f")
            .to_string();
        w.write_str(&ts)
    }
}

/// Keeps the non-blocking log writer flushing until the process exits.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing to `~/.config/aiscout/logs/aiscout.log`.
///
/// Inputs:
/// - `level`: Default filter directive when `RUST_LOG` is unset.
///
/// Details:
/// - Falls back to a stderr logger when the log file cannot be opened.
fn init_logging(level: &str) {
    let mut log_path = config::logs_dir();
    log_path.push("aiscout.log");
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(ScoutTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: stderr logger so startup is never blocked
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(ScoutTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = args::Args::parse();
    init_logging(&args::determine_log_level(&cli));

    let settings = config::settings();
    let plan = match args::process_args(&cli, &settings) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("aiscout: {e}");
            tracing::error!(error = %e, "Invalid command-line value");
            return ExitCode::from(2);
        }
    };

    tracing::info!(format = ?plan.format, "aiscout starting");
    let code = match app::run(plan).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("aiscout: {err}");
            tracing::error!(error = %err, "Application error");
            ExitCode::FAILURE
        }
    };
    tracing::info!("aiscout exited");
    code
}
