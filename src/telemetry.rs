//! Tracing configuration for Sahayog Nidhi.
//!
//! Structured logging for the headless client: an env-filtered stdout
//! layer plus an optional non-blocking file layer under the application
//! data directory.

use std::path::Path;
use std::sync::OnceLock;
use std::{fs, io};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

use sn_infra::fs::resolve_data_dir;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Check if running in a development build
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// - **Development**: debug level for the workspace crates
/// - **Production**: info level across the board
/// - **HTTP internals**: reqwest and hyper stay at warn
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    vec![
        if is_dev { "debug" } else { "info" }.to_string(),
        "hyper_util=warn".to_string(),
        "reqwest=warn".to_string(),
        if is_dev { "sn_app=debug" } else { "sn_app=info" }.to_string(),
        if is_dev {
            "sn_infra=debug"
        } else {
            "sn_infra=info"
        }
        .to_string(),
    ]
}

/// Initialize the tracing subscriber.
///
/// - **Development**: debug level, outputs to stdout
/// - **Production**: info level, outputs to stdout
/// - **Environment filter**: respects `RUST_LOG`, with the defaults from
///   [`build_filter_directives`]
/// - **File layer**: written under `<data dir>/logs` when the directory
///   is writable; initialization falls back to stdout-only otherwise
///
/// Call once from the embedding shell before the runtime is brought up:
///
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     let config = sahayog_nidhi::load_config(None)?;
///     sahayog_nidhi::telemetry::init_tracing_subscriber(config.data_dir.as_deref())?;
///     let deps = sahayog_nidhi::bootstrap::wire_dependencies(&config)?;
///     let runtime = sahayog_nidhi::AppRuntime::new(deps);
///     // ...
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// Returns `Err` if a global subscriber is already registered or the
/// `RUST_LOG` directives are invalid.
pub fn init_tracing_subscriber(data_dir_override: Option<&Path>) -> anyhow::Result<()> {
    let is_dev = is_development();

    // Defaults to debug in dev, info in prod; RUST_LOG wins when set.
    let filter_directives = build_filter_directives(is_dev);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let stdout_writer: BoxMakeWriter = BoxMakeWriter::new(io::stdout);
    let file_writer = match build_file_writer(data_dir_override) {
        Ok(writer) => Some(writer),
        Err(err) => {
            // No subscriber exists yet, so this cannot go through tracing.
            eprintln!("Failed to initialize file logging, falling back to stdout: {err}");
            None
        }
    };

    // "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test))) // Disable colors in tests
        .with_writer(stdout_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(
                "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            ))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false) // No ANSI colors in file logs
            .with_writer(writer)
    });

    let subscriber = registry().with(env_filter).with(stdout_layer);

    if let Some(layer) = file_layer {
        subscriber.with(layer).try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(())
}

fn build_file_writer(data_dir_override: Option<&Path>) -> anyhow::Result<NonBlocking> {
    let logs_dir = resolve_data_dir(data_dir_override)?.join("logs");
    fs::create_dir_all(&logs_dir)?;

    let file_appender = tracing_appender::rolling::never(&logs_dir, "sahayog-nidhi.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
