//! Tracing configuration for clipwatch
//!
//! Installs one global subscriber with an env filter, a stdout layer and an
//! optional file layer under the user's data directory.

use std::{fs, io, path::PathBuf, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_NAME: &str = "clipwatch.log";

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default filter directives, used when `RUST_LOG` is not set.
///
/// `verbose` raises the engine crates to `debug` even in release builds.
fn build_filter_directives(is_dev: bool, verbose: bool) -> Vec<String> {
    let engine_level = if is_dev || verbose { "debug" } else { "info" };
    vec![
        if is_dev { "debug" } else { "info" }.to_string(),
        format!("cw_platform={engine_level}"),
        format!("cw_core={engine_level}"),
        format!("clipwatch_lib={engine_level}"),
    ]
}

/// Initialize the global tracing subscriber.
///
/// Logs go to stderr so that stdout stays reserved for command output. When
/// `log_to_file` is set, a non-blocking file layer writes to
/// `<data dir>/clipwatch/logs/clipwatch.log`; failing to set it up falls back
/// to stderr only.
///
/// # Errors
///
/// Returns `Err` if a global subscriber is already registered.
pub fn init_tracing_subscriber(verbose: bool, log_to_file: bool) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development(), verbose);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let stderr_writer: BoxMakeWriter = BoxMakeWriter::new(io::stderr);
    let file_writer = if log_to_file {
        match build_file_writer() {
            Ok(writer) => Some(writer),
            Err(err) => {
                eprintln!("Failed to initialize file logging, falling back to stderr: {err}");
                None
            }
        }
    } else {
        None
    };

    // "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(stderr_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(
                "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            ))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    let subscriber = registry().with(env_filter).with(stderr_layer);

    if let Some(layer) = file_layer {
        subscriber.with(layer).try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(())
}

fn logs_dir() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("No local data directory for this platform"))?;
    Ok(data_dir.join("clipwatch").join("logs"))
}

fn build_file_writer() -> anyhow::Result<NonBlocking> {
    let logs_dir = logs_dir()?;
    fs::create_dir_all(&logs_dir)?;

    let file_appender = tracing_appender::rolling::never(&logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true, false);
        assert!(dev_directives.contains(&"debug".to_string()));
        assert!(dev_directives.contains(&"cw_platform=debug".to_string()));

        let prod_directives = build_filter_directives(false, false);
        assert!(prod_directives.contains(&"info".to_string()));
        assert!(prod_directives.contains(&"cw_platform=info".to_string()));

        let verbose_prod = build_filter_directives(false, true);
        assert!(verbose_prod.contains(&"info".to_string()));
        assert!(verbose_prod.contains(&"cw_platform=debug".to_string()));
    }

    #[test]
    fn test_logs_dir_is_namespaced() {
        if let Ok(dir) = logs_dir() {
            assert!(dir.ends_with("clipwatch/logs"));
        }
    }
}
