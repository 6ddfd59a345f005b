//! Command line front-end for the clipboard monitor.
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use clap::{Args, Parser, Subcommand};
use futures::StreamExt;
use tracing::{info, warn};

use cw_core::ports::FnListener;
use cw_core::{MonitorConfigBuilder, MonitorError, MonitorSettings};
use cw_platform::{clipboard_stream, HostContext, MonitorStrategy, StrategyRegistry};

use crate::bootstrap::config::load_config;

#[derive(Parser)]
#[command(name = "clipwatch")]
#[command(about = "Watch the system clipboard for changes", long_about = None, version)]
pub struct Cli {
    /// TOML config file with a [monitor] table
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level engine logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to the user data directory
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one JSON line per clipboard change until Ctrl+C
    Watch(WatchArgs),
    /// Print the current clipboard content as JSON
    Peek,
    /// List strategies in selection order
    Strategies,
}

#[derive(Args, Debug, Default)]
pub struct WatchArgs {
    /// Debounce delay for push notifications, 0..=1000
    #[arg(long, allow_negative_numbers = true)]
    pub debounce_ms: Option<i64>,

    /// Poll interval for polling strategies, 50..=5000
    #[arg(long, allow_negative_numbers = true)]
    pub poll_ms: Option<i64>,

    /// Report every read, even if the content did not change
    #[arg(long)]
    pub no_dedup: bool,

    /// Force a strategy by name instead of picking the best one
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Stop after N changes
    #[arg(short, long)]
    pub max_events: Option<usize>,
}

impl WatchArgs {
    /// Layer command line overrides on top of file settings.
    pub fn apply(&self, mut settings: MonitorSettings) -> MonitorSettings {
        if let Some(debounce_ms) = self.debounce_ms {
            settings.debounce_ms = debounce_ms;
        }
        if let Some(poll_ms) = self.poll_ms {
            settings.poll_interval_ms = poll_ms;
        }
        if self.no_dedup {
            settings.duplicate_filtering = false;
        }
        settings
    }
}

pub async fn execute(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Watch(args) => run_watch(args.apply(settings), &args).await,
        Commands::Peek => run_peek(),
        Commands::Strategies => run_strategies(),
    }
}

fn load_settings(config_path: Option<&Path>) -> Result<MonitorSettings> {
    match config_path {
        Some(path) => Ok(load_config(path)?.monitor),
        None => Ok(MonitorSettings::default()),
    }
}

/// Pick the strategy named on the command line, or the best applicable one.
fn select_strategy(
    registry: &StrategyRegistry,
    name: Option<&str>,
) -> Result<Arc<dyn MonitorStrategy>> {
    let Some(name) = name else {
        return Ok(registry.select().ok_or(MonitorError::NoStrategyAvailable)?);
    };

    let Some(strategy) = registry.get(name) else {
        let known: Vec<String> = registry
            .list()
            .iter()
            .map(|strategy| strategy.name().to_string())
            .collect();
        bail!("Unknown strategy '{name}', expected one of: {}", known.join(", "));
    };
    if !strategy.is_applicable() {
        bail!("Strategy '{name}' is not available on this host");
    }
    Ok(strategy)
}

async fn run_watch(settings: MonitorSettings, args: &WatchArgs) -> Result<()> {
    let builder = MonitorConfigBuilder::from_settings(&settings).error_handler(|err| {
        warn!(error = %err, fatal = err.is_fatal(), "Clipboard monitor error");
    });
    // Surface bad tunables before touching the clipboard.
    builder.clone().build(Arc::new(FnListener(|_| Ok(()))))?;

    let registry = StrategyRegistry::with_standard_strategies(HostContext::native());
    let strategy = select_strategy(&registry, args.strategy.as_deref())?;
    info!(
        strategy = strategy.name(),
        debounce_ms = settings.debounce_ms,
        poll_interval_ms = settings.poll_interval_ms,
        duplicate_filtering = settings.duplicate_filtering,
        "Watching clipboard, Ctrl+C to stop"
    );

    let mut changes = Box::pin(clipboard_stream(move |listener| {
        strategy.create(builder.build(listener)?)
    }));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut stdout = std::io::stdout();
    let mut event_count = 0usize;
    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!(event_count, "Interrupted, stopping clipboard monitor");
                break;
            }
            next = changes.next() => {
                let Some(content) = next else {
                    return Err(anyhow!("Clipboard monitor ended unexpectedly; see logs"));
                };
                event_count += 1;
                writeln!(stdout, "{}", serde_json::to_string(&content)?)?;
                stdout.flush()?;

                if args.max_events.is_some_and(|limit| event_count >= limit) {
                    info!(event_count, "max_events reached, stopping");
                    break;
                }
            }
        }
    }

    Ok(())
}

fn run_peek() -> Result<()> {
    let registry = StrategyRegistry::with_standard_strategies(HostContext::native());
    let config = MonitorConfigBuilder::default().build(Arc::new(FnListener(|_| Ok(()))))?;
    let monitor = registry.create_monitor(config)?;

    let content = tokio::task::block_in_place(|| monitor.current_content());
    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(())
}

fn run_strategies() -> Result<()> {
    let registry = StrategyRegistry::with_standard_strategies(HostContext::native());
    let selected = registry.select().map(|strategy| strategy.name().to_string());

    println!("{:<16} {:>8}  {:<10}", "STRATEGY", "PRIORITY", "APPLICABLE");
    for strategy in registry.list() {
        let marker = if selected.as_deref() == Some(strategy.name()) {
            " (selected)"
        } else {
            ""
        };
        println!(
            "{:<16} {:>8}  {:<10}{marker}",
            strategy.name(),
            strategy.priority(),
            strategy.is_applicable()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use cw_platform::adapters::InMemoryClipboard;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_watch_flags_override_file_settings() {
        let cli = Cli::try_parse_from([
            "clipwatch",
            "watch",
            "--debounce-ms",
            "250",
            "--no-dedup",
        ])
        .unwrap();
        let Commands::Watch(args) = cli.command else {
            panic!("expected watch");
        };

        let file = MonitorSettings {
            poll_interval_ms: 1000,
            ..MonitorSettings::default()
        };
        let settings = args.apply(file);

        assert_eq!(settings.debounce_ms, 250);
        assert_eq!(settings.poll_interval_ms, 1000);
        assert!(!settings.duplicate_filtering);
    }

    #[test]
    fn test_negative_values_reach_validation() {
        let cli = Cli::try_parse_from(["clipwatch", "watch", "--debounce-ms", "-1"]).unwrap();
        let Commands::Watch(args) = cli.command else {
            panic!("expected watch");
        };
        let settings = args.apply(MonitorSettings::default());

        let err = MonitorConfigBuilder::from_settings(&settings)
            .build(Arc::new(FnListener(|_| Ok(()))))
            .unwrap_err();
        assert!(matches!(err, MonitorError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_missing_config_path_uses_defaults() {
        assert_eq!(load_settings(None).unwrap(), MonitorSettings::default());
    }

    #[test]
    fn test_select_strategy_by_name() {
        let clipboard = InMemoryClipboard::new();
        let registry = StrategyRegistry::with_standard_strategies(HostContext::in_memory(&clipboard));

        assert_eq!(select_strategy(&registry, None).unwrap().name(), "push-callback");
        assert_eq!(
            select_strategy(&registry, Some("timed-poll")).unwrap().name(),
            "timed-poll"
        );

        let err = select_strategy(&registry, Some("carrier-pigeon")).unwrap_err();
        assert!(err.to_string().contains("Unknown strategy"));
    }

    #[test]
    fn test_select_strategy_rejects_inapplicable() {
        let clipboard = InMemoryClipboard::new();
        let host = HostContext::new().with_reader(Arc::new(clipboard));
        let registry = StrategyRegistry::with_standard_strategies(host);

        let err = select_strategy(&registry, Some("push-callback")).unwrap_err();
        assert!(err.to_string().contains("not available"));

        let empty = StrategyRegistry::new();
        let err = select_strategy(&empty, None).unwrap_err();
        assert!(err.downcast_ref::<MonitorError>().is_some());
    }
}
