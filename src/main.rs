//! PoE Trade Notifier - forwards Path of Exile trade whispers to Telegram.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use poe_trade_notifier::config::{ConfigLoader, NotifierConfig};
use poe_trade_notifier::display;
use poe_trade_notifier::notifier::{build_http_client, Dispatcher};
use poe_trade_notifier::supervisor::{
    wait_for_targets, RediscoveryPolicy, TailContext, TailSupervisor,
};
use poe_trade_notifier::watcher::platform_resolver;

#[derive(Parser)]
#[command(
    name = "poe-trade-notifier",
    about = "Forward Path of Exile trade whispers to Telegram",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file (default: ./config.toml, then the user config directory).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extra log file to watch. May be repeated.
    #[arg(short, long = "log-file")]
    log_files: Vec<PathBuf>,

    /// Print log lines without truncation.
    #[arg(long)]
    raw: bool,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(loader: &ConfigLoader) -> NotifierConfig {
    match loader.load() {
        Ok(config) => config,
        Err(e) => {
            display::print_error(&e.to_string());
            display::print_warning("Using default settings");
            NotifierConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loader = cli.config.map_or_else(ConfigLoader::new, ConfigLoader::with_path);
    let config = load_config(&loader);

    let resolver = platform_resolver();
    let (config, targets) = match wait_for_targets(
        &loader,
        config,
        &cli.log_files,
        &*resolver,
        RediscoveryPolicy::default(),
    )
    .await
    {
        Ok(found) => found,
        Err(e) => {
            display::print_error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    if !config.telegram.is_configured() {
        display::print_warning("Telegram is not configured in config.toml, it will be skipped");
    }
    if !config.api.is_configured() {
        tracing::info!("Primary API is not configured, it will be skipped");
    }

    let client = match build_http_client() {
        Ok(client) => client,
        Err(e) => {
            display::print_error(&format!("Failed to build HTTP client: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let dispatcher = Arc::new(Dispatcher::from_config(&config, client));
    if !dispatcher.has_available_channel() {
        display::print_warning("No notification channel configured, offers will only be printed");
    }

    tracing::info!(
        tails = targets.len(),
        poll_interval = ?config.settings.poll_interval(),
        channels = ?dispatcher.channel_names(),
        "Starting trade notifier"
    );

    let context =
        TailContext::new(dispatcher, config.settings.poll_interval()).with_raw_mode(cli.raw);
    let failures = TailSupervisor::new(targets, context).run().await;

    tracing::error!(failures = failures.len(), "Every tail stopped");
    display::print_error("All watched logs became unreadable, exiting");
    ExitCode::FAILURE
}
