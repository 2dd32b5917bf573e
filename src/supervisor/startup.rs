//! Watch target resolution at startup.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::{ConfigLoader, NotifierConfig, GAME_SECTION_PREFIX};
use crate::display;
use crate::watcher::{client_log_path, PathResolver, WatchTarget, POE1_LABEL};

/// How long to keep looking for logs when none can be found.
#[derive(Debug, Clone, Copy)]
pub struct RediscoveryPolicy {
    /// Sleep between attempts.
    pub interval: Duration,
    /// Attempts after the first one before giving up.
    pub max_attempts: u32,
}

impl Default for RediscoveryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 120,
        }
    }
}

/// Errors that prevent the tails from starting.
#[derive(thiserror::Error, Debug)]
pub enum StartupError {
    #[error("No Path of Exile client log found after {attempts} rediscovery attempts")]
    NoWatchTargets { attempts: u32 },
}

/// Label for a `PathOfExile*` config section: `PathOfExile2` becomes `PoE 2`.
#[must_use]
pub fn section_label(section: &str) -> String {
    match section.strip_prefix(GAME_SECTION_PREFIX) {
        Some("") | None => POE1_LABEL.to_string(),
        Some(suffix) => format!("{POE1_LABEL} {suffix}"),
    }
}

/// Collect watch targets from, in order: explicit files, config install
/// overrides, and only if both yield nothing, the platform resolver.
///
/// Files that do not exist are skipped with a warning.
#[must_use]
pub fn resolve_targets(
    config: &NotifierConfig,
    cli_paths: &[PathBuf],
    resolver: &dyn PathResolver,
) -> Vec<WatchTarget> {
    let mut targets = Vec::new();

    for path in cli_paths {
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "Log file does not exist");
            continue;
        }
        let target = if path.file_name().is_some_and(|n| n == "Client.txt") {
            WatchTarget::for_client_log(path.clone())
        } else {
            WatchTarget::for_file(path.clone())
        };
        push_unique(&mut targets, target);
    }

    for (section, dir) in config.custom_install_dirs() {
        let log = client_log_path(&dir);
        if log.is_file() {
            tracing::info!(section = %section, path = %dir.display(), "Using configured install");
            push_unique(&mut targets, WatchTarget::new(log, section_label(&section)));
        } else {
            display::print_warning(&format!(
                "Client.txt not found under [{section}] CustomPath {}",
                dir.display()
            ));
        }
    }

    if targets.is_empty() {
        tracing::info!("Searching for Path of Exile installs");
        for target in resolver.resolve_watch_targets() {
            push_unique(&mut targets, target);
        }
    }

    targets
}

fn push_unique(targets: &mut Vec<WatchTarget>, target: WatchTarget) {
    if !targets.iter().any(|t| t.path == target.path) {
        targets.push(target);
    }
}

/// Resolve targets, re-reading the config until something is found.
///
/// Returns the config that produced the targets, which may be newer than
/// `config` if the file was edited while waiting.
///
/// # Errors
///
/// Returns [`StartupError::NoWatchTargets`] once the policy's attempts are
/// exhausted.
pub async fn wait_for_targets(
    loader: &ConfigLoader,
    mut config: NotifierConfig,
    cli_paths: &[PathBuf],
    resolver: &dyn PathResolver,
    policy: RediscoveryPolicy,
) -> Result<(NotifierConfig, Vec<WatchTarget>), StartupError> {
    let mut attempts = 0;

    loop {
        let targets = resolve_targets(&config, cli_paths, resolver);
        if !targets.is_empty() {
            return Ok((config, targets));
        }

        if attempts >= policy.max_attempts {
            return Err(StartupError::NoWatchTargets { attempts });
        }

        if attempts == 0 {
            display::print_error("No Path of Exile install found");
            display::print_warning(
                "Set [PathOfExile] or [PathOfExile2] CustomPath in config.toml; it is re-read periodically",
            );
        }

        attempts += 1;
        tokio::time::sleep(policy.interval).await;

        match loader.load() {
            Ok(reloaded) => config = reloaded,
            Err(e) => tracing::warn!(error = %e, "Failed to reload config"),
        }
        tracing::debug!(attempt = attempts, "Retrying install discovery");
    }
}
