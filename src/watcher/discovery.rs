//! Game install discovery.
//!
//! Locates `logs/Client.txt` for Path of Exile and Path of Exile 2 installs.

use std::path::{Path, PathBuf};

use super::target::{client_log_path, WatchTarget};

/// Install directory names probed under each library root.
pub const GAME_DIR_NAMES: [&str; 2] = ["Path of Exile", "Path of Exile 2"];

/// Source of watch targets found on the local machine.
pub trait PathResolver: Send + Sync {
    /// Return every client log that currently exists.
    fn resolve_watch_targets(&self) -> Vec<WatchTarget>;
}

/// Resolver for platforms without install discovery.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl PathResolver for NullResolver {
    fn resolve_watch_targets(&self) -> Vec<WatchTarget> {
        Vec::new()
    }
}

/// Probes Steam libraries and standalone install locations.
///
/// Each root is expected to contain the game directories directly, e.g.
/// `<root>/Path of Exile/logs/Client.txt`.
#[derive(Debug, Clone)]
pub struct SteamLibraryResolver {
    roots: Vec<PathBuf>,
}

impl SteamLibraryResolver {
    /// Resolver over the usual Windows install roots.
    #[must_use]
    pub fn new() -> Self {
        Self {
            roots: default_install_roots(),
        }
    }

    /// Resolver over explicit roots.
    #[must_use]
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl Default for SteamLibraryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PathResolver for SteamLibraryResolver {
    fn resolve_watch_targets(&self) -> Vec<WatchTarget> {
        let mut targets: Vec<WatchTarget> = Vec::new();

        for root in &self.roots {
            for game in GAME_DIR_NAMES {
                let install_dir = root.join(game);
                let log = client_log_path(&install_dir);
                if !log.is_file() {
                    continue;
                }
                if targets.iter().any(|t| t.path == log) {
                    continue;
                }
                tracing::info!(path = %install_dir.display(), "Found game install");
                targets.push(WatchTarget::for_client_log(log));
            }
        }

        targets
    }
}

/// Registry key holding the Steam client's `InstallPath`.
#[cfg(windows)]
const STEAM_REGISTRY_KEY: &str = r"SOFTWARE\WOW6432Node\Valve\Steam";

/// Candidate library roots, in probe order.
fn default_install_roots() -> Vec<PathBuf> {
    install_roots(steam_install_path())
}

/// Library roots with the registry-reported Steam install, if any, first.
fn install_roots(steam_install: Option<PathBuf>) -> Vec<PathBuf> {
    let program_files_x86 = std::env::var_os("ProgramFiles(x86)")
        .map_or_else(|| PathBuf::from(r"C:\Program Files (x86)"), PathBuf::from);
    let program_files = std::env::var_os("ProgramFiles")
        .map_or_else(|| PathBuf::from(r"C:\Program Files"), PathBuf::from);

    let mut roots: Vec<PathBuf> = steam_install.as_deref().map(steam_common).into_iter().collect();
    roots.extend([
        steam_common(&program_files_x86.join("Steam")),
        steam_common(&program_files.join("Steam")),
        program_files_x86.join("Grinding Gear Games"),
        program_files.join("Grinding Gear Games"),
    ]);

    for drive in ['C', 'D', 'E', 'F'] {
        roots.push(steam_common(&PathBuf::from(format!(r"{drive}:\SteamLibrary"))));
        roots.push(steam_common(&PathBuf::from(format!(r"{drive}:\Steam"))));
        roots.push(PathBuf::from(format!(r"{drive}:\Games")));
    }

    roots.dedup();
    roots
}

#[cfg(windows)]
fn steam_install_path() -> Option<PathBuf> {
    use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_READ};
    use winreg::RegKey;

    let key = RegKey::predef(HKEY_LOCAL_MACHINE)
        .open_subkey_with_flags(STEAM_REGISTRY_KEY, KEY_READ)
        .map_err(|e| tracing::debug!(error = %e, "Steam registry key not found"))
        .ok()?;
    let path: String = key
        .get_value("InstallPath")
        .map_err(|e| tracing::debug!(error = %e, "Steam InstallPath not set"))
        .ok()?;

    tracing::debug!(path = %path, "Steam install from registry");
    Some(PathBuf::from(path))
}

#[cfg(not(windows))]
fn steam_install_path() -> Option<PathBuf> {
    None
}

fn steam_common(steam_root: &Path) -> PathBuf {
    steam_root.join("steamapps").join("common")
}

/// Resolver for the current platform.
#[must_use]
pub fn platform_resolver() -> Box<dyn PathResolver> {
    if cfg!(windows) {
        Box::new(SteamLibraryResolver::new())
    } else {
        Box::new(NullResolver)
    }
}
