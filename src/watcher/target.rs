//! Watched log file identity.

use std::fmt;
use std::path::{Path, PathBuf};

/// Label used for Path of Exile 1 client logs.
pub const POE1_LABEL: &str = "PoE";

/// Label used for Path of Exile 2 client logs.
pub const POE2_LABEL: &str = "PoE 2";

/// Directory name that marks a Path of Exile 2 install.
const POE2_DIR_MARKER: &str = "Path of Exile 2";

/// A log file to tail and the tag printed next to its output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatchTarget {
    pub path: PathBuf,
    pub label: String,
}

impl WatchTarget {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }

    /// Build a target for a game client log, labelling it by install directory.
    #[must_use]
    pub fn for_client_log(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = game_label(&path);
        Self {
            path,
            label: label.to_string(),
        }
    }

    /// Build a target for an arbitrary file, labelled by its file name.
    #[must_use]
    pub fn for_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self { path, label }
    }
}

impl fmt::Display for WatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.label, self.path.display())
    }
}

/// Pick the game label from a log path.
#[must_use]
pub fn game_label(path: &Path) -> &'static str {
    if path.to_string_lossy().contains(POE2_DIR_MARKER) {
        POE2_LABEL
    } else {
        POE1_LABEL
    }
}

/// Location of the client log inside an install directory.
#[must_use]
pub fn client_log_path(install_dir: &Path) -> PathBuf {
    install_dir.join("logs").join("Client.txt")
}
