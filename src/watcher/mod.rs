//! Log file watching.
//!
//! Provides the poll-based line tailer and watch target discovery.

mod discovery;
mod error;
mod tailer;
mod target;

pub use discovery::{
    platform_resolver, NullResolver, PathResolver, SteamLibraryResolver, GAME_DIR_NAMES,
};
pub use error::TailError;
pub use tailer::{LineSource, DEFAULT_POLL_INTERVAL};
pub use target::{client_log_path, game_label, WatchTarget, POE1_LABEL, POE2_LABEL};
