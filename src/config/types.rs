//! Configuration types.
//!
//! Section and key names follow the on-disk `config.toml` layout
//! (`[Telegram] BotToken`, `[API] ETM_URL`, ...).

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::watcher::DEFAULT_POLL_INTERVAL;

/// Placeholder bot token written to a fresh config file.
pub const PLACEHOLDER_BOT_TOKEN: &str = "YOUR_BOT_TOKEN";

/// Placeholder chat id written to a fresh config file.
pub const PLACEHOLDER_CHAT_ID: &str = "YOUR_CHAT_ID";

/// Prefix of sections holding a game install override.
pub const GAME_SECTION_PREFIX: &str = "PathOfExile";

/// Telegram Bot API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(rename = "BotToken", default = "default_bot_token")]
    pub bot_token: String,
    #[serde(rename = "ChatID", default = "default_chat_id")]
    pub chat_id: String,
    /// Base URL of the Bot API, without the `/bot<token>` part.
    #[serde(rename = "ApiBase", default = "default_telegram_api_base")]
    pub api_base: String,
}

fn default_bot_token() -> String {
    PLACEHOLDER_BOT_TOKEN.to_string()
}

fn default_chat_id() -> String {
    PLACEHOLDER_CHAT_ID.to_string()
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

impl TelegramConfig {
    /// Whether both credentials are set to real values.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.bot_token.trim().is_empty()
            && !self.chat_id.trim().is_empty()
            && self.bot_token != PLACEHOLDER_BOT_TOKEN
            && self.chat_id != PLACEHOLDER_CHAT_ID
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: default_bot_token(),
            chat_id: default_chat_id(),
            api_base: default_telegram_api_base(),
        }
    }
}

/// Primary notification API settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(rename = "ETM_URL", default)]
    pub base_url: String,
    #[serde(rename = "ETM_TOKEN", default)]
    pub token: String,
}

impl ApiConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty() && !self.token.trim().is_empty()
    }
}

/// General runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Seconds to sleep at end-of-file before reading again.
    #[serde(rename = "PollInterval", default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}

impl SettingsConfig {
    /// Poll interval; zero is treated as the default.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        if self.poll_interval_secs == 0 {
            DEFAULT_POLL_INTERVAL
        } else {
            Duration::from_secs(self.poll_interval_secs)
        }
    }
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

/// Install override for one game (`[PathOfExile]`, `[PathOfExile2]`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Game install directory; empty means "discover automatically".
    #[serde(rename = "CustomPath", default)]
    pub custom_path: String,
}

/// Whole application configuration, read once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawNotifierConfig")]
pub struct NotifierConfig {
    #[serde(rename = "Telegram")]
    pub telegram: TelegramConfig,
    #[serde(rename = "API")]
    pub api: ApiConfig,
    #[serde(rename = "Settings")]
    pub settings: SettingsConfig,
    /// `PathOfExile*` sections.
    #[serde(flatten)]
    pub games: BTreeMap<String, GameConfig>,
}

/// On-disk layout before unknown entries are sorted out.
#[derive(Deserialize)]
struct RawNotifierConfig {
    #[serde(rename = "Telegram", default)]
    telegram: TelegramConfig,
    #[serde(rename = "API", default)]
    api: ApiConfig,
    #[serde(rename = "Settings", default)]
    settings: SettingsConfig,
    #[serde(flatten)]
    rest: BTreeMap<String, toml::Value>,
}

impl TryFrom<RawNotifierConfig> for NotifierConfig {
    type Error = toml::de::Error;

    fn try_from(raw: RawNotifierConfig) -> Result<Self, Self::Error> {
        let mut games = BTreeMap::new();
        for (key, value) in raw.rest {
            if key.starts_with(GAME_SECTION_PREFIX) && value.is_table() {
                games.insert(key, value.try_into::<GameConfig>()?);
            } else {
                tracing::warn!(key = %key, "Ignoring unknown config entry");
            }
        }

        Ok(Self {
            telegram: raw.telegram,
            api: raw.api,
            settings: raw.settings,
            games,
        })
    }
}

impl NotifierConfig {
    /// Non-empty install overrides as `(section, directory)`, in section order.
    #[must_use]
    pub fn custom_install_dirs(&self) -> Vec<(String, PathBuf)> {
        self.games
            .iter()
            .filter(|(section, _)| section.starts_with(GAME_SECTION_PREFIX))
            .filter(|(_, game)| !game.custom_path.trim().is_empty())
            .map(|(section, game)| (section.clone(), PathBuf::from(game.custom_path.trim())))
            .collect()
    }
}
