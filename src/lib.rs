//! PoE Trade Notifier - forwards Path of Exile trade whispers to Telegram.

pub mod config;
pub mod display;
pub mod notifier;
pub mod supervisor;
pub mod trade;
pub mod watcher;
