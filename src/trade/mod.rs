//! Trade whisper recognition.
//!
//! Turns raw client log lines into [`TradeOffer`] values and formats them
//! for notification.

mod currency;
mod offer;
mod parser;

pub use currency::{emoji_for_token, Currency, UnknownCurrency, FALLBACK_EMOJI};
pub use offer::{escape_markdown_v2, TradeOffer};
pub use parser::{parse, GrammarError, GrammarVariant, LineKind, TradeParser};
