//! Structured trade offer.

use super::currency::Currency;

/// Characters Telegram MarkdownV2 requires to be escaped outside entities.
const MARKDOWN_V2_RESERVED: &[char] = &[
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.',
    '!',
];

/// A buyer's request extracted from one whisper line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeOffer {
    /// Item being bought, whitespace-trimmed.
    pub item_name: String,
    /// Decimal amount as written by the game.
    pub amount: String,
    pub currency: Currency,
    pub emoji: &'static str,
}

impl TradeOffer {
    #[must_use]
    pub fn new(item_name: impl Into<String>, amount: impl Into<String>, currency: Currency) -> Self {
        Self {
            item_name: item_name.into(),
            amount: amount.into(),
            currency,
            emoji: currency.emoji(),
        }
    }

    /// Price as written in the whisper, e.g. `150 chaos`.
    #[must_use]
    pub fn price(&self) -> String {
        format!("{} {}", self.amount, self.currency)
    }

    /// Notification body in Telegram MarkdownV2 with the price in bold.
    #[must_use]
    pub fn notification_text(&self) -> String {
        format!(
            "{} *{}* {}",
            self.emoji,
            escape_markdown_v2(&self.price()),
            escape_markdown_v2(&self.item_name)
        )
    }
}

/// Escape text for use as plain content in a MarkdownV2 message.
#[must_use]
pub fn escape_markdown_v2(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_V2_RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
