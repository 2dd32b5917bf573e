//! Trade currencies and their notification glyphs.

use std::fmt;
use std::str::FromStr;

/// Glyph used when a currency token is not recognised.
pub const FALLBACK_EMOJI: &str = "💰";

/// Currency a trade is priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Chaos,
    Divine,
    Mirror,
    Exalted,
}

impl Currency {
    /// All recognised currencies.
    pub const ALL: [Currency; 4] = [
        Currency::Chaos,
        Currency::Divine,
        Currency::Mirror,
        Currency::Exalted,
    ];

    /// Token as it appears in whisper text.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chaos => "chaos",
            Self::Divine => "divine",
            Self::Mirror => "mirror",
            Self::Exalted => "exalted",
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Chaos => "🪙",
            Self::Divine => "💎",
            Self::Mirror => "🪞",
            Self::Exalted => "✨",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a currency token outside the recognised set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown currency: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCurrency(s.to_string()))
    }
}

/// Glyph for a raw currency token, falling back to [`FALLBACK_EMOJI`].
#[must_use]
pub fn emoji_for_token(token: &str) -> &'static str {
    token
        .parse::<Currency>()
        .map_or(FALLBACK_EMOJI, Currency::emoji)
}
