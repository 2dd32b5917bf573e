//! Whisper grammar for trade requests.
//!
//! Each supported client language is a [`GrammarVariant`]. A line first has
//! to pass a cheap substring prefilter (any intent phrase AND any sender
//! marker), after which the variants are tried in order.

use std::sync::LazyLock;

use regex::Regex;

use super::currency::Currency;
use super::offer::TradeOffer;

/// Error type for grammar construction.
#[derive(thiserror::Error, Debug)]
pub enum GrammarError {
    /// Invalid regex pattern.
    #[error("Invalid grammar pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// One language's phrasing of a trade whisper.
#[derive(Debug, Clone)]
pub struct GrammarVariant {
    name: &'static str,
    intent: &'static str,
    sender: &'static str,
    pattern: Regex,
}

impl GrammarVariant {
    /// Build a variant from its fixed phrases.
    ///
    /// `joiner` separates the item name from the price (`listed for`, `за`).
    ///
    /// # Errors
    ///
    /// Returns `GrammarError::InvalidPattern` if the composed regex is invalid.
    pub fn new(
        name: &'static str,
        intent: &'static str,
        joiner: &str,
        sender: &'static str,
    ) -> Result<Self, GrammarError> {
        let currencies = Currency::ALL.map(Currency::as_str).join("|");
        let pattern = format!(
            r"{} (.*?) {} ([0-9]+(?:\.[0-9]+)?) ({currencies})\b",
            regex::escape(intent),
            regex::escape(joiner),
        );
        Ok(Self {
            name,
            intent,
            sender,
            pattern: Regex::new(&pattern)?,
        })
    }

    /// English client: `... buy your <item> listed for <n> <currency> ... @From`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern fails to compile.
    pub fn english() -> Result<Self, GrammarError> {
        Self::new("english", "buy your", "listed for", "@From")
    }

    /// Russian client: `... купить у вас <item> за <n> <currency> ... @От`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern fails to compile.
    pub fn russian() -> Result<Self, GrammarError> {
        Self::new("russian", "купить у вас", "за", "@От")
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Extract an offer using this variant's pattern alone.
    #[must_use]
    pub fn extract(&self, line: &str) -> Option<TradeOffer> {
        let caps = self.pattern.captures(line)?;
        let item = caps.get(1)?.as_str().trim();
        let amount = caps.get(2)?.as_str().trim();
        let currency = caps.get(3)?.as_str().parse::<Currency>().ok()?;

        if item.is_empty() {
            return None;
        }
        Some(TradeOffer::new(item, amount, currency))
    }
}

/// Result of inspecting one log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Not a trade whisper.
    Ignored,
    /// Looks like a trade whisper but no variant could extract it.
    Unparseable,
    /// A trade whisper with all fields extracted.
    Offer(TradeOffer),
}

/// Parser over an ordered list of grammar variants.
#[derive(Debug, Clone)]
pub struct TradeParser {
    variants: Vec<GrammarVariant>,
}

impl TradeParser {
    /// Parser with the English and Russian variants, in that order.
    #[must_use]
    pub fn new() -> Self {
        let variants = [GrammarVariant::english(), GrammarVariant::russian()]
            .into_iter()
            .filter_map(|result| match result {
                Ok(variant) => Some(variant),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to compile grammar variant");
                    None
                }
            })
            .collect();
        Self { variants }
    }

    /// Parser with explicit variants, tried in the given order.
    #[must_use]
    pub fn with_variants(variants: Vec<GrammarVariant>) -> Self {
        Self { variants }
    }

    #[must_use]
    pub fn variants(&self) -> &[GrammarVariant] {
        &self.variants
    }

    /// Cheap substring check: any intent phrase and any sender marker.
    #[must_use]
    pub fn has_trade_intent(&self, line: &str) -> bool {
        let intent = self.variants.iter().any(|v| line.contains(v.intent));
        let sender = self.variants.iter().any(|v| line.contains(v.sender));
        intent && sender
    }

    /// Classify a line as ignored, unparseable or an offer.
    #[must_use]
    pub fn classify(&self, line: &str) -> LineKind {
        if !self.has_trade_intent(line) {
            return LineKind::Ignored;
        }

        for variant in &self.variants {
            if let Some(offer) = variant.extract(line) {
                tracing::trace!(variant = variant.name, "Whisper matched");
                return LineKind::Offer(offer);
            }
        }

        tracing::warn!(line = %line, "Recognized trade intent, but could not parse it");
        LineKind::Unparseable
    }

    /// Extract a trade offer, if the line is a well-formed trade whisper.
    #[must_use]
    pub fn parse(&self, line: &str) -> Option<TradeOffer> {
        match self.classify(line) {
            LineKind::Offer(offer) => Some(offer),
            LineKind::Ignored | LineKind::Unparseable => None,
        }
    }
}

impl Default for TradeParser {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_PARSER: LazyLock<TradeParser> = LazyLock::new(TradeParser::new);

/// Parse a line with the default English and Russian grammar.
#[must_use]
pub fn parse(line: &str) -> Option<TradeOffer> {
    DEFAULT_PARSER.parse(line)
}
