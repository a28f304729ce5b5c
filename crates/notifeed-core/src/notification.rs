//! Notification records and their source tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Origin of a notification.
///
/// Only the sources in [`Source::KNOWN`] get a summary card. Anything else
/// deserializes to [`Source::Other`] and is carried along but never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Chat relay: messages forwarded from Telegram chats.
    Telegram,
    /// Market alerts fired by TradingView.
    TradingView,
    /// Any unrecognized origin.
    #[serde(other)]
    Other,
}

impl Source {
    /// Sources that get a summary card, in display order.
    pub const KNOWN: [Source; 2] = [Source::Telegram, Source::TradingView];

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Telegram => "Telegram",
            Self::TradingView => "TradingView",
            Self::Other => "Other",
        }
    }

    /// Whether this source carries chat metadata and counts conversations.
    pub const fn is_chat_relay(&self) -> bool {
        matches!(self, Self::Telegram)
    }

    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(self)
    }

    /// Parses a user-supplied source name.
    ///
    /// Accepts the display name in any case plus a couple of short aliases.
    /// Returns `None` for anything that is not a known source.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "telegram" | "tg" => Some(Self::Telegram),
            "tradingview" | "trading-view" | "tv" => Some(Self::TradingView),
            _ => None,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single incoming notification.
///
/// Read-only from the widget's perspective; the widget only ever asks its
/// store to drop whole sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub source: Source,
    pub content: String,
    pub received_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_title: Option<String>,
}

impl Notification {
    pub fn new(
        id: i64,
        source: Source,
        content: impl Into<String>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            source,
            content: content.into(),
            received_at,
            chat_id: None,
            chat_title: None,
        }
    }

    /// Attaches chat metadata (chat-relay notifications only).
    #[must_use]
    pub fn with_chat(mut self, chat_id: i64, chat_title: impl Into<String>) -> Self {
        self.chat_id = Some(chat_id);
        self.chat_title = Some(chat_title.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_source_tags_deserialize_to_other() {
        let json = r#"{"id":9,"source":"Slack","content":"hi","received_at":"2026-01-02T03:04:05Z"}"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.source, Source::Other);
        assert!(!n.source.is_known());
    }

    #[test]
    fn chat_fields_are_optional() {
        let json = r#"{"id":3,"source":"TradingView","content":"BTC above 50000","received_at":"2026-01-02T03:04:05Z"}"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.chat_id, None);
        assert_eq!(n.chat_title, None);

        let out = serde_json::to_string(&n).unwrap();
        assert!(!out.contains("chat_title"));
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(Source::parse("Telegram"), Some(Source::Telegram));
        assert_eq!(Source::parse(" tv "), Some(Source::TradingView));
        assert_eq!(Source::parse("slack"), None);
    }

    #[test]
    fn known_sources_in_display_order() {
        assert_eq!(Source::KNOWN, [Source::Telegram, Source::TradingView]);
        assert!(Source::Telegram.is_chat_relay());
        assert!(!Source::TradingView.is_chat_relay());
    }
}
