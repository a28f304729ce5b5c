pub mod cards;
pub mod completions;
pub mod config;
pub mod delete;
pub mod detail;
pub mod seed;
pub mod swipe;

use std::error::Error;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use notifeed_core::storage::default_notifications_path;
use notifeed_core::{
    format_relative, CardView, Config, JsonFileStore, Notification, NotificationWidget, Source,
};

/// Where the notification list comes from.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// JSON notification list (default: notifications.json in the data directory)
    #[arg(long, short, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

impl InputArgs {
    pub fn path(&self) -> Result<PathBuf, Box<dyn Error>> {
        match &self.input {
            Some(path) => Ok(path.clone()),
            None => Ok(default_notifications_path()?),
        }
    }

    pub fn store(&self) -> Result<JsonFileStore, Box<dyn Error>> {
        Ok(JsonFileStore::new(self.path()?))
    }

    /// Loads the configuration and mounts a widget over the file store.
    pub fn mount(&self) -> Result<NotificationWidget<JsonFileStore>, Box<dyn Error>> {
        let config = Config::load()?;
        Ok(NotificationWidget::new(self.store()?, config)?)
    }
}

/// clap value parser for `--source`.
pub fn parse_source(s: &str) -> Result<Source, String> {
    Source::parse(s).ok_or_else(|| format!("unknown source '{s}' (expected telegram or tradingview)"))
}

pub fn render_card(card: &CardView) -> String {
    let mut out = format!("{} ({})\n  {}", card.source, card.count, card.summary);
    if let Some(label) = &card.latest_label {
        out.push_str(&format!("\n  Latest: {label}"));
    }
    out
}

pub fn render_item(item: &Notification, now: DateTime<Utc>, date_format: &str) -> String {
    let age = format_relative(item.received_at, now, date_format);
    match &item.chat_title {
        Some(chat) => format!("[{age}] {chat}: {}", item.content),
        None => format!("[{age}] {}", item.content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notifeed_core::SwipeState;

    fn card(latest_label: Option<&str>) -> CardView {
        CardView {
            source: Source::Telegram,
            count: 2,
            distinct_conversations: Some(2),
            summary: "2 new messages from 2 distinct chats".into(),
            latest_label: latest_label.map(String::from),
            offset: 0.0,
            state: SwipeState::Idle,
            height: 100.0,
            opacity: 1.0,
            visible: true,
        }
    }

    #[test]
    fn card_text_includes_latest_label() {
        assert_eq!(
            render_card(&card(Some("5m ago"))),
            "Telegram (2)\n  2 new messages from 2 distinct chats\n  Latest: 5m ago"
        );
        assert!(!render_card(&card(None)).contains("Latest"));
    }

    #[test]
    fn item_text_prefixes_chat_title() {
        let now = Utc::now();
        let item = Notification::new(1, Source::Telegram, "hello", now).with_chat(7, "Desk");
        assert_eq!(render_item(&item, now, "%Y"), "[0m ago] Desk: hello");
    }

    #[test]
    fn source_parser_rejects_unknown_names() {
        assert_eq!(parse_source("tv"), Ok(Source::TradingView));
        assert!(parse_source("slack").is_err());
    }
}
