//! What a renderer needs to draw the summary cards and the detail view.

mod collapse;

pub use collapse::Collapse;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::SourceGroup;
use crate::notification::{Notification, Source};
use crate::swipe::SwipeState;
use crate::timefmt::format_relative;

/// Render-ready summary for one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub source: Source,
    pub count: usize,
    /// `null` for sources that are not chat relays.
    pub distinct_conversations: Option<usize>,
    pub summary: String,
    /// Relative age of the newest item; `None` for an empty group.
    pub latest_label: Option<String>,
    /// Horizontal offset of the card body.
    pub offset: f64,
    pub state: SwipeState,
    /// Animated layout height.
    pub height: f64,
    /// Animated layout opacity.
    pub opacity: f64,
    /// `count > 0`.
    pub visible: bool,
}

/// Inputs that do not come from the group itself.
#[derive(Debug, Clone, Copy)]
pub struct CardFrame<'a> {
    pub offset: f64,
    pub state: SwipeState,
    /// Shown fraction from the collapse transition.
    pub shown: f64,
    pub full_height: f64,
    pub now: DateTime<Utc>,
    pub date_format: &'a str,
}

impl CardView {
    pub fn compose(group: &SourceGroup<'_>, frame: CardFrame<'_>) -> Self {
        let latest_label = group
            .latest
            .map(|latest| format_relative(latest.received_at, frame.now, frame.date_format));

        Self {
            source: group.source,
            count: group.count(),
            distinct_conversations: group.distinct_conversations,
            summary: group.summary_text(),
            latest_label,
            offset: frame.offset,
            state: frame.state,
            height: frame.full_height * frame.shown,
            opacity: frame.shown,
            visible: group.is_visible(),
        }
    }
}

/// Read-only drill-down for a tapped card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailView {
    pub source: Source,
    /// Newest first.
    pub items: Vec<Notification>,
}

impl DetailView {
    pub fn from_group(group: &SourceGroup<'_>) -> Self {
        Self {
            source: group.source,
            items: group.newest_first(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timefmt::DEFAULT_DATE_FORMAT;
    use chrono::Duration;

    fn frame(now: DateTime<Utc>, shown: f64) -> CardFrame<'static> {
        CardFrame {
            offset: -12.0,
            state: SwipeState::Dragging,
            shown,
            full_height: 100.0,
            now,
            date_format: DEFAULT_DATE_FORMAT,
        }
    }

    #[test]
    fn compose_fills_summary_and_layout() {
        let now = Utc::now();
        let list = vec![
            Notification::new(1, Source::Telegram, "a", now - Duration::minutes(5))
                .with_chat(1, "Crypto Signals"),
        ];
        let group = SourceGroup::collect(&list, Source::Telegram);
        let card = CardView::compose(&group, frame(now, 0.5));

        assert_eq!(card.count, 1);
        assert_eq!(card.summary, "1 new messages from 1 distinct chats");
        assert_eq!(card.latest_label.as_deref(), Some("5m ago"));
        assert_eq!(card.height, 50.0);
        assert_eq!(card.opacity, 0.5);
        assert_eq!(card.offset, -12.0);
        assert!(card.visible);
    }

    #[test]
    fn empty_group_has_no_timestamp() {
        let list: Vec<Notification> = Vec::new();
        let group = SourceGroup::collect(&list, Source::TradingView);
        let card = CardView::compose(&group, frame(Utc::now(), 0.0));
        assert!(!card.visible);
        assert!(card.latest_label.is_none());
        assert_eq!(card.height, 0.0);
        assert_eq!(card.summary, "0 new alerts");
    }

    #[test]
    fn alert_cards_serialize_null_conversations() {
        let list = vec![Notification::new(3, Source::TradingView, "BTC", Utc::now())];
        let group = SourceGroup::collect(&list, Source::TradingView);
        let json = serde_json::to_value(CardView::compose(&group, frame(Utc::now(), 1.0))).unwrap();
        let fields = json.as_object().unwrap();
        assert_eq!(fields.get("distinct_conversations"), Some(&serde_json::Value::Null));
        assert_eq!(fields["latest_label"], "0m ago");
    }
}
