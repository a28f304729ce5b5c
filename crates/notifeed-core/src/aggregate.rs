//! Per-source grouping of the flat notification list.
//!
//! Groups are views, not state: they are rebuilt from the current list on
//! every render pass and never mutated in place.

use std::collections::HashSet;

use serde::Serialize;

use crate::notification::{Notification, Source};

/// All notifications of one source plus the derived summary fields.
#[derive(Debug, Clone, Serialize)]
pub struct SourceGroup<'a> {
    pub source: Source,
    /// Matching notifications, in list order.
    pub items: Vec<&'a Notification>,
    /// Newest item, `None` when the group is empty.
    pub latest: Option<&'a Notification>,
    /// Unique chat titles, chat-relay sources only.
    pub distinct_conversations: Option<usize>,
}

impl<'a> SourceGroup<'a> {
    /// Builds the group for `source` out of `notifications`.
    pub fn collect(notifications: &'a [Notification], source: Source) -> Self {
        let items: Vec<&Notification> = notifications
            .iter()
            .filter(|n| n.source == source)
            .collect();

        // Ties keep the earliest entry, like a stable newest-first sort would.
        let latest = items
            .iter()
            .copied()
            .reduce(|best, n| if n.received_at > best.received_at { n } else { best });

        let distinct_conversations = source.is_chat_relay().then(|| {
            items
                .iter()
                .map(|n| n.chat_title.as_deref())
                .collect::<HashSet<_>>()
                .len()
        });

        Self {
            source,
            items,
            latest,
            distinct_conversations,
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// A group is rendered only while it has items.
    pub fn is_visible(&self) -> bool {
        !self.items.is_empty()
    }

    /// The card's one-line summary.
    pub fn summary_text(&self) -> String {
        match self.distinct_conversations {
            Some(chats) => format!("{} new messages from {} distinct chats", self.count(), chats),
            None => format!("{} new alerts", self.count()),
        }
    }

    /// Items newest first, as shown by the detail view.
    pub fn newest_first(&self) -> Vec<Notification> {
        let mut items: Vec<Notification> = self.items.iter().map(|n| (*n).clone()).collect();
        items.sort_by(|a, b| b.received_at.cmp(&a.received_at));
        items
    }
}

/// Groups for every known source, in display order.
pub fn known_groups(notifications: &[Notification]) -> Vec<SourceGroup<'_>> {
    Source::KNOWN
        .iter()
        .map(|&source| SourceGroup::collect(notifications, source))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn sample() -> Vec<Notification> {
        let now = Utc::now();
        vec![
            Notification::new(1, Source::Telegram, "New signal alert for BTC/USD", now)
                .with_chat(12345, "Crypto Signals"),
            Notification::new(2, Source::Telegram, "Market analysis for today", now - Duration::hours(1))
                .with_chat(67890, "Trading Group"),
            Notification::new(3, Source::TradingView, "Price alert: BTC/USD above 50000", now - Duration::hours(2)),
            Notification::new(4, Source::Telegram, "Stop loss moved", now - Duration::minutes(3))
                .with_chat(12345, "Crypto Signals"),
        ]
    }

    #[test]
    fn counts_distinct_chat_titles() {
        let list = sample();
        let group = SourceGroup::collect(&list, Source::Telegram);
        assert_eq!(group.count(), 3);
        assert_eq!(group.distinct_conversations, Some(2));
        assert_eq!(group.summary_text(), "3 new messages from 2 distinct chats");
    }

    #[test]
    fn market_alerts_have_no_conversation_count() {
        let list = sample();
        let group = SourceGroup::collect(&list, Source::TradingView);
        assert_eq!(group.distinct_conversations, None);
        assert_eq!(group.summary_text(), "1 new alerts");
    }

    #[test]
    fn latest_is_newest_regardless_of_order() {
        let mut list = sample();
        list.reverse();
        let group = SourceGroup::collect(&list, Source::Telegram);
        assert_eq!(group.latest.map(|n| n.id), Some(1));
    }

    #[test]
    fn latest_ties_keep_first_in_list() {
        let at = Utc::now();
        let list = vec![
            Notification::new(10, Source::TradingView, "a", at),
            Notification::new(11, Source::TradingView, "b", at),
        ];
        let group = SourceGroup::collect(&list, Source::TradingView);
        assert_eq!(group.latest.map(|n| n.id), Some(10));
    }

    #[test]
    fn empty_group_has_no_latest() {
        let list = vec![Notification::new(1, Source::Other, "x", Utc::now())];
        let group = SourceGroup::collect(&list, Source::TradingView);
        assert!(!group.is_visible());
        assert!(group.latest.is_none());
    }

    #[test]
    fn missing_chat_title_counts_once() {
        let now = Utc::now();
        let list = vec![
            Notification::new(1, Source::Telegram, "a", now),
            Notification::new(2, Source::Telegram, "b", now),
            Notification::new(3, Source::Telegram, "c", now).with_chat(1, "Alpha"),
        ];
        let group = SourceGroup::collect(&list, Source::Telegram);
        assert_eq!(group.distinct_conversations, Some(2));
    }

    #[test]
    fn known_groups_skip_unknown_sources() {
        let mut list = sample();
        list.push(Notification::new(5, Source::Other, "ignored", Utc::now()));
        let groups = known_groups(&list);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].source, Source::Telegram);
        assert_eq!(groups[1].source, Source::TradingView);
    }

    #[test]
    fn newest_first_sorts_descending() {
        let list = sample();
        let group = SourceGroup::collect(&list, Source::Telegram);
        let ids: Vec<i64> = group.newest_first().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 4, 2]);
    }
}
