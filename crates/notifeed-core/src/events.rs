use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notification::Source;

/// How a group deletion was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteTrigger {
    /// Released past the midpoint of the action width.
    Swipe,
    /// Tapped the delete button.
    ActionTap,
}

/// Every visible state change of the widget produces an Event.
/// Hosts drain them from `pump()` and the other commands to log or forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A card started following a horizontal swipe.
    DragStarted {
        source: Source,
        at: DateTime<Utc>,
    },
    /// Released without committing; the card springs back.
    SettleStarted {
        source: Source,
        from_offset: f64,
        at: DateTime<Utc>,
    },
    /// A new swipe took over a card that was still settling.
    SettleInterrupted {
        source: Source,
        offset: f64,
        at: DateTime<Utc>,
    },
    SettleFinished {
        source: Source,
        at: DateTime<Utc>,
    },
    /// Every notification of `source` was removed.
    SourceDeleted {
        source: Source,
        removed: usize,
        trigger: DeleteTrigger,
        at: DateTime<Utc>,
    },
    /// A deleted source received new notifications and its card is back.
    SourceRestored {
        source: Source,
        count: usize,
        at: DateTime<Utc>,
    },
    DetailOpened {
        source: Source,
        count: usize,
        at: DateTime<Utc>,
    },
    DetailClosed {
        source: Source,
        at: DateTime<Utc>,
    },
    /// The list was reloaded from the store.
    Refreshed {
        total: usize,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Source the event concerns, if any.
    pub fn source(&self) -> Option<Source> {
        match self {
            Self::DragStarted { source, .. }
            | Self::SettleStarted { source, .. }
            | Self::SettleInterrupted { source, .. }
            | Self::SettleFinished { source, .. }
            | Self::SourceDeleted { source, .. }
            | Self::SourceRestored { source, .. }
            | Self::DetailOpened { source, .. }
            | Self::DetailClosed { source, .. } => Some(*source),
            Self::Refreshed { .. } => None,
        }
    }
}
