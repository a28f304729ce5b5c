//! Gesture-thread side of a swipe: pan recognition and the message boundary.
//!
//! A [`PanRecognizer`] lives wherever raw touch input arrives. It never
//! touches widget state; it only emits [`GestureMessage`]s that the render
//! thread drains through a [`GestureReceiver`].

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::SwipeConfig;
use crate::notification::Source;

/// What to do with a card when the finger lifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseDecision {
    /// Past the midpoint: delete the source's group.
    Commit,
    /// Spring back to rest.
    Revert,
}

/// The only two things that cross from the gesture thread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GestureMessage {
    /// Latest clamped offset. Display only; later updates supersede earlier ones.
    Offset { source: Source, offset: f64 },
    /// The commit-or-revert decision taken at release.
    Release {
        source: Source,
        decision: ReleaseDecision,
        offset: f64,
    },
}

impl GestureMessage {
    pub fn source(&self) -> Source {
        match self {
            Self::Offset { source, .. } | Self::Release { source, .. } => *source,
        }
    }
}

/// Creates a connected sender/receiver pair.
pub fn gesture_channel() -> (GestureSender, GestureReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (GestureSender { tx }, GestureReceiver { rx })
}

/// Cloneable handle used by recognizers on the gesture thread.
#[derive(Debug, Clone)]
pub struct GestureSender {
    tx: mpsc::UnboundedSender<GestureMessage>,
}

impl GestureSender {
    /// Sends a message. Returns `false` once the widget has gone away.
    pub fn send(&self, message: GestureMessage) -> bool {
        self.tx.send(message).is_ok()
    }
}

/// Render-thread end of the boundary.
#[derive(Debug)]
pub struct GestureReceiver {
    rx: mpsc::UnboundedReceiver<GestureMessage>,
}

impl GestureReceiver {
    /// Takes every pending message without blocking, oldest first.
    pub fn drain(&mut self) -> Vec<GestureMessage> {
        std::iter::from_fn(|| self.rx.try_recv().ok()).collect()
    }
}

/// Recognition phase of the current touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanPhase {
    /// No touch in progress.
    Idle,
    /// Touch down, intent not yet known.
    Undetermined,
    /// Horizontal swipe recognized; offsets are being emitted.
    Active,
    /// Touch belongs to the scroll view until it lifts.
    Failed,
}

/// Horizontal pan recognizer for one source's card.
#[derive(Debug)]
pub struct PanRecognizer {
    source: Source,
    config: SwipeConfig,
    sender: GestureSender,
    phase: PanPhase,
    offset: f64,
}

impl PanRecognizer {
    pub fn new(source: Source, config: SwipeConfig, sender: GestureSender) -> Self {
        Self {
            source,
            config,
            sender,
            phase: PanPhase::Idle,
            offset: 0.0,
        }
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn phase(&self) -> PanPhase {
        self.phase
    }

    /// Gesture-local offset of the current touch.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Touch down.
    pub fn begin(&mut self) {
        self.phase = PanPhase::Undetermined;
        self.offset = 0.0;
    }

    /// Touch moved to the given translation from its start point.
    ///
    /// Returns the message sent, if any.
    pub fn update(&mut self, translation_x: f64, translation_y: f64) -> Option<GestureMessage> {
        if self.phase == PanPhase::Idle {
            self.begin();
        }

        if self.phase == PanPhase::Undetermined {
            if translation_x <= -self.config.activation_offset {
                debug!(source = %self.source, translation_x, "swipe activated");
                self.phase = PanPhase::Active;
            } else if translation_y.abs() >= self.config.activation_offset {
                debug!(source = %self.source, translation_y, "vertical intent, yielding to scroll");
                self.phase = PanPhase::Failed;
                return None;
            } else {
                return None;
            }
        }

        if self.phase != PanPhase::Active {
            return None;
        }

        self.offset = self.config.clamp_offset(translation_x);
        trace!(source = %self.source, offset = self.offset, "swipe offset");
        self.emit(GestureMessage::Offset {
            source: self.source,
            offset: self.offset,
        })
    }

    /// Touch lifted. Decides commit vs revert for an active swipe.
    pub fn end(&mut self) -> Option<GestureMessage> {
        let decision = if self.offset < self.config.commit_threshold() {
            ReleaseDecision::Commit
        } else {
            ReleaseDecision::Revert
        };
        self.finish(decision)
    }

    /// Touch cancelled by the system. An active swipe always reverts.
    pub fn cancel(&mut self) -> Option<GestureMessage> {
        self.finish(ReleaseDecision::Revert)
    }

    fn finish(&mut self, decision: ReleaseDecision) -> Option<GestureMessage> {
        let was_active = self.phase == PanPhase::Active;
        let offset = self.offset;
        self.phase = PanPhase::Idle;
        self.offset = 0.0;

        if !was_active {
            return None;
        }
        debug!(source = %self.source, offset, ?decision, "swipe released");
        self.emit(GestureMessage::Release {
            source: self.source,
            decision,
            offset,
        })
    }

    fn emit(&self, message: GestureMessage) -> Option<GestureMessage> {
        if self.sender.send(message) {
            Some(message)
        } else {
            debug!(source = %self.source, "gesture receiver dropped");
            None
        }
    }
}
