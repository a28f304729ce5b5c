//! Per-source swipe state machine.
//!
//! The controller is a render-thread object driven by drained gesture
//! messages and by `tick()`. It does not use internal threads or timers; the
//! caller passes the current instant to every time-dependent call.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging -> (Settling -> Idle | Removing)
//! Settling -> Dragging          (new gesture supersedes the settle)
//! any but Removing -> Removing  (action tap)
//! Removing -> Idle              (group repopulated)
//! ```

use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::gesture::ReleaseDecision;
use super::spring::{Spring, SpringConfig};
use super::SwipeConfig;
use crate::events::Event;
use crate::notification::Source;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeState {
    /// At rest, offset 0.
    Idle,
    /// Following the finger.
    Dragging,
    /// Resting fully open at `-action_width`. Not entered by the current
    /// commit rule, which deletes instead of resting open.
    Revealed,
    /// Springing back to 0 after release.
    Settling,
    /// Group deleted; ignores gestures until the source has items again.
    Removing,
}

/// Outcome of a release, as seen by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Nothing was being dragged.
    Ignored,
    /// Reverting to rest.
    Settle,
    /// The widget must delete the source's group.
    Commit,
}

/// Offset state and settle animation for one source card.
#[derive(Debug, Clone)]
pub struct SwipeController {
    source: Source,
    swipe: SwipeConfig,
    spring: SpringConfig,
    state: SwipeState,
    offset: f64,
    settle: Option<Spring>,
}

impl SwipeController {
    /// Creates a controller at rest.
    pub fn new(source: Source, swipe: SwipeConfig, spring: SpringConfig) -> Self {
        Self {
            source,
            swipe,
            spring,
            state: SwipeState::Idle,
            offset: 0.0,
            settle: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn state(&self) -> SwipeState {
        self.state
    }

    /// Current horizontal offset, always within `[-action_width, 0]`.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Whether a settle or reset spring is still running.
    pub fn is_animating(&self) -> bool {
        self.settle.is_some()
    }

    pub fn is_removing(&self) -> bool {
        self.state == SwipeState::Removing
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Applies a drag offset from the gesture thread.
    pub fn drag_to(&mut self, offset: f64) -> Option<Event> {
        match self.state {
            SwipeState::Removing => None,
            SwipeState::Dragging => {
                self.offset = self.swipe.clamp_offset(offset);
                None
            }
            SwipeState::Settling => {
                let interrupted_at = self.offset;
                self.settle = None;
                self.state = SwipeState::Dragging;
                self.offset = self.swipe.clamp_offset(offset);
                debug!(source = %self.source, interrupted_at, "settle superseded by new drag");
                Some(Event::SettleInterrupted {
                    source: self.source,
                    offset: interrupted_at,
                    at: Utc::now(),
                })
            }
            SwipeState::Idle | SwipeState::Revealed => {
                self.state = SwipeState::Dragging;
                self.offset = self.swipe.clamp_offset(offset);
                Some(Event::DragStarted {
                    source: self.source,
                    at: Utc::now(),
                })
            }
        }
    }

    /// Applies the release decision taken on the gesture thread.
    ///
    /// Neither outcome moves the card by itself: on `Settle` the caller
    /// starts the spring with [`Self::start_settle`], on `Commit` it deletes
    /// the group and then calls [`Self::begin_removal`].
    pub fn release(&mut self, decision: ReleaseDecision, offset: f64) -> Release {
        if self.state != SwipeState::Dragging {
            return Release::Ignored;
        }
        self.offset = self.swipe.clamp_offset(offset);

        match decision {
            ReleaseDecision::Commit => Release::Commit,
            ReleaseDecision::Revert => Release::Settle,
        }
    }

    /// Starts springing back to rest from the current offset.
    pub fn start_settle(&mut self, at: Instant) -> Option<Event> {
        if self.state == SwipeState::Removing {
            return None;
        }
        let from = self.offset;
        if from == 0.0 {
            self.settle = None;
            self.state = SwipeState::Idle;
            return None;
        }
        self.settle = Some(Spring::new(from, 0.0, self.spring, at));
        self.state = SwipeState::Settling;
        debug!(source = %self.source, from, "settle started");
        Some(Event::SettleStarted {
            source: self.source,
            from_offset: from,
            at: Utc::now(),
        })
    }

    /// Marks the group deleted and springs the offset back to 0 so the card
    /// is at rest if the source comes back. An in-flight settle hands over
    /// its position and velocity.
    pub fn begin_removal(&mut self, at: Instant) {
        let mut velocity = 0.0;
        if let Some(settle) = &self.settle {
            let sample = settle.sample(at);
            self.offset = self.swipe.clamp_offset(sample.value);
            velocity = sample.velocity;
        }
        self.state = SwipeState::Removing;
        self.settle = (self.offset != 0.0)
            .then(|| Spring::new(self.offset, 0.0, self.spring, at).with_velocity(velocity));
    }

    /// The source has items again: back to rest.
    pub fn revive(&mut self) -> bool {
        if self.state != SwipeState::Removing {
            return false;
        }
        self.state = SwipeState::Idle;
        self.offset = 0.0;
        self.settle = None;
        true
    }

    /// Advances the settle animation. Returns `SettleFinished` when a
    /// settle lands at rest.
    pub fn tick(&mut self, at: Instant) -> Option<Event> {
        let sample = self.settle.as_ref()?.sample(at);
        self.offset = self.swipe.clamp_offset(sample.value);
        if !sample.at_rest {
            return None;
        }

        self.settle = None;
        self.offset = 0.0;
        if self.state != SwipeState::Settling {
            return None;
        }
        self.state = SwipeState::Idle;
        debug!(source = %self.source, "settle finished");
        Some(Event::SettleFinished {
            source: self.source,
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn controller() -> SwipeController {
        SwipeController::new(Source::Telegram, SwipeConfig::default(), SpringConfig::default())
    }

    #[test]
    fn drag_clamps_and_enters_dragging() {
        let mut c = controller();
        assert_eq!(c.state(), SwipeState::Idle);

        assert!(matches!(c.drag_to(-20.0), Some(Event::DragStarted { .. })));
        assert_eq!(c.state(), SwipeState::Dragging);
        assert_eq!(c.offset(), -20.0);

        assert!(c.drag_to(-300.0).is_none());
        assert_eq!(c.offset(), -80.0);
        c.drag_to(15.0);
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn revert_settles_back_to_idle() {
        let start = Instant::now();
        let mut c = controller();
        c.drag_to(-30.0);
        assert_eq!(c.release(ReleaseDecision::Revert, -30.0), Release::Settle);
        assert!(matches!(c.start_settle(start), Some(Event::SettleStarted { .. })));
        assert_eq!(c.state(), SwipeState::Settling);

        assert!(c.tick(start + Duration::from_millis(16)).is_none());
        assert!(c.offset() > -30.0 && c.offset() < 0.0);

        let done = c.tick(start + Duration::from_secs(3));
        assert!(matches!(done, Some(Event::SettleFinished { .. })));
        assert_eq!(c.state(), SwipeState::Idle);
        assert_eq!(c.offset(), 0.0);
        assert!(!c.is_animating());
    }

    #[test]
    fn removal_mid_settle_keeps_momentum() {
        let start = Instant::now();
        let mut c = controller();
        c.drag_to(-40.0);
        c.release(ReleaseDecision::Revert, -40.0);
        c.start_settle(start);

        let handover = start + Duration::from_millis(40);
        c.begin_removal(handover);
        assert!(c.is_removing());
        let offset = c.offset();
        assert!(offset > -40.0 && offset < 0.0, "offset {offset}");

        // A spring restarted from rest at the same offset lags behind.
        let frame = handover + Duration::from_millis(16);
        let from_rest = Spring::new(offset, 0.0, SpringConfig::default(), handover).sample(frame);
        assert!(c.tick(frame).is_none());
        assert!(c.offset() > from_rest.value, "{} vs {}", c.offset(), from_rest.value);
    }

    #[test]
    fn commit_waits_for_removal() {
        let start = Instant::now();
        let mut c = controller();
        c.drag_to(-60.0);
        assert_eq!(c.release(ReleaseDecision::Commit, -60.0), Release::Commit);
        assert_eq!(c.state(), SwipeState::Dragging);

        c.begin_removal(start);
        assert!(c.is_removing());
        assert!(c.is_animating());

        assert!(c.tick(start + Duration::from_secs(3)).is_none());
        assert_eq!(c.offset(), 0.0);
        assert_eq!(c.state(), SwipeState::Removing);
    }

    #[test]
    fn removing_ignores_gestures() {
        let start = Instant::now();
        let mut c = controller();
        c.begin_removal(start);
        assert!(c.drag_to(-50.0).is_none());
        assert_eq!(c.offset(), 0.0);
        assert_eq!(c.release(ReleaseDecision::Commit, -70.0), Release::Ignored);
        assert_eq!(c.state(), SwipeState::Removing);
    }

    #[test]
    fn release_without_drag_is_ignored() {
        let mut c = controller();
        assert_eq!(c.release(ReleaseDecision::Revert, 0.0), Release::Ignored);
        assert_eq!(c.state(), SwipeState::Idle);
    }

    #[test]
    fn new_drag_supersedes_settle() {
        let start = Instant::now();
        let mut c = controller();
        c.drag_to(-35.0);
        c.release(ReleaseDecision::Revert, -35.0);
        c.start_settle(start);
        c.tick(start + Duration::from_millis(10));

        let event = c.drag_to(-12.0);
        assert!(matches!(event, Some(Event::SettleInterrupted { .. })));
        assert_eq!(c.state(), SwipeState::Dragging);
        assert_eq!(c.offset(), -12.0);
        assert!(!c.is_animating());
    }

    #[test]
    fn revive_only_from_removing() {
        let mut c = controller();
        assert!(!c.revive());
        c.drag_to(-50.0);
        c.begin_removal(Instant::now());
        assert!(c.revive());
        assert_eq!(c.state(), SwipeState::Idle);
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn settle_from_rest_is_immediate() {
        let mut c = controller();
        c.drag_to(0.0);
        assert_eq!(c.release(ReleaseDecision::Revert, 0.0), Release::Settle);
        assert!(c.start_settle(Instant::now()).is_none());
        assert_eq!(c.state(), SwipeState::Idle);
    }
}
