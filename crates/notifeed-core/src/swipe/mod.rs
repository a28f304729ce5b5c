//! Swipe-to-delete gesture handling for summary cards.
//!
//! Two halves talk over a channel:
//!
//! ```text
//! gesture thread                     render thread
//! PanRecognizer ──Offset/Release──▶ GestureReceiver ─▶ SwipeController
//! ```
//!
//! The recognizer owns activation, clamping and the release decision. The
//! controller owns the per-source state machine and the settle spring. Only
//! the render side may mutate the notification list.

mod controller;
mod gesture;
mod spring;

pub use controller::{Release, SwipeController, SwipeState};
pub use gesture::{
    gesture_channel, GestureMessage, GestureReceiver, GestureSender, PanPhase, PanRecognizer,
    ReleaseDecision,
};
pub use spring::{Spring, SpringConfig, SpringSample};

use serde::{Deserialize, Serialize};

/// Geometry of the swipe affordance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeConfig {
    /// Width of the delete button. Bounds the drag and sets the commit
    /// threshold at half of it.
    #[serde(default = "default_action_width")]
    pub action_width: f64,
    /// Leftward travel needed before a touch becomes a swipe.
    #[serde(default = "default_activation_offset")]
    pub activation_offset: f64,
}

fn default_action_width() -> f64 {
    80.0
}
fn default_activation_offset() -> f64 {
    10.0
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            action_width: default_action_width(),
            activation_offset: default_activation_offset(),
        }
    }
}

impl SwipeConfig {
    /// Clamps a raw horizontal translation into `[-action_width, 0]`.
    pub fn clamp_offset(&self, translation_x: f64) -> f64 {
        translation_x.clamp(-self.action_width, 0.0)
    }

    /// Offsets strictly left of this commit to deletion on release.
    pub fn commit_threshold(&self) -> f64 {
        -self.action_width / 2.0
    }
}
