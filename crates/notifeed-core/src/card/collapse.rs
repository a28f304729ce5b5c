//! Height/opacity transition for a card whose group appears or empties.

use std::time::{Duration, Instant};

/// Ease-out interpolation between the shown (1.0) and hidden (0.0) layouts.
#[derive(Debug, Clone)]
pub struct Collapse {
    /// Whether the target layout is shown.
    shown: bool,
    /// Fraction at transition start.
    start_value: f64,
    /// Target fraction (0.0 or 1.0).
    target_value: f64,
    /// Transition start; `None` when resting at the target.
    started_at: Option<Instant>,
    duration: Duration,
}

impl Collapse {
    /// Creates a transition resting at the given layout.
    pub fn new(shown: bool, duration: Duration) -> Self {
        Self {
            shown,
            start_value: Self::target_for(shown),
            target_value: Self::target_for(shown),
            started_at: None,
            duration,
        }
    }

    fn target_for(shown: bool) -> f64 {
        if shown {
            1.0
        } else {
            0.0
        }
    }

    fn ease_out(progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        1.0 - (1.0 - p) * (1.0 - p)
    }

    /// Retargets the transition. Starts from wherever the current one is,
    /// so flipping mid-way does not jump. Returns `true` if the target changed.
    pub fn set_shown(&mut self, shown: bool, at: Instant) -> bool {
        if shown == self.shown {
            return false;
        }
        self.start_value = self.fraction(at);
        self.shown = shown;
        self.target_value = Self::target_for(shown);
        self.started_at = if self.duration.is_zero() { None } else { Some(at) };
        true
    }

    /// Shown fraction at `at`, from 0.0 (collapsed) to 1.0 (full height).
    pub fn fraction(&self, at: Instant) -> f64 {
        let Some(started_at) = self.started_at else {
            return self.target_value;
        };
        let elapsed = at.saturating_duration_since(started_at);
        if elapsed >= self.duration {
            return self.target_value;
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.start_value + (self.target_value - self.start_value) * Self::ease_out(progress)
    }

    /// Whether the transition still needs frames at `at`.
    pub fn is_animating(&self, at: Instant) -> bool {
        self.started_at
            .is_some_and(|started| at.saturating_duration_since(started) < self.duration)
    }
}
