//! Closed-form damped spring used for offset settles.
//!
//! The spring is evaluated analytically from its start instant, so the value
//! at a given time does not depend on how often the caller ticks.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Physical parameters of the settle spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Displacement below which the spring may come to rest.
    #[serde(default = "default_rest_displacement")]
    pub rest_displacement: f64,
    /// Speed (units per second) below which the spring may come to rest.
    #[serde(default = "default_rest_speed")]
    pub rest_speed: f64,
    /// Stop at the target instead of oscillating past it.
    #[serde(default = "default_true")]
    pub overshoot_clamping: bool,
}

fn default_mass() -> f64 {
    1.0
}
fn default_stiffness() -> f64 {
    100.0
}
fn default_damping() -> f64 {
    10.0
}
fn default_rest_displacement() -> f64 {
    0.01
}
fn default_rest_speed() -> f64 {
    2.0
}
fn default_true() -> bool {
    true
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: default_mass(),
            stiffness: default_stiffness(),
            damping: default_damping(),
            rest_displacement: default_rest_displacement(),
            rest_speed: default_rest_speed(),
            overshoot_clamping: true,
        }
    }
}

/// Position and velocity of a spring at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSample {
    pub value: f64,
    pub velocity: f64,
    pub at_rest: bool,
}

/// A spring animation from `from` toward `to`.
#[derive(Debug, Clone)]
pub struct Spring {
    from: f64,
    to: f64,
    velocity: f64,
    config: SpringConfig,
    started_at: Instant,
}

impl Spring {
    /// Starts a spring at `at` with zero initial velocity.
    pub fn new(from: f64, to: f64, config: SpringConfig, at: Instant) -> Self {
        Self {
            from,
            to,
            velocity: 0.0,
            config,
            started_at: at,
        }
    }

    /// Starts with `velocity` instead of at rest, e.g. when taking over from
    /// another spring.
    #[must_use]
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    /// Samples the spring at `at`. Instants before the start sample t = 0.
    pub fn sample(&self, at: Instant) -> SpringSample {
        self.sample_elapsed(at.saturating_duration_since(self.started_at))
    }

    /// Samples the spring `elapsed` after its start.
    pub fn sample_elapsed(&self, elapsed: Duration) -> SpringSample {
        let x0 = self.from - self.to;
        if x0 == 0.0 && self.velocity == 0.0 {
            return self.rest();
        }

        let (x, v) = displacement(x0, self.velocity, &self.config, elapsed.as_secs_f64());

        // Crossing the target counts as arrival when overshoot is clamped.
        if self.config.overshoot_clamping && x0 != 0.0 && x.signum() != x0.signum() {
            return self.rest();
        }
        if x.abs() < self.config.rest_displacement && v.abs() < self.config.rest_speed {
            return self.rest();
        }

        SpringSample {
            value: self.to + x,
            velocity: v,
            at_rest: false,
        }
    }

    fn rest(&self) -> SpringSample {
        SpringSample {
            value: self.to,
            velocity: 0.0,
            at_rest: true,
        }
    }
}

/// Displacement and velocity of a damped oscillator after `t` seconds.
fn displacement(x0: f64, v0: f64, config: &SpringConfig, t: f64) -> (f64, f64) {
    let omega = (config.stiffness / config.mass).sqrt();
    let zeta = config.damping / (2.0 * (config.stiffness * config.mass).sqrt());

    if zeta < 1.0 {
        let decay = zeta * omega;
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let a = x0;
        let b = (v0 + decay * x0) / omega_d;
        let envelope = (-decay * t).exp();
        let (sin, cos) = (omega_d * t).sin_cos();
        let x = envelope * (a * cos + b * sin);
        let v = envelope * ((b * omega_d - decay * a) * cos - (a * omega_d + decay * b) * sin);
        (x, v)
    } else if zeta == 1.0 {
        let c = v0 + omega * x0;
        let envelope = (-omega * t).exp();
        (envelope * (x0 + c * t), envelope * (v0 - omega * c * t))
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega * (zeta - root);
        let r2 = -omega * (zeta + root);
        let c1 = (v0 - r2 * x0) / (r1 - r2);
        let c2 = x0 - c1;
        let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
        (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spring(from: f64, config: SpringConfig) -> Spring {
        Spring::new(from, 0.0, config, Instant::now())
    }

    #[test]
    fn starts_at_origin() {
        let s = spring(-30.0, SpringConfig::default());
        let sample = s.sample_elapsed(Duration::ZERO);
        assert_eq!(sample.value, -30.0);
        assert!(!sample.at_rest);
    }

    #[test]
    fn moves_toward_target() {
        let s = spring(-30.0, SpringConfig::default());
        let sample = s.sample_elapsed(Duration::from_millis(50));
        assert!(sample.value > -30.0 && sample.value < 0.0, "{sample:?}");
        assert!(sample.velocity > 0.0);
    }

    #[test]
    fn clamped_spring_never_overshoots() {
        let s = spring(-40.0, SpringConfig::default());
        for ms in (0..2000).step_by(5) {
            let sample = s.sample_elapsed(Duration::from_millis(ms));
            assert!(sample.value <= 0.0 && sample.value >= -40.0, "t={ms}ms {sample:?}");
        }
        assert!(s.sample_elapsed(Duration::from_secs(2)).at_rest);
    }

    #[test]
    fn unclamped_underdamped_spring_overshoots() {
        let config = SpringConfig {
            overshoot_clamping: false,
            ..SpringConfig::default()
        };
        let s = spring(-40.0, config);
        let peak = (0..1000)
            .step_by(5)
            .map(|ms| s.sample_elapsed(Duration::from_millis(ms)).value)
            .fold(f64::MIN, f64::max);
        assert!(peak > 0.0);
    }

    #[test]
    fn comes_to_rest_eventually() {
        for damping in [5.0, 20.0, 40.0] {
            let config = SpringConfig {
                damping,
                overshoot_clamping: false,
                ..SpringConfig::default()
            };
            let s = spring(-80.0, config);
            let sample = s.sample_elapsed(Duration::from_secs(10));
            assert!(sample.at_rest, "damping={damping} {sample:?}");
            assert_eq!(sample.value, 0.0);
        }
    }

    #[test]
    fn zero_distance_is_immediately_at_rest() {
        let s = spring(0.0, SpringConfig::default());
        assert!(s.sample_elapsed(Duration::ZERO).at_rest);
    }

    #[test]
    fn critically_damped_is_monotonic() {
        let config = SpringConfig {
            damping: 20.0,
            ..SpringConfig::default()
        };
        let s = spring(-50.0, config);
        let mut last = -50.0;
        for ms in (0..1500).step_by(10) {
            let value = s.sample_elapsed(Duration::from_millis(ms)).value;
            assert!(value >= last, "t={ms}ms {value} < {last}");
            last = value;
        }
    }
}
