//! Animated numeric interpolation for score counters
//!
//! Presentation only: the data is never transformed, the display value is a
//! time-sampled interpolation from 0 to the target with an ease-out cubic
//! curve. No task owns the value — the surface's frame loop samples
//! [`ScoreAnimation::value_at`] each tick, and entering a new `Ready` state
//! replaces the whole [`ScoreAnimations`] bundle, which is what cancels a
//! still-running animation.

use std::time::{Duration, Instant};

use crate::types::AnalysisResult;

/// Duration of the main risk score counter animation
pub const RISK_ANIMATION: Duration = Duration::from_millis(1000);

/// Duration of the manipulation/vulnerability meter animations
pub const METER_ANIMATION: Duration = Duration::from_millis(900);

/// Ease-out cubic curve over progress in [0, 1]
pub fn ease_out_cubic(progress: f32) -> f32 {
    1.0 - (1.0 - progress).powi(3)
}

/// One 0-to-target score interpolation
#[derive(Debug, Clone, Copy)]
pub struct ScoreAnimation {
    target: u8,
    started_at: Instant,
    duration: Duration,
}

impl ScoreAnimation {
    pub fn new(target: u8, duration: Duration, started_at: Instant) -> Self {
        Self {
            target,
            started_at,
            duration,
        }
    }

    /// Final value the animation settles on
    pub fn target(&self) -> u8 {
        self.target
    }

    /// Display value at the given instant
    pub fn value_at(&self, now: Instant) -> u8 {
        let elapsed = now.saturating_duration_since(self.started_at);
        let progress = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        (f32::from(self.target) * ease_out_cubic(progress)).round() as u8
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }
}

/// The three score animations of one `Ready` state, started together
#[derive(Debug, Clone, Copy)]
pub struct ScoreAnimations {
    pub risk: ScoreAnimation,
    pub manipulation: ScoreAnimation,
    pub vulnerability: ScoreAnimation,
}

impl ScoreAnimations {
    /// Start all three counters from 0 at `now`
    pub fn start(result: &AnalysisResult, now: Instant) -> Self {
        Self {
            risk: ScoreAnimation::new(result.risk_score, RISK_ANIMATION, now),
            manipulation: ScoreAnimation::new(result.manipulation_score, METER_ANIMATION, now),
            vulnerability: ScoreAnimation::new(result.vulnerability_score, METER_ANIMATION, now),
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        // risk has the longest duration
        self.risk.is_finished(now) && self.manipulation.is_finished(now)
    }
}
