//! Animation clock — start timestamp, fixed duration, clamped progress.
//!
//! The clock never reads wall time. Callers feed timestamps through
//! `tick(now_ms)`, which is what makes the reveal testable with
//! synthetic elapsed times.

use crate::types::Millis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevealClock {
    pub started_at:  Option<Millis>,
    pub duration_ms: Millis,
}

impl RevealClock {
    pub fn new(duration_ms: Millis) -> Self {
        Self { started_at: None, duration_ms }
    }

    pub fn start(&mut self, now: Millis) {
        self.started_at = Some(now);
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Milliseconds since `start`. Zero before start or if `now` runs backwards.
    pub fn elapsed(&self, now: Millis) -> Millis {
        self.started_at.map_or(0, |start| now.saturating_sub(start))
    }

    pub fn progress(&self, now: Millis) -> f64 {
        progress(self.elapsed(now), self.duration_ms)
    }
}

/// `elapsed / duration`, clamped to [0, 1]. Exactly 1.0 once elapsed >= duration.
pub fn progress(elapsed: Millis, duration_ms: Millis) -> f64 {
    if elapsed >= duration_ms {
        return 1.0;
    }
    (elapsed as f64 / duration_ms as f64).clamp(0.0, 1.0)
}

/// Ease-out cubic: fast start, slow finish.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_clamps_at_one() {
        assert_eq!(progress(0, 3500), 0.0);
        assert_eq!(progress(1750, 3500), 0.5);
        assert_eq!(progress(3500, 3500), 1.0);
        assert_eq!(progress(10_000, 3500), 1.0);
    }

    #[test]
    fn ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
    }

    #[test]
    fn unstarted_clock_reports_zero() {
        let clock = RevealClock::new(3500);
        assert!(!clock.is_running());
        assert_eq!(clock.elapsed(9_999), 0);
    }

    #[test]
    fn elapsed_is_relative_to_start() {
        let mut clock = RevealClock::new(3500);
        clock.start(1_000);
        assert_eq!(clock.elapsed(2_750), 1_750);
        assert_eq!(clock.progress(2_750), 0.5);
        assert_eq!(clock.elapsed(500), 0);
    }
}
