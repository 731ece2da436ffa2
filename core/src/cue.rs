//! Audio cue capability.
//!
//! The core only decides *when* a cue plays and with which parameters.
//! Synthesis lives behind `CueSink`; when no audio is available the
//! caller passes `SilentCues` and nothing else changes.

use serde::{Deserialize, Serialize};

pub const OPEN_CLICK_HZ: f64 = 900.0;
pub const OPEN_CLICK_SECS: f64 = 0.15;
pub const STOP_CLICK_HZ: f64 = 600.0;
pub const STOP_CLICK_SECS: f64 = 0.08;
pub const SPIN_BASE_HZ: f64 = 250.0;
pub const SPIN_SECS: f64 = 0.05;
pub const SPIN_VOLUME: f64 = 0.3;
pub const RARE_CHIME_START_HZ: f64 = 400.0;
pub const RARE_CHIME_END_HZ: f64 = 800.0;
pub const RARE_CHIME_SECS: f64 = 0.5;

/// Floor for the spin speed factor so the whir never goes inaudible.
pub const MIN_SPIN_SPEED: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueKind {
    Open,
    Spin,
    Stop,
    RareReveal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub kind:             CueKind,
    pub frequency_hz:     f64,
    /// Equal to `frequency_hz` except for sweeps (the rare chime).
    pub end_frequency_hz: f64,
    pub duration_secs:    f64,
    pub volume:           f64,
}

impl Cue {
    pub fn open() -> Self {
        Self::tone(CueKind::Open, OPEN_CLICK_HZ, OPEN_CLICK_SECS, 0.6)
    }

    /// Whir whose pitch tracks how fast the reel is moving. Volume is fixed.
    pub fn spin(progress: f64) -> Self {
        let speed = spin_speed(progress);
        Self::tone(CueKind::Spin, SPIN_BASE_HZ * speed, SPIN_SECS, SPIN_VOLUME)
    }

    pub fn stop() -> Self {
        Self::tone(CueKind::Stop, STOP_CLICK_HZ, STOP_CLICK_SECS, 0.6)
    }

    pub fn rare_reveal() -> Self {
        Self {
            kind:             CueKind::RareReveal,
            frequency_hz:     RARE_CHIME_START_HZ,
            end_frequency_hz: RARE_CHIME_END_HZ,
            duration_secs:    RARE_CHIME_SECS,
            volume:           0.7,
        }
    }

    fn tone(kind: CueKind, frequency_hz: f64, duration_secs: f64, volume: f64) -> Self {
        Self { kind, frequency_hz, end_frequency_hz: frequency_hz, duration_secs, volume }
    }
}

/// 1.0 at the start of the spin, decaying linearly to 0.1 at the end.
pub fn spin_speed(progress: f64) -> f64 {
    (1.0 - progress.clamp(0.0, 1.0) * 0.9).max(MIN_SPIN_SPEED)
}

/// The "play cue" capability.
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Discards every cue. Used when audio is unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCues;

impl CueSink for SilentCues {
    fn play(&mut self, _cue: Cue) {}
}

/// Records cues in order; handy for tests and replay tooling.
impl CueSink for Vec<Cue> {
    fn play(&mut self, cue: Cue) {
        self.push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_speed_decays_to_floor() {
        assert_eq!(spin_speed(0.0), 1.0);
        assert!((spin_speed(0.5) - 0.55).abs() < 1e-12);
        assert!((spin_speed(1.0) - MIN_SPIN_SPEED).abs() < 1e-12);
    }

    #[test]
    fn spin_pitch_drops_as_reel_slows() {
        assert!(Cue::spin(0.9).frequency_hz < Cue::spin(0.1).frequency_hz);
        assert_eq!(Cue::spin(0.0).frequency_hz, SPIN_BASE_HZ);
    }

    #[test]
    fn spin_volume_does_not_follow_speed() {
        assert_eq!(Cue::spin(0.0).volume, SPIN_VOLUME);
        assert_eq!(Cue::spin(0.95).volume, SPIN_VOLUME);
    }

    #[test]
    fn rare_chime_sweeps_upward() {
        let cue = Cue::rare_reveal();
        assert!(cue.end_frequency_hz > cue.frequency_hz);
    }

    #[test]
    fn vec_sink_records_in_order() {
        let mut sink: Vec<Cue> = Vec::new();
        sink.play(Cue::open());
        sink.play(Cue::stop());
        let kinds: Vec<_> = sink.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![CueKind::Open, CueKind::Stop]);
    }
}
