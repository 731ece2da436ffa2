use crate::{
    error::{CaseError, CaseResult},
    tier::{TierTable, TIER_COUNT},
    types::Millis,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tolerance for the weight sum check. Shipped weights are two-decimal
/// percentages, so anything tighter only catches float noise.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    /// Selection weights in percent, most common first. Must sum to 100.
    pub weights: [f64; TIER_COUNT],
    /// Share of the pool handed to each of the first four tiers.
    /// The rarest tier takes whatever is left.
    pub allocation: [f64; TIER_COUNT - 1],
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            weights:    *TierTable::default().weights(),
            allocation: [0.50, 0.30, 0.15, 0.05],
        }
    }
}

impl TierConfig {
    pub fn table(&self) -> TierTable {
        TierTable::new(self.weights)
    }
}

/// Card strip geometry, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    pub decoy_count:     usize,
    /// Where the committed outcome is spliced into the decoy field.
    pub splice_index:    usize,
    pub card_width:      f64,
    pub card_spacing:    f64,
    pub viewport_width:  f64,
    pub label_max_chars: usize,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            decoy_count:     100,
            splice_index:    50,
            card_width:      200.0,
            card_spacing:    10.0,
            viewport_width:  900.0,
            label_max_chars: 30,
        }
    }
}

impl ReelConfig {
    /// Distance from one card's left edge to the next.
    pub fn pitch(&self) -> f64 {
        self.card_width + self.card_spacing
    }

    pub fn viewport_center(&self) -> f64 {
        self.viewport_width / 2.0
    }

    /// Scroll offset the animation starts from (two cards off-screen).
    pub fn start_offset(&self) -> f64 {
        -self.card_width * 2.0
    }

    /// Scroll offset that centres the card at `index` in the viewport.
    pub fn target_offset(&self, index: usize) -> f64 {
        index as f64 * self.pitch() + self.card_width / 2.0 - self.viewport_center()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub spin_duration_ms:     Millis,
    pub hold_ms:              Millis,
    pub spin_cue_interval_ms: Millis,
    pub flourish_count:       u32,
    pub flourish_interval_ms: Millis,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms:     3500,
            hold_ms:              500,
            spin_cue_interval_ms: 50,
            flourish_count:       3,
            flourish_interval_ms: 160,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseConfig {
    pub tiers:  TierConfig,
    pub reel:   ReelConfig,
    pub timing: TimingConfig,
}

impl CaseConfig {
    /// Load from a JSON file. Missing sections keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: CaseConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CaseResult<()> {
        let invalid = |reason: String| Err(CaseError::InvalidConfig { reason });

        let weights = &self.tiers.weights;
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return invalid(format!("tier weights must be finite and non-negative: {weights:?}"));
        }
        let total: f64 = weights.iter().sum();
        if (total - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
            return invalid(format!("tier weights must sum to 100, got {total}"));
        }

        let allocation = &self.tiers.allocation;
        if allocation.iter().any(|a| !a.is_finite() || !(0.0..=1.0).contains(a)) {
            return invalid(format!("allocation ratios must lie in [0, 1]: {allocation:?}"));
        }

        let reel = &self.reel;
        if reel.splice_index > reel.decoy_count {
            return invalid(format!(
                "splice_index {} is past decoy_count {}",
                reel.splice_index, reel.decoy_count
            ));
        }
        if reel.card_width <= 0.0 || reel.card_spacing < 0.0 || reel.viewport_width <= 0.0 {
            return invalid("card and viewport dimensions must be positive".into());
        }

        if self.timing.spin_duration_ms == 0 {
            return invalid("spin_duration_ms must be greater than zero".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        CaseConfig::default().validate().expect("default config");
    }

    #[test]
    fn default_target_centres_card_fifty() {
        // 50 * 210 + 100 - 450
        assert_eq!(ReelConfig::default().target_offset(50), 10_150.0);
    }

    #[test]
    fn rejects_weights_not_summing_to_one_hundred() {
        let mut config = CaseConfig::default();
        config.tiers.weights = [80.0, 16.0, 3.2, 0.64, 0.5];
        assert!(matches!(config.validate(), Err(CaseError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_splice_past_decoys() {
        let mut config = CaseConfig::default();
        config.reel.splice_index = 101;
        assert!(matches!(config.validate(), Err(CaseError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_zero_duration() {
        let mut config = CaseConfig::default();
        config.timing.spin_duration_ms = 0;
        assert!(matches!(config.validate(), Err(CaseError::InvalidConfig { .. })));
    }

    #[test]
    fn huge_hold_is_accepted_and_never_overflows() {
        use crate::{
            animator::RevealPhase, cue::SilentCues, items::bundled_items, session::CaseSession,
        };

        let mut config = CaseConfig::default();
        config.timing.hold_ms = u64::MAX;
        config.validate().expect("large hold is allowed");

        let mut session = CaseSession::with_items(config, 5, bundled_items()).unwrap();
        session.open(10, &mut SilentCues).unwrap();
        session.tick(10, &mut SilentCues);
        session.tick(3_510, &mut SilentCues);
        assert_eq!(session.phase(), RevealPhase::Held);
        session.tick(u64::MAX, &mut SilentCues);
        assert_eq!(session.phase(), RevealPhase::Idle);
    }

    #[test]
    fn huge_flourish_interval_never_overflows() {
        use crate::{
            animator::RevealPhase, cue::SilentCues, event::RevealEvent, items::bundled_items,
            session::CaseSession,
        };

        let mut config = CaseConfig::default();
        config.tiers.weights = [0.0, 0.0, 0.0, 0.0, 100.0];
        config.timing.flourish_interval_ms = u64::MAX / 2;
        config.validate().expect("large interval is allowed");

        let mut session = CaseSession::with_items(config, 5, bundled_items()).unwrap();
        session.open(0, &mut SilentCues).unwrap();
        session.tick(0, &mut SilentCues);
        session.tick(3_500, &mut SilentCues);
        let events = session.tick(4_000, &mut SilentCues);
        assert!(events.contains(&RevealEvent::Flourish { index: 0, at: 4_000 }));
        assert_eq!(session.phase(), RevealPhase::Held);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "timing": { "hold_ms": 250 } }"#;
        let config: CaseConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.timing.hold_ms, 250);
        assert_eq!(config.timing.spin_duration_ms, 3500);
        assert_eq!(config.reel, ReelConfig::default());
    }
}
