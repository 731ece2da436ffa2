//! Everything the core reports to its caller.
//!
//! RULE: The renderer draws only from these events.
//! It never reads session internals mid-animation.

use crate::{
    outcome::Outcome,
    tier::{Tier, TIER_COUNT},
    types::{Item, Millis},
};
use serde::{Deserialize, Serialize};

/// Every event emitted by a session.
/// Variants may be added — never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RevealEvent {
    // ── Pool ───────────────────────────────────────
    PoolLoaded {
        item_count:   usize,
        bucket_sizes: [usize; TIER_COUNT],
    },

    // ── Open ───────────────────────────────────────
    Opened {
        at: Millis,
    },
    /// Open request arrived while a reveal was in flight.
    OpenIgnored {
        at: Millis,
    },

    // ── Animation ──────────────────────────────────
    AnimationStarted {
        at:            Millis,
        target_offset: f64,
    },
    Frame(Frame),
    /// Reel reached the target; the hold delay starts now.
    Stopped {
        at:     Millis,
        offset: f64,
    },
    /// One rare-tier flourish pulse, at its scheduled time.
    Flourish {
        index: u32,
        at:    Millis,
    },

    // ── Disclosure ─────────────────────────────────
    Revealed {
        at:     Millis,
        report: OutcomeReport,
    },
    SessionReset {
        at: Millis,
    },
}

/// One rendered frame of the reel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub elapsed_ms: Millis,
    pub progress:   f64,
    pub offset:     f64,
    pub cards:      Vec<VisibleCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleCard {
    /// Position in the reel.
    pub index:    usize,
    /// Display label, already truncated.
    pub label:    String,
    pub tier:     Tier,
    /// Left edge relative to the viewport.
    pub x:        f64,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Selected,
    Dimmed,
    Normal,
}

/// What the user is shown once the reel stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeReport {
    pub label:     Item,
    pub tier:      Tier,
    pub tier_name: String,
    pub color:     String,
    pub css_class: String,
}

impl From<&Outcome> for OutcomeReport {
    fn from(outcome: &Outcome) -> Self {
        Self {
            label:     outcome.item.clone(),
            tier:      outcome.tier,
            tier_name: outcome.tier.name().to_string(),
            color:     outcome.tier.color().to_string(),
            css_class: outcome.tier.css_class().to_string(),
        }
    }
}
