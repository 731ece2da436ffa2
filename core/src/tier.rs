//! Rarity tiers and the weighted tier table.
//!
//! Tiers are declared most-common first. That order is load-bearing:
//! the assigner hands out prefixes in this order and the weighted draw
//! accumulates weights in this order.

use serde::{Deserialize, Serialize};

pub const TIER_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    MilSpec,
    Restricted,
    Classified,
    Covert,
    ExceedinglyRare,
}

impl Tier {
    /// Every tier in declared order.
    pub const ALL: [Tier; TIER_COUNT] = [
        Tier::MilSpec,
        Tier::Restricted,
        Tier::Classified,
        Tier::Covert,
        Tier::ExceedinglyRare,
    ];

    /// The rarest tier; revealing it triggers the flourish.
    pub const RAREST: Tier = Tier::ExceedinglyRare;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::MilSpec         => "Mil-Spec (Blue)",
            Self::Restricted      => "Restricted (Purple)",
            Self::Classified      => "Classified (Pink)",
            Self::Covert          => "Covert (Red)",
            Self::ExceedinglyRare => "Exceedingly Rare (Gold)",
        }
    }

    /// First word of the display name, as printed on cards.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::MilSpec         => "Mil-Spec",
            Self::Restricted      => "Restricted",
            Self::Classified      => "Classified",
            Self::Covert          => "Covert",
            Self::ExceedinglyRare => "Exceedingly",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::MilSpec         => "#4B69FF",
            Self::Restricted      => "#8847FF",
            Self::Classified      => "#D32CE6",
            Self::Covert          => "#EB4B4B",
            Self::ExceedinglyRare => "#FFD700",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::MilSpec         => "tier-blue",
            Self::Restricted      => "tier-purple",
            Self::Classified      => "tier-pink",
            Self::Covert          => "tier-red",
            Self::ExceedinglyRare => "tier-gold",
        }
    }

    /// Default selection weight, in percent.
    pub fn default_weight(self) -> f64 {
        match self {
            Self::MilSpec         => 79.92,
            Self::Restricted      => 15.98,
            Self::Classified      => 3.20,
            Self::Covert          => 0.64,
            Self::ExceedinglyRare => 0.26,
        }
    }

    pub fn is_rarest(self) -> bool {
        self == Self::RAREST
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Selection weights per tier, in declared order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierTable {
    weights: [f64; TIER_COUNT],
}

impl Default for TierTable {
    fn default() -> Self {
        Self::new(Tier::ALL.map(Tier::default_weight))
    }
}

impl TierTable {
    pub fn new(weights: [f64; TIER_COUNT]) -> Self {
        Self { weights }
    }

    pub fn weight(&self, tier: Tier) -> f64 {
        self.weights[tier.index()]
    }

    pub fn weights(&self) -> &[f64; TIER_COUNT] {
        &self.weights
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Inverse-CDF lookup: the first tier whose cumulative weight is >= `r`.
    ///
    /// Intervals are open below and closed above, so a value exactly on a
    /// cumulative boundary belongs to the lower-indexed tier. A value past
    /// the final sum (float accumulation drift) maps to the last tier.
    pub fn select(&self, r: f64) -> Tier {
        let mut cumulative = 0.0;
        for tier in Tier::ALL {
            cumulative += self.weight(tier);
            if r <= cumulative {
                return tier;
            }
        }
        Tier::RAREST
    }
}
