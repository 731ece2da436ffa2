//! Point-in-time view of a session, for status displays and IPC.

use crate::{
    animator::RevealPhase,
    event::OutcomeReport,
    tier::TIER_COUNT,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub seed:         u64,
    pub phase:        RevealPhase,
    pub item_count:   usize,
    pub bucket_sizes: [usize; TIER_COUNT],
    pub progress:     f64,
    pub opened:       u64,
    pub last_report:  Option<OutcomeReport>,
}
