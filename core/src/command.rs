use crate::types::{Item, Millis};
use serde::{Deserialize, Serialize};

/// Everything a caller can ask a session to do.
/// Variants may be added — never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum SessionCommand {
    Open { now_ms: Millis },
    Tick { now_ms: Millis },
    /// Replace the pool and reassign tiers.
    LoadItems { items: Vec<Item> },
}
