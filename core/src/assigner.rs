//! Tier Assigner — partitions the item pool into five disjoint buckets.
//!
//! The pool is shuffled once (unbiased), then walked front to back:
//! each of the first four tiers takes a prefix of
//! `max(1, floor(total * ratio))` items, clipped to what is left, and the
//! rarest tier takes the exact remainder. Small pools can run dry before
//! the later tiers; those buckets stay empty and the outcome engine falls
//! back to the whole pool for them.

use crate::{
    rng::StreamRng,
    tier::{Tier, TIER_COUNT},
    types::Item,
};
use serde::{Deserialize, Serialize};

/// Tier → items mapping. Rebuilt wholesale on every pool load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBuckets {
    buckets: [Vec<Item>; TIER_COUNT],
}

impl TierBuckets {
    pub fn get(&self, tier: Tier) -> &[Item] {
        &self.buckets[tier.index()]
    }

    /// Bucket sizes in declared tier order.
    pub fn sizes(&self) -> [usize; TIER_COUNT] {
        Tier::ALL.map(|tier| self.get(tier).len())
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// The tier an item was assigned to. With duplicate labels in the
    /// pool, the first (most common) matching tier wins.
    pub fn tier_of(&self, item: &str) -> Option<Tier> {
        Tier::ALL
            .into_iter()
            .find(|tier| self.get(*tier).iter().any(|i| i == item))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &[Item])> {
        Tier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }
}

/// Shuffle `pool` and cut it into tier buckets.
pub fn assign_tiers(
    pool: &[Item],
    allocation: &[f64; TIER_COUNT - 1],
    rng: &mut StreamRng,
) -> TierBuckets {
    let mut buckets = TierBuckets::default();
    if pool.is_empty() {
        return buckets;
    }

    let mut shuffled = pool.to_vec();
    rng.shuffle(&mut shuffled);

    let total = shuffled.len();
    let mut rest = shuffled.as_slice();
    for (tier, ratio) in Tier::ALL.into_iter().zip(allocation) {
        let want = ((total as f64 * ratio).floor() as usize).max(1);
        let (head, tail) = rest.split_at(want.min(rest.len()));
        buckets.buckets[tier.index()] = head.to_vec();
        rest = tail;
    }
    buckets.buckets[Tier::RAREST.index()] = rest.to_vec();

    log::debug!("assigned {total} items to tiers: sizes={:?}", buckets.sizes());
    buckets
}
