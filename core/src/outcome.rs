//! Outcome Engine — weighted tier draw, then a uniform item draw.
//!
//! The committed outcome is decided here, once, before any animation.
//! Nothing downstream can change it: `commit` returns an immutable
//! `CommittedDraw` that the animator only reads.

use crate::{
    assigner::TierBuckets,
    config::ReelConfig,
    error::{CaseError, CaseResult},
    rng::StreamRng,
    tier::{Tier, TierTable},
    types::Item,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub item: Item,
    pub tier: Tier,
}

/// One weighted draw.
///
/// Picks a tier by inverse CDF over `table`, then an item uniformly from
/// that tier's bucket. An empty bucket falls back to the whole
/// `fallback_pool`. Fails only when the pool itself is empty.
pub fn draw_outcome(
    table: &TierTable,
    buckets: &TierBuckets,
    fallback_pool: &[Item],
    rng: &mut StreamRng,
) -> CaseResult<Outcome> {
    if fallback_pool.is_empty() {
        return Err(CaseError::NoItemsAvailable);
    }

    let r = rng.next_f64() * table.total();
    let tier = table.select(r);

    let item = match rng.choose(buckets.get(tier)) {
        Some(item) => item,
        None => {
            log::trace!("{tier} bucket is empty; drawing from the whole pool");
            &fallback_pool[rng.index_below(fallback_pool.len())]
        }
    };

    Ok(Outcome { item: item.clone(), tier })
}

/// `count` independent draws used as visual filler.
pub fn draw_decoys(
    count: usize,
    table: &TierTable,
    buckets: &TierBuckets,
    fallback_pool: &[Item],
    rng: &mut StreamRng,
) -> CaseResult<Vec<Outcome>> {
    (0..count)
        .map(|_| draw_outcome(table, buckets, fallback_pool, rng))
        .collect()
}

/// The ordered card strip: decoys with the committed outcome spliced in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reel {
    cards:        Vec<Outcome>,
    winner_index: usize,
}

impl Reel {
    /// Insert `committed` into `decoys` at `splice_index` (clamped to the end).
    pub fn splice(mut decoys: Vec<Outcome>, committed: Outcome, splice_index: usize) -> Self {
        let winner_index = splice_index.min(decoys.len());
        decoys.insert(winner_index, committed);
        Self { cards: decoys, winner_index }
    }

    pub fn cards(&self) -> &[Outcome] {
        &self.cards
    }

    pub fn winner_index(&self) -> usize {
        self.winner_index
    }

    pub fn winner(&self) -> &Outcome {
        &self.cards[self.winner_index]
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Result of the selection phase: the ground truth plus its reel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedDraw {
    pub committed: Outcome,
    pub reel:      Reel,
}

/// Draw the committed outcome and its decoy field.
///
/// The committed draw and the decoys come from separate streams so the
/// number of decoys never affects which outcome is committed.
pub fn commit(
    table: &TierTable,
    buckets: &TierBuckets,
    pool: &[Item],
    reel: &ReelConfig,
    committed_rng: &mut StreamRng,
    decoy_rng: &mut StreamRng,
) -> CaseResult<CommittedDraw> {
    let committed = draw_outcome(table, buckets, pool, committed_rng)?;
    let decoys = draw_decoys(reel.decoy_count, table, buckets, pool, decoy_rng)?;
    let reel = Reel::splice(decoys, committed.clone(), reel.splice_index);
    Ok(CommittedDraw { committed, reel })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(label: &str) -> Outcome {
        Outcome { item: label.into(), tier: Tier::MilSpec }
    }

    #[test]
    fn splice_places_winner_at_index() {
        let decoys: Vec<_> = (0..10).map(|i| outcome(&format!("d{i}"))).collect();
        let reel = Reel::splice(decoys, outcome("win"), 5);
        assert_eq!(reel.len(), 11);
        assert_eq!(reel.winner_index(), 5);
        assert_eq!(reel.winner().item, "win");
        assert_eq!(reel.cards()[4].item, "d4");
        assert_eq!(reel.cards()[6].item, "d5");
    }

    #[test]
    fn splice_past_end_appends() {
        let reel = Reel::splice(vec![outcome("d0")], outcome("win"), 50);
        assert_eq!(reel.winner_index(), 1);
        assert_eq!(reel.winner().item, "win");
    }

    #[test]
    fn empty_pool_is_reported() {
        let mut rng = StreamRng::new(1, 1);
        let err = draw_outcome(&TierTable::default(), &TierBuckets::default(), &[], &mut rng);
        assert!(matches!(err, Err(CaseError::NoItemsAvailable)));
    }
}
