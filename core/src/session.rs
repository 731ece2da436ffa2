//! The case-opening session — owns every piece of mutable state.
//!
//! ORDER OF A CASE OPENING (fixed):
//!   1. open():  validate pool, commit outcome + decoys, play Open cue
//!   2. tick():  animator runs Animating → Held → Revealed, timed from
//!               the open timestamp
//!   3. tick():  on Revealed, keep the report and drop back to Idle
//!
//! RULES:
//!   - At most one reveal in flight. Opens while busy are ignored.
//!   - The outcome is committed in step 1, before any frame is drawn.
//!   - All randomness flows through the RngBank.
//!   - Reloading the pool swaps the buckets wholesale; an in-flight
//!     reveal keeps the cards it was committed with.

use crate::{
    animator::{RevealAnimator, RevealPhase},
    assigner::{assign_tiers, TierBuckets},
    command::SessionCommand,
    config::CaseConfig,
    cue::{Cue, CueSink},
    error::{CaseError, CaseResult},
    event::{OutcomeReport, RevealEvent},
    items::clean_items,
    outcome::{self, Outcome},
    rng::{RngBank, StreamRng, StreamSlot},
    snapshot::SessionSnapshot,
    tier::{Tier, TierTable},
    types::{Item, Millis},
};

/// Result of an open request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStatus {
    /// Outcome committed; call `tick` to play the reveal.
    Started,
    /// A reveal is already in flight; nothing changed.
    Busy,
}

pub struct CaseSession {
    config:        CaseConfig,
    table:         TierTable,
    pool:          Vec<Item>,
    buckets:       TierBuckets,
    rng_bank:      RngBank,
    assign_rng:    StreamRng,
    committed_rng: StreamRng,
    decoy_rng:     StreamRng,
    reveal:        Option<RevealAnimator>,
    last_report:   Option<OutcomeReport>,
    last_tick:     Millis,
    opened:        u64,
}

impl CaseSession {
    pub fn new(config: CaseConfig, seed: u64) -> CaseResult<Self> {
        config.validate()?;
        let rng_bank = RngBank::new(seed);
        Ok(Self {
            table:         config.tiers.table(),
            assign_rng:    rng_bank.for_stream(StreamSlot::TierAssignment),
            committed_rng: rng_bank.for_stream(StreamSlot::Committed),
            decoy_rng:     rng_bank.for_stream(StreamSlot::Decoy),
            rng_bank,
            config,
            pool:          Vec::new(),
            buckets:       TierBuckets::default(),
            reveal:        None,
            last_report:   None,
            last_tick:     0,
            opened:        0,
        })
    }

    /// Build a session and load `items` in one step.
    pub fn with_items(config: CaseConfig, seed: u64, items: Vec<Item>) -> CaseResult<Self> {
        let mut session = Self::new(config, seed)?;
        session.load_items(items);
        Ok(session)
    }

    /// Replace the pool and reassign tiers. Labels are trimmed and blank
    /// ones dropped, whatever their source.
    pub fn load_items(&mut self, items: Vec<Item>) -> RevealEvent {
        let items = clean_items(items);
        let buckets = assign_tiers(&items, &self.config.tiers.allocation, &mut self.assign_rng);
        self.pool = items;
        self.buckets = buckets;
        log::info!("pool loaded: {} items", self.pool.len());
        RevealEvent::PoolLoaded {
            item_count:   self.pool.len(),
            bucket_sizes: self.buckets.sizes(),
        }
    }

    /// Ask for a case to be opened at `now`.
    ///
    /// Returns `Busy` (and changes nothing) while a reveal is in flight,
    /// and `NoItemsAvailable` when the pool is empty.
    pub fn open(&mut self, now: Millis, cues: &mut dyn CueSink) -> CaseResult<OpenStatus> {
        if self.reveal.is_some() {
            log::warn!("open ignored at {now}ms: reveal already in flight");
            return Ok(OpenStatus::Busy);
        }
        if self.pool.is_empty() {
            return Err(CaseError::NoItemsAvailable);
        }

        let draw = outcome::commit(
            &self.table,
            &self.buckets,
            &self.pool,
            &self.config.reel,
            &mut self.committed_rng,
            &mut self.decoy_rng,
        )?;
        self.opened += 1;
        log::debug!(
            "case #{} committed at {now}ms: tier={} reel_len={}",
            self.opened,
            draw.committed.tier,
            draw.reel.len()
        );

        cues.play(Cue::open());
        self.reveal = Some(
            RevealAnimator::new(draw, &self.config.reel, &self.config.timing).starting_at(now),
        );
        self.last_tick = now;
        Ok(OpenStatus::Started)
    }

    /// Advance the reveal to `now`. A no-op while Idle.
    pub fn tick(&mut self, now: Millis, cues: &mut dyn CueSink) -> Vec<RevealEvent> {
        self.last_tick = now;
        let Some(reveal) = self.reveal.as_mut() else {
            return Vec::new();
        };

        let mut events = reveal.tick(now, cues);
        if reveal.phase() == RevealPhase::Revealed {
            self.last_report = Some(OutcomeReport::from(reveal.committed()));
            self.reveal = None;
            events.push(RevealEvent::SessionReset { at: now });
        }
        events
    }

    /// Apply one command and collect what it emitted.
    pub fn handle(
        &mut self,
        command: SessionCommand,
        cues: &mut dyn CueSink,
    ) -> CaseResult<Vec<RevealEvent>> {
        match command {
            SessionCommand::Open { now_ms } => Ok(match self.open(now_ms, cues)? {
                OpenStatus::Started => vec![RevealEvent::Opened { at: now_ms }],
                OpenStatus::Busy => vec![RevealEvent::OpenIgnored { at: now_ms }],
            }),
            SessionCommand::Tick { now_ms } => Ok(self.tick(now_ms, cues)),
            SessionCommand::LoadItems { items } => Ok(vec![self.load_items(items)]),
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.reveal.as_ref().map_or(RevealPhase::Idle, RevealAnimator::phase)
    }

    pub fn is_idle(&self) -> bool {
        self.reveal.is_none()
    }

    /// The outcome of the reveal in flight, if any.
    pub fn committed(&self) -> Option<&Outcome> {
        self.reveal.as_ref().map(RevealAnimator::committed)
    }

    pub fn reveal(&self) -> Option<&RevealAnimator> {
        self.reveal.as_ref()
    }

    pub fn last_report(&self) -> Option<&OutcomeReport> {
        self.last_report.as_ref()
    }

    pub fn progress(&self) -> f64 {
        self.reveal.as_ref().map_or(0.0, |r| r.progress(self.last_tick))
    }

    pub fn pool(&self) -> &[Item] {
        &self.pool
    }

    pub fn item_count(&self) -> usize {
        self.pool.len()
    }

    pub fn buckets(&self) -> &TierBuckets {
        &self.buckets
    }

    pub fn tier_of(&self, item: &str) -> Option<Tier> {
        self.buckets.tier_of(item)
    }

    pub fn tier_table(&self) -> &TierTable {
        &self.table
    }

    pub fn config(&self) -> &CaseConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng_bank.master_seed()
    }

    /// Cases opened since the session was created.
    pub fn opened(&self) -> u64 {
        self.opened
    }

    /// One standalone weighted draw from the committed stream.
    /// Used by the runner's statistics mode; does not touch the reveal.
    pub fn sample(&mut self) -> CaseResult<Outcome> {
        outcome::draw_outcome(&self.table, &self.buckets, &self.pool, &mut self.committed_rng)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            seed:         self.seed(),
            phase:        self.phase(),
            item_count:   self.item_count(),
            bucket_sizes: self.buckets.sizes(),
            progress:     self.progress(),
            opened:       self.opened,
            last_report:  self.last_report.clone(),
        }
    }
}
