//! Reveal Animator — the presentation half of a case opening.
//!
//! PHASES (advanced only by `tick(now_ms)`):
//!   Committed  → Animating   first tick; the clock runs from the open
//!                            timestamp when one was given
//!   Animating  → Held        progress reaches 1.0 (exactly once)
//!   Held       → Revealed    hold delay elapsed, plus the flourish
//!                            sequence when the committed tier is the rarest
//!
//! RULES:
//!   - The committed outcome is fixed before construction; nothing here
//!     can change it.
//!   - Ticks never block. Late ticks catch up: every scheduled flourish
//!     is emitted with its scheduled timestamp.
//!   - Revealed is terminal for the animator. The session drops it and
//!     returns to Idle.

use crate::{
    clock::{ease_out_cubic, RevealClock},
    config::{ReelConfig, TimingConfig},
    cue::{Cue, CueSink},
    event::{Emphasis, Frame, OutcomeReport, RevealEvent, VisibleCard},
    outcome::{CommittedDraw, Outcome, Reel},
    types::Millis,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    Idle,
    Committed,
    Animating,
    Held,
    Revealed,
}

pub struct RevealAnimator {
    draw:          CommittedDraw,
    reel:          ReelConfig,
    timing:        TimingConfig,
    clock:         RevealClock,
    phase:         RevealPhase,
    target_offset: f64,
    offset:        f64,
    last_spin_cue: Millis,
    opened_at:     Option<Millis>,
    stopped_at:    Option<Millis>,
    flourishes:    u32,
}

impl RevealAnimator {
    pub fn new(draw: CommittedDraw, reel: &ReelConfig, timing: &TimingConfig) -> Self {
        let target_offset = reel.target_offset(draw.reel.winner_index());
        Self {
            clock: RevealClock::new(timing.spin_duration_ms),
            offset: reel.start_offset(),
            reel: reel.clone(),
            timing: timing.clone(),
            phase: RevealPhase::Committed,
            target_offset,
            last_spin_cue: 0,
            opened_at: None,
            stopped_at: None,
            flourishes: 0,
            draw,
        }
    }

    /// Time the animation from `opened_at` instead of the first tick.
    pub fn starting_at(mut self, opened_at: Millis) -> Self {
        self.opened_at = Some(opened_at);
        self
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn committed(&self) -> &Outcome {
        &self.draw.committed
    }

    pub fn reel(&self) -> &Reel {
        &self.draw.reel
    }

    pub fn clock(&self) -> &RevealClock {
        &self.clock
    }

    pub fn target_offset(&self) -> f64 {
        self.target_offset
    }

    /// Offset of the most recent render.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Flourish pulses emitted so far.
    pub fn flourish_count(&self) -> u32 {
        self.flourishes
    }

    pub fn progress(&self, now: Millis) -> f64 {
        match self.phase {
            RevealPhase::Idle | RevealPhase::Committed => 0.0,
            RevealPhase::Animating => self.clock.progress(now),
            RevealPhase::Held | RevealPhase::Revealed => 1.0,
        }
    }

    /// Scroll offset at `progress`; exactly the target once progress hits 1.
    pub fn offset_at(&self, progress: f64) -> f64 {
        if progress >= 1.0 {
            return self.target_offset;
        }
        let start = self.reel.start_offset();
        start + (self.target_offset - start) * ease_out_cubic(progress)
    }

    /// Advance the machine to `now` and return what happened.
    pub fn tick(&mut self, now: Millis, cues: &mut dyn CueSink) -> Vec<RevealEvent> {
        let mut events = Vec::new();

        if self.phase == RevealPhase::Committed {
            let start = self.opened_at.map_or(now, |at| at.min(now));
            self.clock.start(start);
            self.last_spin_cue = start;
            self.phase = RevealPhase::Animating;
            log::debug!("reveal animating: target_offset={:.1}", self.target_offset);
            events.push(RevealEvent::AnimationStarted {
                at:            start,
                target_offset: self.target_offset,
            });
        }

        if self.phase == RevealPhase::Animating {
            self.animate(now, cues, &mut events);
        }

        if self.phase == RevealPhase::Held {
            self.hold(now, cues, &mut events);
        }

        events
    }

    fn animate(&mut self, now: Millis, cues: &mut dyn CueSink, events: &mut Vec<RevealEvent>) {
        let elapsed = self.clock.elapsed(now);
        let progress = self.clock.progress(now);
        self.offset = self.offset_at(progress);

        if progress < 1.0 {
            if now.saturating_sub(self.last_spin_cue) > self.timing.spin_cue_interval_ms {
                cues.play(Cue::spin(progress));
                self.last_spin_cue = now;
            }
            events.push(RevealEvent::Frame(self.frame(elapsed, progress, true)));
            return;
        }

        // Final render at the exact target, then hold.
        events.push(RevealEvent::Frame(self.frame(elapsed, 1.0, false)));
        cues.play(Cue::stop());
        self.stopped_at = Some(now);
        self.phase = RevealPhase::Held;
        log::debug!("reveal stopped at elapsed={elapsed}ms; holding {}ms", self.timing.hold_ms);
        events.push(RevealEvent::Stopped { at: now, offset: self.offset });
    }

    fn hold(&mut self, now: Millis, cues: &mut dyn CueSink, events: &mut Vec<RevealEvent>) {
        let Some(stopped_at) = self.stopped_at else {
            return;
        };
        let hold_end = stopped_at.saturating_add(self.timing.hold_ms);
        if now < hold_end {
            return;
        }

        if self.draw.committed.tier.is_rarest() {
            let count = self.timing.flourish_count;
            let interval = self.timing.flourish_interval_ms;
            if self.flourishes == 0 {
                cues.play(Cue::rare_reveal());
            }
            let pulse_at =
                |n: u32| hold_end.saturating_add(Millis::from(n).saturating_mul(interval));
            while self.flourishes < count {
                let at = pulse_at(self.flourishes);
                if at > now {
                    break;
                }
                events.push(RevealEvent::Flourish { index: self.flourishes, at });
                self.flourishes += 1;
            }
            if now < pulse_at(count) {
                return;
            }
        }

        self.phase = RevealPhase::Revealed;
        let report = OutcomeReport::from(&self.draw.committed);
        log::info!("revealed: {} [{}]", report.label, report.tier_name);
        events.push(RevealEvent::Revealed { at: now, report });
    }

    fn frame(&self, elapsed_ms: Millis, progress: f64, animating: bool) -> Frame {
        Frame {
            elapsed_ms,
            progress,
            offset: self.offset,
            cards: self.visible_cards(self.offset, animating),
        }
    }

    /// Cards whose centre lies within one card width of the viewport.
    pub fn visible_cards(&self, offset: f64, animating: bool) -> Vec<VisibleCard> {
        let width = self.reel.card_width;
        let winner = self.draw.reel.winner_index();

        self.draw
            .reel
            .cards()
            .iter()
            .enumerate()
            .filter_map(|(index, card)| {
                let x = index as f64 * self.reel.pitch() - offset;
                let centre = x + width / 2.0;
                if centre <= -width || centre >= self.reel.viewport_width + width {
                    return None;
                }
                let emphasis = if index == winner {
                    Emphasis::Selected
                } else if animating {
                    Emphasis::Dimmed
                } else {
                    Emphasis::Normal
                };
                Some(VisibleCard {
                    index,
                    label: truncate_label(&card.item, self.reel.label_max_chars),
                    tier: card.tier,
                    x,
                    emphasis,
                })
            })
            .collect()
    }
}

/// Cut `label` to `max_chars` characters, marking the cut with "...".
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    match label.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &label[..cut]),
        None => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{outcome::Reel, tier::Tier};

    fn animator_with(tier: Tier) -> RevealAnimator {
        let decoys: Vec<Outcome> = (0..100)
            .map(|i| Outcome { item: format!("decoy {i}"), tier: Tier::MilSpec })
            .collect();
        let committed = Outcome { item: "70. Climbing Stairs".into(), tier };
        let reel = Reel::splice(decoys, committed.clone(), 50);
        RevealAnimator::new(
            CommittedDraw { committed, reel },
            &ReelConfig::default(),
            &TimingConfig::default(),
        )
    }

    #[test]
    fn truncates_long_labels() {
        let long = "3. Longest Substring Without Repeating Characters";
        assert_eq!(truncate_label(long, 30), "3. Longest Substring Without R...");
        assert_eq!(truncate_label("1. Two Sum", 30), "1. Two Sum");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_label("ééé", 2), "éé...");
    }

    #[test]
    fn starts_off_screen_and_targets_winner() {
        let animator = animator_with(Tier::MilSpec);
        assert_eq!(animator.phase(), RevealPhase::Committed);
        assert_eq!(animator.offset(), -400.0);
        assert_eq!(animator.target_offset(), 10_150.0);
        assert_eq!(animator.offset_at(1.0), 10_150.0);
    }

    #[test]
    fn winner_is_centred_and_selected_on_final_render() {
        let animator = animator_with(Tier::Covert);
        let cards = animator.visible_cards(animator.target_offset(), false);
        let winner = cards.iter().find(|c| c.index == 50).expect("winner visible");
        assert_eq!(winner.emphasis, Emphasis::Selected);
        assert_eq!(winner.x + 100.0, 450.0);
        assert!(cards.iter().filter(|c| c.index != 50).all(|c| c.emphasis == Emphasis::Normal));
    }

    #[test]
    fn decoys_are_dimmed_while_animating() {
        let animator = animator_with(Tier::MilSpec);
        let cards = animator.visible_cards(0.0, true);
        assert!(!cards.is_empty());
        assert!(cards.iter().all(|c| c.emphasis == Emphasis::Dimmed));
    }

    #[test]
    fn offscreen_cards_are_skipped() {
        let animator = animator_with(Tier::MilSpec);
        let cards = animator.visible_cards(animator.target_offset(), false);
        // Viewport 900 px, pitch 210: centres within (-200, 1100).
        assert!(cards.len() <= 7, "too many cards: {}", cards.len());
        assert!(cards.iter().all(|c| c.x + 100.0 > -200.0 && c.x + 100.0 < 1100.0));
    }
}
