//! Same seed, same pool, same tick schedule → byte-identical event streams.

use case_opener_core::{
    config::CaseConfig,
    cue::Cue,
    event::RevealEvent,
    items::bundled_items,
    session::CaseSession,
};

fn run_cases(seed: u64, cases: u64) -> (Vec<String>, Vec<Cue>) {
    let mut session =
        CaseSession::with_items(CaseConfig::default(), seed, bundled_items()).expect("session");
    let mut cues: Vec<Cue> = Vec::new();
    let mut log: Vec<RevealEvent> = Vec::new();

    let mut now = 0;
    for _ in 0..cases {
        session.open(now, &mut cues).expect("open");
        while !session.is_idle() {
            log.extend(session.tick(now, &mut cues));
            now += 16;
        }
        now += 1_000;
    }

    let log = log
        .iter()
        .map(|e| serde_json::to_string(e).expect("serialize"))
        .collect();
    (log, cues)
}

#[test]
fn same_seed_produces_identical_event_logs() {
    const SEED: u64 = 0xDEAD_BEEF_CAFE_1234;

    let (log_a, cues_a) = run_cases(SEED, 5);
    let (log_b, cues_b) = run_cases(SEED, 5);

    assert_eq!(log_a.len(), log_b.len(), "event log lengths differ");
    for (i, (a, b)) in log_a.iter().zip(log_b.iter()).enumerate() {
        assert_eq!(a, b, "event log diverged at entry {i}");
    }
    assert_eq!(cues_a, cues_b);
}

#[test]
fn different_seeds_produce_different_reels() {
    let reel_for = |seed: u64| {
        let mut session =
            CaseSession::with_items(CaseConfig::default(), seed, bundled_items()).unwrap();
        session.open(0, &mut Vec::<Cue>::new()).unwrap();
        session.reveal().unwrap().reel().clone()
    };
    assert_ne!(reel_for(42), reel_for(99), "seed is not reaching the draws");
}
