//! case-runner: headless driver for the case opener.
//!
//! Usage:
//!   case-runner --seed 12345 --items learned.txt
//!   case-runner --realtime --frame-ms 16
//!   case-runner --stats 100000
//!   case-runner --ipc-mode

use anyhow::Result;
use case_opener_core::{
    command::SessionCommand,
    config::CaseConfig,
    cue::{Cue, CueKind, CueSink},
    event::RevealEvent,
    items::ItemSource,
    session::CaseSession,
    snapshot::SessionSnapshot,
    tier::{Tier, TIER_COUNT},
    types::{Item, Millis},
};
use std::env;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

const DEFAULT_ITEM_FILE: &str = "learned.txt";

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Open { now_ms: Millis },
    Tick { now_ms: Millis },
    LoadItems { items: Vec<Item> },
    Quit,
}

#[derive(serde::Serialize)]
struct IpcReply<'a> {
    events: &'a [RevealEvent],
    state:  SessionSnapshot,
}

/// Logs every cue and keeps a per-kind tally. No audio device here.
#[derive(Default)]
struct LogCues {
    counts: [u32; 4],
}

impl CueSink for LogCues {
    fn play(&mut self, cue: Cue) {
        log::debug!(
            "cue {:?}: {:.0}->{:.0} Hz, {:.2}s",
            cue.kind,
            cue.frequency_hz,
            cue.end_frequency_hz,
            cue.duration_secs
        );
        self.counts[cue.kind as usize] += 1;
    }
}

impl LogCues {
    fn count(&self, kind: CueKind) -> u32 {
        self.counts[kind as usize]
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", wall_clock_seed());
    let frame_ms = parse_arg(&args, "--frame-ms", 16u64).max(1);
    let stats = parse_arg(&args, "--stats", 0usize);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let realtime = args.iter().any(|a| a == "--realtime");

    let config = match find_arg(&args, "--config") {
        Some(path) => CaseConfig::load(path)?,
        None => CaseConfig::default(),
    };
    let source = match find_arg(&args, "--items") {
        Some(path) => ItemSource::File(path.into()),
        None => ItemSource::FileOrBundled(DEFAULT_ITEM_FILE.into()),
    };
    let items = source.load()?;

    let mut session = CaseSession::with_items(config, seed, items)?;

    if ipc_mode {
        return run_ipc_loop(&mut session);
    }

    println!("Case Opener — case-runner");
    println!("  seed:      {seed}");
    println!("  items:     {}", session.item_count());
    println!("  buckets:   {}", format_sizes(&session.buckets().sizes()));
    println!();

    if stats > 0 {
        print_stats(&mut session, stats)?;
    } else {
        open_one_case(&mut session, frame_ms, realtime)?;
    }
    Ok(())
}

fn open_one_case(session: &mut CaseSession, frame_ms: Millis, realtime: bool) -> Result<()> {
    let mut cues = LogCues::default();
    let started = Instant::now();
    let mut now: Millis = 0;
    let mut frames = 0u32;
    let mut flourishes = 0u32;

    session.open(now, &mut cues)?;
    while !session.is_idle() {
        for event in session.tick(now, &mut cues) {
            match event {
                RevealEvent::Frame(frame) => {
                    frames += 1;
                    log::trace!(
                        "frame t={}ms p={:.3} offset={:.1} cards={}",
                        frame.elapsed_ms,
                        frame.progress,
                        frame.offset,
                        frame.cards.len()
                    );
                }
                RevealEvent::Stopped { at, .. } => println!("  stopped at {at}ms"),
                RevealEvent::Flourish { index, at } => {
                    flourishes += 1;
                    println!("  *** flourish {} at {at}ms ***", index + 1);
                }
                _ => {}
            }
        }

        if realtime {
            let next = Duration::from_millis(now + frame_ms);
            if let Some(wait) = next.checked_sub(started.elapsed()) {
                std::thread::sleep(wait);
            }
            now = started.elapsed().as_millis() as Millis;
        } else {
            now += frame_ms;
        }
    }

    let Some(report) = session.last_report() else {
        anyhow::bail!("reveal finished without a report");
    };

    println!();
    println!("=== CASE OPENED ===");
    println!("  you got:    {}", report.label);
    println!("  tier:       {} ({})", report.tier_name, report.color);
    println!("  frames:     {frames}");
    println!("  spin cues:  {}", cues.count(CueKind::Spin));
    println!("  flourishes: {flourishes}");
    println!();
    println!("Time to solve it!");
    Ok(())
}

fn print_stats(session: &mut CaseSession, draws: usize) -> Result<()> {
    let mut counts = [0usize; TIER_COUNT];
    for _ in 0..draws {
        counts[session.sample()?.tier.index()] += 1;
    }

    println!("=== TIER FREQUENCIES ({draws} draws) ===");
    for tier in Tier::ALL {
        let observed = counts[tier.index()] as f64 / draws as f64 * 100.0;
        println!(
            "  {:<24} observed {:>7.3}%   configured {:>6.2}%",
            tier.name(),
            observed,
            session.tier_table().weight(tier)
        );
    }
    Ok(())
}

fn run_ipc_loop(session: &mut CaseSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();
    // IPC callers have no speakers attached; cues are dropped.
    let mut cues = case_opener_core::cue::SilentCues;

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };

        let command = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => None,
            IpcCommand::Open { now_ms } => Some(SessionCommand::Open { now_ms }),
            IpcCommand::Tick { now_ms } => Some(SessionCommand::Tick { now_ms }),
            IpcCommand::LoadItems { items } => Some(SessionCommand::LoadItems { items }),
        };

        let events = match command.map(|c| session.handle(c, &mut cues)).transpose() {
            Ok(events) => events.unwrap_or_default(),
            Err(e) => {
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };

        let reply = IpcReply { events: &events, state: session.snapshot() };
        writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn format_sizes(sizes: &[usize; TIER_COUNT]) -> String {
    Tier::ALL
        .iter()
        .map(|tier| format!("{}={}", tier.short_name(), sizes[tier.index()]))
        .collect::<Vec<_>>()
        .join(" ")
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    find_arg(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn wall_clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
