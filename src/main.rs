//! Space Shooter headless runner
//!
//! Plays the simulation with the autopilot, checks that a replay with the
//! same seed ends in the same state, and prints the final frame as JSON.
//!
//! Usage: space-shooter [settings.json] [--ticks N] [--seed S]

use std::process::ExitCode;

use space_shooter::sim::{Arena, GameState, TickOutcome, seeded, tick};
use space_shooter::{Autopilot, Frame, Settings};

const DEFAULT_TICKS: u64 = 3600;
const PROGRESS_INTERVAL: u64 = 600;

#[derive(Debug, Default)]
struct Args {
    settings: Option<String>,
    ticks: Option<u64>,
    seed: Option<u64>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--ticks" => parsed.ticks = Some(parse_number(&arg, args.next())?),
                "--seed" => parsed.seed = Some(parse_number(&arg, args.next())?),
                flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}")),
                _ if parsed.settings.is_none() => parsed.settings = Some(arg),
                _ => return Err(format!("unexpected argument {arg}")),
            }
        }
        Ok(parsed)
    }
}

fn parse_number(flag: &str, value: Option<String>) -> Result<u64, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|e| format!("bad value {value:?} for {flag}: {e}"))
}

/// Totals across every game played in a run
#[derive(Debug, Default, PartialEq)]
struct RunStats {
    games_over: u32,
    best_score: Option<i64>,
}

fn run(arena: Arena, seed: u64, ticks: u64, verbose: bool) -> (GameState, RunStats) {
    let mut state = GameState::new(arena);
    let mut rng = seeded(seed);
    let mut pilot = Autopilot::default();
    let mut stats = RunStats::default();

    for t in 0..ticks {
        let input = pilot.next_input(&state);
        let result = tick(&mut state, &input, &mut rng);

        match result.outcome {
            TickOutcome::PlayerHit => {
                stats.games_over += 1;
                let score = state.score();
                stats.best_score = Some(stats.best_score.map_or(score, |best| best.max(score)));
                if verbose {
                    log::info!("Game {} over at tick {}: score {}", stats.games_over, t, score);
                }
            }
            TickOutcome::Restarted if verbose => log::info!("Restarted at tick {}", t),
            _ => {}
        }

        if verbose && t > 0 && t % PROGRESS_INTERVAL == 0 {
            log::info!(
                "Tick {}: {} enemies, {} player lasers, {} enemy lasers, destroyed {}, escaped {}",
                t,
                state.enemies.len(),
                state.player_lasers.len(),
                state.enemy_lasers.len(),
                state.enemies_destroyed,
                state.enemies_escaped
            );
        }
    }

    (state, stats)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Space Shooter (headless) starting...");

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: space-shooter [settings.json] [--ticks N] [--seed S]");
            return ExitCode::from(2);
        }
    };

    let settings = match &args.settings {
        Some(path) => Settings::load(path).unwrap_or_else(|e| {
            log::warn!("{e}; using default settings");
            Settings::default()
        }),
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };

    let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);
    let ticks = args.ticks.unwrap_or(DEFAULT_TICKS);
    let arena = settings.arena();
    log::info!("Running {} ticks with seed {}", ticks, seed);

    let (state, stats) = run(arena, seed, ticks, true);
    log::info!(
        "Run finished: {} games over, best score {:?}",
        stats.games_over,
        stats.best_score
    );

    let (replay, replay_stats) = run(arena, seed, ticks, false);
    if replay != state || replay_stats != stats {
        log::error!("Determinism failure: replay with seed {} diverged", seed);
        return ExitCode::FAILURE;
    }
    log::info!("Replay matched");

    match serde_json::to_string_pretty(&Frame::capture(&state)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to encode final frame: {e}");
            ExitCode::FAILURE
        }
    }
}
