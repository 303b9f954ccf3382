//! Bullseye entry point
//!
//! Headless demo host: plays one round with the autopilot, feeding the
//! simulation through the same fixed-step clock a real frame loop would use.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use clap::Parser;

use bullseye::sim::{GameState, InputEvent, Screen, ShotPhase, ShotPlan, plan_shot, tick};
use bullseye::{FixedStep, Settings, Tier};

#[derive(Parser, Debug)]
#[command(name = "bullseye", about = "Play a round of archery on autopilot")]
struct Args {
    /// Player name (blank uses the default label)
    #[arg(long)]
    name: Option<String>,
    /// Difficulty: easy, medium or hard (unknown values fall back to medium)
    #[arg(long)]
    tier: Option<String>,
    /// Wind RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Give up after this many frames
    #[arg(long, default_value_t = 60 * 60 * 5)]
    max_frames: u32,
    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

/// Where the autopilot is in the current shot
enum Pilot {
    Waiting,
    /// Pointer down, counting charged ticks
    Holding { plan: ShotPlan, ticks: u32 },
    /// No reachable shot: leave it to the shot clock
    Idle,
}

fn main() -> Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args = Args::parse();
    let mut settings = match &args.config {
        Some(path) => {
            let (settings, warning) = Settings::load_or_default(path);
            if let Some(warning) = warning {
                log::warn!("{}, using defaults", warning);
            }
            settings
        }
        None => Settings::default(),
    };
    for warning in settings.validate() {
        log::warn!("{}", warning);
    }
    if let Some(name) = args.name {
        settings.player_name = name;
    }
    let tier = match &args.tier {
        Some(t) => Tier::parse_or_default(t),
        None => settings.tier,
    };
    let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);

    log::info!("Bullseye starting (seed {})", seed);
    let mut state = GameState::new(seed);
    state.handle(InputEvent::SelectDifficulty {
        player_name: settings.player_name.clone(),
        tier,
    });

    let mut clock = FixedStep::new(settings.tick_interval(), settings.max_substeps);
    let frame_dt = settings.tick_interval();
    let mut pilot = Pilot::Waiting;

    for _ in 0..args.max_frames {
        if state.screen == Screen::End {
            break;
        }

        for _ in 0..clock.steps(frame_dt) {
            pilot = drive(&mut state, pilot);
            tick(&mut state, clock.step);
        }
    }

    if state.screen != Screen::End {
        bail!("round did not finish within {} frames", args.max_frames);
    }

    let stats = state.stats.clone().context("round ended without stats")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    } else {
        println!("{} ({}): {} points", state.player_name, state.tier.as_str(), state.score);
        for (i, shot) in state.history.iter().enumerate() {
            let result = match (shot.hit, shot.timed_out) {
                (true, _) => format!("{} points", shot.score),
                (false, true) => "timed out".to_string(),
                (false, false) => "miss".to_string(),
            };
            println!("  arrow {:>2}: {}", i + 1, result);
        }
        println!("{}", stats.summary());
    }
    Ok(())
}

/// Feed pointer input for the next tick
fn drive(state: &mut GameState, pilot: Pilot) -> Pilot {
    match pilot {
        Pilot::Waiting => {
            if state.shot.phase != ShotPhase::Spawned || state.input_guarded() {
                return Pilot::Waiting;
            }
            match plan_shot(state) {
                Some(plan) => {
                    state.handle(InputEvent::PointerMoved(plan.aim));
                    state.handle(InputEvent::PointerDown(plan.aim));
                    Pilot::Holding { plan, ticks: 0 }
                }
                None => {
                    log::warn!("Autopilot found no shot, waiting for the clock");
                    Pilot::Idle
                }
            }
        }
        Pilot::Holding { plan, ticks } => {
            let ticks = ticks + 1;
            if ticks >= plan.hold_ticks {
                state.handle(InputEvent::PointerUp(plan.aim));
                Pilot::Waiting
            } else {
                Pilot::Holding { plan, ticks }
            }
        }
        Pilot::Idle if state.shot.phase == ShotPhase::Spawned => Pilot::Idle,
        Pilot::Idle => Pilot::Waiting,
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}
