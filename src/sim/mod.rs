//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Physics advances one step per tick
//! - Seeded RNG only (wind)
//! - Delays are deadlines on the simulation clock, never wall time
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod physics;
pub mod schedule;
pub mod scoring;
pub mod session;
pub mod shot;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use autopilot::{ShotPlan, plan_shot};
pub use physics::{FlightEvent, advance};
pub use schedule::{Deferred, Schedule};
pub use scoring::{AimOffset, RoundStats, score_for_distance, summarize_round};
pub use session::{DisplayMode, InputEvent};
pub use shot::{Shot, ShotOutcome, ShotPhase};
pub use snapshot::Snapshot;
pub use state::{
    Arrow, Bow, GameState, HitInfo, Screen, ShotRecord, Target, Wind, WindDirection,
};
pub use tick::tick;
