//! Game state and core simulation types
//!
//! Everything a round needs lives in `GameState`; there is no ambient state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::schedule::Schedule;
use super::scoring::RoundStats;
use super::shot::Shot;
use crate::consts::*;
use crate::difficulty::{DifficultyProfile, Tier};
use crate::heading;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Name entry and difficulty selection
    Home,
    /// A round is in progress
    Playing,
    /// Round finished, results shown
    End,
}

/// The archery target (immutable during a round)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    pub rings: u32,
    /// Diameter
    pub size: f32,
}

impl Target {
    pub fn new(size: f32) -> Self {
        Self {
            pos: TARGET_POS,
            rings: RING_COUNT,
            size,
        }
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Width of one scoring band
    pub fn band_width(&self) -> f32 {
        self.radius() / self.rings as f32
    }
}

/// The player's bow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bow {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Default for Bow {
    fn default() -> Self {
        Self {
            pos: BOW_POS,
            width: BOW_WIDTH,
            height: BOW_HEIGHT,
        }
    }
}

impl Bow {
    /// Bow orientation toward the pointer
    pub fn aim_angle(&self, pointer: Vec2) -> f32 {
        heading(self.pos, pointer)
    }

    /// How far the string is pulled back for a given power
    pub fn draw_length(power: f32) -> f32 {
        power / BOW_DRAW_DIVISOR
    }
}

/// An arrow entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Angle of the velocity vector (rendering only)
    pub rotation: f32,
    pub flying: bool,
    pub length: f32,
}

impl Arrow {
    /// Fresh arrow nocked on the bow
    pub fn nocked(bow: &Bow) -> Self {
        Self {
            pos: bow.pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            flying: false,
            length: ARROW_LENGTH,
        }
    }
}

/// Which way the wind indicator points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindDirection {
    Calm,
    Down,
    Up,
}

/// Per-shot wind (re-rolled at every spawn)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Wind {
    /// Acceleration added to the arrow's vertical velocity every tick
    pub accel: f32,
}

impl Wind {
    pub fn calm() -> Self {
        Self { accel: 0.0 }
    }

    /// Draw uniformly from [-scale, +scale]
    pub fn roll(rng: &mut Pcg32, scale: f32) -> Self {
        let scale = scale.abs();
        Self {
            accel: rng.random_range(-scale..=scale),
        }
    }

    pub fn direction(&self) -> WindDirection {
        if self.accel.abs() <= CALM_WIND {
            WindDirection::Calm
        } else if self.accel > 0.0 {
            WindDirection::Down
        } else {
            WindDirection::Up
        }
    }

    /// Indicator strength in [0, WIND_GAUGE_MAX] relative to the tier's range
    pub fn gauge(&self, scale: f32) -> f32 {
        if scale <= 0.0 {
            return 0.0;
        }
        (self.accel.abs() / scale * WIND_GAUGE_MAX).min(WIND_GAUGE_MAX)
    }
}

/// Where and how well an arrow struck the target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitInfo {
    pub pos: Vec2,
    pub score: u32,
    /// Offset from the target center (x right, y down)
    pub rel: Vec2,
}

/// Log entry for one completed arrow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    pub hit: bool,
    pub score: u32,
    /// Offset from target center, present only for hits
    pub rel: Option<Vec2>,
    /// Released by the countdown rather than the player
    #[serde(default)]
    pub timed_out: bool,
}

impl ShotRecord {
    pub fn hit(score: u32, rel: Vec2) -> Self {
        Self {
            hit: true,
            score,
            rel: Some(rel),
            timed_out: false,
        }
    }

    pub fn miss() -> Self {
        Self {
            hit: false,
            score: 0,
            rel: None,
            timed_out: false,
        }
    }

    pub fn timed_out() -> Self {
        Self {
            timed_out: true,
            ..Self::miss()
        }
    }
}

/// Complete game state (one session, deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Wind source
    pub(crate) rng: Pcg32,
    pub screen: Screen,
    pub player_name: String,
    pub tier: Tier,
    pub profile: DifficultyProfile,
    /// Sum of all shot scores this round
    pub score: u32,
    pub arrows_remaining: u32,
    /// Append-only for the current round
    pub history: Vec<ShotRecord>,
    pub target: Target,
    pub bow: Bow,
    /// The arrow currently in play
    pub shot: Shot,
    /// Last known pointer position (playfield space)
    pub pointer: Vec2,
    /// Deferred transitions
    pub schedule: Schedule,
    /// Final stats, computed when the round ends
    pub stats: Option<RoundStats>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set by difficulty selection so the same click can't start aiming
    pub(crate) just_started: bool,
}

impl GameState {
    /// Create a new session on the home screen
    pub fn new(seed: u64) -> Self {
        let profile = Tier::default().profile();
        let bow = Bow::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            screen: Screen::Home,
            player_name: FALLBACK_PLAYER_NAME.to_string(),
            tier: Tier::default(),
            profile,
            score: 0,
            arrows_remaining: ARROWS_PER_ROUND,
            history: Vec::with_capacity(ARROWS_PER_ROUND as usize),
            target: Target::new(profile.target_size),
            shot: Shot::spawn(&bow, Wind::calm()),
            bow,
            pointer: TARGET_POS,
            schedule: Schedule::default(),
            stats: None,
            time_ticks: 0,
            just_started: false,
        }
    }

    /// Roll the wind for the next shot
    pub(crate) fn roll_wind(&mut self) -> Wind {
        Wind::roll(&mut self.rng, self.profile.wind_scale)
    }

    /// True while the difficulty-selection click is still being swallowed
    pub fn input_guarded(&self) -> bool {
        self.just_started
    }
}
