//! Bullseye - An archery target game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (arrow physics, scoring, shot lifecycle, session)
//! - `difficulty`: Tier presets (target size, wind, power charge rate)
//! - `settings`: Run configuration loaded from JSON
//! - `clock`: Fixed-step accumulator for hosts driven by variable frame deltas

pub mod clock;
pub mod difficulty;
pub mod settings;
pub mod sim;

pub use clock::FixedStep;
pub use difficulty::{DifficultyProfile, Tier};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Simulation rate; physics constants are per tick at this rate
    pub const TICKS_PER_SECOND: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Arrows below this line have hit the ground
    pub const GROUND_Y: f32 = PLAYFIELD_HEIGHT - 100.0;

    /// Downward acceleration (units/tick²)
    pub const GRAVITY: f32 = 0.15;

    /// Bow defaults
    pub const BOW_POS: Vec2 = Vec2::new(100.0, PLAYFIELD_HEIGHT - 200.0);
    pub const BOW_WIDTH: f32 = 20.0;
    pub const BOW_HEIGHT: f32 = 120.0;
    /// String pull per unit of power (rendering only)
    pub const BOW_DRAW_DIVISOR: f32 = 2.5;

    /// Target defaults
    pub const TARGET_POS: Vec2 = Vec2::new(PLAYFIELD_WIDTH - 150.0, PLAYFIELD_HEIGHT - 200.0);
    pub const RING_COUNT: u32 = 10;
    /// Arrow must be past target.x minus this to register a hit
    pub const TARGET_FRONT_MARGIN: f32 = 20.0;

    /// Arrow sprite length
    pub const ARROW_LENGTH: f32 = 60.0;
    pub const ARROWS_PER_ROUND: u32 = 10;

    /// Power gauge
    pub const MAX_POWER: f32 = 100.0;
    /// Launch speed = power / this
    pub const POWER_PER_SPEED: f32 = 6.0;

    /// Seconds allowed per shot before a forced release
    pub const SHOT_TIME_LIMIT: f32 = 10.0;
    /// Seconds the hit replay stays up
    pub const HIT_DISPLAY_DELAY: f32 = 2.5;
    /// Seconds before the next arrow after a miss
    pub const MISS_DISPLAY_DELAY: f32 = 1.5;

    /// Wind below this magnitude is shown as calm
    pub const CALM_WIND: f32 = 0.001;
    /// Full-scale value of the wind indicator
    pub const WIND_GAUGE_MAX: f32 = 10.0;

    pub const FALLBACK_PLAYER_NAME: &str = "Archer";
}

/// Angle (radians) of the direction from `from` toward `to`
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_axes() {
        assert_eq!(heading(Vec2::ZERO, Vec2::new(5.0, 0.0)), 0.0);
        let down = heading(Vec2::ZERO, Vec2::new(0.0, 3.0));
        assert!((down - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        // Degenerate pointer on top of the bow aims flat
        assert_eq!(heading(Vec2::ONE, Vec2::ONE), 0.0);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let v = polar_to_cartesian(10.0, 0.0);
        assert_eq!(v, Vec2::new(10.0, 0.0));
    }
}
