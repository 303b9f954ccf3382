//! Arrow ballistics
//!
//! One explicit Euler step per tick: gravity and wind both act on the
//! vertical velocity, then position moves by velocity. No substepping; the
//! host keeps the tick rate fixed.

use glam::Vec2;

use super::state::{Arrow, Target, Wind};
use crate::consts::*;

/// How a flight ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightEvent {
    /// Arrow stuck in the target
    Hit { distance: f32, pos: Vec2 },
    /// Arrow hit the ground or left the playfield
    OutOfBounds { pos: Vec2 },
}

/// Advance a flying arrow by one tick.
///
/// Returns a terminal event when the flight ends (the arrow's `flying` flag
/// is cleared). Arrows that aren't flying are left untouched.
pub fn advance(arrow: &mut Arrow, wind: Wind, target: &Target) -> Option<FlightEvent> {
    if !arrow.flying {
        return None;
    }

    arrow.vel.y += GRAVITY + wind.accel;
    arrow.pos += arrow.vel;
    arrow.rotation = arrow.vel.y.atan2(arrow.vel.x);

    // Hit needs both the radius test and being past the target's front plane
    let distance = arrow.pos.distance(target.pos);
    if distance < target.radius() && arrow.pos.x > target.pos.x - TARGET_FRONT_MARGIN {
        arrow.flying = false;
        return Some(FlightEvent::Hit {
            distance,
            pos: arrow.pos,
        });
    }

    if out_of_bounds(arrow.pos) {
        arrow.flying = false;
        return Some(FlightEvent::OutOfBounds { pos: arrow.pos });
    }

    None
}

/// Below the ground line or off either side of the playfield
pub fn out_of_bounds(pos: Vec2) -> bool {
    pos.y > GROUND_Y || pos.x > PLAYFIELD_WIDTH || pos.x < 0.0
}

/// Launch velocity for a release at `power` toward `angle`
pub fn launch_velocity(power: f32, angle: f32) -> Vec2 {
    crate::polar_to_cartesian(power / POWER_PER_SPEED, angle)
}

/// Run a flight to completion. Returns the terminal event and ticks taken,
/// or `None` if it didn't end within `max_ticks`.
pub fn simulate(arrow: &mut Arrow, wind: Wind, target: &Target, max_ticks: u32) -> Option<(FlightEvent, u32)> {
    for ticks in 1..=max_ticks {
        if let Some(event) = advance(arrow, wind, target) {
            return Some((event, ticks));
        }
    }
    None
}
