//! Single-arrow lifecycle
//!
//! Spawned -> Aiming -> Flying -> Resolved, then the session either nocks a
//! fresh `Shot` or ends the round. Transitions that don't apply to the
//! current phase are no-ops and report `false`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::{self, FlightEvent};
use super::state::{Arrow, Bow, HitInfo, Target, Wind};
use crate::consts::*;
use crate::heading;

/// How a resolved shot ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    Hit,
    Miss,
}

/// Phase of the arrow currently in play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotPhase {
    /// Nocked on the bow, waiting for the player
    Spawned,
    /// Pointer held, power charging
    Aiming,
    /// In the air; `forced` when the countdown released it
    Flying { forced: bool },
    /// Flight over, waiting on the display delay
    Resolved(ShotOutcome),
    /// No arrows left
    RoundEnd,
}

/// One arrow from spawn to resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub phase: ShotPhase,
    pub arrow: Arrow,
    pub wind: Wind,
    /// Power gauge in [0, MAX_POWER]
    pub power: f32,
    /// Seconds left before a forced release
    pub time_left: f32,
    /// Set when the arrow scored a hit
    pub hit: Option<HitInfo>,
}

impl Shot {
    /// Nock a fresh arrow with the given wind
    pub fn spawn(bow: &Bow, wind: Wind) -> Self {
        Self {
            phase: ShotPhase::Spawned,
            arrow: Arrow::nocked(bow),
            wind,
            power: 0.0,
            time_left: SHOT_TIME_LIMIT,
            hit: None,
        }
    }

    pub fn is_aiming(&self) -> bool {
        self.phase == ShotPhase::Aiming
    }

    /// Countdown still running (arrow not yet released)
    pub fn awaiting_release(&self) -> bool {
        matches!(self.phase, ShotPhase::Spawned | ShotPhase::Aiming)
    }

    /// Spawned -> Aiming, power back to zero
    pub fn begin_aim(&mut self) -> bool {
        if self.phase != ShotPhase::Spawned {
            return false;
        }
        self.phase = ShotPhase::Aiming;
        self.power = 0.0;
        true
    }

    /// Fill the power gauge by one tick's worth
    pub fn charge(&mut self, rate: f32) {
        if self.is_aiming() {
            self.power = (self.power + rate).min(MAX_POWER);
        }
    }

    /// Run the shot clock. Returns true once it has expired before release.
    pub fn count_down(&mut self, dt: f32) -> bool {
        if !self.awaiting_release() {
            return false;
        }
        self.time_left = (self.time_left - dt).max(0.0);
        self.time_left <= 0.0
    }

    /// Fraction of the shot clock remaining, for the HUD dial
    pub fn time_fraction(&self) -> f32 {
        (self.time_left / SHOT_TIME_LIMIT).clamp(0.0, 1.0)
    }

    /// Release toward `aim_point` with the accrued power.
    ///
    /// Players can only release while aiming; a forced release also fires
    /// straight from Spawned (with zero power).
    pub fn release(&mut self, bow: &Bow, aim_point: Vec2, forced: bool) -> bool {
        let allowed = match self.phase {
            ShotPhase::Aiming => true,
            ShotPhase::Spawned => forced,
            _ => false,
        };
        if !allowed {
            return false;
        }
        let angle = heading(bow.pos, aim_point);
        self.arrow.vel = physics::launch_velocity(self.power, angle);
        self.arrow.rotation = angle;
        self.arrow.flying = true;
        self.phase = ShotPhase::Flying { forced };
        true
    }

    /// Advance the flight one tick, moving to Resolved when it ends
    pub fn fly(&mut self, target: &Target) -> Option<FlightEvent> {
        if !matches!(self.phase, ShotPhase::Flying { .. }) {
            return None;
        }
        let event = physics::advance(&mut self.arrow, self.wind, target)?;
        // Countdown releases never score, wherever they land
        let forced = self.was_forced();
        self.phase = match event {
            FlightEvent::Hit { .. } if !forced => ShotPhase::Resolved(ShotOutcome::Hit),
            _ => ShotPhase::Resolved(ShotOutcome::Miss),
        };
        Some(event)
    }

    pub fn was_forced(&self) -> bool {
        matches!(self.phase, ShotPhase::Flying { forced: true })
    }

    /// Rotation to draw the arrow with: velocity while flying, bow aim otherwise
    pub fn display_rotation(&self, bow: &Bow, pointer: Vec2) -> f32 {
        if self.arrow.flying || !self.awaiting_release() {
            self.arrow.rotation
        } else {
            bow.aim_angle(pointer)
        }
    }
}
