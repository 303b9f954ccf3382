//! Read-only view for renderers
//!
//! Everything a frame needs, flattened and serializable so a host in another
//! process (or a JS bridge) can consume it as JSON.

use glam::Vec2;
use serde::Serialize;

use super::scoring::{AimOffset, RoundStats};
use super::session::DisplayMode;
use super::shot::ShotPhase;
use super::state::{Bow, GameState, HitInfo, Screen, ShotRecord, Target, WindDirection};

#[derive(Debug, Clone, Serialize)]
pub struct ArrowView {
    pub pos: Vec2,
    pub rotation: f32,
    pub flying: bool,
    pub length: f32,
    /// Pulled back along the aim line while the bow is drawn
    pub draw_offset: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WindView {
    pub accel: f32,
    pub direction: WindDirection,
    /// 0 (calm) to 10 (strongest for the tier)
    pub gauge: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HitView {
    #[serde(flatten)]
    pub info: HitInfo,
    pub offset: AimOffset,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub screen: Screen,
    pub mode: DisplayMode,
    pub player_name: String,
    pub score: u32,
    pub arrows_remaining: u32,
    pub time_left: f32,
    pub timer_fraction: f32,
    pub target: Target,
    pub bow: Bow,
    pub aim_angle: f32,
    pub arrow: ArrowView,
    pub wind: WindView,
    /// Present only while aiming
    pub power: Option<f32>,
    pub hit: Option<HitView>,
    pub history: Vec<ShotRecord>,
    pub stats: Option<RoundStats>,
}

impl GameState {
    /// Capture everything a renderer needs for this frame
    pub fn snapshot(&self) -> Snapshot {
        let aiming = self.shot.phase == ShotPhase::Aiming;
        let power = aiming.then_some(self.shot.power);
        Snapshot {
            screen: self.screen,
            mode: self.display_mode(),
            player_name: self.player_name.clone(),
            score: self.score,
            arrows_remaining: self.arrows_remaining,
            time_left: self.shot.time_left,
            timer_fraction: self.shot.time_fraction(),
            target: self.target,
            bow: self.bow,
            aim_angle: self.bow.aim_angle(self.pointer),
            arrow: ArrowView {
                pos: self.shot.arrow.pos,
                rotation: self.shot.display_rotation(&self.bow, self.pointer),
                flying: self.shot.arrow.flying,
                length: self.shot.arrow.length,
                draw_offset: power.map_or(0.0, Bow::draw_length),
            },
            wind: WindView {
                accel: self.shot.wind.accel,
                direction: self.shot.wind.direction(),
                gauge: self.shot.wind.gauge(self.profile.wind_scale),
            },
            power,
            hit: self.shot.hit.map(|info| HitView {
                info,
                offset: AimOffset::from_relative(info.rel),
            }),
            history: self.history.clone(),
            stats: self.stats.clone(),
        }
    }
}
