//! Ring scoring and end-of-round statistics

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{ShotRecord, Target};

/// Score for an arrow that stuck `distance` from the target center.
///
/// The radius is split into `rings` equal bands; the innermost scores
/// `rings`, the outermost 1. Anything at or beyond the radius scores 0.
pub fn score_for_distance(distance: f32, target: &Target) -> u32 {
    let band = target.band_width();
    for i in 0..target.rings {
        if distance < band * (i + 1) as f32 {
            return target.rings - i;
        }
    }
    0
}

/// Horizontal side of the center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizontal {
    Left,
    Right,
}

/// Vertical side of the center (screen space, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vertical {
    Above,
    Below,
}

/// Offset from the bullseye split into readable components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimOffset {
    pub horizontal: Horizontal,
    pub dx: f32,
    pub vertical: Vertical,
    pub dy: f32,
}

impl AimOffset {
    pub fn from_relative(rel: Vec2) -> Self {
        Self {
            horizontal: if rel.x > 0.0 { Horizontal::Right } else { Horizontal::Left },
            dx: rel.x.abs(),
            vertical: if rel.y > 0.0 { Vertical::Below } else { Vertical::Above },
            dy: rel.y.abs(),
        }
    }
}

impl fmt::Display for AimOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = match self.horizontal {
            Horizontal::Left => "left",
            Horizontal::Right => "right",
        };
        let v = match self.vertical {
            Vertical::Above => "above",
            Vertical::Below => "below",
        };
        write!(f, "{:.1} {}, {:.1} {}", self.dx, h, self.dy, v)
    }
}

/// Aggregate results for a finished (or in-progress) round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundStats {
    pub shots: usize,
    pub hits: usize,
    pub total_score: u32,
    /// Hits as a percentage of the arrows in the round
    pub accuracy: f32,
    /// Mean offset over hits; `None` when nothing hit
    pub mean_offset: Option<Vec2>,
    pub best_score: Option<u32>,
}

impl RoundStats {
    /// Which way the player's grouping drifts, if they hit anything
    pub fn bias(&self) -> Option<AimOffset> {
        self.mean_offset.map(AimOffset::from_relative)
    }

    /// One-line verdict for the results screen
    pub fn summary(&self) -> String {
        match self.bias() {
            Some(bias) => format!(
                "{} of {} hits ({:.0}%), grouping {}",
                self.hits, self.shots, self.accuracy, bias
            ),
            None => "No hits this round".to_string(),
        }
    }
}

/// Summarize a shot history. Empty or all-miss histories give 0% and no offset.
pub fn summarize_round(history: &[ShotRecord], arrows_in_round: u32) -> RoundStats {
    let mut hits: usize = 0;
    let mut total_score: u32 = 0;
    let mut offset_sum = Vec2::ZERO;
    let mut best_score: Option<u32> = None;

    for record in history {
        total_score += record.score;
        if !record.hit {
            continue;
        }
        hits += 1;
        offset_sum += record.rel.unwrap_or(Vec2::ZERO);
        best_score = Some(best_score.map_or(record.score, |b| b.max(record.score)));
    }

    let accuracy = if arrows_in_round == 0 {
        0.0
    } else {
        hits as f32 / arrows_in_round as f32 * 100.0
    };

    RoundStats {
        shots: history.len(),
        hits,
        total_score,
        accuracy,
        mean_offset: (hits > 0).then(|| offset_sum / hits as f32),
        best_score,
    }
}
