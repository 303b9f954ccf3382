//! Session controller: screens, round bookkeeping and input routing

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::FlightEvent;
use super::schedule::Deferred;
use super::scoring::{score_for_distance, summarize_round};
use super::shot::{Shot, ShotOutcome, ShotPhase};
use super::state::{GameState, HitInfo, Screen, ShotRecord, Target};
use crate::consts::*;
use crate::difficulty::Tier;

/// External input, in the order the host received it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    SelectDifficulty { player_name: String, tier: Tier },
    PointerDown(Vec2),
    PointerUp(Vec2),
    PointerMoved(Vec2),
}

/// The screen tags a renderer switches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    Home,
    /// Arrow on the bow (idle or aiming)
    Playing,
    /// Arrow in the air, or a miss settling
    Fired,
    /// Hit replay
    ShowHit,
    End,
}

impl GameState {
    /// Dispatch one input event
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::SelectDifficulty { player_name, tier } => {
                self.select_difficulty(&player_name, tier)
            }
            InputEvent::PointerDown(pos) => self.pointer_down(pos),
            InputEvent::PointerUp(pos) => self.pointer_up(pos),
            InputEvent::PointerMoved(pos) => self.pointer_moved(pos),
        }
    }

    /// Start a fresh round
    pub fn select_difficulty(&mut self, player_name: &str, tier: Tier) {
        let name = player_name.trim();
        self.player_name = if name.is_empty() {
            FALLBACK_PLAYER_NAME.to_string()
        } else {
            name.to_string()
        };
        self.tier = tier;
        self.profile = tier.profile();

        self.score = 0;
        self.arrows_remaining = ARROWS_PER_ROUND;
        self.history.clear();
        self.stats = None;
        self.schedule.reset();

        self.target = Target::new(self.profile.target_size);
        self.bow = Default::default();
        let wind = self.roll_wind();
        self.shot = Shot::spawn(&self.bow, wind);

        self.screen = Screen::Playing;
        self.just_started = true;
        log::info!(
            "Round started: {} on {} (target {}, wind {:+.3})",
            self.player_name,
            tier.as_str(),
            self.profile.target_size,
            wind.accel
        );
    }

    /// Difficulty selection from an untrusted tier name (unknown → medium)
    pub fn select_difficulty_by_name(&mut self, player_name: &str, tier: &str) {
        self.select_difficulty(player_name, Tier::parse_or_default(tier));
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.pointer = pos;
        if self.just_started {
            log::trace!("Ignoring pointer down from difficulty selection");
            return;
        }
        match self.screen {
            Screen::Playing => {
                if self.arrows_remaining == 0 || !self.shot.begin_aim() {
                    log::trace!("Pointer down ignored in {:?}", self.shot.phase);
                }
            }
            Screen::End => {
                log::debug!("Returning to home screen");
                self.screen = Screen::Home;
            }
            Screen::Home => {}
        }
    }

    pub fn pointer_up(&mut self, pos: Vec2) {
        self.pointer = pos;
        if self.just_started {
            self.just_started = false;
            return;
        }
        if self.screen == Screen::Playing && self.shot.is_aiming() {
            self.fire(false);
        }
    }

    /// Release the current arrow toward the pointer
    pub(crate) fn fire(&mut self, forced: bool) {
        if self.arrows_remaining == 0 {
            return;
        }
        let power = self.shot.power;
        if self.shot.release(&self.bow, self.pointer, forced) {
            self.arrows_remaining -= 1;
            log::debug!(
                "Arrow released (power {:.1}, forced {}, {} left)",
                power,
                forced,
                self.arrows_remaining
            );
        }
    }

    /// Book a finished flight and schedule the next arrow
    pub(crate) fn resolve(&mut self, event: FlightEvent) {
        let delay = match (self.shot.phase, event) {
            (ShotPhase::Resolved(ShotOutcome::Hit), FlightEvent::Hit { distance, pos }) => {
                let points = score_for_distance(distance, &self.target);
                let rel = pos - self.target.pos;
                self.score += points;
                self.history.push(ShotRecord::hit(points, rel));
                self.shot.hit = Some(HitInfo { pos, score: points, rel });
                log::debug!("Hit for {} (distance {:.1})", points, distance);
                HIT_DISPLAY_DELAY
            }
            _ => {
                let record = if self.timed_out() {
                    ShotRecord::timed_out()
                } else {
                    ShotRecord::miss()
                };
                self.history.push(record);
                log::debug!("Miss ({})", if record.timed_out { "timed out" } else { "out of bounds" });
                MISS_DISPLAY_DELAY
            }
        };
        self.schedule.after(delay, Deferred::NextArrow);
    }

    /// The countdown, not the player, released the current arrow
    fn timed_out(&self) -> bool {
        self.shot.time_left <= 0.0
    }

    /// Nock the next arrow, or close out the round
    pub(crate) fn next_arrow(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }
        if self.arrows_remaining > 0 {
            let wind = self.roll_wind();
            self.shot = Shot::spawn(&self.bow, wind);
            log::debug!("Next arrow, wind {:+.3}", wind.accel);
        } else {
            self.shot.phase = ShotPhase::RoundEnd;
            let stats = summarize_round(&self.history, ARROWS_PER_ROUND);
            log::info!(
                "Round over for {}: score {}, {}",
                self.player_name,
                self.score,
                stats.summary()
            );
            self.stats = Some(stats);
            self.screen = Screen::End;
        }
    }

    /// Screen tag for renderers
    pub fn display_mode(&self) -> DisplayMode {
        match self.screen {
            Screen::Home => DisplayMode::Home,
            Screen::End => DisplayMode::End,
            Screen::Playing => match self.shot.phase {
                ShotPhase::Spawned | ShotPhase::Aiming => DisplayMode::Playing,
                ShotPhase::Resolved(ShotOutcome::Hit) => DisplayMode::ShowHit,
                ShotPhase::Flying { .. } | ShotPhase::Resolved(ShotOutcome::Miss) => {
                    DisplayMode::Fired
                }
                ShotPhase::RoundEnd => DisplayMode::End,
            },
        }
    }

    /// Arrows still to shoot plus the shots booked must always cover the round
    pub fn round_consistent(&self) -> bool {
        let booked: u32 = self.history.iter().map(|r| r.score).sum();
        let released = ARROWS_PER_ROUND - self.arrows_remaining;
        let in_flight = u32::from(matches!(self.shot.phase, ShotPhase::Flying { .. }));
        booked == self.score && released as usize == self.history.len() + in_flight as usize
    }
}
