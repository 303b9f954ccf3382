//! Simulation tick
//!
//! Advances timers, the power gauge, arrow flight and deferred transitions.
//! Physics steps once per call; `dt` (seconds) only drives the clocks.

use super::schedule::Deferred;
use super::state::{GameState, Screen};

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, dt: f32) {
    if !dt.is_finite() || dt <= 0.0 {
        log::trace!("Ignoring tick with dt {}", dt);
        return;
    }

    state.time_ticks += 1;
    // The selecting click only needs swallowing until the first tick
    state.just_started = false;

    if state.screen != Screen::Playing {
        return;
    }
    state.schedule.advance(dt);

    state.shot.charge(state.profile.power_charge_rate);

    // Out of time: release with whatever power has built up
    if state.shot.count_down(dt) {
        log::debug!("Shot clock expired");
        state.fire(true);
    }

    if let Some(event) = state.shot.fly(&state.target) {
        state.resolve(event);
    }

    // Deferred transitions last, so a fresh arrow starts its clock next tick
    for event in state.schedule.take_due() {
        match event {
            Deferred::NextArrow => state.next_arrow(),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::*;
    use crate::difficulty::Tier;
    use crate::heading;
    use crate::sim::physics;
    use crate::sim::session::DisplayMode;
    use crate::sim::shot::{ShotOutcome, ShotPhase};
    use crate::sim::state::Arrow;

    /// Exactly representable step so delays land on whole ticks
    const DT: f32 = 0.5;

    fn started(tier: Tier) -> GameState {
        let mut state = GameState::new(12345);
        state.select_difficulty("Robin", tier);
        tick(&mut state, DT);
        state
    }

    fn tick_until(state: &mut GameState, max: u32, done: impl Fn(&GameState) -> bool) -> bool {
        for _ in 0..max {
            if done(state) {
                return true;
            }
            tick(state, DT);
        }
        done(state)
    }

    /// Straight down at the ground with zero power
    fn shoot_into_ground(state: &mut GameState) {
        let below = state.bow.pos + Vec2::new(0.0, 50.0);
        state.pointer_down(below);
        state.pointer_up(below);
        assert!(matches!(state.shot.phase, ShotPhase::Flying { forced: false }));
    }

    #[test]
    fn test_tick_home_is_inert() {
        let mut state = GameState::new(1);
        tick(&mut state, DT);
        assert_eq!(state.screen, Screen::Home);
        assert_eq!(state.display_mode(), DisplayMode::Home);
        state.pointer_down(Vec2::new(300.0, 300.0));
        assert_eq!(state.screen, Screen::Home);
    }

    #[test]
    fn test_select_difficulty_resets_round() {
        let mut state = GameState::new(1);
        state.select_difficulty("   ", Tier::Hard);
        assert_eq!(state.player_name, FALLBACK_PLAYER_NAME);
        assert_eq!(state.screen, Screen::Playing);
        assert_eq!(state.target.size, 160.0);
        assert_eq!(state.arrows_remaining, ARROWS_PER_ROUND);
        assert!(state.shot.wind.accel.abs() <= 0.08);

        state.select_difficulty_by_name("Tell", "legendary");
        assert_eq!(state.tier, Tier::Medium);
        assert_eq!(state.player_name, "Tell");
    }

    #[test]
    fn test_selection_click_is_swallowed() {
        let mut state = GameState::new(1);
        state.select_difficulty("Robin", Tier::Easy);
        assert!(state.input_guarded());
        state.pointer_down(Vec2::new(400.0, 300.0));
        assert_eq!(state.shot.phase, ShotPhase::Spawned);
        state.pointer_up(Vec2::new(400.0, 300.0));
        assert!(!state.input_guarded());
        assert_eq!(state.arrows_remaining, ARROWS_PER_ROUND);

        state.pointer_down(Vec2::new(400.0, 300.0));
        assert_eq!(state.shot.phase, ShotPhase::Aiming);
    }

    #[test]
    fn test_power_charges_per_tick() {
        let mut state = started(Tier::Medium);
        state.pointer_down(TARGET_POS);
        for _ in 0..10 {
            tick(&mut state, 0.01);
        }
        assert!((state.shot.power - 15.0).abs() < 1e-4);
        for _ in 0..100 {
            tick(&mut state, 0.01);
        }
        assert_eq!(state.shot.power, MAX_POWER);
        assert_eq!(state.display_mode(), DisplayMode::Playing);
    }

    #[test]
    fn test_pointer_up_without_aim_is_ignored() {
        let mut state = started(Tier::Medium);
        state.pointer_up(TARGET_POS);
        assert_eq!(state.shot.phase, ShotPhase::Spawned);
        assert_eq!(state.arrows_remaining, ARROWS_PER_ROUND);
    }

    #[test]
    fn test_miss_then_next_arrow() {
        let mut state = started(Tier::Medium);
        shoot_into_ground(&mut state);
        assert_eq!(state.arrows_remaining, ARROWS_PER_ROUND - 1);
        assert_eq!(state.display_mode(), DisplayMode::Fired);

        // Physics is per tick, so one tick at a time until it lands
        assert!(tick_until(&mut state, 100, |s| s.history.len() == 1));
        assert_eq!(state.shot.phase, ShotPhase::Resolved(ShotOutcome::Miss));
        assert_eq!(state.history[0], crate::sim::ShotRecord::miss());
        assert!(state.round_consistent());

        // 1.5 s miss pause = 3 ticks of 0.5 s
        tick(&mut state, DT);
        tick(&mut state, DT);
        assert_eq!(state.shot.phase, ShotPhase::Resolved(ShotOutcome::Miss));
        tick(&mut state, DT);
        assert_eq!(state.shot.phase, ShotPhase::Spawned);
        assert_eq!(state.shot.power, 0.0);
        assert!(state.shot.hit.is_none());
        assert_eq!(state.shot.time_left, SHOT_TIME_LIMIT);
    }

    #[test]
    fn test_hit_books_score_and_replays() {
        let mut state = started(Tier::Easy);
        state.pointer_down(TARGET_POS);
        state.pointer_up(TARGET_POS);
        // Drop the arrow just in front of the bullseye
        state.shot.arrow.pos = state.target.pos - Vec2::new(5.0, 0.15);
        state.shot.arrow.vel = Vec2::new(5.0, 0.0);
        state.shot.wind.accel = 0.0;
        tick(&mut state, DT);

        assert_eq!(state.display_mode(), DisplayMode::ShowHit);
        assert_eq!(state.score, 10);
        let hit = state.shot.hit.expect("hit info");
        assert_eq!(hit.score, 10);
        assert!(state.history[0].hit);
        assert!(state.round_consistent());

        // 2.5 s replay = 5 ticks
        for _ in 0..4 {
            tick(&mut state, DT);
        }
        assert_eq!(state.display_mode(), DisplayMode::ShowHit);
        tick(&mut state, DT);
        assert_eq!(state.shot.phase, ShotPhase::Spawned);
        assert!(state.shot.hit.is_none());
    }

    #[test]
    fn test_timeout_forces_release_once() {
        let mut state = started(Tier::Medium);
        state.pointer_moved(state.bow.pos + Vec2::new(0.0, 50.0));
        // Never touch the pointer: the clock runs out after 10 s
        assert!(tick_until(&mut state, 40, |s| !s.shot.awaiting_release()));
        assert_eq!(state.arrows_remaining, ARROWS_PER_ROUND - 1);
        assert!(matches!(state.shot.phase, ShotPhase::Flying { forced: true } | ShotPhase::Resolved(_)));

        assert!(tick_until(&mut state, 200, |s| !s.history.is_empty()));
        assert_eq!(state.history.len(), 1);
        assert!(state.history[0].timed_out);
        assert_eq!(state.history[0].score, 0);

        // Settles into exactly one record before the next arrow
        assert!(tick_until(&mut state, 10, |s| s.shot.phase == ShotPhase::Spawned));
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_timeout_while_holding_uses_accrued_power() {
        let mut state = started(Tier::Medium);
        let aim = state.bow.pos + Vec2::new(100.0, -30.0);
        state.pointer_down(aim);
        assert_eq!(state.shot.phase, ShotPhase::Aiming);

        // Hold until the last tick on the clock
        assert!(tick_until(&mut state, 40, |s| s.shot.time_left <= DT));
        assert!(state.shot.is_aiming());
        let power = (state.shot.power + state.profile.power_charge_rate).min(MAX_POWER);
        assert!(power > 0.0);

        tick(&mut state, DT);
        assert_eq!(state.shot.phase, ShotPhase::Flying { forced: true });
        assert_eq!(state.arrows_remaining, ARROWS_PER_ROUND - 1);

        // Same tick also takes the first flight step
        let mut expected = Arrow::nocked(&state.bow);
        expected.vel = physics::launch_velocity(power, heading(state.bow.pos, aim));
        expected.flying = true;
        assert!(physics::advance(&mut expected, state.shot.wind, &state.target).is_none());
        assert_eq!(state.shot.arrow.vel, expected.vel);
        assert_eq!(state.shot.arrow.pos, expected.pos);

        // Letting go afterwards changes nothing
        state.pointer_up(aim);
        assert_eq!(state.arrows_remaining, ARROWS_PER_ROUND - 1);
        assert!(state.history.is_empty());

        assert!(tick_until(&mut state, 400, |s| !s.history.is_empty()));
        assert_eq!(state.history.len(), 1);
        assert!(state.history[0].timed_out);
        assert_eq!(state.history[0].score, 0);
        assert!(tick_until(&mut state, 10, |s| s.shot.phase == ShotPhase::Spawned));
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.arrows_remaining, ARROWS_PER_ROUND - 1);
    }

    #[test]
    fn test_next_arrow_arrives_after_long_session() {
        let mut state = started(Tier::Medium);
        state.schedule.advance(600_000.0);
        shoot_into_ground(&mut state);

        let mut ticks = 0;
        while state.shot.phase != ShotPhase::Spawned && ticks < 10_000 {
            tick(&mut state, SIM_DT);
            ticks += 1;
        }
        assert_eq!(state.shot.phase, ShotPhase::Spawned);
        assert_eq!(state.history.len(), 1);
        assert!(state.schedule.now() > 600_000.0);
    }

    #[test]
    fn test_new_round_rewinds_schedule_clock() {
        let mut state = started(Tier::Easy);
        state.schedule.advance(600_000.0);
        state.select_difficulty("Robin", Tier::Hard);
        assert_eq!(state.schedule.now(), 0.0);
        assert!(state.schedule.is_empty());
    }

    #[test]
    fn test_round_closes_after_ten() {
        let mut state = started(Tier::Hard);
        for shot in 0..ARROWS_PER_ROUND {
            assert_eq!(state.shot.phase, ShotPhase::Spawned, "shot {}", shot);
            shoot_into_ground(&mut state);
            assert!(tick_until(&mut state, 200, |s| {
                s.shot.phase == ShotPhase::Spawned || s.screen == Screen::End
            }));
            assert!(state.round_consistent());
        }

        assert_eq!(state.screen, Screen::End);
        assert_eq!(state.shot.phase, ShotPhase::RoundEnd);
        assert_eq!(state.history.len(), ARROWS_PER_ROUND as usize);
        assert_eq!(state.arrows_remaining, 0);
        let stats = state.stats.clone().expect("stats at round end");
        assert_eq!(stats.accuracy, 0.0);
        assert_eq!(stats.total_score, 0);
        assert!(stats.mean_offset.is_none());
        assert_eq!(stats.summary(), "No hits this round");

        // Inert at End until the player clicks back home
        tick(&mut state, DT);
        state.pointer_up(Vec2::ZERO);
        assert_eq!(state.screen, Screen::End);
        state.pointer_down(Vec2::ZERO);
        assert_eq!(state.screen, Screen::Home);
    }

    #[test]
    fn test_bad_dt_ignored() {
        let mut state = started(Tier::Medium);
        let ticks = state.time_ticks;
        tick(&mut state, 0.0);
        tick(&mut state, -1.0);
        tick(&mut state, f32::INFINITY);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let run = || {
            let mut state = GameState::new(99999);
            state.select_difficulty("Robin", Tier::Hard);
            let mut winds = Vec::new();
            for _ in 0..3 {
                tick(&mut state, DT);
                winds.push(state.shot.wind.accel);
                shoot_into_ground(&mut state);
                tick_until(&mut state, 200, |s| s.shot.phase == ShotPhase::Spawned);
            }
            (winds, state.time_ticks, state.shot.arrow)
        };
        assert_eq!(run(), run());
    }
}
