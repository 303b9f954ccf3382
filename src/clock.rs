//! Fixed timestep accumulator
//!
//! Hosts deliver variable frame deltas; the simulation advances in whole
//! ticks of `step` seconds so per-tick physics stays frame-rate independent.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame delta we accept (tab switches, debugger pauses)
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedStep {
    /// Seconds per simulation tick
    pub step: f32,
    /// Ticks allowed per frame before dropping time
    pub max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    /// Accumulate a frame delta and return how many ticks to run now
    pub fn steps(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        // Spiral of death: drop whatever we couldn't catch up on
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        substeps
    }

    /// Leftover fraction of a tick, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_steps() {
        let mut clock = FixedStep::new(0.25, 8);
        assert_eq!(clock.steps(0.1), 0);
        assert_eq!(clock.steps(0.1), 0);
        assert_eq!(clock.steps(0.1), 1);
        assert!((clock.alpha() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_substeps_capped() {
        let mut clock = FixedStep::new(0.01, 3);
        // 0.1 s would be 10 ticks, only 3 allowed
        assert_eq!(clock.steps(0.1), 3);
        assert!(clock.alpha() <= 1.0);
    }

    #[test]
    fn test_ignores_bad_deltas() {
        let mut clock = FixedStep::default();
        assert_eq!(clock.steps(0.0), 0);
        assert_eq!(clock.steps(-1.0), 0);
        assert_eq!(clock.steps(f32::NAN), 0);
    }
}
