//! Deferred transitions
//!
//! Delays like the hit replay are deadlines on the simulation clock, checked
//! every tick. Nothing sleeps and nothing depends on wall time.

use serde::{Deserialize, Serialize};

/// Transitions that fire after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferred {
    /// Nock the next arrow, or end the round if none are left
    NextArrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pending {
    pub due: f64,
    pub event: Deferred,
}

/// Simulation clock plus deadline queue
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Seconds elapsed; f64 keeps 1/60 s steps exact enough over long sessions
    now: f64,
    /// Kept sorted by deadline, insertion order among equal deadlines
    pending: Vec<Pending>,
}

impl Schedule {
    /// Seconds of simulation time elapsed
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Queue `event` to fire `delay` seconds from now
    pub fn after(&mut self, delay: f32, event: Deferred) {
        let due = self.now + f64::from(delay.max(0.0));
        let idx = self.pending.partition_point(|p| p.due <= due);
        self.pending.insert(idx, Pending { due, event });
    }

    /// Move the clock forward
    pub fn advance(&mut self, dt: f32) {
        self.now += f64::from(dt);
    }

    /// Remove and return everything now due, earliest first
    pub fn take_due(&mut self) -> Vec<Deferred> {
        let due = self.pending.partition_point(|p| p.due <= self.now);
        self.pending.drain(..due).map(|p| p.event).collect()
    }

    /// Seconds until the next deadline, if anything is queued
    pub fn time_until_next(&self) -> Option<f32> {
        self.pending
            .first()
            .map(|p| (p.due - self.now).max(0.0) as f32)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Empty the queue and rewind the clock to zero
    pub fn reset(&mut self) {
        self.pending.clear();
        self.now = 0.0;
    }
}
