//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position on the playfield (pixels).
/// x grows to the right, y grows downward (screen convention).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Monotonic simulation clock in milliseconds.
    pub now_ms: f64,
    /// Capped duration of the most recent tick in milliseconds.
    pub last_dt_ms: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    /// Angle to another position in radians (atan2 of the screen-space delta).
    pub fn bearing_to(&self, other: &Position) -> f64 {
        let d = other.to_vec() - self.to_vec();
        d.y.atan2(d.x)
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self::from_vec(v)
    }
}

impl SimTime {
    /// Seconds covered by the most recent tick.
    pub fn dt_secs(&self) -> f64 {
        self.last_dt_ms / 1000.0
    }

    /// Frame multiplier relative to the 60 fps baseline, capped to bound spikes.
    pub fn time_scale(&self) -> f64 {
        (self.last_dt_ms / crate::constants::BASELINE_FRAME_MS).min(crate::constants::MAX_TIME_SCALE)
    }

    /// Advance the clock by an already-capped frame duration.
    pub fn advance(&mut self, dt_ms: f64) {
        self.tick += 1;
        self.last_dt_ms = dt_ms;
        self.now_ms += dt_ms;
    }
}
