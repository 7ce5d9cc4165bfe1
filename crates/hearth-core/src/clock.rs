//! Simulation clock
//!
//! Converts raw frame deltas into a whole number of fixed control ticks.
//! Agents are only ever advanced in fixed steps so that a run is
//! reproducible regardless of how the host measures time.

use serde::{Deserialize, Serialize};

/// Configuration for the simulation clock
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Length of one control tick (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta accepted per update, to prevent a spiral of death
    pub max_delta: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 10.0,
            max_delta: 0.25,
        }
    }
}

/// Fixed-timestep simulation time tracking
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    pub config: ClockConfig,
    /// Simulated time since start in seconds
    pub total_time: f64,
    /// Number of fixed ticks handed out so far
    pub tick_count: u64,
    /// Whether the clock is paused
    pub paused: bool,
    accumulator: f32,
}

impl SimClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Length of one tick
    pub fn timestep(&self) -> f32 {
        self.config.fixed_timestep
    }

    /// Feed the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        if self.paused {
            return;
        }

        let delta = raw_delta.clamp(0.0, self.config.max_delta) * self.config.time_scale;
        self.total_time += delta as f64;
        self.accumulator += delta;
    }

    /// Number of fixed ticks to run this frame
    pub fn fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.accumulator >= self.config.fixed_timestep {
            self.accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        self.tick_count += steps as u64;
        steps
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Set the time scale (0.0 = frozen, 1.0 = normal, 2.0 = double speed)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale.max(0.0);
    }
}
