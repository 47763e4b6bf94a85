//! Traffic light phase logic
//!
//! A light never keeps transition history. Its state is recomputed from the
//! elapsed simulation time on every tick, so any two calls with the same time
//! agree no matter what happened in between.

use super::config::TrafficLightConfig;
use super::types::LightState;

/// Result of evaluating a light at a point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightPhase {
    pub state: LightState,
    pub time_remain: f32,
}

/// A fixed-cycle traffic light at a position along the road
#[derive(Debug, Clone)]
pub struct TrafficLight {
    pub position: f32,
    pub red_duration: f32,
    pub green_duration: f32,
    /// Derived from elapsed time by `update`
    pub state: LightState,
    /// Derived from elapsed time by `update`
    pub time_remain: f32,
}

impl TrafficLight {
    /// Create a light evaluated at time zero
    pub fn new(position: f32, red_duration: f32, green_duration: f32) -> Self {
        let mut light = Self {
            position,
            red_duration,
            green_duration,
            state: LightState::Red,
            time_remain: red_duration,
        };
        light.update(0.0);
        light
    }

    pub fn from_config(config: &TrafficLightConfig) -> Self {
        Self::new(config.position, config.red_duration, config.green_duration)
    }

    pub fn cycle(&self) -> f32 {
        self.red_duration + self.green_duration
    }

    /// Evaluate the light at `elapsed` seconds without touching it.
    ///
    /// The phase is reduced in `f64` so boundaries stay exact on long runs.
    ///
    /// Red for the first `red_duration` of each cycle, green for the rest.
    /// The green countdown is `green_duration - (phase mod red_duration)`,
    /// reproduced as-is.
    pub fn phase_at(&self, elapsed: f64) -> LightPhase {
        let red = f64::from(self.red_duration);
        let green = f64::from(self.green_duration);
        let phase_time = elapsed.rem_euclid(red + green);
        if phase_time < red {
            LightPhase {
                state: LightState::Red,
                time_remain: (red - phase_time) as f32,
            }
        } else {
            LightPhase {
                state: LightState::Green,
                time_remain: (green - phase_time.rem_euclid(red)) as f32,
            }
        }
    }

    /// Recompute the derived fields for the given elapsed time
    pub fn update(&mut self, elapsed: f64) {
        let phase = self.phase_at(elapsed);
        self.state = phase.state;
        self.time_remain = phase.time_remain;
    }

    pub fn is_red(&self) -> bool {
        self.state == LightState::Red
    }

    /// Whole seconds left in the phase, truncated, as shown on a countdown
    pub fn countdown_seconds(&self) -> u32 {
        self.time_remain.max(0.0) as u32
    }
}
