//! Simulation configuration
//!
//! A plain value built once (from defaults, JSON or the command line) and
//! handed to the world at construction. Nothing in the engine reads global
//! state.

use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use std::path::Path;

/// Placement and timing of one traffic light
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrafficLightConfig {
    pub position: f32,
    pub red_duration: f32,
    pub green_duration: f32,
}

/// Everything the engine needs to build a world
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimConfig {
    /// Posted speed limit in road units per second
    pub speed_limit: f32,
    pub road_length: f32,
    pub lane_count: usize,
    #[serde(default)]
    pub traffic_lights: Vec<TrafficLightConfig>,
    /// Population the spawner tries to maintain
    #[serde(alias = "vehicle_count")]
    pub target_vehicle_count: usize,
    /// Inclusive `[min, max]` driver reaction time in seconds
    pub reaction_time_range: [f32; 2],
    /// Inclusive `[min, max]` multiplier on the speed limit per driver
    #[serde(default = "default_speed_scale_range")]
    pub speed_scale_range: [f32; 2],
    /// Ticks per simulated second
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f32,
}

fn default_speed_scale_range() -> [f32; 2] {
    [0.9, 1.2]
}

fn default_tick_rate() -> f32 {
    30.0
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            speed_limit: 40.0,
            road_length: 1200.0,
            lane_count: 3,
            traffic_lights: vec![
                TrafficLightConfig {
                    position: 400.0,
                    red_duration: 4.0,
                    green_duration: 6.0,
                },
                TrafficLightConfig {
                    position: 800.0,
                    red_duration: 5.0,
                    green_duration: 8.0,
                },
            ],
            target_vehicle_count: 24,
            reaction_time_range: [1.0, 2.5],
            speed_scale_range: default_speed_scale_range(),
            tick_rate: default_tick_rate(),
        }
    }
}

impl SimConfig {
    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid simulation config JSON")
    }

    /// Load a configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Fixed tick duration in seconds
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate
    }

    /// Check every constraint the engine relies on.
    ///
    /// A world is never built from a config that fails here, so the tick
    /// loop can assume positive durations, lengths and lane counts.
    pub fn validate(&self) -> Result<()> {
        if self.lane_count == 0 {
            anyhow::bail!("lane_count must be greater than 0");
        }
        if !(self.road_length.is_finite() && self.road_length > 0.0) {
            anyhow::bail!("road_length must be positive, got {}", self.road_length);
        }
        if !(self.speed_limit.is_finite() && self.speed_limit > 0.0) {
            anyhow::bail!("speed_limit must be positive, got {}", self.speed_limit);
        }
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            anyhow::bail!("tick_rate must be positive, got {}", self.tick_rate);
        }

        validate_range("reaction_time_range", self.reaction_time_range)?;
        validate_range("speed_scale_range", self.speed_scale_range)?;

        for (index, light) in self.traffic_lights.iter().enumerate() {
            if !(light.red_duration > 0.0 && light.green_duration > 0.0) {
                anyhow::bail!(
                    "traffic light {} needs positive red and green durations (got {} / {})",
                    index,
                    light.red_duration,
                    light.green_duration
                );
            }
            if !(light.red_duration + light.green_duration).is_finite() {
                anyhow::bail!("traffic light {} has a non-finite cycle", index);
            }
            if !(0.0..=self.road_length).contains(&light.position) {
                warn!(
                    "Traffic light {} at {} lies outside the road (length {})",
                    index, light.position, self.road_length
                );
            }
        }

        Ok(())
    }
}

fn validate_range(name: &str, [min, max]: [f32; 2]) -> Result<()> {
    if !(min.is_finite() && max.is_finite()) {
        anyhow::bail!("{} must be finite, got [{}, {}]", name, min, max);
    }
    if min < 0.0 {
        anyhow::bail!("{} must not be negative, got [{}, {}]", name, min, max);
    }
    if min > max {
        anyhow::bail!("{} is empty: min {} > max {}", name, min, max);
    }
    Ok(())
}
