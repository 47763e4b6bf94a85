//! Static roadway geometry
//!
//! Standalone implementation of the straight multi-lane segment the
//! vehicles drive along. Only the light phases change after construction.

use ordered_float::OrderedFloat;

use super::config::SimConfig;
use super::traffic_light::TrafficLight;

/// A straight road with parallel lanes and traffic lights along it
#[derive(Debug, Clone)]
pub struct Roadway {
    length: f32,
    lane_count: usize,
    /// Sorted by position
    lights: Vec<TrafficLight>,
}

impl Roadway {
    pub fn new(length: f32, lane_count: usize, mut lights: Vec<TrafficLight>) -> Self {
        lights.sort_by_key(|light| OrderedFloat(light.position));
        Self {
            length,
            lane_count,
            lights,
        }
    }

    /// Build the roadway described by an already validated config
    pub fn from_config(config: &SimConfig) -> Self {
        let lights = config
            .traffic_lights
            .iter()
            .map(TrafficLight::from_config)
            .collect();
        Self::new(config.road_length, config.lane_count, lights)
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn contains_lane(&self, lane: usize) -> bool {
        lane < self.lane_count
    }

    pub fn lights(&self) -> &[TrafficLight] {
        &self.lights
    }

    /// Re-evaluate every light for the current simulation time
    pub fn update_traffic_lights(&mut self, elapsed: f64) {
        for light in &mut self.lights {
            light.update(elapsed);
        }
    }

    /// The nearest light strictly ahead of `position`, if any
    pub fn next_light_ahead(&self, position: f32) -> Option<&TrafficLight> {
        self.lights.iter().find(|light| light.position > position)
    }
}
