//! Read-only view of the world handed to renderers and loggers once per tick

use serde::Serialize;

use super::traffic_light::TrafficLight;
use super::types::{LightState, VehicleId};
use super::vehicle::Vehicle;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub lane: usize,
    pub position: f32,
    pub speed: f32,
    pub length: f32,
    pub red_light_ahead: bool,
}

impl From<&Vehicle> for VehicleSnapshot {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            lane: vehicle.lane,
            position: vehicle.position,
            speed: vehicle.speed,
            length: vehicle.length,
            red_light_ahead: vehicle.red_light_ahead,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightSnapshot {
    pub position: f32,
    pub state: LightState,
    pub time_remain: f32,
}

impl From<&TrafficLight> for LightSnapshot {
    fn from(light: &TrafficLight) -> Self {
        Self {
            position: light.position,
            state: light.state,
            time_remain: light.time_remain,
        }
    }
}

/// Everything an external renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub elapsed_time: f64,
    pub road_length: f32,
    pub lane_count: usize,
    pub vehicles: Vec<VehicleSnapshot>,
    pub lights: Vec<LightSnapshot>,
}

impl WorldSnapshot {
    /// Serialise as a single JSON line
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
