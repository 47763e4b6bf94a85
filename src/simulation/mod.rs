//! Standalone traffic simulation module
//!
//! This module contains all the simulation logic: light phases, car
//! following, lane grouping and the tick orchestration. Rendering and input
//! handling live outside of it and only consume `WorldSnapshot`s.

mod config;
mod lane_partition;
mod road;
mod snapshot;
mod stats;
mod traffic_light;
mod types;
mod vehicle;
mod vehicle_factory;
mod world;

pub use config::{SimConfig, TrafficLightConfig};
pub use lane_partition::LanePartition;
pub use road::Roadway;
pub use snapshot::{LightSnapshot, VehicleSnapshot, WorldSnapshot};
pub use stats::SimulationStats;
pub use traffic_light::{LightPhase, TrafficLight};
pub use types::{
    LaneDirection, LightState, SimId, VehicleId, ACCELERATION_RANGE, ACCELERATION_REQUEST,
    LANE_END_MARGIN, MIN_INITIAL_SPEED, SPACING_JITTER_RANGE, SPACING_RANGE,
    VEHICLE_LENGTH_RANGE,
};
pub use vehicle::{FrontVehicle, Kinematics, Vehicle, VehicleUpdateResult};
pub use vehicle_factory::{generate_lane_positions, random_gap, random_kinematics, spawn_position};
pub use world::SimWorld;
