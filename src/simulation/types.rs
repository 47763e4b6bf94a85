//! Core types for the traffic simulation
//!
//! Identifiers, enums and tuning constants shared by the engine modules.

use serde::Serialize;

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SimId(pub usize);

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VehicleId(pub SimId);

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0 .0)
    }
}

/// Phase of a traffic light. There is no amber phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LightState {
    Red,
    Green,
}

/// Direction for the optional lane-change manoeuvre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneDirection {
    /// Towards lane 0
    Left,
    /// Towards the last lane
    Right,
}

/// Speed increment requested every tick when the gap ahead is safe.
/// `accelerate` still caps it by the vehicle's own acceleration limit.
pub const ACCELERATION_REQUEST: f32 = 1.0;

/// Lower bound of the initial speed distribution
pub const MIN_INITIAL_SPEED: f32 = 10.0;

/// Range of the per-vehicle acceleration (and deceleration) limits
pub const ACCELERATION_RANGE: (f32, f32) = (1.0, 10.0);

/// Vehicle lengths are whole units in this inclusive range
pub const VEHICLE_LENGTH_RANGE: (u32, u32) = (30, 60);

/// Base headway drawn between consecutive vehicles in a lane
pub const SPACING_RANGE: (f32, f32) = (100.0, 150.0);

/// Integer jitter added on top of the base headway
pub const SPACING_JITTER_RANGE: (u32, u32) = (3, 6);

/// A lane slot is only used if it leaves this much room before the road end
pub const LANE_END_MARGIN: f32 = 6.0;
