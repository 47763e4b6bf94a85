//! Vehicle movement logic for the traffic simulation
//!
//! Each vehicle follows the one directly ahead of it in its lane: it brakes
//! towards the leader's speed once the bumper gap shrinks to its safe
//! distance and otherwise speeds up towards its personal ceiling. The
//! decision is recomputed from scratch every tick.

use anyhow::Result;
use ordered_float::OrderedFloat;

use super::types::{LaneDirection, VehicleId, ACCELERATION_REQUEST};

/// Result of a vehicle update indicating what action should be taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleUpdateResult {
    Continue, // Still on the road
    Exited,   // Passed the end of the road, must be removed this tick
}

/// Per-driver parameters drawn when a vehicle is created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub speed: f32,
    pub max_acceleration: f32,
    pub max_deceleration: f32,
    /// Seconds
    pub reaction_time: f32,
    /// Multiplier on the posted speed limit
    pub speed_scale_preference: f32,
    pub length: f32,
}

/// The parts of a leading vehicle that a follower reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontVehicle {
    pub position: f32,
    pub speed: f32,
    pub length: f32,
}

impl From<&Vehicle> for FrontVehicle {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            position: vehicle.position,
            speed: vehicle.speed,
            length: vehicle.length,
        }
    }
}

/// A vehicle in the traffic simulation
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    pub lane: usize,
    /// Distance of the vehicle's centre from the road origin
    pub position: f32,
    pub speed: f32,
    pub max_acceleration: f32,
    /// Carried for completeness; braking is capped by `max_acceleration`
    pub max_deceleration: f32,
    pub reaction_time: f32,
    pub speed_scale_preference: f32,
    pub length: f32,
    /// Cosmetic only, never read by the car-following logic
    pub red_light_ahead: bool,
}

impl Vehicle {
    pub fn new(id: VehicleId, lane: usize, position: f32, kinematics: Kinematics) -> Self {
        Self {
            id,
            lane,
            position,
            speed: kinematics.speed.max(0.0),
            max_acceleration: kinematics.max_acceleration,
            max_deceleration: kinematics.max_deceleration,
            reaction_time: kinematics.reaction_time,
            speed_scale_preference: kinematics.speed_scale_preference,
            length: kinematics.length,
            red_light_ahead: false,
        }
    }

    /// Highest speed this driver will reach under the given limit
    pub fn speed_ceiling(&self, speed_limit: f32) -> f32 {
        speed_limit * self.speed_scale_preference
    }

    /// Speed up by `value`, capped first by the acceleration limit and then
    /// by the driver's speed ceiling
    pub fn accelerate(&mut self, value: f32, speed_limit: f32) {
        let increment = value.min(self.max_acceleration);
        self.speed = (self.speed + increment).min(self.speed_ceiling(speed_limit));
    }

    /// Slow down by `value`, never below zero.
    ///
    /// The decrement is capped by `max_acceleration`, not `max_deceleration`.
    pub fn brake(&mut self, value: f32) {
        let decrement = value.min(self.max_acceleration);
        self.speed = (self.speed - decrement).max(0.0);
    }

    /// Bumper gap below which the vehicle brakes instead of accelerating
    pub fn safe_distance(&self) -> f32 {
        self.speed * (self.reaction_time + self.speed / 10.0)
    }

    /// The nearest vehicle strictly ahead among `lane_vehicles`
    pub fn front_vehicle<'a>(
        &self,
        lane_vehicles: impl IntoIterator<Item = &'a Vehicle>,
    ) -> Option<&'a Vehicle> {
        lane_vehicles
            .into_iter()
            .filter(|other| other.position > self.position)
            .min_by_key(|other| OrderedFloat(other.position))
    }

    /// Gap between this vehicle's front bumper and the leader's rear bumper
    pub fn front_distance(&self, front: Option<&FrontVehicle>) -> f32 {
        match front {
            Some(front) => {
                front.position - self.position - front.length / 2.0 - self.length / 2.0
            }
            None => f32::INFINITY,
        }
    }

    /// Update speed and position for one tick given an already resolved
    /// leader.
    pub fn advance(
        &mut self,
        dt: f32,
        speed_limit: f32,
        road_length: f32,
        front: Option<FrontVehicle>,
    ) -> VehicleUpdateResult {
        self.speed = self.speed.min(self.speed_ceiling(speed_limit));

        let front_distance = self.front_distance(front.as_ref());
        let safe_distance = self.safe_distance();

        match front {
            Some(front) if front_distance <= safe_distance => {
                self.brake((front.speed - self.speed).abs());
            }
            _ => self.accelerate(ACCELERATION_REQUEST, speed_limit),
        }

        self.position += self.speed * dt;

        if self.position > road_length {
            VehicleUpdateResult::Exited
        } else {
            VehicleUpdateResult::Continue
        }
    }

    /// Update for one tick against the vehicles currently in this lane.
    ///
    /// `lane_vehicles` may include this vehicle; it is never its own leader.
    pub fn move_in_lane(
        &mut self,
        dt: f32,
        speed_limit: f32,
        road_length: f32,
        lane_vehicles: &[Vehicle],
    ) -> VehicleUpdateResult {
        let front = self.front_vehicle(lane_vehicles).map(FrontVehicle::from);
        self.advance(dt, speed_limit, road_length, front)
    }

    /// Shift one lane in `direction`.
    ///
    /// Not part of the per-tick update. Leaving the roadway is rejected and
    /// the vehicle keeps its lane.
    pub fn change_lane(&mut self, direction: LaneDirection, lane_count: usize) -> Result<()> {
        let target = match direction {
            LaneDirection::Left => self.lane.checked_sub(1),
            LaneDirection::Right => Some(self.lane + 1).filter(|lane| *lane < lane_count),
        };

        match target {
            Some(lane) => {
                self.lane = lane;
                Ok(())
            }
            None => anyhow::bail!(
                "Vehicle {} cannot move {:?} from lane {} ({} lanes)",
                self.id,
                direction,
                self.lane,
                lane_count
            ),
        }
    }
}
