//! Random vehicle parameters and lane placement
//!
//! The distributions here are shared by world initialisation and the
//! mid-run spawner, so both produce statistically identical drivers.

use rand::Rng;

use super::config::SimConfig;
use super::types::{
    ACCELERATION_RANGE, LANE_END_MARGIN, MIN_INITIAL_SPEED, SPACING_JITTER_RANGE, SPACING_RANGE,
    VEHICLE_LENGTH_RANGE,
};
use super::vehicle::Kinematics;

/// Draw a fresh set of driver parameters
pub fn random_kinematics(rng: &mut impl Rng, config: &SimConfig) -> Kinematics {
    let speed = if config.speed_limit > MIN_INITIAL_SPEED {
        rng.random_range(MIN_INITIAL_SPEED..=config.speed_limit)
    } else {
        config.speed_limit
    };
    let [reaction_min, reaction_max] = config.reaction_time_range;
    let [scale_min, scale_max] = config.speed_scale_range;

    Kinematics {
        speed,
        max_acceleration: rng.random_range(ACCELERATION_RANGE.0..=ACCELERATION_RANGE.1),
        max_deceleration: rng.random_range(ACCELERATION_RANGE.0..=ACCELERATION_RANGE.1),
        reaction_time: rng.random_range(reaction_min..=reaction_max),
        speed_scale_preference: rng.random_range(scale_min..=scale_max),
        length: rng.random_range(VEHICLE_LENGTH_RANGE.0..=VEHICLE_LENGTH_RANGE.1) as f32,
    }
}

/// Headway between consecutive vehicles: uniform base plus integer jitter
pub fn random_gap(rng: &mut impl Rng) -> f32 {
    let base = rng.random_range(SPACING_RANGE.0..=SPACING_RANGE.1);
    let jitter = rng.random_range(SPACING_JITTER_RANGE.0..=SPACING_JITTER_RANGE.1);
    base + jitter as f32
}

/// Starting positions for up to `count` vehicles in one lane.
///
/// The first vehicle lands somewhere in the first quarter of the road and
/// each following one a random gap further on. Slots that would not leave
/// `LANE_END_MARGIN` before the road end are dropped, so a crowded lane
/// may get fewer than `count` vehicles.
pub fn generate_lane_positions(rng: &mut impl Rng, road_length: f32, count: usize) -> Vec<f32> {
    let first_limit = (road_length / 4.0).floor().max(0.0) as u32;
    let mut positions: Vec<f32> = Vec::with_capacity(count);

    for _ in 0..count {
        let candidate = match positions.last() {
            Some(last) => last + random_gap(rng),
            None => rng.random_range(0..=first_limit) as f32,
        };

        if candidate + LANE_END_MARGIN < road_length {
            positions.push(candidate);
        }
    }

    positions
}

/// Where a new vehicle enters a lane whose rearmost vehicle is at
/// `rear_position`, or the origin for an empty lane.
///
/// Clamping to the origin can leave the newcomer closer than one gap to the
/// rear vehicle.
pub fn spawn_position(rng: &mut impl Rng, rear_position: Option<f32>) -> f32 {
    match rear_position {
        Some(rear) => (rear - random_gap(rng)).max(0.0),
        None => 0.0,
    }
}
