//! Grouping of the live population by lane
//!
//! Rebuilt from scratch each tick. It stores indices into the population,
//! not vehicles, so the orchestrator can mutate one vehicle while reading its
//! neighbours.

use ordered_float::OrderedFloat;

use super::vehicle::Vehicle;

#[derive(Debug, Clone, Default)]
pub struct LanePartition {
    lanes: Vec<Vec<usize>>,
}

impl LanePartition {
    /// Group `vehicles` by lane, preserving population order within a lane.
    /// Vehicles on a lane outside `0..lane_count` are left out.
    pub fn build(vehicles: &[Vehicle], lane_count: usize) -> Self {
        let mut lanes = vec![Vec::new(); lane_count];
        for (index, vehicle) in vehicles.iter().enumerate() {
            if let Some(lane) = lanes.get_mut(vehicle.lane) {
                lane.push(index);
            }
        }
        Self { lanes }
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Population indices of the vehicles in `lane`
    pub fn lane(&self, lane: usize) -> &[usize] {
        self.lanes.get(lane).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Index of the vehicle in `lane` with the smallest position
    pub fn rearmost(&self, vehicles: &[Vehicle], lane: usize) -> Option<usize> {
        self.lane(lane)
            .iter()
            .copied()
            .min_by_key(|&index| OrderedFloat(vehicles[index].position))
    }

    /// Index of the nearest vehicle strictly ahead of `vehicles[index]`
    /// within its lane
    pub fn front_of(&self, vehicles: &[Vehicle], index: usize) -> Option<usize> {
        let position = vehicles[index].position;
        self.lane(vehicles[index].lane)
            .iter()
            .copied()
            .filter(|&other| vehicles[other].position > position)
            .min_by_key(|&other| OrderedFloat(vehicles[other].position))
    }
}
