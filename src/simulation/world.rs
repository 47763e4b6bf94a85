//! Main simulation world that ties everything together
//!
//! This is the entry point for running the traffic simulation. It owns the
//! roadway, every live vehicle and the RNG, and advances them one fixed
//! tick at a time.

use anyhow::{Context, Result};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::collections::HashSet;

use super::config::SimConfig;
use super::lane_partition::LanePartition;
use super::road::Roadway;
use super::snapshot::{LightSnapshot, VehicleSnapshot, WorldSnapshot};
use super::stats::SimulationStats;
use super::types::{LaneDirection, LightState, SimId, VehicleId};
use super::vehicle::{FrontVehicle, Kinematics, Vehicle, VehicleUpdateResult};
use super::vehicle_factory::{generate_lane_positions, random_kinematics, spawn_position};

/// Columns used by `draw_map` for the full road length
const MAP_WIDTH: usize = 100;

/// The main simulation world
pub struct SimWorld {
    config: SimConfig,

    roadway: Roadway,

    /// Live population in insertion order; lanes are updated in this order
    vehicles: Vec<Vehicle>,

    /// Next ID to assign
    next_id: usize,

    /// Simulation time, always `ticks / tick_rate`
    time: f64,

    stats: SimulationStats,

    rng: StdRng,
}

impl SimWorld {
    fn new_internal(config: SimConfig, rng: StdRng) -> Result<Self> {
        config.validate().context("Invalid simulation config")?;
        let roadway = Roadway::from_config(&config);

        Ok(Self {
            config,
            roadway,
            vehicles: Vec::new(),
            next_id: 0,
            time: 0.0,
            stats: SimulationStats::default(),
            rng,
        })
    }

    /// Create a populated world with an OS-seeded RNG
    pub fn new(config: SimConfig) -> Result<Self> {
        let mut world = Self::new_internal(config, StdRng::from_os_rng())?;
        world.initialize_vehicles();
        Ok(world)
    }

    /// Create a populated world with a seeded RNG for reproducible simulations
    pub fn new_with_seed(config: SimConfig, seed: u64) -> Result<Self> {
        let mut world = Self::new_internal(config, StdRng::seed_from_u64(seed))?;
        world.initialize_vehicles();
        Ok(world)
    }

    /// Create a world with no vehicles on the road.
    /// The spawner still tops it up towards the target count.
    pub fn empty_with_seed(config: SimConfig, seed: u64) -> Result<Self> {
        Self::new_internal(config, StdRng::seed_from_u64(seed))
    }

    fn next_vehicle_id(&mut self) -> VehicleId {
        let id = VehicleId(SimId(self.next_id));
        self.next_id += 1;
        id
    }

    /// Spread `target / lane_count` vehicles along every lane
    fn initialize_vehicles(&mut self) {
        let per_lane = self.config.target_vehicle_count / self.roadway.lane_count();

        for lane in 0..self.roadway.lane_count() {
            let positions = generate_lane_positions(&mut self.rng, self.roadway.length(), per_lane);
            for position in positions {
                let kinematics = random_kinematics(&mut self.rng, &self.config);
                let id = self.next_vehicle_id();
                self.vehicles.push(Vehicle::new(id, lane, position, kinematics));
            }
        }

        debug!(
            "Initialized {} vehicles across {} lanes",
            self.vehicles.len(),
            self.roadway.lane_count()
        );
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn roadway(&self) -> &Roadway {
        &self.roadway
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    /// Elapsed simulation time in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Place a vehicle with explicit parameters on the road
    pub fn add_vehicle(
        &mut self,
        lane: usize,
        position: f32,
        kinematics: Kinematics,
    ) -> Result<VehicleId> {
        if !self.roadway.contains_lane(lane) {
            anyhow::bail!(
                "Lane {} does not exist (road has {} lanes)",
                lane,
                self.roadway.lane_count()
            );
        }
        if !position.is_finite() {
            anyhow::bail!("Vehicle position must be finite, got {}", position);
        }
        validate_kinematics(&kinematics)?;

        let id = self.next_vehicle_id();
        self.vehicles.push(Vehicle::new(id, lane, position, kinematics));
        Ok(id)
    }

    /// Main simulation tick
    ///
    /// Vehicles are updated in place one after another, lane by lane. A
    /// follower processed after its leader reacts to the leader's already
    /// updated speed and position.
    pub fn tick(&mut self) {
        let dt = self.config.dt();
        self.stats.ticks += 1;
        self.time = self.stats.ticks as f64 / f64::from(self.config.tick_rate);

        self.roadway.update_traffic_lights(self.time);

        let partition = LanePartition::build(&self.vehicles, self.roadway.lane_count());
        let exited = self.update_vehicles(dt, &partition);
        self.despawn_vehicles(&exited);

        if self.vehicles.len() < self.config.target_vehicle_count {
            self.spawn_vehicle();
        }
    }

    /// Move every vehicle once. Returns the IDs of vehicles that left the road.
    fn update_vehicles(&mut self, dt: f32, partition: &LanePartition) -> Vec<VehicleId> {
        let mut exited = Vec::new();
        let speed_limit = self.config.speed_limit;
        let road_length = self.roadway.length();

        for lane in 0..partition.lane_count() {
            for &index in partition.lane(lane) {
                let front = partition
                    .front_of(&self.vehicles, index)
                    .map(|front_index| FrontVehicle::from(&self.vehicles[front_index]));

                let vehicle = &mut self.vehicles[index];
                let result = vehicle.advance(dt, speed_limit, road_length, front);

                vehicle.red_light_ahead = self
                    .roadway
                    .next_light_ahead(vehicle.position)
                    .is_some_and(|light| light.is_red());

                if result == VehicleUpdateResult::Exited {
                    exited.push(vehicle.id);
                }
            }
        }

        exited
    }

    /// Remove exited vehicles, keeping the order of the rest
    fn despawn_vehicles(&mut self, exited: &[VehicleId]) {
        if exited.is_empty() {
            return;
        }

        for id in exited {
            debug!("Vehicle {} exited at t={:.2}s", id, self.time);
        }

        let exited: HashSet<VehicleId> = exited.iter().copied().collect();
        let before = self.vehicles.len();
        self.vehicles.retain(|vehicle| !exited.contains(&vehicle.id));
        let removed = before - self.vehicles.len();
        self.stats.total_exited += removed as u64;
    }

    /// Add one vehicle behind the rearmost vehicle of a random lane
    pub fn spawn_vehicle(&mut self) -> VehicleId {
        let lane = self.rng.random_range(0..self.roadway.lane_count());

        let partition = LanePartition::build(&self.vehicles, self.roadway.lane_count());
        let rear_position = partition
            .rearmost(&self.vehicles, lane)
            .map(|index| self.vehicles[index].position);

        let position = spawn_position(&mut self.rng, rear_position);
        let kinematics = random_kinematics(&mut self.rng, &self.config);
        let id = self.next_vehicle_id();

        self.vehicles.push(Vehicle::new(id, lane, position, kinematics));
        self.stats.total_spawned += 1;

        debug!(
            "Spawned vehicle {} in lane {} at {:.1} (speed {:.1})",
            id, lane, position, kinematics.speed
        );
        id
    }

    /// Ask a vehicle to move one lane over.
    ///
    /// Never called by `tick`. Unknown vehicles and moves off the roadway are
    /// reported as errors and leave the world untouched.
    pub fn change_lane(&mut self, id: VehicleId, direction: LaneDirection) -> Result<()> {
        let lane_count = self.roadway.lane_count();
        let result = self
            .vehicles
            .iter_mut()
            .find(|vehicle| vehicle.id == id)
            .with_context(|| format!("Vehicle {} not found", id))
            .and_then(|vehicle| vehicle.change_lane(direction, lane_count));

        if let Err(e) = &result {
            warn!("Rejected lane change: {:#}", e);
        }
        result
    }

    /// Capture the state an external renderer consumes
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.stats.ticks,
            elapsed_time: self.time,
            road_length: self.roadway.length(),
            lane_count: self.roadway.lane_count(),
            vehicles: self.vehicles.iter().map(VehicleSnapshot::from).collect(),
            lights: self
                .roadway
                .lights()
                .iter()
                .map(LightSnapshot::from)
                .collect(),
        }
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Traffic Simulation Summary ===");
        println!("Time: {:.2}s (tick {})", self.time, self.stats.ticks);
        println!(
            "Road length: {:.0}, Lanes: {}",
            self.roadway.length(),
            self.roadway.lane_count()
        );
        println!(
            "Vehicles: {} (target {})",
            self.vehicles.len(),
            self.config.target_vehicle_count
        );
        println!(
            "Spawned: {}, Exited: {}",
            self.stats.total_spawned, self.stats.total_exited
        );
        println!();

        println!("--- Traffic Lights ---");
        for light in self.roadway.lights() {
            println!(
                "  Light at {:.0}: {:?}, {}s remaining",
                light.position,
                light.state,
                light.countdown_seconds()
            );
        }

        let partition = LanePartition::build(&self.vehicles, self.roadway.lane_count());
        println!("--- Lanes ---");
        for lane in 0..partition.lane_count() {
            let members = partition.lane(lane);
            let mean_speed = if members.is_empty() {
                0.0
            } else {
                members
                    .iter()
                    .map(|&index| self.vehicles[index].speed)
                    .sum::<f32>()
                    / members.len() as f32
            };
            println!(
                "  Lane {}: vehicles={}, mean speed={:.1}",
                lane,
                members.len(),
                mean_speed
            );
        }
    }

    /// Draw the road in the terminal, one row per lane
    pub fn draw_map(&self) {
        let scale = MAP_WIDTH as f32 / self.roadway.length();
        let to_col = |position: f32| ((position.max(0.0) * scale) as usize).min(MAP_WIDTH - 1);

        let mut light_row = vec![' '; MAP_WIDTH];
        for light in self.roadway.lights() {
            light_row[to_col(light.position)] = match light.state {
                LightState::Red => 'R',
                LightState::Green => 'G',
            };
        }

        let mut lanes = vec![vec!['-'; MAP_WIDTH]; self.roadway.lane_count()];
        for vehicle in &self.vehicles {
            if let Some(row) = lanes.get_mut(vehicle.lane) {
                row[to_col(vehicle.position)] = if vehicle.speed < 1.0 { 'x' } else { '>' };
            }
        }

        println!("\n=== Road Map ===");
        println!("Legend: R/G=Light, >=Moving vehicle, x=Stopped vehicle");
        println!();
        println!(" {}", light_row.iter().collect::<String>());
        for row in &lanes {
            println!("|{}|", row.iter().collect::<String>());
        }
        println!();
    }
}

/// Reject driver parameters that would break the speed bounds.
/// A negative starting speed is fine, `Vehicle::new` clamps it to zero.
fn validate_kinematics(kinematics: &Kinematics) -> Result<()> {
    if !kinematics.speed.is_finite() {
        anyhow::bail!("Vehicle speed must be finite, got {}", kinematics.speed);
    }
    let fields = [
        ("max_acceleration", kinematics.max_acceleration),
        ("max_deceleration", kinematics.max_deceleration),
        ("reaction_time", kinematics.reaction_time),
        ("speed_scale_preference", kinematics.speed_scale_preference),
        ("length", kinematics.length),
    ];
    for (name, value) in fields {
        if !(value.is_finite() && value >= 0.0) {
            anyhow::bail!("Vehicle {} must be finite and non-negative, got {}", name, value);
        }
    }
    Ok(())
}
