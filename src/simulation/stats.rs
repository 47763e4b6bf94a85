//! Running counters kept by the world

use log::info;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationStats {
    pub ticks: u64,
    /// Vehicles created by the spawner, not counting the initial population
    pub total_spawned: u64,
    pub total_exited: u64,
}

impl SimulationStats {
    /// Vehicles leaving the road per simulated minute
    pub fn throughput_per_minute(&self, elapsed: f64) -> f64 {
        if elapsed > 0.0 {
            self.total_exited as f64 / elapsed * 60.0
        } else {
            0.0
        }
    }

    /// Log the end-of-run report
    pub fn log_report(&self, elapsed: f64, active_vehicles: usize) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Elapsed time: {:.2}s", elapsed);
        info!("Ticks: {}", self.ticks);
        info!("Total vehicles spawned: {}", self.total_spawned);
        info!("Total vehicles exited: {}", self.total_exited);
        info!("Active vehicles: {}", active_vehicles);
        info!(
            "Throughput: {:.1} vehicles/min",
            self.throughput_per_minute(elapsed)
        );
    }
}
