use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use lane_traffic_sim::simulation::{SimConfig, SimWorld};

#[derive(Parser)]
#[command(name = "lane_traffic_sim")]
#[command(about = "Headless multi-lane car-following traffic simulation")]
struct Cli {
    /// JSON config file (built-in demo road when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of simulation ticks to run
    #[arg(long, default_value = "900")]
    ticks: u32,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Override the target vehicle count
    #[arg(long)]
    vehicles: Option<usize>,

    /// Simulated seconds between progress reports
    #[arg(long, default_value = "5")]
    report_every: f32,

    /// Print each report as a JSON snapshot instead of the text map
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(vehicles) = cli.vehicles {
        config.target_vehicle_count = vehicles;
    }

    let mut world = match cli.seed {
        Some(seed) => SimWorld::new_with_seed(config, seed)?,
        None => SimWorld::new(config)?,
    };

    run_headless(&mut world, cli.ticks, cli.report_every, cli.json)
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(world: &mut SimWorld, ticks: u32, report_every: f32, json: bool) -> Result<()> {
    let tick_rate = world.config().tick_rate;
    let ticks_per_report = ((report_every * tick_rate).ceil() as u32).max(1);

    info!(
        "Running {} ticks at {} ticks/s, reporting every {} ticks",
        ticks, tick_rate, ticks_per_report
    );

    report(world, json)?;

    let mut tick = 0;
    while tick < ticks {
        let ticks_to_run = ticks_per_report.min(ticks - tick);
        for _ in 0..ticks_to_run {
            tick += 1;
            world.tick();
        }

        if !json {
            println!("--- After tick {} ({:.1}s simulated time) ---", tick, world.time());
        }
        report(world, json)?;
    }

    world.stats().log_report(world.time(), world.vehicles().len());
    Ok(())
}

fn report(world: &SimWorld, json: bool) -> Result<()> {
    if json {
        println!("{}", world.snapshot().to_json()?);
    } else {
        world.print_summary();
        world.draw_map();
    }
    Ok(())
}
