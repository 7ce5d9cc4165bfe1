//! Hearth - goal oriented agents in a small simulated village
//!
//! Loads a scenario, registers its agents, and drives them with a fixed
//! control tick until every goal is achieved or the tick budget runs out.

mod actions;
mod scenario;
mod settings;
mod simulation;
mod walker;

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hearth_core::SimClock;

use scenario::Scenario;
use settings::Settings;
use simulation::Simulation;

#[derive(Debug, Parser)]
#[command(name = "hearth", version, about = "Run a GOAP agent scenario")]
struct Cli {
    /// Scenario file to load
    #[arg(long, default_value = "demos/bakery.toml")]
    scenario: PathBuf,

    /// Stop after this many control ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Control ticks per simulated second
    #[arg(long)]
    tick_rate: Option<f32>,

    /// Pace ticks against the wall clock
    #[arg(long)]
    realtime: bool,

    /// Write the effective settings to the config directory
    #[arg(long)]
    save_settings: bool,

    /// Print the final world state as JSON
    #[arg(long)]
    dump_state: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load();
    if let Some(ticks) = cli.ticks {
        settings.simulation.max_ticks = ticks;
    }
    if let Some(rate) = cli.tick_rate.filter(|r| *r > 0.0) {
        settings.simulation.clock.fixed_timestep = 1.0 / rate;
    }
    settings.simulation.realtime |= cli.realtime;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    if cli.save_settings {
        settings.save()?;
    }

    let scenario = Scenario::load(&cli.scenario)?;
    let mut world = scenario.world_state()?;
    let mut sim = Simulation::from_scenario(&scenario, &settings.planner, &settings.agent)
        .context("Invalid agent definition")?;

    info!(
        "Running {:?} with {} agents",
        cli.scenario,
        sim.agents().len()
    );

    let clock_config = &settings.simulation.clock;
    let positive = [
        clock_config.fixed_timestep,
        clock_config.time_scale,
        clock_config.max_delta,
    ];
    if positive.iter().any(|v| *v <= 0.0 || !v.is_finite()) {
        anyhow::bail!("Clock settings must be positive: {:?}", clock_config);
    }

    let mut clock = SimClock::new(clock_config.clone());
    let dt = clock.timestep();
    let mut last_frame = Instant::now();

    while clock.tick_count < settings.simulation.max_ticks && !sim.is_finished() {
        let raw_delta = if settings.simulation.realtime {
            thread::sleep(Duration::from_secs_f32(dt));
            let now = Instant::now();
            let elapsed = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;
            elapsed
        } else {
            dt
        };

        clock.update(raw_delta);
        for _ in 0..clock.fixed_steps() {
            sim.step(&mut world, dt);
        }
    }

    if sim.is_finished() {
        info!(
            "All goals achieved after {} ticks ({:.1}s simulated)",
            clock.tick_count, clock.total_time
        );
    } else {
        info!("Stopped after {} ticks", clock.tick_count);
    }

    for agent in sim.agents() {
        info!(
            "{}: {:?}, {} goals left",
            agent.brain.name,
            agent.brain.state(),
            agent.brain.goals().len()
        );
    }

    if cli.dump_state {
        println!("{}", serde_json::to_string_pretty(&world)?);
    }

    Ok(())
}
