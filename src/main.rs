//! hookline demo runner.
//!
//! Builds a small arena (a floor, a raised ledge and a wall), spawns a
//! player with the configured loadout plus a row of training dummies, then
//! replays a scripted input scenario through the abstract input surface and
//! logs what happens.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --seconds 6 --dummies 3 --seed 42
//! cargo run -- --write-config hookline.ini
//! cargo run -- --config hookline.ini --scenario run.json
//! ```

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use clap::Parser;
use std::path::PathBuf;

use hookline::components::layer::Layer;
use hookline::components::projectile::{Projectile, RopeConstraint};
use hookline::events::combat::{AttackEvent, HitEvent, InteractEvent};
use hookline::events::projectile::ProjectileRecalled;
use hookline::resources::simconfig::SimConfig;
use hookline::scenario::Scenario;
use hookline::simulation::{ActorSpec, Simulation};

/// hookline headless actor simulation
#[derive(Parser)]
#[command(version, about = "Headless 2D actor controller with a grappling rope")]
struct Cli {
    /// INI configuration file. Defaults are used for anything missing.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON input scenario. The built-in demo runs when omitted.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,

    /// Simulated seconds to run.
    #[arg(long, default_value_t = 6.0)]
    seconds: f32,

    /// Frames per simulated second.
    #[arg(long, default_value_t = 60)]
    frame_rate: u32,

    /// Number of training dummies to place.
    #[arg(long, default_value_t = 2)]
    dummies: usize,

    /// Seed for dummy placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

#[derive(Resource, Default)]
struct RunStats {
    attacks: u32,
    hits: u32,
    recalls: u32,
}

fn count_attacks(trigger: On<AttackEvent>, mut stats: ResMut<RunStats>) {
    stats.attacks += 1;
    let event = trigger.event();
    log::info!(
        "{:?} attacks ({}) toward ({:.2}, {:.2})",
        event.attacker,
        event.kind.name(),
        event.direction.x,
        event.direction.y
    );
}

fn count_hits(trigger: On<HitEvent>, mut stats: ResMut<RunStats>) {
    stats.hits += 1;
    let event = trigger.event();
    log::info!(
        "{:?} hit {:?} with power {}",
        event.attacker,
        event.target,
        event.power
    );
}

fn count_recalls(trigger: On<ProjectileRecalled>, mut stats: ResMut<RunStats>) {
    stats.recalls += 1;
    let event = trigger.event();
    log::info!(
        "Projectile {:?} of {:?} recalled ({:?})",
        event.projectile,
        event.owner,
        event.reason
    );
}

fn log_interact(trigger: On<InteractEvent>) {
    log::info!("{:?} wants to interact", trigger.event().actor);
}

fn build_arena(sim: &mut Simulation) {
    // floor top at y = 0
    sim.spawn_terrain(Vec2::new(0.0, -0.5), Vec2::new(60.0, 1.0), Layer::GROUND);
    // ledge up and to the right
    sim.spawn_terrain(Vec2::new(12.0, 8.0), Vec2::new(6.0, 1.0), Layer::LEVEL);
    // wall on the far left
    sim.spawn_terrain(Vec2::new(-20.0, 5.0), Vec2::new(1.0, 10.0), Layer::LEVEL);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::with_path(path),
        None => SimConfig::new(),
    };
    if cli.config.is_some() {
        if let Err(e) = config.load_from_file() {
            log::error!("{}; using defaults", e);
        }
    }

    // Early-exit: write the effective config and quit
    if let Some(path) = cli.write_config {
        config.config_path = path;
        if let Err(e) = config.save_to_file() {
            log::error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    let mut scenario = match &cli.scenario {
        Some(path) => Scenario::load_from_file(path).unwrap_or_else(|e| {
            log::error!("{}; running the built-in demo", e);
            Scenario::demo()
        }),
        None => Scenario::demo(),
    };

    let loadout = config.loadout_weapon();
    let stats = config.stats;
    let mut sim = Simulation::new(config);
    {
        let world = sim.world_mut();
        world.init_resource::<RunStats>();
        world.spawn(Observer::new(count_attacks));
        world.spawn(Observer::new(count_hits));
        world.spawn(Observer::new(count_recalls));
        world.spawn(Observer::new(log_interact));
        world.flush();
    }

    build_arena(&mut sim);
    let player = sim.spawn_actor(
        ActorSpec::player(Vec2::new(0.0, 1.0))
            .with_stats(stats)
            .with_weapon(loadout),
    );

    let mut rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    for _ in 0..cli.dummies {
        let x = 3.0 + rng.f32() * 12.0;
        sim.spawn_actor(ActorSpec::dummy(Vec2::new(x, 1.0)));
    }

    let frame_rate = cli.frame_rate.max(1);
    let dt = 1.0 / frame_rate as f32;
    let frames = (cli.seconds.max(0.0) * frame_rate as f32).ceil() as u32;
    log::info!(
        "Running {} frames at {} fps ({} scripted inputs)",
        frames,
        frame_rate,
        scenario.steps.len()
    );

    for frame in 0..frames {
        let now = frame as f32 * dt;
        for action in scenario.due(now) {
            log::debug!("t={:.2} input {:?}", now, action);
            sim.send_input(player, action);
        }
        sim.advance(dt);

        if frame % frame_rate == 0 {
            let position = sim.position(player).unwrap_or_default();
            let rope = sim
                .current_projectile(player)
                .and_then(|p| sim.world().get::<RopeConstraint>(p))
                .map(|r| r.distance);
            log::info!(
                "t={:.1} player at ({:.2}, {:.2}) rope={:?}",
                now,
                position.x,
                position.y,
                rope
            );
        }
    }

    let projectile_state = sim
        .current_projectile(player)
        .and_then(|p| sim.world().get::<Projectile>(p))
        .map(|p| p.state);
    let stats = sim.world().resource::<RunStats>();
    log::info!(
        "Done: {} attacks, {} hits, {} recalls, active projectile {:?}",
        stats.attacks,
        stats.hits,
        stats.recalls,
        projectile_state
    );
}
