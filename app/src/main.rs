//! Headless drive scenario runner.
//!
//! Usage:
//!   cargo run -p app -- [--seconds 12] [--hz 60]
//!
//! Builds the city world, spawns the car, and plays a scripted input
//! sequence (accelerate, turn, coast to a stop) at a fixed timestep,
//! logging car and camera telemetry along the way. Useful for eyeballing
//! handling changes without a renderer attached.

use std::env;

use anyhow::{Context, bail};
use sim::{
    ChaseConfig, ChaseState, DriveWorld, InputIntent, SteerState, VehicleConfig, city_layout,
    step_chase_camera,
};
use tracing::info;

struct ScenarioConfig {
    seconds: f32,
    hz: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seconds: 12.0,
            hz: 60,
        }
    }
}

fn parse_args() -> anyhow::Result<ScenarioConfig> {
    let mut cfg = ScenarioConfig::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seconds" if i + 1 < args.len() => {
                cfg.seconds = args[i + 1]
                    .parse()
                    .with_context(|| format!("bad --seconds value {:?}", args[i + 1]))?;
                i += 2;
            }
            "--hz" if i + 1 < args.len() => {
                cfg.hz = args[i + 1]
                    .parse()
                    .with_context(|| format!("bad --hz value {:?}", args[i + 1]))?;
                i += 2;
            }
            other => bail!("unknown argument {other:?}"),
        }
    }
    if cfg.hz == 0 {
        bail!("--hz must be positive");
    }
    Ok(cfg)
}

/// Scripted driver input for a given scenario time.
fn scripted_intent(t: f32) -> InputIntent {
    match t {
        t if t < 3.0 => InputIntent {
            forward: true,
            ..InputIntent::NEUTRAL
        },
        t if t < 5.5 => InputIntent {
            forward: true,
            left: true,
            ..InputIntent::NEUTRAL
        },
        t if t < 7.0 => InputIntent {
            forward: true,
            right: true,
            ..InputIntent::NEUTRAL
        },
        t if t < 8.0 => InputIntent {
            backward: true,
            ..InputIntent::NEUTRAL
        },
        _ => InputIntent::NEUTRAL,
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let scenario = parse_args()?;
    let dt = 1.0 / scenario.hz as f32;
    let frames = (scenario.seconds * scenario.hz as f32) as u32;

    let vehicle_cfg = VehicleConfig::default();
    let camera_cfg = ChaseConfig::default();

    let defs = city_layout();
    info!(statics = defs.len(), "building drive world");
    let mut world = DriveWorld::new(defs, &vehicle_cfg);
    let mut steer = SteerState::new();
    let mut camera = ChaseState::new();

    for frame in 0..frames {
        let t = frame as f32 * dt;
        let intent = scripted_intent(t);

        let vehicle = world
            .advance(intent, &mut steer, &vehicle_cfg, dt)
            .context("car body disappeared mid-scenario")?;
        let pose = step_chase_camera(&world.bodies, world.car, &mut camera, 0.0, &camera_cfg, dt)
            .context("camera lost its follow target")?;

        // Telemetry twice a second.
        if frame % (scenario.hz / 2).max(1) == 0 {
            let pos = *world
                .car_body()
                .context("car body missing during telemetry")?
                .translation();
            info!(
                "t={t:5.2}s speed={:6.2} m/s steer={:+.3} rad pos=({:7.2}, {:5.2}, {:7.2}) eye=({:7.2}, {:5.2}, {:7.2})",
                vehicle.horizontal_speed,
                vehicle.steer_angle,
                pos.x,
                pos.y,
                pos.z,
                pose.eye.x,
                pose.eye.y,
                pose.eye.z,
            );
        }
    }

    let final_speed = {
        let vel = world
            .car_body()
            .context("car body missing at scenario end")?
            .linvel();
        (vel.x * vel.x + vel.z * vel.z).sqrt()
    };
    info!(speed = format_args!("{final_speed:.3} m/s"), "scenario complete");
    Ok(())
}
