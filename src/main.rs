//! Swarm Sim demo driver
//!
//! Runs a seeded session headlessly at a fixed timestep and logs the event
//! stream. Pass a path to a JSON wave table to drive the session with your
//! own content; without arguments a built-in three-wave table runs.
//!
//! ```text
//! swarm-demo [waves.json] [seed]
//! ```

use std::error::Error;
use std::sync::Arc;

use glam::Vec2;

use swarm_sim::config::ShotSpec;
use swarm_sim::consts::{FIELD_HALF_HEIGHT, SIM_DT, SPAWN_Y_OFFSET};
use swarm_sim::{
    ActorConfig, CurveSpec, GameEvent, Keyframe, PathSpec, SimState, TickInput, WaveDef,
    WaveScheduler, tick,
};

const DEMO_SECONDS: f32 = 90.0;

/// Paths enter just above the visible field
const ENTRY_Y: f32 = FIELD_HALF_HEIGHT + SPAWN_Y_OFFSET;

fn enemy_types() -> Result<Vec<Arc<ActorConfig>>, Box<dyn Error>> {
    // Eased dive straight down the middle of the field
    let diver = ActorConfig::new(
        "diver",
        PathSpec::new(vec![Vec2::new(0.0, ENTRY_Y), Vec2::new(0.0, -6.0)]),
        CurveSpec::new(vec![
            Keyframe::new(0.0, 0.0),
            Keyframe::new(0.3, 0.1),
            Keyframe::new(1.0, 1.0),
        ])?,
        CurveSpec::linear(),
        4.0,
        1.0,
        Vec2::new(0.6, 0.6),
        Vec2::new(1.0, 1.0),
        None,
    )?;

    // Sweeps across the field twice on the way down
    let weaver = ActorConfig::new(
        "weaver",
        PathSpec::new(vec![
            Vec2::new(-7.0, 4.0),
            Vec2::new(6.0, 1.5),
            Vec2::new(-6.0, -1.5),
            Vec2::new(7.0, -6.0),
        ]),
        CurveSpec::linear(),
        CurveSpec::constant(1.0),
        6.0,
        1.0,
        Vec2::ONE,
        Vec2::ONE,
        None,
    )?;

    // Slow descent, firing on the way
    let gunner = ActorConfig::new(
        "gunner",
        PathSpec::new(vec![
            Vec2::new(0.0, ENTRY_Y),
            Vec2::new(0.0, 2.5),
            Vec2::new(0.0, -6.0),
        ]),
        CurveSpec::new(vec![
            Keyframe::new(0.0, 0.0),
            Keyframe::new(0.4, 0.5),
            Keyframe::new(0.7, 0.5),
            Keyframe::new(1.0, 1.0),
        ])?,
        CurveSpec::linear(),
        8.0,
        1.0,
        Vec2::new(0.8, 0.8),
        Vec2::new(1.2, 1.2),
        Some(ShotSpec {
            interval: 1.5,
            projectile_speed: 8.0,
        }),
    )?;

    Ok(vec![Arc::new(diver), Arc::new(weaver), Arc::new(gunner)])
}

fn default_waves() -> Vec<WaveDef> {
    vec![
        WaveDef {
            start_time: 0.0,
            enemy_pool: vec![0],
            spawn_rate: 0.8,
            max_simultaneous: 3,
            use_random_position: true,
            shoot_probability: 0.0,
            homing: false,
        },
        WaveDef {
            start_time: 30.0,
            enemy_pool: vec![0, 1],
            spawn_rate: 1.2,
            max_simultaneous: 5,
            use_random_position: true,
            shoot_probability: 0.3,
            homing: false,
        },
        WaveDef {
            start_time: 60.0,
            enemy_pool: vec![0, 1, 2],
            spawn_rate: 1.6,
            max_simultaneous: 8,
            use_random_position: true,
            shoot_probability: 0.5,
            homing: true,
        },
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let waves = match args.next() {
        Some(path) => {
            log::info!("Loading wave table from {path}");
            serde_json::from_str(&std::fs::read_to_string(&path)?)?
        }
        None => default_waves(),
    };
    let seed = match args.next() {
        Some(raw) => raw.parse()?,
        None => 0xC0FFEE,
    };

    let scheduler = WaveScheduler::new(waves)?;
    let mut state = SimState::new(seed, enemy_types()?, scheduler);
    state.start();
    log::info!("Session started with seed {seed}");

    let mut spawned = 0u32;
    let mut shots = 0u32;
    let steps = (DEMO_SECONDS / SIM_DT) as usize;
    for _ in 0..steps {
        // Scripted player drifting across the bottom of the field
        let player_x = (state.game_time * 0.7).sin() * 6.0;
        let input = TickInput {
            player_pos: Some(Vec2::new(player_x, -3.5)),
        };

        for event in tick(&mut state, &input, SIM_DT) {
            match event {
                GameEvent::WaveChanged { wave_index } => {
                    log::info!("[{:6.2}s] wave {} begins", state.game_time, wave_index + 1);
                }
                GameEvent::Spawned {
                    id,
                    type_index,
                    position,
                    ..
                } => {
                    spawned += 1;
                    log::info!(
                        "[{:6.2}s] spawned {} {id:?} at {position}",
                        state.game_time,
                        state.enemy_types[type_index].name(),
                    );
                }
                GameEvent::ShotFired {
                    id,
                    direction,
                    homing,
                    ..
                } => {
                    shots += 1;
                    log::debug!(
                        "[{:6.2}s] {id:?} fired toward {direction} (homing: {homing})",
                        state.game_time,
                    );
                }
                GameEvent::Finished { id } => {
                    log::debug!("[{:6.2}s] {id:?} finished its run", state.game_time);
                }
                GameEvent::Escaped { id } => {
                    log::info!(
                        "[{:6.2}s] {id:?} escaped (score {})",
                        state.game_time,
                        state.score,
                    );
                }
            }
        }
    }

    log::info!(
        "Session over: {spawned} spawned, {shots} shots, score {}, {} still live",
        state.score,
        state.live_count(),
    );
    Ok(())
}
