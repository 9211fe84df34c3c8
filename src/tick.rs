//! Per-step session advance
//!
//! One synchronous call drives a whole simulation step: ask the scheduler
//! for a spawn decision, materialize the spawn with the session RNG, advance
//! every live trajectory, sweep actors that finished or left the field, and
//! hand the driver an event list to react to. There is no other entry point
//! that mutates time.

use glam::Vec2;
use rand::Rng;

use crate::behavior::{self, ShotTimer};
use crate::consts::{CULL_MARGIN, FIELD_HALF_HEIGHT, FIELD_HALF_WIDTH};
use crate::state::{Actor, GameEvent, SimState};
use crate::trajectory::TrajectoryPlayer;

/// Driver-supplied facts for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Player position, for shooters to aim at; shots fall straight down
    /// when the driver has no player to report
    pub player_pos: Option<Vec2>,
}

/// Advance the session by `dt` seconds.
///
/// A stopped session is inert: no time accumulates and no events fire.
/// Negative `dt` is clamped to 0 with a diagnostic - misuse never aborts the
/// hot path.
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.running {
        return events;
    }

    let dt = if dt < 0.0 {
        log::warn!("tick called with negative dt {dt}; clamping to 0");
        0.0
    } else {
        dt
    };

    state.game_time += dt;
    let game_time = state.game_time;

    let decision = state.scheduler.tick(game_time, state.registry.count());
    if state.last_wave_index != Some(decision.wave_index) {
        log::info!(
            "wave {} took over at {game_time:.1}s",
            decision.wave_index + 1
        );
        state.last_wave_index = Some(decision.wave_index);
        events.push(GameEvent::WaveChanged {
            wave_index: decision.wave_index,
        });
    }

    if decision.should_spawn {
        // The timer advances even when the spawn is skipped below, so a
        // misconfigured wave warns at spawn cadence instead of every tick
        state.scheduler.record_spawn(game_time);
        spawn_actor(state, decision.wave_index, game_time, &mut events);
    }

    // Advance every live trajectory in ID order
    let mut finished = Vec::new();
    for actor in &mut state.actors {
        let frame = actor.player.advance(dt);
        if frame.finished {
            events.push(GameEvent::Finished { id: actor.id });
            finished.push(actor.id);
            continue;
        }
        if let Some(timer) = &mut actor.shot {
            if timer.due(game_time) {
                events.push(GameEvent::ShotFired {
                    id: actor.id,
                    origin: frame.position,
                    direction: behavior::aim(frame.position, input.player_pos),
                    speed: timer.projectile_speed(),
                    homing: actor.homing,
                });
            }
        }
    }
    for id in finished {
        let _ = state.registry.unregister(id);
    }
    state.actors.retain(|actor| !actor.player.frame().finished);

    // Sweep actors that drifted below the field; each one scores a point
    let cull_y = -(FIELD_HALF_HEIGHT + CULL_MARGIN);
    let escaped = {
        let actors = &state.actors;
        state.registry.prune_out_of_bounds(|id| {
            match actors.iter().find(|actor| actor.id == id) {
                Some(actor) => actor.player.frame().position.y < cull_y,
                None => true,
            }
        })
    };
    for id in escaped {
        state.actors.retain(|actor| actor.id != id);
        state.score += 1;
        events.push(GameEvent::Escaped { id });
    }

    events
}

fn spawn_actor(state: &mut SimState, wave_index: usize, game_time: f32, events: &mut Vec<GameEvent>) {
    let wave = state.scheduler.wave(wave_index).clone();
    if wave.enemy_pool.is_empty() {
        log::warn!("wave {} has an empty enemy pool; spawn skipped", wave_index + 1);
        return;
    }

    let pick = wave.enemy_pool[state.rng.random_range(0..wave.enemy_pool.len())];
    let Some(config) = state.enemy_types.get(pick).cloned() else {
        log::warn!(
            "wave {} references unknown enemy type {pick}; spawn skipped",
            wave_index + 1
        );
        return;
    };

    let x = if wave.use_random_position {
        state.rng.random_range(-FIELD_HALF_WIDTH..FIELD_HALF_WIDTH)
    } else {
        0.0
    };

    let roll: f32 = state.rng.random();
    let shot = if roll < wave.shoot_probability {
        config
            .shot()
            .map(|spec| ShotTimer::new(spec, game_time, &mut state.rng))
    } else {
        None
    };

    let id = state.next_actor_id();
    let player = TrajectoryPlayer::new_at(config.clone(), Vec2::new(x, 0.0));
    let position = player.frame().position;
    log::debug!("spawned {} {id:?} at {position}", config.name());

    state.actors.push(Actor {
        id,
        type_index: pick,
        wave_index,
        player,
        shot,
        homing: wave.homing,
    });
    state.registry.register(id);
    events.push(GameEvent::Spawned {
        id,
        type_index: pick,
        wave_index,
        position,
    });
}
