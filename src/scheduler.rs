//! Difficulty-wave spawn scheduling
//!
//! A wave list is authored content: each wave says when it starts, which
//! enemy types it draws from, how fast it spawns, and how many actors may be
//! alive at once. The scheduler answers one question per tick - "spawn now,
//! and under which wave's rules?" - and leaves actually constructing the
//! actor to the driver.
//!
//! Wave selection is recomputed from game time every tick rather than cached;
//! wave lists are tens of entries at most, so the reverse scan is immaterial.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::consts::{BASE_SPAWN_DELAY, MIN_SPAWN_DELAY, RAMP_MAX, RAMP_PERIOD};

/// One authored difficulty wave.
///
/// `enemy_pool` holds indices into the driver's enemy-type table; the
/// scheduler never needs the configs themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDef {
    /// Game time (seconds) at which this wave takes over; inclusive bound
    pub start_time: f32,
    /// Enemy-type indices this wave spawns from
    pub enemy_pool: Vec<usize>,
    /// Baseline spawns per second, before the difficulty ramp
    pub spawn_rate: f32,
    /// Hard cap on simultaneously live actors (strict `<` when deciding)
    pub max_simultaneous: usize,
    /// Randomize the horizontal spawn position, or always spawn center-top
    #[serde(default)]
    pub use_random_position: bool,
    /// Chance in [0, 1] that a spawned actor has its shot policy armed
    #[serde(default)]
    pub shoot_probability: f32,
    /// Spawned shooters fire homing projectiles
    #[serde(default)]
    pub homing: bool,
}

impl WaveDef {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.start_time >= 0.0) {
            return Err(ConfigError::NegativeWaveStart {
                start_time: self.start_time,
            });
        }
        if !(self.spawn_rate > 0.0) || !self.spawn_rate.is_finite() {
            return Err(ConfigError::NonPositiveSpawnRate {
                value: self.spawn_rate,
            });
        }
        if self.max_simultaneous == 0 {
            return Err(ConfigError::ZeroActorCap);
        }
        if !(0.0..=1.0).contains(&self.shoot_probability) {
            return Err(ConfigError::ProbabilityOutOfRange {
                value: self.shoot_probability,
            });
        }
        // An empty enemy_pool is degenerate but valid: the wave schedules
        // spawn windows that the driver skips
        Ok(())
    }
}

/// Outcome of one scheduler tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnDecision {
    /// Spawn timer elapsed and the live cap has room
    pub should_spawn: bool,
    /// Index of the wave whose parameters apply this tick
    pub wave_index: usize,
}

/// Decides when spawns happen and which wave's parameters apply.
#[derive(Debug, Clone)]
pub struct WaveScheduler {
    waves: Vec<WaveDef>,
    base_delay: f32,
    min_delay: f32,
    next_spawn_time: f32,
}

impl WaveScheduler {
    /// Validate the wave list and build a scheduler with the default spawn
    /// cadence. Fails fast on an empty list, unsorted start times, or any
    /// malformed wave - never silently patched in the hot path.
    pub fn new(waves: Vec<WaveDef>) -> Result<Self, ConfigError> {
        Self::with_cadence(waves, BASE_SPAWN_DELAY, MIN_SPAWN_DELAY)
    }

    /// As `new`, with explicit baseline/minimum spawn delays.
    pub fn with_cadence(
        waves: Vec<WaveDef>,
        base_delay: f32,
        min_delay: f32,
    ) -> Result<Self, ConfigError> {
        if waves.is_empty() {
            return Err(ConfigError::EmptyWaveList);
        }
        for wave in &waves {
            wave.validate()?;
        }
        for pair in waves.windows(2) {
            if pair[1].start_time <= pair[0].start_time {
                return Err(ConfigError::UnsortedWaves {
                    start_time: pair[1].start_time,
                });
            }
        }
        Ok(Self {
            waves,
            base_delay,
            min_delay,
            // First spawn waits out the baseline delay, as on session start
            next_spawn_time: base_delay,
        })
    }

    /// The authored wave list, in start-time order
    pub fn waves(&self) -> &[WaveDef] {
        &self.waves
    }

    /// Wave parameters by index
    pub fn wave(&self, index: usize) -> &WaveDef {
        &self.waves[index]
    }

    /// Index of the wave governing `game_time`: the highest start time not
    /// exceeding it (inclusive bound), or the first wave before any has begun.
    pub fn current_wave_index(&self, game_time: f32) -> usize {
        for (index, wave) in self.waves.iter().enumerate().rev() {
            if game_time >= wave.start_time {
                return index;
            }
        }
        0
    }

    /// Per-tick spawn decision. `should_spawn` requires both an elapsed spawn
    /// timer and head-room under the wave's cap: at `live_count ==
    /// max_simultaneous` no spawn happens regardless of the timer.
    pub fn tick(&self, game_time: f32, live_count: usize) -> SpawnDecision {
        let wave_index = self.current_wave_index(game_time);
        let wave = &self.waves[wave_index];
        let should_spawn = game_time >= self.next_spawn_time && live_count < wave.max_simultaneous;
        SpawnDecision {
            should_spawn,
            wave_index,
        }
    }

    /// Commit a spawn the driver performed at `game_time`. The next spawn
    /// window opens after `max(min_delay, base_delay / effective_rate)`,
    /// where the effective rate is the wave's baseline scaled by the
    /// difficulty ramp.
    pub fn record_spawn(&mut self, game_time: f32) {
        let wave = &self.waves[self.current_wave_index(game_time)];
        let delay = (self.base_delay / self.effective_rate(wave, game_time)).max(self.min_delay);
        self.next_spawn_time = game_time + delay;
    }

    /// Baseline rate scaled by a monotonically non-decreasing ramp:
    /// `1 + game_time / RAMP_PERIOD`, capped at `RAMP_MAX`.
    pub fn effective_rate(&self, wave: &WaveDef, game_time: f32) -> f32 {
        let ramp = (1.0 + game_time.max(0.0) / RAMP_PERIOD).min(RAMP_MAX);
        wave.spawn_rate * ramp
    }

    /// Restart the spawn timer, as when spawning (re)starts at game time zero.
    pub fn reset(&mut self) {
        self.next_spawn_time = self.base_delay;
    }
}
