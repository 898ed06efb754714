//! Wave spawning system: wave composition, spawn cadence, and the
//! scheduler state that decides when a batch of waves is complete.
//!
//! Waiting is expressed as target timestamps on the simulation clock; nothing
//! here runs outside `tick`.

use hecs::World;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use rampart_core::config::Catalog;
use rampart_core::constants::*;
use rampart_core::enums::EnemyKind;
use rampart_core::events::SimEvent;
use rampart_core::types::Position;

use crate::world_setup::{self, EnemySpawn};

/// Resolved parameters of one wave.
#[derive(Debug, Clone, PartialEq)]
pub struct WavePlan {
    pub wave: u32,
    pub enemy_count: u32,
    pub spawn_interval_ms: f64,
    /// Eligible types; duplicates weight the uniform draw.
    pub pool: Vec<EnemyKind>,
}

/// Spawn cadence of one started wave.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    pub plan: WavePlan,
    pub spawned: u32,
    pub next_spawn_ms: f64,
}

/// Scheduler state shared across ticks.
#[derive(Debug, Clone, Default)]
pub struct WaveScheduler {
    /// Highest started wave.
    pub wave: u32,
    pub in_progress: bool,
    /// Enemies alive plus enemies still to spawn, across all started waves.
    pub remaining: i64,
    /// Queued waves not yet started.
    pub pending: u32,
    pub timers: Vec<SpawnTimer>,
    /// Clock time at which the next wave auto-starts.
    pub countdown_until_ms: Option<f64>,
}

impl WavePlan {
    pub fn for_wave(wave: u32) -> Self {
        Self {
            wave,
            enemy_count: enemy_count(wave),
            spawn_interval_ms: spawn_interval_ms(wave),
            pool: eligible_pool(wave),
        }
    }
}

impl WaveScheduler {
    /// Add `count` waves to the queue, starting one now if nothing is spawning.
    /// Returns the wave started, if any.
    pub fn queue(&mut self, count: u32, now_ms: f64, events: &mut Vec<SimEvent>) -> Option<u32> {
        self.pending += count;
        if self.pending > 0 && !self.is_spawning() {
            self.pending -= 1;
            Some(self.start_next_wave(now_ms, events))
        } else {
            None
        }
    }

    /// Start the next wave immediately and arm its spawn timer.
    pub fn start_next_wave(&mut self, now_ms: f64, events: &mut Vec<SimEvent>) -> u32 {
        self.wave += 1;
        self.in_progress = true;
        self.countdown_until_ms = None;

        let plan = WavePlan::for_wave(self.wave);
        self.remaining += plan.enemy_count as i64;

        info!(
            wave = plan.wave,
            enemies = plan.enemy_count,
            interval_ms = plan.spawn_interval_ms,
            "wave started"
        );
        events.push(SimEvent::WaveStarted {
            wave: plan.wave,
            enemy_count: plan.enemy_count,
            spawn_interval_ms: plan.spawn_interval_ms,
        });

        self.timers.push(SpawnTimer {
            next_spawn_ms: now_ms + plan.spawn_interval_ms,
            spawned: 0,
            plan,
        });
        self.wave
    }

    pub fn is_spawning(&self) -> bool {
        !self.timers.is_empty()
    }

    /// A batch is complete when nothing is alive, nothing is left to spawn and
    /// no timer is running. Flips `in_progress` off and arms the auto-start
    /// countdown. Returns the last wave of the batch exactly once.
    pub fn check_completion(
        &mut self,
        enemies_alive: usize,
        now_ms: f64,
        auto_start_delay_ms: Option<f64>,
    ) -> Option<u32> {
        if !self.in_progress
            || enemies_alive > 0
            || self.remaining > 0
            || self.is_spawning()
            || self.pending > 0
        {
            return None;
        }
        self.in_progress = false;
        self.countdown_until_ms = auto_start_delay_ms.map(|delay| now_ms + delay);
        Some(self.wave)
    }

    /// Start the next wave if the auto-start countdown has elapsed.
    /// Returns the auto-started wave.
    pub fn tick_countdown(
        &mut self,
        now_ms: f64,
        game_over: bool,
        events: &mut Vec<SimEvent>,
    ) -> Option<u32> {
        let due = self.countdown_until_ms?;
        if now_ms < due {
            return None;
        }
        self.countdown_until_ms = None;
        if self.in_progress || game_over {
            return None;
        }
        let wave = self.start_next_wave(now_ms, events);
        events.push(SimEvent::WaveAutoStarted { wave });
        Some(wave)
    }

    /// Milliseconds left on the auto-start countdown, if armed.
    pub fn countdown_remaining(&self, now_ms: f64) -> Option<f64> {
        self.countdown_until_ms.map(|due| (due - now_ms).max(0.0))
    }

    /// A spawned enemy left play (killed or escaped).
    pub fn enemy_removed(&mut self) {
        self.remaining -= 1;
    }

    /// Cancel all timers and the countdown, back to wave 0.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Spawn due enemies for every active timer. Timers that reach their target
/// are dropped, and each one dropped starts the next queued wave.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scheduler: &mut WaveScheduler,
    catalog: &Catalog,
    path: &[Position],
    next_enemy_id: &mut u32,
    now_ms: f64,
    events: &mut Vec<SimEvent>,
) {
    let mut finished = 0;

    for timer in &mut scheduler.timers {
        while timer.spawned < timer.plan.enemy_count && now_ms >= timer.next_spawn_ms {
            timer.spawned += 1;
            timer.next_spawn_ms += timer.plan.spawn_interval_ms;

            let spawned = spawn_one(world, rng, catalog, path, &timer.plan, next_enemy_id, now_ms);
            match spawned {
                Some(event) => events.push(event),
                // Counted as spawned so the wave can still finish.
                None => scheduler.remaining -= 1,
            }
        }
        if timer.spawned >= timer.plan.enemy_count {
            finished += 1;
        }
    }

    if finished == 0 {
        return;
    }
    scheduler
        .timers
        .retain(|t| t.spawned < t.plan.enemy_count);

    for _ in 0..finished {
        if scheduler.pending == 0 {
            break;
        }
        scheduler.pending -= 1;
        scheduler.start_next_wave(now_ms, events);
    }
}

/// Draw a type, scale it for the wave and spawn it at the first path point.
fn spawn_one(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    catalog: &Catalog,
    path: &[Position],
    plan: &WavePlan,
    next_enemy_id: &mut u32,
    now_ms: f64,
) -> Option<SimEvent> {
    let kind = *plan.pool.choose(rng)?;
    let Some(def) = catalog.enemy(kind) else {
        warn!(kind = %kind, wave = plan.wave, "enemy type missing from catalog, skipping spawn");
        return None;
    };

    let variation = rng.gen_range(HEALTH_VARIATION_MIN..=HEALTH_VARIATION_MAX);
    let health = (scaled_health(def.health, plan.wave) * variation).round();
    let speed = scaled_speed(def.speed, plan.wave);

    let id = *next_enemy_id;
    *next_enemy_id += 1;

    world_setup::spawn_enemy(
        world,
        def,
        EnemySpawn {
            id,
            kind,
            wave: plan.wave,
            position: path.first().copied().unwrap_or_default(),
            path_index: 1.min(path.len()),
            health,
            speed,
        },
        now_ms,
    );
    debug!(enemy = id, kind = %kind, wave = plan.wave, health, "enemy spawned");

    Some(SimEvent::EnemySpawned {
        enemy_id: id,
        kind,
        wave: plan.wave,
    })
}

/// `min(5 + 2·wave, 40)`.
pub fn enemy_count(wave: u32) -> u32 {
    (WAVE_BASE_ENEMIES + WAVE_ENEMIES_PER_WAVE * wave).min(WAVE_MAX_ENEMIES)
}

/// `max(800 − 10·wave, 300)` ms.
pub fn spawn_interval_ms(wave: u32) -> f64 {
    (WAVE_BASE_INTERVAL_MS - WAVE_INTERVAL_STEP_MS * wave as f64).max(WAVE_MIN_INTERVAL_MS)
}

/// Enemy types a wave may draw from.
pub fn eligible_pool(wave: u32) -> Vec<EnemyKind> {
    let mut pool = vec![EnemyKind::Normal];
    if wave >= FAST_UNLOCK_WAVE {
        pool.push(EnemyKind::Fast);
    }
    if wave >= TANK_UNLOCK_WAVE {
        pool.push(EnemyKind::Tank);
    }
    if wave >= IMMUNE_UNLOCK_WAVE {
        pool.push(EnemyKind::Immune);
    }
    if wave >= REGEN_UNLOCK_WAVE {
        pool.push(EnemyKind::Regen);
    }
    if wave >= BOSS_UNLOCK_WAVE && wave % BOSS_WAVE_PERIOD == 0 {
        pool.push(EnemyKind::Boss);
        for threshold in BOSS_EXTRA_ENTRY_WAVES {
            if wave >= threshold {
                pool.push(EnemyKind::Boss);
            }
        }
    }
    pool
}

/// Base health grown for the wave (before random variation).
pub fn scaled_health(base: f64, wave: u32) -> f64 {
    if wave <= 1 {
        return base;
    }
    let w = wave as f64;
    base * (1.0 + (w - 1.0) * HEALTH_LINEAR_GROWTH + (w / 10.0).powi(2))
}

/// Base speed grown for waves past `SPEED_SCALING_START_WAVE`.
pub fn scaled_speed(base: f64, wave: u32) -> f64 {
    if wave <= SPEED_SCALING_START_WAVE {
        return base;
    }
    base * (1.0 + (wave - SPEED_SCALING_START_WAVE) as f64 * SPEED_GROWTH_PER_WAVE)
}
