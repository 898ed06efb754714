//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player intents,
//! runs all systems in a fixed order, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::{HashSet, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use rampart_core::commands::PlayerCommand;
use rampart_core::components::{Enemy, Tower};
use rampart_core::config::{self, Catalog, GridConfig, TowerStats};
use rampart_core::constants::{MAX_FRAME_MS, MAX_TOWER_LEVEL, STARTING_GOLD, STARTING_LIVES};
use rampart_core::economy::sell_refund;
use rampart_core::enums::{GamePhase, TowerKind};
use rampart_core::error::{PathError, PlacementError, TowerError, UpgradeError};
use rampart_core::events::SimEvent;
use rampart_core::state::GameStateSnapshot;
use rampart_core::types::{Position, SimTime};

use crate::economy::Economy;
use crate::placement;
use crate::systems;
use crate::systems::wave_spawner::WaveScheduler;
use crate::world_setup;

/// Invoked once when a queued batch of waves has fully cleared, with the
/// batch's last wave number.
pub type CompletionHook = Box<dyn FnOnce(u32) + Send>;

/// Invoked each time the countdown auto-starts a wave.
pub type AutoStartHook = Box<dyn FnMut(u32) + Send>;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Per-tick cap on elapsed time.
    pub max_frame_ms: f64,
    pub starting_gold: u32,
    pub starting_lives: u32,
    /// Delay before the next wave starts on its own after a batch clears.
    /// `None` disables auto-start.
    pub auto_start_delay_ms: Option<f64>,
    pub grid: GridConfig,
    pub path: Vec<Position>,
    pub catalog: Catalog,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_frame_ms: MAX_FRAME_MS,
            starting_gold: STARTING_GOLD,
            starting_lives: STARTING_LIVES,
            auto_start_delay_ms: None,
            grid: GridConfig::default(),
            path: config::default_path(),
            catalog: Catalog::default(),
        }
    }
}

/// Outcome of a successful upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeReceipt {
    pub level: u8,
    pub cost: u32,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    path: Vec<Position>,
    path_tiles: HashSet<(i32, i32)>,
    /// Tower entities in placement order; the index is the tower's handle.
    towers: Vec<Entity>,
    next_enemy_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    scheduler: WaveScheduler,
    economy: Economy,
    completion_hook: Option<CompletionHook>,
    auto_start_hook: Option<AutoStartHook>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let path = config.path.clone();
        let path_tiles = placement::path_tiles(&path, &config.grid);
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            path,
            path_tiles,
            towers: Vec::new(),
            next_enemy_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            scheduler: WaveScheduler::default(),
            economy: Economy::new(config.starting_gold, config.starting_lives),
            completion_hook: None,
            auto_start_hook: None,
            config,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `elapsed_ms` (capped) and return the
    /// resulting snapshot.
    pub fn tick(&mut self, elapsed_ms: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            // A non-finite frame would poison the clock for good.
            let dt = if elapsed_ms.is_finite() {
                elapsed_ms.clamp(0.0, self.config.max_frame_ms)
            } else {
                warn!(elapsed_ms, "non-finite frame time, treating as 0");
                0.0
            };
            self.time.advance(dt);
            self.run_systems();
        }

        self.snapshot()
    }

    /// Build a snapshot without advancing time. Drains pending events.
    pub fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.towers,
            &self.scheduler,
            &self.economy,
            events,
        )
    }

    // --- Waves ---

    /// Queue `count` waves. `on_all_complete` replaces any hook stored by an
    /// earlier call; only the latest one fires when the batch clears.
    pub fn queue_waves(&mut self, count: u32, on_all_complete: Option<CompletionHook>) {
        if self.phase == GamePhase::GameOver {
            warn!(count, "waves queued after game over, ignoring");
            return;
        }
        if let Some(hook) = on_all_complete {
            if self.completion_hook.replace(hook).is_some() {
                debug!("completion hook replaced before it fired");
            }
        }
        self.scheduler
            .queue(count, self.time.now_ms, &mut self.events);
    }

    /// Start the next wave right away, regardless of the queue.
    pub fn start_next_wave(&mut self) -> u32 {
        self.scheduler
            .start_next_wave(self.time.now_ms, &mut self.events)
    }

    /// Hook called whenever the countdown auto-starts a wave.
    pub fn set_auto_start_hook(&mut self, hook: AutoStartHook) {
        self.auto_start_hook = Some(hook);
    }

    // --- Towers ---

    /// Build a tower on a tile. Returns its index.
    pub fn place_tower(
        &mut self,
        kind: TowerKind,
        tile_x: i32,
        tile_y: i32,
    ) -> Result<usize, PlacementError> {
        let grid = self.config.grid;
        if !grid.contains_tile(tile_x, tile_y) {
            return Err(PlacementError::OutOfBounds {
                x: tile_x,
                y: tile_y,
            });
        }
        if self.path_tiles.contains(&(tile_x, tile_y)) {
            return Err(PlacementError::OnPath {
                x: tile_x,
                y: tile_y,
            });
        }
        if self.tower_at(tile_x, tile_y).is_some() {
            return Err(PlacementError::Occupied {
                x: tile_x,
                y: tile_y,
            });
        }
        let Some(def) = self.config.catalog.tower(kind) else {
            warn!(kind = %kind, "tower type missing from catalog");
            return Err(PlacementError::UnknownType(kind));
        };
        if !self.economy.try_spend(def.cost) {
            return Err(PlacementError::InsufficientGold {
                cost: def.cost,
                available: self.economy.gold,
            });
        }

        let entity = world_setup::spawn_tower(
            &mut self.world,
            kind,
            (tile_x, tile_y),
            grid.tile_center(tile_x, tile_y),
            def.stats_at(0),
            def.cost,
        );
        self.towers.push(entity);
        debug!(kind = %kind, tile_x, tile_y, cost = def.cost, "tower placed");
        Ok(self.towers.len() - 1)
    }

    /// Raise a tower to `target_level`, paying for every tier in between.
    pub fn upgrade_tower(
        &mut self,
        tower_index: usize,
        target_level: u8,
    ) -> Result<UpgradeReceipt, UpgradeError> {
        let entity = *self
            .towers
            .get(tower_index)
            .ok_or(UpgradeError::NoSuchTower(tower_index))?;
        let tower = *self
            .world
            .get::<&Tower>(entity)
            .map_err(|_| UpgradeError::NoSuchTower(tower_index))?;

        let Some(def) = self.config.catalog.tower(tower.kind) else {
            warn!(kind = %tower.kind, "tower type missing from catalog");
            return Err(UpgradeError::UnknownType(tower.kind));
        };
        let max = def.max_level().min(MAX_TOWER_LEVEL);
        if target_level > max {
            return Err(UpgradeError::LevelOutOfRange {
                requested: target_level,
                max,
            });
        }
        if target_level <= tower.level {
            return Err(UpgradeError::NotAnUpgrade {
                current: tower.level,
                requested: target_level,
            });
        }

        let cost = def.upgrade_cost(tower.level, target_level);
        if !self.economy.try_spend(cost) {
            return Err(UpgradeError::InsufficientGold {
                cost,
                available: self.economy.gold,
            });
        }

        let stats = def.stats_at(target_level);
        if let Ok((t, s)) = self
            .world
            .query_one_mut::<(&mut Tower, &mut TowerStats)>(entity)
        {
            t.level = target_level;
            t.invested += cost;
            *s = stats;
        }
        debug!(tower = tower_index, level = target_level, cost, "tower upgraded");
        Ok(UpgradeReceipt {
            level: target_level,
            cost,
        })
    }

    /// Remove a tower and refund part of its investment. Later towers shift
    /// down one index.
    pub fn sell_tower(&mut self, tower_index: usize) -> Result<u32, TowerError> {
        if tower_index >= self.towers.len() {
            return Err(TowerError::NoSuchTower(tower_index));
        }
        let entity = self.towers.remove(tower_index);
        let invested = self
            .world
            .get::<&Tower>(entity)
            .map(|t| t.invested)
            .unwrap_or(0);
        let _ = self.world.despawn(entity);

        let refund = sell_refund(invested);
        self.economy.gold += refund;
        debug!(tower = tower_index, refund, "tower sold");
        Ok(refund)
    }

    // --- Map ---

    /// Replace the enemy path. Only allowed between waves with the field clear.
    pub fn set_path(&mut self, points: Vec<Position>) -> Result<(), PathError> {
        if points.is_empty() {
            return Err(PathError::Empty);
        }
        if self.scheduler.in_progress || self.scheduler.is_spawning() || self.enemy_count() > 0 {
            return Err(PathError::WaveActive);
        }
        self.path_tiles = placement::path_tiles(&points, &self.config.grid);
        self.path = points;
        Ok(())
    }

    // --- Game control ---

    /// Start over: wave 0, no entities, starting gold and lives, timers and
    /// hooks dropped.
    pub fn reset_game(&mut self) {
        self.world.clear();
        self.towers.clear();
        self.despawn_buffer.clear();
        self.events.clear();
        self.scheduler.reset();
        self.economy = Economy::new(self.config.starting_gold, self.config.starting_lives);
        self.completion_hook = None;
        self.next_enemy_id = 0;
        self.phase = GamePhase::Active;
        info!("game reset");
    }

    /// Credit gold from outside the simulation (e.g. the wave-clear bonus).
    pub fn award_gold(&mut self, amount: u32) {
        self.economy.gold += amount;
    }

    // --- Accessors ---

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn scheduler(&self) -> &WaveScheduler {
        &self.scheduler
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn tower_count(&self) -> usize {
        self.towers.len()
    }

    pub fn tower_entity(&self, tower_index: usize) -> Option<Entity> {
        self.towers.get(tower_index).copied()
    }

    pub fn tower_level(&self, tower_index: usize) -> Option<u8> {
        let entity = self.tower_entity(tower_index)?;
        self.world.get::<&Tower>(entity).ok().map(|t| t.level)
    }

    /// Number of live enemies.
    pub fn enemy_count(&self) -> usize {
        self.world.query::<&Enemy>().iter().count()
    }

    /// Mutable world access for tests that stage exact scenarios.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn has_completion_hook(&self) -> bool {
        self.completion_hook.is_some()
    }

    /// Allocate an enemy id for test-staged enemies.
    #[cfg(test)]
    pub fn allocate_enemy_id(&mut self) -> u32 {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        id
    }

    fn tower_at(&self, tile_x: i32, tile_y: i32) -> Option<usize> {
        self.towers.iter().position(|&entity| {
            self.world
                .get::<&Tower>(entity)
                .map(|t| t.tile_x == tile_x && t.tile_y == tile_y)
                .unwrap_or(false)
        })
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::QueueWaves { count } => self.queue_waves(count, None),
            PlayerCommand::PlaceTower {
                kind,
                tile_x,
                tile_y,
            } => {
                if let Err(err) = self.place_tower(kind, tile_x, tile_y) {
                    warn!(error = %err, "place tower rejected");
                }
            }
            PlayerCommand::UpgradeTower {
                tower_index,
                target_level,
            } => {
                if let Err(err) = self.upgrade_tower(tower_index, target_level) {
                    warn!(error = %err, "upgrade rejected");
                }
            }
            PlayerCommand::SellTower { tower_index } => {
                if let Err(err) = self.sell_tower(tower_index) {
                    warn!(error = %err, "sell rejected");
                }
            }
            PlayerCommand::SetPath { points } => {
                if let Err(err) = self.set_path(points) {
                    warn!(error = %err, "path change rejected");
                }
            }
            PlayerCommand::ResetGame => self.reset_game(),
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now_ms = self.time.now_ms;

        // 1. Auto-start countdown
        if let Some(wave) = self
            .scheduler
            .tick_countdown(now_ms, false, &mut self.events)
        {
            if let Some(hook) = self.auto_start_hook.as_mut() {
                hook(wave);
            }
        }
        // 2. Wave spawning
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.scheduler,
            &self.config.catalog,
            &self.path,
            &mut self.next_enemy_id,
            now_ms,
            &mut self.events,
        );
        // 3. Enemy regeneration, effects, movement
        let mark = self.events.len();
        systems::movement::run(&mut self.world, &self.path, &self.time, &mut self.events);
        self.settle(mark);
        // 4. Tower targeting and firing
        systems::fire_control::run(&mut self.world, &self.towers, &self.time, &mut self.events);
        // 5. Projectile flight and collision
        let mark = self.events.len();
        systems::projectiles::run(
            &mut self.world,
            &self.config.grid,
            &self.time,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        self.settle(mark);
        // 6. Wave completion
        if self.phase == GamePhase::Active {
            self.check_wave_completion();
        }
    }

    /// Apply economy effects of enemy removals reported since `mark`.
    fn settle(&mut self, mark: usize) {
        let mut removed = 0;
        for event in &self.events[mark..] {
            if self.economy.apply(event) {
                removed += 1;
            }
        }
        for _ in 0..removed {
            self.scheduler.enemy_removed();
        }

        if self.phase == GamePhase::Active && self.economy.is_defeated() {
            self.phase = GamePhase::GameOver;
            self.scheduler.countdown_until_ms = None;
            info!(wave = self.scheduler.wave, "game over");
            self.events.push(SimEvent::GameOver {
                wave: self.scheduler.wave,
            });
        }
    }

    fn check_wave_completion(&mut self) {
        let alive = self.enemy_count();
        let Some(wave) = self.scheduler.check_completion(
            alive,
            self.time.now_ms,
            self.config.auto_start_delay_ms,
        ) else {
            return;
        };

        info!(wave, "wave batch complete");
        self.events.push(SimEvent::WaveBatchComplete { wave });
        if let Some(hook) = self.completion_hook.take() {
            hook(wave);
        }
    }
}
