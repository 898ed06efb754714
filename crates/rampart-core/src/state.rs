//! Game state snapshot: the complete visible state sent to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Position, SimTime};

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub wave: WaveView,
    pub economy: EconomyView,
    pub events: Vec<SimEvent>,
}

/// A live enemy, in spawn order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub speed: f64,
    pub size: f64,
    pub slowed: bool,
    pub path_index: usize,
}

/// A placed tower, in placement order (the index used by upgrade/sell).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub index: usize,
    pub kind: TowerKind,
    pub level: u8,
    pub tile_x: i32,
    pub tile_y: i32,
    pub position: Position,
    pub facing: f64,
    pub range: f64,
    pub target: Option<u32>,
}

/// An in-flight projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub source: TowerKind,
    pub flight: FlightKind,
    pub position: Position,
    /// Visual height above the ground track (ballistic only).
    pub height: f64,
    pub size: f64,
    pub color: String,
}

/// Wave scheduler status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub wave: u32,
    pub in_progress: bool,
    /// Enemies alive plus enemies still to spawn.
    pub remaining: i64,
    /// Queued waves not yet started.
    pub pending: u32,
    pub active_spawners: usize,
    /// Milliseconds until the next wave auto-starts, if armed.
    pub countdown_ms: Option<f64>,
}

/// Gold and lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomyView {
    pub gold: u32,
    pub lives: u32,
    pub enemies_killed: u32,
    pub enemies_escaped: u32,
}
