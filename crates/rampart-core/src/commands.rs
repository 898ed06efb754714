//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Callers that
//! need the outcome (placement success, upgrade cost, refund) use the engine's
//! direct methods instead.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Waves ---
    /// Queue `count` waves; the first starts now if nothing is spawning.
    QueueWaves { count: u32 },

    // --- Towers ---
    PlaceTower {
        kind: TowerKind,
        tile_x: i32,
        tile_y: i32,
    },
    UpgradeTower { tower_index: usize, target_level: u8 },
    SellTower { tower_index: usize },

    // --- Map ---
    /// Replace the enemy path; refused while a wave is active.
    SetPath { points: Vec<Position> },

    // --- Simulation control ---
    ResetGame,
    Pause,
    Resume,
}
