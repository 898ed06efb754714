//! Events emitted by the simulation for the UI and economy layer.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// New enemy entered the path.
    EnemySpawned {
        enemy_id: u32,
        kind: EnemyKind,
        wave: u32,
    },
    /// Enemy walked off the end of the path; one life lost.
    EnemyEscaped { enemy_id: u32, kind: EnemyKind },
    /// Enemy health reached zero; `reward` gold granted.
    EnemyKilled {
        enemy_id: u32,
        kind: EnemyKind,
        reward: u32,
    },
    /// Slow bounced off an immune enemy (visual cue only).
    SlowImmune { enemy_id: u32, position: Position },
    /// Tower fired a volley.
    TowerFired {
        tower_index: usize,
        kind: TowerKind,
        shots: u32,
    },
    /// Ballistic projectile detonated.
    Explosion { position: Position, radius: f64 },
    WaveStarted {
        wave: u32,
        enemy_count: u32,
        spawn_interval_ms: f64,
    },
    /// Every queued wave has spawned and been cleared. The UI grants
    /// `wave_clear_bonus(wave)` on this event.
    WaveBatchComplete { wave: u32 },
    /// The auto-start countdown elapsed and launched a wave.
    WaveAutoStarted { wave: u32 },
    /// Lives reached zero.
    GameOver { wave: u32 },
}
