//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for read-only).
//! Cross-tick bookkeeping (wave counters, gold) lives in the engine; systems
//! report what happened through `SimEvent`s.

pub mod cleanup;
pub mod effects;
pub mod fire_control;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
pub mod wave_spawner;

use hecs::{Entity, World};

use rampart_core::components::{Body, Enemy};
use rampart_core::types::Position;

/// Position and size of a live enemy, sampled at a point in the tick.
#[derive(Debug, Clone, Copy)]
pub struct EnemySample {
    pub id: u32,
    pub entity: Entity,
    pub position: Position,
    pub size: f64,
}

/// Live enemies in spawn order. This is the iteration order every system
/// uses, so ties (equal distance, simultaneous contact) resolve to the
/// oldest enemy.
pub fn enemy_roster(world: &World) -> Vec<EnemySample> {
    let mut roster: Vec<EnemySample> = world
        .query::<(&Enemy, &Position, &Body)>()
        .iter()
        .map(|(entity, (enemy, pos, body))| EnemySample {
            id: enemy.id,
            entity,
            position: *pos,
            size: body.size,
        })
        .collect();
    roster.sort_by_key(|s| s.id);
    roster
}
