//! Removal of enemies and projectiles.
//!
//! Enemies are despawned the moment they die or escape so that later
//! systems in the same tick see them as gone. Projectiles are collected in a
//! buffer and despawned after the projectile pass.

use hecs::{Entity, World};
use tracing::debug;

use rampart_core::components::{Bounty, Enemy};
use rampart_core::events::SimEvent;

/// Despawn a dead enemy and report the kill. Returns false if the entity was
/// already gone.
pub fn kill_enemy(world: &mut World, entity: Entity, events: &mut Vec<SimEvent>) -> bool {
    let (enemy, reward) = match world.query_one_mut::<(&Enemy, &Bounty)>(entity) {
        Ok((enemy, bounty)) => (*enemy, bounty.reward),
        Err(_) => return false,
    };
    let _ = world.despawn(entity);
    debug!(enemy = enemy.id, kind = %enemy.kind, reward, "enemy killed");
    events.push(SimEvent::EnemyKilled {
        enemy_id: enemy.id,
        kind: enemy.kind,
        reward,
    });
    true
}

/// Despawn an enemy that ran off the end of the path.
pub fn escape_enemy(world: &mut World, entity: Entity, events: &mut Vec<SimEvent>) -> bool {
    let enemy = match world.get::<&Enemy>(entity) {
        Ok(enemy) => *enemy,
        Err(_) => return false,
    };
    let _ = world.despawn(entity);
    debug!(enemy = enemy.id, kind = %enemy.kind, "enemy escaped");
    events.push(SimEvent::EnemyEscaped {
        enemy_id: enemy.id,
        kind: enemy.kind,
    });
    true
}

/// Despawn buffered entities. Entities already removed are ignored.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
