//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::config::TowerStats;
use rampart_core::enums::*;
use rampart_core::events::SimEvent;
use rampart_core::state::*;
use rampart_core::types::{Position, SimTime};

use crate::economy::Economy;
use crate::systems::effects;
use crate::systems::projectiles::{arc_offset, flight_progress};
use crate::systems::wave_spawner::WaveScheduler;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    towers: &[Entity],
    scheduler: &WaveScheduler,
    economy: &Economy,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        enemies: build_enemies(world),
        towers: build_towers(world, towers),
        projectiles: build_projectiles(world),
        wave: WaveView {
            wave: scheduler.wave,
            in_progress: scheduler.in_progress,
            remaining: scheduler.remaining,
            pending: scheduler.pending,
            active_spawners: scheduler.timers.len(),
            countdown_ms: scheduler.countdown_remaining(time.now_ms),
        },
        economy: EconomyView {
            gold: economy.gold,
            lives: economy.lives,
            enemies_killed: economy.enemies_killed,
            enemies_escaped: economy.enemies_escaped,
        },
        events,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Position, &Health, &Speed, &Body, &PathCursor, &StatusEffects)>()
        .iter()
        .map(|(_, (enemy, pos, health, speed, body, cursor, status))| EnemyView {
            id: enemy.id,
            kind: enemy.kind,
            position: *pos,
            health: health.current,
            max_health: health.max,
            speed: speed.current,
            size: body.size,
            slowed: effects::is_slowed(status),
            path_index: cursor.index,
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_towers(world: &World, towers: &[Entity]) -> Vec<TowerView> {
    towers
        .iter()
        .enumerate()
        .filter_map(|(index, &entity)| {
            let mut query = world
                .query_one::<(&Tower, &Position, &TowerStats, &Turret)>(entity)
                .ok()?;
            let (tower, pos, stats, turret) = query.get()?;
            Some(TowerView {
                index,
                kind: tower.kind,
                level: tower.level,
                tile_x: tower.tile_x,
                tile_y: tower.tile_y,
                position: *pos,
                facing: turret.facing,
                range: stats.range,
                target: turret.target,
            })
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Flight, &Position)>()
        .iter()
        .map(|(_, (projectile, flight, pos))| {
            let (kind, height) = match flight {
                Flight::Homing { .. } => (FlightKind::Homing, 0.0),
                Flight::Piercing { .. } => (FlightKind::Piercing, 0.0),
                Flight::Ballistic {
                    duration,
                    elapsed,
                    arc_height,
                    ..
                } => (
                    FlightKind::Ballistic,
                    arc_offset(*arc_height, flight_progress(*elapsed, *duration)),
                ),
            };
            ProjectileView {
                source: projectile.source,
                flight: kind,
                position: *pos,
                height,
                size: projectile.size,
                color: projectile.color.clone(),
            }
        })
        .collect()
}
