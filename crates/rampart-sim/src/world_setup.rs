//! Entity spawn factories.
//!
//! Creates enemy, tower and projectile entities with the appropriate
//! component bundles. Stat resolution (wave scaling, upgrade tiers) happens
//! in the callers; these functions only assemble components.

use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::config::{EnemyDef, TowerStats};
use rampart_core::enums::*;
use rampart_core::types::Position;

/// Stats of one enemy after wave scaling.
#[derive(Debug, Clone, Copy)]
pub struct EnemySpawn {
    pub id: u32,
    pub kind: EnemyKind,
    pub wave: u32,
    pub position: Position,
    /// Index of the first path point to walk toward.
    pub path_index: usize,
    pub health: f64,
    pub speed: f64,
}

/// Spawn an enemy entity.
pub fn spawn_enemy(world: &mut World, def: &EnemyDef, spawn: EnemySpawn, now_ms: f64) -> Entity {
    let entity = world.spawn((
        Enemy {
            id: spawn.id,
            kind: spawn.kind,
            wave: spawn.wave,
        },
        spawn.position,
        Health {
            current: spawn.health,
            max: spawn.health,
        },
        Speed {
            base: spawn.speed,
            current: spawn.speed,
        },
        PathCursor {
            index: spawn.path_index,
        },
        Body { size: def.size },
        Bounty { reward: def.reward },
        StatusEffects::default(),
    ));

    if def.immune_to_slow {
        let _ = world.insert_one(entity, SlowImmunity);
    }
    if def.regeneration_rate > 0.0 {
        let _ = world.insert_one(
            entity,
            Regeneration {
                rate: def.regeneration_rate,
                last_tick_ms: now_ms,
            },
        );
    }

    entity
}

/// Spawn a tower entity at the center of its tile.
pub fn spawn_tower(
    world: &mut World,
    kind: TowerKind,
    tile: (i32, i32),
    position: Position,
    stats: TowerStats,
    cost: u32,
) -> Entity {
    world.spawn((
        Tower {
            kind,
            level: 0,
            tile_x: tile.0,
            tile_y: tile.1,
            invested: cost,
        },
        position,
        stats,
        Turret::default(),
    ))
}

/// Everything needed to put one projectile in flight.
#[derive(Debug, Clone)]
pub struct Launch {
    pub source: TowerKind,
    pub origin: Position,
    pub target_id: u32,
    pub target_position: Position,
    /// Point this shot of the volley is aimed at.
    pub aim_point: Position,
    pub stats: TowerStats,
}

/// Spawn a projectile entity for a launch.
pub fn spawn_projectile(world: &mut World, launch: Launch) -> Entity {
    let stats = &launch.stats;
    let slow = stats.slow_factor.map(|factor| SlowPayload {
        factor,
        duration_ms: stats.slow_duration,
    });
    let aim_offset = launch.aim_point.to_vec() - launch.target_position.to_vec();
    let launch_range = launch.origin.range_to(&launch.target_position);

    let flight = match stats.flight_kind() {
        FlightKind::Ballistic => {
            let distance = launch.origin.range_to(&launch.aim_point);
            let duration = if stats.projectile_speed > 0.0 {
                distance / stats.projectile_speed
            } else {
                0.0
            };
            Flight::Ballistic {
                origin: launch.origin,
                impact: launch.aim_point,
                duration,
                elapsed: 0.0,
                arc_height: arc_height(distance),
                splash_radius: stats.splash_radius,
            }
        }
        FlightKind::Piercing => Flight::Piercing {
            aim_offset,
            launch_range,
            budget: stats.pierce,
            hits: Vec::new(),
            heading: None,
        },
        FlightKind::Homing => Flight::Homing {
            aim_offset,
            launch_range,
        },
    };

    world.spawn((
        Projectile {
            source: launch.source,
            damage: stats.damage,
            speed: stats.projectile_speed,
            size: stats.projectile_size,
            color: stats.projectile_color.clone(),
            slow,
            target: Some(launch.target_id),
            aim: launch.aim_point,
        },
        launch.origin,
        flight,
    ))
}

/// Apex height of a ballistic arc over `distance`.
pub fn arc_height(distance: f64) -> f64 {
    use rampart_core::constants::{ARC_HEIGHT_MAX, ARC_HEIGHT_MIN, ARC_HEIGHT_RATIO};
    (distance * ARC_HEIGHT_RATIO).clamp(ARC_HEIGHT_MIN, ARC_HEIGHT_MAX)
}
