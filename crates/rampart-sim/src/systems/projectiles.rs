//! Projectile flight and collision.
//!
//! Homing and piercing projectiles chase the live position of their target;
//! ballistic projectiles fly a fixed arc to where the target was at launch
//! and splash on arrival (or on earlier contact).

use std::collections::HashMap;

use glam::DVec2;
use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::config::GridConfig;
use rampart_core::constants::{OUT_OF_BOUNDS_MARGIN, SPLASH_FALLOFF};
use rampart_core::events::SimEvent;
use rampart_core::types::{Position, SimTime};

use crate::systems::{cleanup, effects, enemy_roster, EnemySample};

/// Advance every projectile, then despawn the spent ones.
pub fn run(
    world: &mut World,
    grid: &GridConfig,
    time: &SimTime,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let roster = enemy_roster(world);
    let by_id: HashMap<u32, EnemySample> = roster.iter().map(|s| (s.id, *s)).collect();

    let projectiles: Vec<Entity> = world
        .query::<&Projectile>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    for entity in projectiles {
        let (mut projectile, mut flight, mut pos) =
            match world.query_one_mut::<(&Projectile, &Flight, &Position)>(entity) {
                Ok((p, f, pos)) => (p.clone(), f.clone(), *pos),
                Err(_) => continue,
            };

        let target = projectile
            .target
            .and_then(|id| by_id.get(&id))
            .filter(|s| world.contains(s.entity))
            .copied();
        let step = projectile.speed * time.time_scale();

        let spent = match &mut flight {
            Flight::Homing {
                aim_offset,
                launch_range,
            } => {
                if let Some(target) = target {
                    projectile.aim = converge(&target.position, *aim_offset, *launch_range, &pos);
                }
                let arrived = move_toward(&mut pos, &projectile.aim, step);
                match first_contact(world, &roster, &pos, projectile.size, &[]) {
                    Some(hit) => {
                        strike(world, hit.entity, projectile.damage, projectile.slow, time.now_ms, events);
                        true
                    }
                    // Target gone and its last known point reached.
                    None => arrived && target.is_none(),
                }
            }
            Flight::Piercing {
                aim_offset,
                launch_range,
                budget,
                hits,
                heading,
            } => {
                let direction = match *heading {
                    Some(h) => h,
                    None => {
                        if let Some(target) = target {
                            projectile.aim =
                                converge(&target.position, *aim_offset, *launch_range, &pos);
                        }
                        (projectile.aim.to_vec() - pos.to_vec()).normalize_or_zero()
                    }
                };

                let expired = if heading.is_some() {
                    pos = Position::from_vec(pos.to_vec() + direction * step);
                    direction == DVec2::ZERO
                } else {
                    let arrived = move_toward(&mut pos, &projectile.aim, step);
                    if arrived && target.is_none() {
                        // Keep flying along the last direction of travel.
                        *heading = Some(direction);
                    }
                    arrived && target.is_none() && direction == DVec2::ZERO
                };

                let mut exhausted = false;
                while let Some(hit) = first_contact(world, &roster, &pos, projectile.size, hits) {
                    strike(world, hit.entity, projectile.damage, projectile.slow, time.now_ms, events);
                    hits.push(hit.id);
                    if heading.is_none() {
                        *heading = Some(direction);
                    }
                    if hits.len() as u32 >= *budget {
                        exhausted = true;
                        break;
                    }
                }
                expired || exhausted
            }
            Flight::Ballistic {
                origin,
                impact,
                duration,
                elapsed,
                arc_height,
                splash_radius,
            } => {
                *elapsed += time.time_scale();
                let progress = flight_progress(*elapsed, *duration);
                pos = Position::from_vec(origin.to_vec().lerp(impact.to_vec(), progress));

                let detonation = if progress >= 1.0 {
                    Some(*impact)
                } else {
                    let height = arc_offset(*arc_height, progress);
                    let lifted = Position::new(pos.x, pos.y - height);
                    first_contact(world, &roster, &lifted, projectile.size, &[]).map(|_| pos)
                };

                match detonation {
                    Some(center) => {
                        splash(
                            world,
                            &roster,
                            &center,
                            *splash_radius,
                            projectile.damage,
                            projectile.slow,
                            time.now_ms,
                            events,
                        );
                        events.push(SimEvent::Explosion {
                            position: center,
                            radius: *splash_radius,
                        });
                        true
                    }
                    None => false,
                }
            }
        };

        if spent || !grid.in_bounds(&pos, OUT_OF_BOUNDS_MARGIN) {
            despawn_buffer.push(entity);
            continue;
        }

        if let Ok((p, f, position)) =
            world.query_one_mut::<(&mut Projectile, &mut Flight, &mut Position)>(entity)
        {
            *p = projectile;
            *f = flight;
            *position = pos;
        }
    }

    cleanup::run(world, despawn_buffer);
}

/// Apply damage (and a slow, if the enemy survives). Returns true on a kill.
pub fn strike(
    world: &mut World,
    entity: Entity,
    damage: f64,
    slow: Option<SlowPayload>,
    now_ms: f64,
    events: &mut Vec<SimEvent>,
) -> bool {
    let killed = match world.query_one_mut::<&mut Health>(entity) {
        Ok(health) => {
            health.current -= damage;
            health.current <= 0.0
        }
        Err(_) => return false,
    };

    if killed {
        cleanup::kill_enemy(world, entity, events);
    } else if let Some(slow) = slow {
        effects::apply_slow(world, entity, slow, now_ms, events);
    }
    killed
}

/// Damage every live enemy within `radius` of `center`, with linear falloff.
#[allow(clippy::too_many_arguments)]
pub fn splash(
    world: &mut World,
    roster: &[EnemySample],
    center: &Position,
    radius: f64,
    damage: f64,
    slow: Option<SlowPayload>,
    now_ms: f64,
    events: &mut Vec<SimEvent>,
) {
    for sample in roster {
        if !world.contains(sample.entity) {
            continue;
        }
        let distance = center.range_to(&sample.position);
        if distance > radius {
            continue;
        }
        strike(
            world,
            sample.entity,
            splash_damage(damage, distance, radius),
            slow,
            now_ms,
            events,
        );
    }
}

/// Full damage at the center, `1 - SPLASH_FALLOFF` of it at the edge.
pub fn splash_damage(damage: f64, distance: f64, radius: f64) -> f64 {
    if radius <= 0.0 {
        return damage;
    }
    damage * (1.0 - (distance / radius) * SPLASH_FALLOFF)
}

/// Fraction of a ballistic flight completed, clamped to [0, 1].
pub fn flight_progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

/// Height above the ground track at `progress` for an arc peaking at `apex`.
pub fn arc_offset(apex: f64, progress: f64) -> f64 {
    4.0 * apex * progress * (1.0 - progress)
}

/// First live enemy (roster order) whose body overlaps the projectile,
/// skipping ids in `exclude`.
fn first_contact(
    world: &World,
    roster: &[EnemySample],
    pos: &Position,
    projectile_size: f64,
    exclude: &[u32],
) -> Option<EnemySample> {
    roster
        .iter()
        .filter(|s| !exclude.contains(&s.id))
        .filter(|s| world.contains(s.entity))
        .find(|s| pos.range_to(&s.position) <= projectile_size + s.size)
        .copied()
}

/// Step toward `aim`; returns true when the aim point is reached.
fn move_toward(pos: &mut Position, aim: &Position, step: f64) -> bool {
    let delta = aim.to_vec() - pos.to_vec();
    let distance = delta.length();
    if distance <= step {
        *pos = *aim;
        true
    } else {
        *pos = Position::from_vec(pos.to_vec() + delta / distance * step);
        false
    }
}

/// Aim point for a fanned shot: the target plus an offset that shrinks in
/// proportion to the remaining distance.
fn converge(target: &Position, offset: DVec2, launch_range: f64, pos: &Position) -> Position {
    if launch_range <= 0.0 {
        return *target;
    }
    let remaining = (pos.range_to(target) / launch_range).min(1.0);
    Position::from_vec(target.to_vec() + offset * remaining)
}
