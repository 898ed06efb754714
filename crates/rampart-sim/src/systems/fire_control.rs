//! Fire control system: target acquisition, turret slew, and volley launch.

use std::f64::consts::{PI, TAU};

use glam::DVec2;
use hecs::{Entity, World};

use rampart_core::components::{Tower, Turret};
use rampart_core::config::TowerStats;
use rampart_core::constants::{MULTISHOT_SPREAD, TOWER_TURN_RATE};
use rampart_core::events::SimEvent;
use rampart_core::types::{Position, SimTime};

use crate::systems::{enemy_roster, EnemySample};
use crate::world_setup::{self, Launch};

/// Run fire control for every tower, in placement order.
pub fn run(world: &mut World, towers: &[Entity], time: &SimTime, events: &mut Vec<SimEvent>) {
    let roster = enemy_roster(world);
    let mut launches: Vec<Launch> = Vec::new();

    for (index, &entity) in towers.iter().enumerate() {
        let Ok((tower, pos, stats, turret)) =
            world.query_one_mut::<(&Tower, &Position, &TowerStats, &mut Turret)>(entity)
        else {
            continue;
        };

        let target = acquire_target(pos, stats.range, &roster);
        turret.target = target.map(|t| t.id);

        let Some(target) = target else {
            continue;
        };

        let bearing = pos.bearing_to(&target.position);
        turret.facing = slew(turret.facing, bearing, TOWER_TURN_RATE * time.dt_secs());

        let ready = match turret.last_fired_ms {
            Some(last) => time.now_ms - last >= stats.fire_rate,
            None => true,
        };
        if !ready {
            continue;
        }
        turret.last_fired_ms = Some(time.now_ms);

        let shots = stats.multishot.max(1);
        for aim_point in volley_aim_points(pos, &target.position, turret.facing, shots) {
            launches.push(Launch {
                source: tower.kind,
                origin: *pos,
                target_id: target.id,
                target_position: target.position,
                aim_point,
                stats: stats.clone(),
            });
        }
        events.push(SimEvent::TowerFired {
            tower_index: index,
            kind: tower.kind,
            shots,
        });
    }

    for launch in launches {
        world_setup::spawn_projectile(world, launch);
    }
}

/// Nearest enemy within `range`. Strict comparison keeps the first of equally
/// distant enemies in roster (spawn) order.
pub fn acquire_target(
    tower_pos: &Position,
    range: f64,
    roster: &[EnemySample],
) -> Option<EnemySample> {
    let mut best: Option<(f64, EnemySample)> = None;
    for candidate in roster {
        let distance = tower_pos.range_to(&candidate.position);
        if distance > range {
            continue;
        }
        match best {
            Some((best_distance, _)) if distance >= best_distance => {}
            _ => best = Some((distance, *candidate)),
        }
    }
    best.map(|(_, sample)| sample)
}

/// Turn from `facing` toward `desired` by at most `max_step`, the short way round.
pub fn slew(facing: f64, desired: f64, max_step: f64) -> f64 {
    let diff = wrap_angle(desired - facing);
    wrap_angle(facing + diff.clamp(-max_step, max_step))
}

/// Normalize an angle into (-PI, PI].
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Angular offsets for a volley, `MULTISHOT_SPREAD` apart and centered on zero.
pub fn spread_offsets(shots: u32) -> Vec<f64> {
    let center = (shots as f64 - 1.0) / 2.0;
    (0..shots)
        .map(|i| (i as f64 - center) * MULTISHOT_SPREAD)
        .collect()
}

/// One aim point per shot, fanned around the turret's facing at the
/// target's distance from the tower.
pub fn volley_aim_points(
    tower: &Position,
    target: &Position,
    facing: f64,
    shots: u32,
) -> Vec<Position> {
    let distance = tower.range_to(target);
    spread_offsets(shots)
        .into_iter()
        .map(|offset| {
            let arm = DVec2::from_angle(facing + offset) * distance;
            Position::from_vec(tower.to_vec() + arm)
        })
        .collect()
}
