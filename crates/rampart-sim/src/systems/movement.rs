//! Enemy advance: regeneration, slow expiry, path following, death check.
//!
//! Speeds are in pixels per 60 fps frame and scaled by the tick's capped
//! frame multiplier.

use hecs::World;

use rampart_core::components::*;
use rampart_core::constants::REGEN_INTERVAL_MS;
use rampart_core::events::SimEvent;
use rampart_core::types::{Position, SimTime};

use crate::systems::{cleanup, effects, enemy_roster};

/// What happened to one enemy during its advance.
enum Outcome {
    Alive,
    Escaped,
    Dead,
}

/// Advance every live enemy, in spawn order.
pub fn run(world: &mut World, path: &[Position], time: &SimTime, events: &mut Vec<SimEvent>) {
    let now_ms = time.now_ms;
    let time_scale = time.time_scale();

    for sample in enemy_roster(world) {
        let outcome = {
            let Ok((pos, health, speed, cursor, status, regen)) = world.query_one_mut::<(
                &mut Position,
                &mut Health,
                &mut Speed,
                &mut PathCursor,
                &mut StatusEffects,
                Option<&mut Regeneration>,
            )>(sample.entity) else {
                continue;
            };

            if let Some(regen) = regen {
                regenerate(health, regen, now_ms);
            }

            effects::expire(status, speed, now_ms);

            if advance_along_path(pos, cursor, speed.current * time_scale, path) {
                Outcome::Escaped
            } else if health.current <= 0.0 {
                Outcome::Dead
            } else {
                Outcome::Alive
            }
        };

        match outcome {
            Outcome::Alive => {}
            Outcome::Escaped => {
                cleanup::escape_enemy(world, sample.entity, events);
            }
            Outcome::Dead => {
                cleanup::kill_enemy(world, sample.entity, events);
            }
        }
    }
}

/// Heal at most every `REGEN_INTERVAL_MS`, crediting the whole time since the
/// last heal.
fn regenerate(health: &mut Health, regen: &mut Regeneration, now_ms: f64) {
    if regen.rate <= 0.0 || health.current <= 0.0 {
        return;
    }
    let since = now_ms - regen.last_tick_ms;
    if since < REGEN_INTERVAL_MS {
        return;
    }
    health.current = (health.current + regen.rate * since / 1000.0).min(health.max);
    regen.last_tick_ms = now_ms;
}

/// Move toward the current path point. Snaps to the point and advances the
/// cursor when it is within this tick's step. Returns true once the cursor
/// has run past the final point (including an empty path).
pub fn advance_along_path(
    pos: &mut Position,
    cursor: &mut PathCursor,
    step: f64,
    path: &[Position],
) -> bool {
    let Some(target) = path.get(cursor.index) else {
        return true;
    };

    let delta = target.to_vec() - pos.to_vec();
    let distance = delta.length();

    if distance <= step {
        *pos = *target;
        cursor.index += 1;
        cursor.index >= path.len()
    } else {
        *pos = Position::from_vec(pos.to_vec() + delta / distance * step);
        false
    }
}
