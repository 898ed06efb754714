//! Status effects on enemies.
//!
//! Slow stacking rule: the strongest multiplier and the latest expiry win
//! independently, so re-applying a weaker but longer slow extends the
//! current one without weakening it.

use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::enums::EffectKind;
use rampart_core::events::SimEvent;
use rampart_core::types::Position;

/// Apply a slow to an enemy. Immune enemies only produce a visual event.
pub fn apply_slow(
    world: &mut World,
    entity: Entity,
    slow: SlowPayload,
    now_ms: f64,
    events: &mut Vec<SimEvent>,
) {
    if world.get::<&SlowImmunity>(entity).is_ok() {
        if let Ok((enemy, pos)) = world.query_one_mut::<(&Enemy, &Position)>(entity) {
            events.push(SimEvent::SlowImmune {
                enemy_id: enemy.id,
                position: *pos,
            });
        }
        return;
    }

    let Ok((effects, speed)) = world.query_one_mut::<(&mut StatusEffects, &mut Speed)>(entity)
    else {
        return;
    };

    let expires_at_ms = now_ms + slow.duration_ms;
    match effects
        .effects
        .iter_mut()
        .find(|e| e.kind == EffectKind::Slow)
    {
        Some(existing) => {
            existing.magnitude = existing.magnitude.min(slow.factor);
            existing.expires_at_ms = existing.expires_at_ms.max(expires_at_ms);
        }
        None => effects.effects.push(StatusEffect {
            kind: EffectKind::Slow,
            magnitude: slow.factor,
            expires_at_ms,
        }),
    }

    speed.current = speed.current.min(speed.base * slow.factor);
}

/// Drop effects whose expiry has passed and restore speed accordingly.
pub fn expire(effects: &mut StatusEffects, speed: &mut Speed, now_ms: f64) {
    let before = effects.effects.len();
    effects.effects.retain(|e| now_ms <= e.expires_at_ms);
    if effects.effects.len() != before {
        speed.current = speed.base * slow_multiplier(effects);
    }
}

/// Combined speed multiplier of the active slows (1.0 when none).
pub fn slow_multiplier(effects: &StatusEffects) -> f64 {
    effects
        .effects
        .iter()
        .filter(|e| e.kind == EffectKind::Slow)
        .map(|e| e.magnitude)
        .fold(1.0, f64::min)
}

pub fn is_slowed(effects: &StatusEffects) -> bool {
    effects.effects.iter().any(|e| e.kind == EffectKind::Slow)
}
