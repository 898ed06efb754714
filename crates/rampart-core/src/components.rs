//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Marks an entity as an enemy and carries its stable identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    /// Spawn-ordered identity; never reused within a session.
    pub id: u32,
    pub kind: EnemyKind,
    /// Wave this enemy was spawned by.
    pub wave: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

/// Movement speed in pixels per 60 fps frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Speed {
    pub base: f64,
    /// Base speed after active slow effects.
    pub current: f64,
}

/// Index of the path point the enemy is walking toward.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PathCursor {
    pub index: usize,
}

/// Collision radius in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub size: f64,
}

/// Gold granted when the enemy is killed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounty {
    pub reward: u32,
}

/// Passive healing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Regeneration {
    /// Health per second.
    pub rate: f64,
    /// Clock time of the last applied heal.
    pub last_tick_ms: f64,
}

/// Marks an enemy that slow effects cannot touch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlowImmunity;

/// A transient modifier on an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: EffectKind,
    /// Speed multiplier for `Slow`.
    pub magnitude: f64,
    pub expires_at_ms: f64,
}

/// Active effects; holds at most one effect per kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusEffects {
    pub effects: Vec<StatusEffect>,
}

/// A placed tower.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tower {
    pub kind: TowerKind,
    /// 0 = unupgraded. Never decreases.
    pub level: u8,
    pub tile_x: i32,
    pub tile_y: i32,
    /// Gold spent on placement and upgrades.
    pub invested: u32,
}

/// Aiming and firing state of a tower.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Turret {
    /// Facing angle in radians.
    pub facing: f64,
    /// Clock time of the last volley, `None` before the first shot.
    pub last_fired_ms: Option<f64>,
    /// Enemy id currently targeted.
    pub target: Option<u32>,
}

/// Slow carried by a projectile and applied on hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlowPayload {
    pub factor: f64,
    pub duration_ms: f64,
}

/// Damage and targeting data of an in-flight projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub source: TowerKind,
    pub damage: f64,
    /// Pixels per 60 fps frame.
    pub speed: f64,
    pub size: f64,
    pub color: String,
    pub slow: Option<SlowPayload>,
    /// Enemy id the projectile was fired at.
    pub target: Option<u32>,
    /// Last known aim point; used once the target is gone.
    pub aim: Position,
}

/// Flight model state of a projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Flight {
    Homing {
        /// Fan-out offset added to the target position; shrinks to zero
        /// as the projectile closes in.
        aim_offset: DVec2,
        /// Distance to the target at launch.
        launch_range: f64,
    },
    Piercing {
        aim_offset: DVec2,
        launch_range: f64,
        /// Distinct enemies that may be hit.
        budget: u32,
        /// Enemy ids already damaged.
        hits: Vec<u32>,
        /// Locked after the first hit.
        heading: Option<DVec2>,
    },
    Ballistic {
        origin: Position,
        impact: Position,
        /// Flight time in 60 fps frames.
        duration: f64,
        /// Frames elapsed since launch.
        elapsed: f64,
        arc_height: f64,
        splash_radius: f64,
    },
}
