//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Enemy archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    #[default]
    Normal,
    Fast,
    Tank,
    Boss,
    /// Ignores slow effects.
    Immune,
    /// Heals over time.
    Regen,
}

/// Tower archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    #[default]
    Basic,
    Sniper,
    Slow,
    Bomb,
}

/// Kind of a transient enemy modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Speed multiplier below 1.0.
    Slow,
}

/// How a projectile travels and resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightKind {
    /// Homes on the live target position, consumed on first hit.
    Homing,
    /// Homes until first hit, then damages up to a budget of distinct enemies.
    Piercing,
    /// Fixed arc to the launch-time target position, splashes on arrival.
    Ballistic,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
    GameOver,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 6] = [
        EnemyKind::Normal,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Boss,
        EnemyKind::Immune,
        EnemyKind::Regen,
    ];

    pub fn key(self) -> &'static str {
        match self {
            EnemyKind::Normal => "normal",
            EnemyKind::Fast => "fast",
            EnemyKind::Tank => "tank",
            EnemyKind::Boss => "boss",
            EnemyKind::Immune => "immune",
            EnemyKind::Regen => "regen",
        }
    }
}

impl TowerKind {
    pub const ALL: [TowerKind; 4] = [
        TowerKind::Basic,
        TowerKind::Sniper,
        TowerKind::Slow,
        TowerKind::Bomb,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TowerKind::Basic => "basic",
            TowerKind::Sniper => "sniper",
            TowerKind::Slow => "slow",
            TowerKind::Bomb => "bomb",
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for TowerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EnemyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnemyKind::ALL
            .into_iter()
            .find(|k| k.key() == s)
            .ok_or_else(|| ConfigError::UnknownType(s.to_string()))
    }
}

impl FromStr for TowerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TowerKind::ALL
            .into_iter()
            .find(|k| k.key() == s)
            .ok_or_else(|| ConfigError::UnknownType(s.to_string()))
    }
}
