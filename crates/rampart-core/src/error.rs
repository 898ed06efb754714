//! Error types returned by collaborator-facing operations.
//!
//! None of these are fatal to the simulation: they surface as `Err` values
//! and the tick loop keeps running.

use thiserror::Error;

use crate::enums::TowerKind;

/// Failure to load or resolve configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown type key `{0}`")]
    UnknownType(String),
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{kind} defines {tiers} upgrade tiers, at most {max} are allowed")]
    TooManyTiers {
        kind: TowerKind,
        tiers: usize,
        max: usize,
    },
}

/// Why a tower could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("tile ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },
    #[error("tile ({x}, {y}) lies on the enemy path")]
    OnPath { x: i32, y: i32 },
    #[error("tile ({x}, {y}) already has a tower")]
    Occupied { x: i32, y: i32 },
    #[error("tower type `{0}` is not in the catalog")]
    UnknownType(TowerKind),
    #[error("placing costs {cost} gold, only {available} available")]
    InsufficientGold { cost: u32, available: u32 },
}

/// Why a tower upgrade was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpgradeError {
    #[error("no tower at index {0}")]
    NoSuchTower(usize),
    #[error("tower is already at level {current}, cannot move to {requested}")]
    NotAnUpgrade { current: u8, requested: u8 },
    #[error("level {requested} exceeds the {max} available tiers")]
    LevelOutOfRange { requested: u8, max: u8 },
    #[error("upgrade costs {cost} gold, only {available} available")]
    InsufficientGold { cost: u32, available: u32 },
    #[error("tower type `{0}` is not in the catalog")]
    UnknownType(TowerKind),
}

/// Why a tower lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TowerError {
    #[error("no tower at index {0}")]
    NoSuchTower(usize),
}

/// Why the path could not be replaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path must contain at least one point")]
    Empty,
    #[error("cannot change the path while a wave is active or enemies are alive")]
    WaveActive,
}
