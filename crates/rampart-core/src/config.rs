//! Enemy and tower definitions, upgrade tiers, and the playfield grid.
//!
//! The built-in `Catalog::default()` is the stock game. A catalog can also be
//! loaded from TOML; kinds missing from a loaded catalog are treated as
//! unknown types by the engine (logged and skipped).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{EnemyKind, FlightKind, TowerKind};
use crate::error::ConfigError;
use crate::types::Position;

/// Base stats for one enemy archetype, before wave scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDef {
    pub health: f64,
    /// Pixels per 60 fps frame.
    pub speed: f64,
    pub size: f64,
    pub reward: u32,
    #[serde(default)]
    pub immune_to_slow: bool,
    /// Health per second, 0 for none.
    #[serde(default)]
    pub regeneration_rate: f64,
}

/// One stat change applied by an upgrade tier.
///
/// Replacing variants overwrite the running value; `RangeBonus` adds to it and
/// `FireRateMultiplier` replaces the multiplier applied to the base fire rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stat", content = "value", rename_all = "snake_case")]
pub enum StatDelta {
    Damage(f64),
    RangeBonus(f64),
    FireRateMultiplier(f64),
    Multishot(u32),
    Pierce(u32),
    SplashRadius(f64),
    SlowFactor(f64),
    SlowDuration(f64),
}

/// An ordered upgrade step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeTier {
    pub cost: u32,
    pub deltas: Vec<StatDelta>,
}

/// Base stats and upgrade path for one tower archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerDef {
    pub cost: u32,
    pub damage: f64,
    pub range: f64,
    /// Milliseconds between shots.
    pub fire_rate: f64,
    /// Pixels per 60 fps frame.
    pub projectile_speed: f64,
    pub projectile_size: f64,
    pub projectile_color: String,
    #[serde(default)]
    pub splash_radius: f64,
    #[serde(default)]
    pub slow_factor: Option<f64>,
    #[serde(default)]
    pub slow_duration: f64,
    #[serde(default)]
    pub upgrades: Vec<UpgradeTier>,
}

/// Fully resolved combat stats of a tower at a given level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    pub damage: f64,
    pub range: f64,
    pub fire_rate: f64,
    pub projectile_speed: f64,
    pub projectile_size: f64,
    pub projectile_color: String,
    pub multishot: u32,
    /// Distinct enemies a projectile may hit; 0 means not piercing.
    pub pierce: u32,
    pub splash_radius: f64,
    pub slow_factor: Option<f64>,
    pub slow_duration: f64,
}

/// Playfield tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub cols: u32,
    pub rows: u32,
    pub tile_size: f64,
}

/// All enemy and tower definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub enemies: BTreeMap<EnemyKind, EnemyDef>,
    #[serde(default)]
    pub towers: BTreeMap<TowerKind, TowerDef>,
}

impl TowerDef {
    /// Apply upgrade tiers `1..=level` in order on top of the base stats.
    pub fn stats_at(&self, level: u8) -> TowerStats {
        let mut stats = TowerStats {
            damage: self.damage,
            range: self.range,
            fire_rate: self.fire_rate,
            projectile_speed: self.projectile_speed,
            projectile_size: self.projectile_size,
            projectile_color: self.projectile_color.clone(),
            multishot: 1,
            pierce: 0,
            splash_radius: self.splash_radius,
            slow_factor: self.slow_factor,
            slow_duration: self.slow_duration,
        };
        let mut fire_rate_multiplier = 1.0;

        for tier in self.upgrades.iter().take(level as usize) {
            for delta in &tier.deltas {
                match *delta {
                    StatDelta::Damage(v) => stats.damage = v,
                    StatDelta::RangeBonus(v) => stats.range += v,
                    StatDelta::FireRateMultiplier(v) => fire_rate_multiplier = v,
                    StatDelta::Multishot(v) => stats.multishot = v.max(1),
                    StatDelta::Pierce(v) => stats.pierce = v,
                    StatDelta::SplashRadius(v) => stats.splash_radius = v,
                    StatDelta::SlowFactor(v) => stats.slow_factor = Some(v),
                    StatDelta::SlowDuration(v) => stats.slow_duration = v,
                }
            }
        }

        stats.fire_rate = self.fire_rate * fire_rate_multiplier;
        stats
    }

    /// Gold needed to go from `from` to `to` (exclusive of `from`'s own tier).
    pub fn upgrade_cost(&self, from: u8, to: u8) -> u32 {
        self.upgrades
            .iter()
            .skip(from as usize)
            .take(to.saturating_sub(from) as usize)
            .map(|t| t.cost)
            .sum()
    }

    /// Highest reachable level.
    pub fn max_level(&self) -> u8 {
        self.upgrades.len().min(MAX_TOWER_LEVEL as usize) as u8
    }
}

impl TowerStats {
    pub fn flight_kind(&self) -> FlightKind {
        if self.splash_radius > 0.0 {
            FlightKind::Ballistic
        } else if self.pierce > 0 {
            FlightKind::Piercing
        } else {
            FlightKind::Homing
        }
    }
}

impl GridConfig {
    pub fn width(&self) -> f64 {
        self.cols as f64 * self.tile_size
    }

    pub fn height(&self) -> f64 {
        self.rows as f64 * self.tile_size
    }

    pub fn contains_tile(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.cols && (y as u32) < self.rows
    }

    pub fn tile_center(&self, x: i32, y: i32) -> Position {
        Position::new(
            (x as f64 + 0.5) * self.tile_size,
            (y as f64 + 0.5) * self.tile_size,
        )
    }

    pub fn tile_of(&self, pos: &Position) -> (i32, i32) {
        (
            (pos.x / self.tile_size).floor() as i32,
            (pos.y / self.tile_size).floor() as i32,
        )
    }

    /// Whether a point lies within the playfield expanded by `margin` on every side.
    pub fn in_bounds(&self, pos: &Position, margin: f64) -> bool {
        pos.x >= -margin
            && pos.y >= -margin
            && pos.x <= self.width() + margin
            && pos.y <= self.height() + margin
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: GRID_COLS,
            rows: GRID_ROWS,
            tile_size: TILE_SIZE,
        }
    }
}

impl Catalog {
    /// Parse a catalog from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let catalog: Catalog = toml::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read and parse a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn enemy(&self, kind: EnemyKind) -> Option<&EnemyDef> {
        self.enemies.get(&kind)
    }

    pub fn tower(&self, kind: TowerKind) -> Option<&TowerDef> {
        self.towers.get(&kind)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (kind, def) in &self.towers {
            if def.upgrades.len() > MAX_TOWER_LEVEL as usize {
                return Err(ConfigError::TooManyTiers {
                    kind: *kind,
                    tiers: def.upgrades.len(),
                    max: MAX_TOWER_LEVEL as usize,
                });
            }
        }
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let mut enemies = BTreeMap::new();
        enemies.insert(EnemyKind::Normal, enemy(50.0, 1.0, 10.0, 10));
        enemies.insert(EnemyKind::Fast, enemy(30.0, 2.0, 8.0, 15));
        enemies.insert(EnemyKind::Tank, enemy(200.0, 0.5, 14.0, 25));
        enemies.insert(EnemyKind::Boss, enemy(1000.0, 0.4, 20.0, 100));
        enemies.insert(
            EnemyKind::Immune,
            EnemyDef {
                immune_to_slow: true,
                ..enemy(80.0, 1.0, 10.0, 20)
            },
        );
        enemies.insert(
            EnemyKind::Regen,
            EnemyDef {
                regeneration_rate: 5.0,
                ..enemy(100.0, 0.9, 11.0, 20)
            },
        );

        let mut towers = BTreeMap::new();
        towers.insert(
            TowerKind::Basic,
            TowerDef {
                upgrades: vec![
                    tier(40, vec![StatDelta::Damage(15.0)]),
                    tier(80, vec![StatDelta::Damage(20.0), StatDelta::Multishot(2)]),
                    tier(
                        150,
                        vec![
                            StatDelta::Damage(25.0),
                            StatDelta::Multishot(3),
                            StatDelta::FireRateMultiplier(0.8),
                        ],
                    ),
                ],
                ..tower(50, 10.0, 120.0, 500.0, 6.0, 4.0, "#ffd700")
            },
        );
        towers.insert(
            TowerKind::Sniper,
            TowerDef {
                upgrades: vec![
                    tier(80, vec![StatDelta::Damage(80.0)]),
                    tier(150, vec![StatDelta::Damage(120.0), StatDelta::RangeBonus(50.0)]),
                    tier(250, vec![StatDelta::Damage(150.0), StatDelta::Pierce(3)]),
                ],
                ..tower(100, 50.0, 250.0, 1500.0, 12.0, 3.0, "#ff4444")
            },
        );
        towers.insert(
            TowerKind::Slow,
            TowerDef {
                slow_factor: Some(0.5),
                slow_duration: 2000.0,
                upgrades: vec![
                    tier(60, vec![StatDelta::SlowFactor(0.4)]),
                    tier(
                        100,
                        vec![StatDelta::SlowFactor(0.3), StatDelta::SlowDuration(3000.0)],
                    ),
                    tier(
                        180,
                        vec![
                            StatDelta::SlowFactor(0.2),
                            StatDelta::SlowDuration(4000.0),
                            StatDelta::RangeBonus(30.0),
                        ],
                    ),
                ],
                ..tower(75, 5.0, 100.0, 800.0, 5.0, 5.0, "#44aaff")
            },
        );
        towers.insert(
            TowerKind::Bomb,
            TowerDef {
                splash_radius: 60.0,
                upgrades: vec![
                    tier(100, vec![StatDelta::Damage(45.0), StatDelta::SplashRadius(75.0)]),
                    tier(180, vec![StatDelta::Damage(60.0), StatDelta::SplashRadius(90.0)]),
                    tier(
                        300,
                        vec![
                            StatDelta::Damage(90.0),
                            StatDelta::SplashRadius(110.0),
                            StatDelta::FireRateMultiplier(0.75),
                        ],
                    ),
                ],
                ..tower(150, 30.0, 150.0, 2000.0, 4.0, 6.0, "#ff8800")
            },
        );

        Self { enemies, towers }
    }
}

fn enemy(health: f64, speed: f64, size: f64, reward: u32) -> EnemyDef {
    EnemyDef {
        health,
        speed,
        size,
        reward,
        immune_to_slow: false,
        regeneration_rate: 0.0,
    }
}

fn tower(
    cost: u32,
    damage: f64,
    range: f64,
    fire_rate: f64,
    projectile_speed: f64,
    projectile_size: f64,
    color: &str,
) -> TowerDef {
    TowerDef {
        cost,
        damage,
        range,
        fire_rate,
        projectile_speed,
        projectile_size,
        projectile_color: color.to_string(),
        splash_radius: 0.0,
        slow_factor: None,
        slow_duration: 0.0,
        upgrades: Vec::new(),
    }
}

fn tier(cost: u32, deltas: Vec<StatDelta>) -> UpgradeTier {
    UpgradeTier { cost, deltas }
}

/// Default serpentine path across the 20×15 grid, through tile centers.
pub fn default_path() -> Vec<Position> {
    let t = TILE_SIZE;
    let c = |tx: f64, ty: f64| Position::new((tx + 0.5) * t, (ty + 0.5) * t);
    vec![
        Position::new(0.0, 2.5 * t),
        c(4.0, 2.0),
        c(4.0, 7.0),
        c(10.0, 7.0),
        c(10.0, 2.0),
        c(15.0, 2.0),
        c(15.0, 11.0),
        c(6.0, 11.0),
        c(6.0, 13.0),
        Position::new(GRID_COLS as f64 * t, 13.5 * t),
    ]
}
