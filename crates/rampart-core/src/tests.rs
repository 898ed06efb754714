use crate::commands::PlayerCommand;
use crate::config::*;
use crate::economy::{sell_refund, wave_clear_bonus};
use crate::enums::*;
use crate::error::ConfigError;
use crate::events::SimEvent;
use crate::types::{Position, SimTime};

// ---- Types ----

#[test]
fn test_position_range_and_bearing() {
    let a = Position::new(0.0, 0.0);
    let b = Position::new(3.0, 4.0);
    assert!((a.range_to(&b) - 5.0).abs() < 1e-12);
    // Straight down the screen is +PI/2.
    let down = a.bearing_to(&Position::new(0.0, 10.0));
    assert!((down - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn test_time_scale_is_capped() {
    let mut time = SimTime::default();
    time.advance(1000.0 / 60.0);
    assert!((time.time_scale() - 1.0).abs() < 1e-9);

    time.advance(500.0);
    assert!((time.time_scale() - 3.0).abs() < 1e-12, "spikes cap at 3x");
    assert_eq!(time.tick, 2);
    assert!((time.now_ms - (1000.0 / 60.0 + 500.0)).abs() < 1e-9);
}

// ---- Catalog ----

#[test]
fn test_default_catalog_covers_every_kind() {
    let catalog = Catalog::default();
    for kind in EnemyKind::ALL {
        assert!(catalog.enemy(kind).is_some(), "missing enemy {kind}");
    }
    for kind in TowerKind::ALL {
        let def = catalog.tower(kind).expect("tower def");
        assert_eq!(def.max_level(), 3, "{kind} should have 3 tiers");
    }
    assert_eq!(catalog.enemy(EnemyKind::Normal).unwrap().reward, 10);
    assert!(catalog.enemy(EnemyKind::Immune).unwrap().immune_to_slow);
    assert!(catalog.enemy(EnemyKind::Regen).unwrap().regeneration_rate > 0.0);
}

#[test]
fn test_upgrade_tiers_apply_cumulatively() {
    let catalog = Catalog::default();
    let basic = catalog.tower(TowerKind::Basic).unwrap();

    let base = basic.stats_at(0);
    assert_eq!(base.damage, 10.0);
    assert_eq!(base.multishot, 1);
    assert_eq!(base.fire_rate, 500.0);

    let l2 = basic.stats_at(2);
    assert_eq!(l2.damage, 20.0);
    assert_eq!(l2.multishot, 2);
    assert_eq!(l2.fire_rate, 500.0);

    let l3 = basic.stats_at(3);
    assert_eq!(l3.multishot, 3);
    assert!((l3.fire_rate - 400.0).abs() < 1e-9);

    // Range bonuses add up across tiers.
    let slow = catalog.tower(TowerKind::Slow).unwrap();
    assert_eq!(slow.stats_at(3).range, 130.0);
    assert_eq!(slow.stats_at(3).slow_factor, Some(0.2));
}

#[test]
fn test_flight_kind_follows_stats() {
    let catalog = Catalog::default();
    let sniper = catalog.tower(TowerKind::Sniper).unwrap();
    assert_eq!(sniper.stats_at(2).flight_kind(), FlightKind::Homing);
    assert_eq!(sniper.stats_at(3).flight_kind(), FlightKind::Piercing);
    assert_eq!(sniper.stats_at(3).pierce, 3);

    let bomb = catalog.tower(TowerKind::Bomb).unwrap();
    assert_eq!(bomb.stats_at(0).flight_kind(), FlightKind::Ballistic);
}

#[test]
fn test_upgrade_cost_sums_skipped_tiers() {
    let catalog = Catalog::default();
    let basic = catalog.tower(TowerKind::Basic).unwrap();
    assert_eq!(basic.upgrade_cost(0, 1), 40);
    assert_eq!(basic.upgrade_cost(0, 3), 40 + 80 + 150);
    assert_eq!(basic.upgrade_cost(1, 3), 80 + 150);
    assert_eq!(basic.upgrade_cost(2, 2), 0);
}

#[test]
fn test_catalog_from_toml() {
    let text = r##"
        [enemies.normal]
        health = 40.0
        speed = 1.5
        size = 9.0
        reward = 7

        [towers.basic]
        cost = 30
        damage = 8.0
        range = 100.0
        fire_rate = 400.0
        projectile_speed = 5.0
        projectile_size = 3.0
        projectile_color = "#ffffff"

        [[towers.basic.upgrades]]
        cost = 20
        deltas = [{ stat = "damage", value = 12.0 }, { stat = "multishot", value = 2 }]
    "##;
    let catalog = Catalog::from_toml_str(text).unwrap();

    let normal = catalog.enemy(EnemyKind::Normal).unwrap();
    assert_eq!(normal.reward, 7);
    assert!(!normal.immune_to_slow);
    assert!(catalog.enemy(EnemyKind::Boss).is_none());

    let basic = catalog.tower(TowerKind::Basic).unwrap();
    assert_eq!(basic.stats_at(1).damage, 12.0);
    assert_eq!(basic.stats_at(1).multishot, 2);
    assert!(catalog.tower(TowerKind::Bomb).is_none());
}

#[test]
fn test_catalog_rejects_too_many_tiers() {
    let text = r##"
        [towers.basic]
        cost = 30
        damage = 8.0
        range = 100.0
        fire_rate = 400.0
        projectile_speed = 5.0
        projectile_size = 3.0
        projectile_color = "#ffffff"
        upgrades = [
            { cost = 1, deltas = [] },
            { cost = 1, deltas = [] },
            { cost = 1, deltas = [] },
            { cost = 1, deltas = [] },
        ]
    "##;
    let err = Catalog::from_toml_str(text).unwrap_err();
    assert!(matches!(err, ConfigError::TooManyTiers { tiers: 4, .. }));
}

#[test]
fn test_unknown_kind_keys() {
    assert_eq!("sniper".parse::<TowerKind>().unwrap(), TowerKind::Sniper);
    assert_eq!("regen".parse::<EnemyKind>().unwrap(), EnemyKind::Regen);
    let err = "laser".parse::<TowerKind>().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownType(ref k) if k == "laser"));
}

// ---- Grid ----

#[test]
fn test_grid_tiles() {
    let grid = GridConfig::default();
    assert_eq!(grid.width(), 800.0);
    assert_eq!(grid.height(), 600.0);
    assert!(grid.contains_tile(0, 0));
    assert!(grid.contains_tile(19, 14));
    assert!(!grid.contains_tile(20, 0));
    assert!(!grid.contains_tile(-1, 3));

    let center = grid.tile_center(2, 3);
    assert_eq!(center, Position::new(100.0, 140.0));
    assert_eq!(grid.tile_of(&center), (2, 3));

    assert!(grid.in_bounds(&Position::new(-40.0, 10.0), 50.0));
    assert!(!grid.in_bounds(&Position::new(-60.0, 10.0), 50.0));
}

#[test]
fn test_default_path_spans_the_grid() {
    let path = default_path();
    assert!(path.len() >= 2);
    assert_eq!(path[0].x, 0.0);
    assert_eq!(path.last().unwrap().x, 800.0);
}

// ---- Economy ----

#[test]
fn test_economy_rules() {
    assert_eq!(wave_clear_bonus(1), 25);
    assert_eq!(wave_clear_bonus(10), 70);
    assert_eq!(sell_refund(50), 35);
    assert_eq!(sell_refund(175), 122);
}

// ---- Serde ----

#[test]
fn test_command_wire_format() {
    let json = r#"{"type":"PlaceTower","kind":"bomb","tile_x":3,"tile_y":4}"#;
    let cmd: PlayerCommand = serde_json::from_str(json).unwrap();
    assert!(matches!(
        cmd,
        PlayerCommand::PlaceTower {
            kind: TowerKind::Bomb,
            tile_x: 3,
            tile_y: 4
        }
    ));

    let bad = r#"{"type":"PlaceTower","kind":"laser","tile_x":3,"tile_y":4}"#;
    assert!(serde_json::from_str::<PlayerCommand>(bad).is_err());
}

#[test]
fn test_event_serializes_with_tag() {
    let event = SimEvent::EnemyKilled {
        enemy_id: 4,
        kind: EnemyKind::Tank,
        reward: 25,
    };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains(r#""type":"EnemyKilled""#));
    assert!(json.contains(r#""kind":"tank""#));
    let back: SimEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}
