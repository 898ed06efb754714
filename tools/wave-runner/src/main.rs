//! wave-runner: headless batch runner for the RAMPART simulation.
//!
//! Usage:
//!   wave-runner run --waves 10 --seed 7
//!   wave-runner run --waves 20 --catalog balance.toml --gold 300
//!   wave-runner catalog --catalog balance.toml

use std::path::PathBuf;
use std::process;

use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rampart_core::config::{Catalog, GridConfig};
use rampart_core::economy::wave_clear_bonus;
use rampart_core::enums::{GamePhase, TowerKind};
use rampart_core::events::SimEvent;
use rampart_sim::placement::path_tiles;
use rampart_sim::{SimConfig, SimulationEngine};

/// Tower kinds the auto-builder cycles through.
const BUILD_ORDER: [TowerKind; 4] = [
    TowerKind::Basic,
    TowerKind::Slow,
    TowerKind::Basic,
    TowerKind::Bomb,
];

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    waves_requested: u32,
    waves_cleared: u32,
    game_over: bool,
    ticks: u64,
    sim_seconds: f64,
    gold: u32,
    lives: u32,
    enemies_killed: u32,
    enemies_escaped: u32,
    towers: usize,
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "catalog" => cmd_catalog(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn print_usage() {
    eprintln!(
        "wave-runner: RAMPART headless wave simulation\n\
         \n\
         Commands:\n\
         \n\
         run       Simulate waves against an automatically built defense\n\
         \n\
           --waves <N>        Waves to play (default: 10)\n\
           --seed <N>         RNG seed (default: 42)\n\
           --gold <N>         Starting gold (default: 100)\n\
           --frame-ms <F>     Milliseconds per tick (default: 16.667)\n\
           --catalog <path>   TOML catalog overriding the built-in tables\n\
         \n\
         catalog   Print the effective catalog as JSON\n\
         \n\
           --catalog <path>   TOML catalog to load instead of the defaults\n\
         \n\
         Set RUST_LOG=debug for per-enemy logging.\n"
    );
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.windows(2)
        .find(|pair| pair[0] == flag)
        .and_then(|pair| pair[1].parse().ok())
}

fn load_catalog(args: &[String]) -> Catalog {
    let Some(path) = parse_flag::<PathBuf>(args, "--catalog") else {
        return Catalog::default();
    };
    match Catalog::load(&path) {
        Ok(catalog) => {
            info!(path = %path.display(), "catalog loaded");
            catalog
        }
        Err(e) => {
            eprintln!("Error loading catalog {}: {e}", path.display());
            process::exit(1);
        }
    }
}

// --- Catalog command ---

fn cmd_catalog(args: &[String]) {
    let catalog = load_catalog(args);
    match serde_json::to_string_pretty(&catalog) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing catalog: {e}");
            process::exit(1);
        }
    }
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let waves: u32 = parse_flag(args, "--waves").unwrap_or(10);
    let seed: u64 = parse_flag(args, "--seed").unwrap_or(42);
    let frame_ms: f64 = parse_flag(args, "--frame-ms").unwrap_or(1000.0 / 60.0);
    let defaults = SimConfig::default();
    let config = SimConfig {
        seed,
        starting_gold: parse_flag(args, "--gold").unwrap_or(defaults.starting_gold),
        catalog: load_catalog(args),
        ..defaults
    };
    let grid = config.grid;

    let mut engine = SimulationEngine::new(config);
    let sites = build_sites(&engine, &grid);
    info!(seed, waves, sites = sites.len(), "starting run");

    let mut next_site = 0;
    build(&mut engine, &sites, &mut next_site);

    let mut waves_cleared = 0;
    engine.queue_waves(1, None);

    while waves_cleared < waves {
        let snap = engine.tick(frame_ms);
        if snap.phase == GamePhase::GameOver {
            break;
        }
        for event in &snap.events {
            if let SimEvent::WaveBatchComplete { wave } = event {
                waves_cleared += 1;
                let bonus = wave_clear_bonus(*wave);
                engine.award_gold(bonus);
                info!(wave, bonus, gold = engine.economy().gold, "wave cleared");

                build(&mut engine, &sites, &mut next_site);
                if waves_cleared < waves {
                    engine.queue_waves(1, None);
                }
            }
        }
    }

    let economy = engine.economy();
    let summary = RunSummary {
        seed,
        waves_requested: waves,
        waves_cleared,
        game_over: engine.phase() == GamePhase::GameOver,
        ticks: engine.time().tick,
        sim_seconds: engine.time().now_ms / 1000.0,
        gold: economy.gold,
        lives: economy.lives,
        enemies_killed: economy.enemies_killed,
        enemies_escaped: economy.enemies_escaped,
        towers: engine.tower_count(),
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing summary: {e}");
            process::exit(1);
        }
    }
}

/// Free tiles bordering the path, walked in path order.
fn build_sites(engine: &SimulationEngine, grid: &GridConfig) -> Vec<(i32, i32)> {
    let blocked = path_tiles(engine.path(), grid);
    let mut sites = Vec::new();

    for point in engine.path() {
        let (px, py) = grid.tile_of(point);
        for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0), (-1, -1), (1, 1)] {
            let tile = (px + dx, py + dy);
            if grid.contains_tile(tile.0, tile.1)
                && !blocked.contains(&tile)
                && !sites.contains(&tile)
            {
                sites.push(tile);
            }
        }
    }
    sites
}

/// Spend gold: new towers while sites remain, then upgrades.
fn build(engine: &mut SimulationEngine, sites: &[(i32, i32)], next_site: &mut usize) {
    while *next_site < sites.len() {
        let (x, y) = sites[*next_site];
        let kind = BUILD_ORDER[engine.tower_count() % BUILD_ORDER.len()];
        match engine.place_tower(kind, x, y) {
            Ok(index) => {
                debug!(index, kind = %kind, x, y, "auto-placed tower");
                *next_site += 1;
            }
            Err(_) => return,
        }
    }

    for index in 0..engine.tower_count() {
        let Some(level) = engine.tower_level(index) else {
            continue;
        };
        if engine.upgrade_tower(index, level + 1).is_ok() {
            debug!(index, level = level + 1, "auto-upgraded tower");
        }
    }
}
