//! Simulation constants and tuning parameters.

// --- Timing ---

/// Frame duration the per-frame speeds are tuned against (60 fps).
pub const BASELINE_FRAME_MS: f64 = 1000.0 / 60.0;

/// Upper bound on the frame multiplier applied to movement.
pub const MAX_TIME_SCALE: f64 = 3.0;

/// Default cap on a single tick's elapsed time (backgrounded tab, debugger pause).
pub const MAX_FRAME_MS: f64 = 100.0;

// --- Playfield ---

/// Tile edge length in pixels.
pub const TILE_SIZE: f64 = 40.0;

/// Default grid width in tiles.
pub const GRID_COLS: u32 = 20;

/// Default grid height in tiles.
pub const GRID_ROWS: u32 = 15;

/// Projectiles this far outside the playfield are discarded.
pub const OUT_OF_BOUNDS_MARGIN: f64 = 50.0;

// --- Economy ---

pub const STARTING_GOLD: u32 = 100;

pub const STARTING_LIVES: u32 = 20;

/// Percentage of total investment returned when a tower is sold.
pub const SELL_REFUND_PERCENT: u32 = 70;

/// Flat part of the wave-clear bonus.
pub const WAVE_BONUS_BASE: u32 = 20;

/// Per-wave part of the wave-clear bonus.
pub const WAVE_BONUS_PER_WAVE: u32 = 5;

// --- Waves ---

pub const WAVE_BASE_ENEMIES: u32 = 5;

pub const WAVE_ENEMIES_PER_WAVE: u32 = 2;

pub const WAVE_MAX_ENEMIES: u32 = 40;

/// Spawn interval of wave 0 (ms); shrinks by `WAVE_INTERVAL_STEP_MS` per wave.
pub const WAVE_BASE_INTERVAL_MS: f64 = 800.0;

pub const WAVE_INTERVAL_STEP_MS: f64 = 10.0;

pub const WAVE_MIN_INTERVAL_MS: f64 = 300.0;

pub const FAST_UNLOCK_WAVE: u32 = 3;

pub const TANK_UNLOCK_WAVE: u32 = 5;

pub const IMMUNE_UNLOCK_WAVE: u32 = 8;

pub const REGEN_UNLOCK_WAVE: u32 = 10;

pub const BOSS_UNLOCK_WAVE: u32 = 8;

/// Bosses only appear on waves that are a multiple of this.
pub const BOSS_WAVE_PERIOD: u32 = 5;

/// Waves at which an extra boss entry is added to the pool.
pub const BOSS_EXTRA_ENTRY_WAVES: [u32; 2] = [15, 25];

/// Per-wave linear health growth.
pub const HEALTH_LINEAR_GROWTH: f64 = 0.2;

/// Random health variation bounds.
pub const HEALTH_VARIATION_MIN: f64 = 0.85;

pub const HEALTH_VARIATION_MAX: f64 = 1.15;

/// Speed scaling starts after this wave.
pub const SPEED_SCALING_START_WAVE: u32 = 10;

pub const SPEED_GROWTH_PER_WAVE: f64 = 0.01;

// --- Enemies ---

/// Minimum time between regeneration ticks (ms).
pub const REGEN_INTERVAL_MS: f64 = 100.0;

// --- Towers ---

/// Upgrade tiers per tower type.
pub const MAX_TOWER_LEVEL: u8 = 3;

/// Turret slew rate (radians per second).
pub const TOWER_TURN_RATE: f64 = 10.0;

/// Angular step between multishot projectiles (radians).
pub const MULTISHOT_SPREAD: f64 = 0.2;

// --- Projectiles ---

/// Arc apex as a fraction of ballistic flight distance.
pub const ARC_HEIGHT_RATIO: f64 = 0.25;

pub const ARC_HEIGHT_MIN: f64 = 20.0;

pub const ARC_HEIGHT_MAX: f64 = 100.0;

/// Damage fraction lost between splash center and splash edge.
pub const SPLASH_FALLOFF: f64 = 0.7;
