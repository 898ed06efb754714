//! Simulation engine for RAMPART.
//!
//! Owns the hecs ECS world, advances waves, enemies, towers and projectiles
//! on the caller's clock, and produces GameStateSnapshots for the frontend.

pub mod economy;
pub mod engine;
pub mod placement;
pub mod systems;
pub mod world_setup;

pub use rampart_core as core;
pub use engine::{SimConfig, SimulationEngine, UpgradeReceipt};
