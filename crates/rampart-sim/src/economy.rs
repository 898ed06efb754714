//! Gold and lives, mutated by kill/escape events and player purchases.
//!
//! Stored in `SimulationEngine`, NOT as ECS entities.

use rampart_core::events::SimEvent;

/// Running economy state tracked by the engine.
#[derive(Debug, Clone, Default)]
pub struct Economy {
    pub gold: u32,
    pub lives: u32,
    pub enemies_killed: u32,
    pub enemies_escaped: u32,
}

impl Economy {
    pub fn new(gold: u32, lives: u32) -> Self {
        Self {
            gold,
            lives,
            ..Default::default()
        }
    }

    /// Apply the economic effect of an event. Returns true if the event
    /// removed an enemy from play.
    pub fn apply(&mut self, event: &SimEvent) -> bool {
        match event {
            SimEvent::EnemyKilled { reward, .. } => {
                self.gold += reward;
                self.enemies_killed += 1;
                true
            }
            SimEvent::EnemyEscaped { .. } => {
                self.lives = self.lives.saturating_sub(1);
                self.enemies_escaped += 1;
                true
            }
            _ => false,
        }
    }

    /// Deduct `cost` if affordable.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        if self.gold < cost {
            return false;
        }
        self.gold -= cost;
        true
    }

    pub fn is_defeated(&self) -> bool {
        self.lives == 0
    }
}
