//! Gold rules shared by the engine and the UI layer.

use crate::constants::*;

/// Bonus the UI grants when a wave batch clears.
pub fn wave_clear_bonus(wave: u32) -> u32 {
    WAVE_BONUS_BASE + WAVE_BONUS_PER_WAVE * wave
}

/// Gold returned when selling a tower with the given total investment.
pub fn sell_refund(invested: u32) -> u32 {
    invested * SELL_REFUND_PERCENT / 100
}
