//! Rounding, cost reduction and success-rate formulas.

use super::constants::*;

/// Game rounding: floor for positive values, ceil otherwise.
///
/// Both branches move toward zero, so this is truncation. It is kept as a
/// named function because step and cost boundaries depend on it exactly.
pub fn toram_round(value: f64) -> f64 {
    if value > 0.0 {
        value.floor()
    } else {
        value.ceil()
    }
}

/// [`toram_round`] narrowed to an integer step or potential count.
pub fn toram_round_i32(value: f64) -> i32 {
    toram_round(value) as i32
}

/// Material cost multiplier from proficiency and the reduction passive.
///
/// Clamped at zero: very high proficiency would otherwise make costs negative.
pub fn cost_reduction(proficiency: u32, material_reduction: bool) -> f64 {
    let discount =
        proficiency / PROFICIENCY_MINOR_DIVISOR + proficiency / PROFICIENCY_MAJOR_DIVISOR;
    let mut percent = 100.0 - discount as f64;
    if material_reduction {
        percent *= MATERIAL_REDUCTION_MULTIPLIER;
    }
    (percent / 100.0).max(0.0)
}

/// Percent of potential refunded when normal-range steps are removed.
pub fn potential_return(technique: u32) -> f64 {
    BASE_POTENTIAL_RETURN + technique as f64 / TECHNIQUE_RETURN_DIVISOR
}

/// Percent of potential refunded when bonus-range steps are removed.
pub fn bonus_potential_return(technique: u32) -> f64 {
    potential_return(technique) / BONUS_RETURN_DIVISOR
}

/// Success estimate for moving from `current` to `future` potential.
pub fn success_rate(current_potential: i32, future_potential: i32, recipe_threshold: i32) -> i32 {
    let previous = current_potential.max(recipe_threshold) as f64;
    let rate = SUCCESS_RATE_BASE + future_potential as f64 * SUCCESS_RATE_SCALE / previous;
    toram_round_i32(rate.clamp(0.0, 100.0))
}

/// Display band for a success rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessTier {
    High,
    Medium,
    Low,
}

impl SuccessTier {
    pub fn from_rate(rate: i32) -> Self {
        if rate >= SUCCESS_TIER_HIGH {
            SuccessTier::High
        } else if rate >= SUCCESS_TIER_MEDIUM {
            SuccessTier::Medium
        } else {
            SuccessTier::Low
        }
    }
}
