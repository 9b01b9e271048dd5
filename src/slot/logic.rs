//! Value/step conversion, material cost and potential change for one slot.

use crate::catalog::{EnhancementOption, ItemKind};
use crate::core::constants::{BONUS_STEPS, MAX_STEPS};
use crate::core::decimal::Decimal;
use crate::core::math::{bonus_potential_return, potential_return, toram_round_i32};

/// Session values that feed the potential formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialContext {
    pub item_kind: ItemKind,
    /// Percent refunded for removed normal-range steps
    pub potential_return: f64,
    /// Percent refunded for removed bonus-range steps
    pub bonus_potential_return: f64,
}

impl PotentialContext {
    pub fn new(item_kind: ItemKind, technique: u32) -> Self {
        Self {
            item_kind,
            potential_return: potential_return(technique),
            bonus_potential_return: bonus_potential_return(technique),
        }
    }
}

/// Steps an option can take before 100 potential is spent.
fn raw_step_cap(option: &EnhancementOption) -> f64 {
    100.0 / option.potency_per_step
}

/// Last step of the normal range; bonus-range steps start after it.
pub fn normal_step_cap(option: &EnhancementOption) -> f64 {
    match option.max_value {
        Some(max) => max / option.unit(),
        None => raw_step_cap(option).min(MAX_STEPS),
    }
}

/// Largest value reachable inside the normal range.
pub fn normal_value_cap(option: &EnhancementOption) -> f64 {
    match option.max_value {
        Some(max) => max,
        None => raw_step_cap(option).min(MAX_STEPS) * option.unit(),
    }
}

pub fn value_to_steps(value: f64, option: &EnhancementOption) -> i32 {
    let unit = option.unit();
    let value_cap = normal_value_cap(option);

    let steps = if value.abs() > value_cap {
        let overstep = option.bonus_per_step.unwrap_or(unit);
        (normal_step_cap(option) + (value.abs() - value_cap) / overstep) * value.signum()
    } else {
        value / unit
    };
    toram_round_i32(steps)
}

pub fn steps_to_value(steps: i32, option: &EnhancementOption) -> f64 {
    let unit = option.unit();
    let step_cap = normal_step_cap(option);
    let magnitude = steps.unsigned_abs() as f64;

    let value = if magnitude < step_cap {
        magnitude * unit
    } else {
        let overstep = option.bonus_per_step.unwrap_or(unit);
        step_cap * unit + (magnitude - step_cap) * overstep
    };

    if steps < 0 {
        -value
    } else {
        value
    }
}

/// Bonus-range steps granted to an option, never negative.
pub fn allotted_bonus_steps(option: &EnhancementOption) -> f64 {
    let granted = (BONUS_STEPS * option.bonus_ratio.unwrap_or(1.0)).floor();
    (granted - option.bonus_deduction.unwrap_or(0.0)).max(0.0)
}

/// Largest magnitude a value may reach, including the bonus range.
pub fn max_stat(option: &EnhancementOption, is_negative: bool) -> f64 {
    let base = normal_value_cap(option);
    match option.bonus_per_step {
        Some(_) if is_negative && option.max_only => base,
        Some(bonus) => base + bonus * allotted_bonus_steps(option),
        None => base,
    }
}

pub fn max_steps(option: &EnhancementOption, is_negative: bool) -> i32 {
    value_to_steps(max_stat(option, is_negative), option)
}

/// Sum of `k^2` for `k` in `1..=n`; zero for `n <= 0`.
fn square_sum(n: i64) -> i128 {
    if n <= 0 {
        return 0;
    }
    let n = n as i128;
    n * (n + 1) * (2 * n + 1) / 6
}

/// Sum of `k^2` over the inclusive step range `first..=last`.
fn squares_between(first: i64, last: i64) -> i128 {
    if first > last {
        return 0;
    }
    if first >= 0 {
        square_sum(last) - square_sum(first - 1)
    } else if last <= 0 {
        square_sum(-first) - square_sum(-last - 1)
    } else {
        square_sum(-first) + square_sum(last)
    }
}

/// Material cost of walking from `from_steps` to `to_steps`.
///
/// Every step crossed costs `base_cost * step^2`, where `step` is the step
/// count reached; the starting position itself is free.
pub fn step_cost(
    option: &EnhancementOption,
    from_steps: i32,
    to_steps: i32,
    reduction: f64,
) -> f64 {
    let (from, to) = (from_steps as i64, to_steps as i64);
    let (first, last) = if to > from {
        (from + 1, to)
    } else {
        (to, from - 1)
    };
    option.base_cost * squares_between(first, last) as f64 * reduction
}

/// Largest step magnitude a slot may hold: `max_steps` plus one more
/// bonus range. Anything between the two is kept but flagged invalid.
pub fn step_limit(option: &EnhancementOption, is_negative: bool) -> i32 {
    max_steps(option, is_negative).saturating_add(BONUS_STEPS as i32)
}

/// Signed potential delta for moving from `from_steps` to `to_steps`.
///
/// Adding steps consumes potential (negative result). Removing steps
/// refunds only a technique-scaled fraction. Steps beyond the normal cap
/// cost double.
pub fn potential_change(
    option: &EnhancementOption,
    from_steps: i32,
    to_steps: i32,
    ctx: &PotentialContext,
) -> i32 {
    if from_steps == to_steps {
        return 0;
    }
    let change: i32 = if to_steps > from_steps { 1 } else { -1 };
    let cap = normal_step_cap(option);

    let low = from_steps.min(to_steps) as f64;
    let high = from_steps.max(to_steps) as f64;
    let mut diff = high - low;
    let mut bonus_diff = 0.0;

    if low < -cap {
        let extras = low.abs() - cap;
        diff -= extras;
        bonus_diff += extras;
    }
    if high > cap {
        let extras = high - cap;
        diff -= extras;
        bonus_diff += extras;
    }
    // Both ends in the same bonus range: the overlap was trimmed twice
    if diff < 0.0 {
        bonus_diff += diff;
        diff = 0.0;
    }

    // Mismatched options are filtered out upstream; this surcharge only
    // applies if one slips through.
    let doubling = if option.is_available_for(ctx.item_kind) {
        1
    } else {
        2
    };

    let mut basic = Decimal::from(diff) * option.potency_per_step;
    let mut bonus = Decimal::from(bonus_diff) * option.potency_per_step * 2;

    if change == -1 {
        basic = basic * ctx.potential_return * 0.01;
        bonus = bonus * ctx.bonus_potential_return * 0.01;
    }

    let total = (basic + bonus) * doubling * -change;
    toram_round_i32(total.result())
}

/// Formats a stat value for formula text: integers without a fraction,
/// otherwise at most two decimals.
pub fn format_value(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Applicability, MaterialType};

    fn str_option() -> EnhancementOption {
        EnhancementOption::new(
            "STR",
            MaterialType::Beast,
            5.0,
            25.0,
            "Stats",
            Applicability::Universal,
        )
        .with_bonus(1.0)
    }

    fn weapon_ctx() -> PotentialContext {
        PotentialContext::new(ItemKind::Weapon, 255)
    }

    #[test]
    fn test_normal_caps() {
        let option = str_option();
        assert_eq!(normal_step_cap(&option), 20.0);
        assert_eq!(normal_value_cap(&option), 20.0);

        let pierce = EnhancementOption::new(
            "Pierce",
            MaterialType::Beast,
            20.0,
            100.0,
            "Attack",
            Applicability::WeaponOnly,
        );
        assert_eq!(normal_step_cap(&pierce), 5.0);
        assert_eq!(normal_value_cap(&pierce), 5.0);
    }

    #[test]
    fn test_max_value_caps_use_step_size() {
        let option = EnhancementOption::new(
            "MaxMP",
            MaterialType::Mana,
            6.0,
            33.33,
            "HP",
            Applicability::Universal,
        )
        .with_step(10.0)
        .with_max(150.0);
        assert_eq!(normal_step_cap(&option), 15.0);
        assert_eq!(value_to_steps(150.0, &option), 15);
        assert_eq!(value_to_steps(160.0, &option), 16);
        assert_eq!(steps_to_value(16, &option), 160.0);
    }

    #[test]
    fn test_value_to_steps_normal_range() {
        let option = str_option();
        assert_eq!(value_to_steps(7.0, &option), 7);
        assert_eq!(value_to_steps(-7.0, &option), -7);
        assert_eq!(value_to_steps(0.0, &option), 0);
    }

    #[test]
    fn test_value_to_steps_truncates_partial_steps() {
        let option = str_option().with_step(10.0);
        assert_eq!(value_to_steps(25.0, &option), 2);
        assert_eq!(value_to_steps(-25.0, &option), -2);
    }

    #[test]
    fn test_bonus_range_conversion() {
        let option = str_option();
        assert_eq!(value_to_steps(25.0, &option), 25);
        assert_eq!(steps_to_value(25, &option), 25.0);

        let hp = EnhancementOption::new(
            "MaxHP",
            MaterialType::Metal,
            3.0,
            16.49,
            "HP",
            Applicability::Universal,
        )
        .with_step(10.0)
        .with_bonus(10.0);
        assert_eq!(value_to_steps(230.0, &hp), 23);
        assert_eq!(steps_to_value(-23, &hp), -230.0);
    }

    #[test]
    fn test_overstep_without_bonus_uses_unit() {
        let option = EnhancementOption::new(
            "ASPD",
            MaterialType::Wood,
            1.0,
            1.5,
            "Speed",
            Applicability::Universal,
        )
        .with_step(16.0);
        // cap is 20 steps = 320
        assert_eq!(value_to_steps(352.0, &option), 22);
        assert_eq!(steps_to_value(22, &option), 352.0);
    }

    #[test]
    fn test_max_stat_with_bonus() {
        let option = str_option();
        assert_eq!(allotted_bonus_steps(&option), 10.0);
        assert_eq!(max_stat(&option, false), 30.0);
        assert_eq!(max_stat(&option, true), 30.0);
        assert_eq!(max_steps(&option, false), 30);
    }

    #[test]
    fn test_max_stat_max_only_limits_negatives() {
        let option = str_option().with_max_only();
        assert_eq!(max_stat(&option, false), 30.0);
        assert_eq!(max_stat(&option, true), 20.0);
    }

    #[test]
    fn test_bonus_ratio_and_deduction() {
        let halved = str_option().with_bonus_ratio(0.5);
        assert_eq!(allotted_bonus_steps(&halved), 5.0);
        let deducted = str_option().with_bonus_deduction(3.0);
        assert_eq!(allotted_bonus_steps(&deducted), 7.0);
        let overdrawn = str_option().with_bonus_deduction(50.0);
        assert_eq!(allotted_bonus_steps(&overdrawn), 0.0);
    }

    #[test]
    fn test_cost_quadratic() {
        let option = str_option();
        assert_eq!(step_cost(&option, 0, 3, 1.0), 350.0);
        assert_eq!(step_cost(&option, 0, -2, 1.0), 125.0);
        assert_eq!(step_cost(&option, 3, 1, 1.0), 125.0);
        assert_eq!(step_cost(&option, 2, 2, 1.0), 0.0);
        assert_eq!(step_cost(&option, 0, 3, 0.5), 175.0);
    }

    #[test]
    fn test_cost_across_zero_matches_walk() {
        let option = str_option();
        let walk = |first: i32, last: i32| -> f64 {
            (first..=last).map(|s| 25.0 * (s as f64).powi(2)).sum()
        };
        assert_eq!(step_cost(&option, -4, 6, 1.0), walk(-3, 6));
        assert_eq!(step_cost(&option, 6, -4, 1.0), walk(-4, 5));
        assert_eq!(step_cost(&option, -2, -7, 1.0), walk(-7, -3));
    }

    #[test]
    fn test_cost_of_huge_ranges_is_immediate() {
        let option = str_option();
        let n = i32::MAX as f64;
        let expected = 25.0 * n * (n + 1.0) * (2.0 * n + 1.0) / 6.0;
        let cost = step_cost(&option, 0, i32::MAX, 1.0);
        assert!(((cost - expected) / expected).abs() < 1e-9);
        assert_eq!(
            step_cost(&option, 0, -i32::MAX, 1.0),
            step_cost(&option, 0, i32::MAX, 1.0)
        );
    }

    #[test]
    fn test_step_limit() {
        let option = str_option();
        assert_eq!(step_limit(&option, false), 40);
        assert_eq!(step_limit(&option.clone().with_max_only(), true), 30);
    }

    #[test]
    fn test_potential_consumed_when_adding() {
        assert_eq!(potential_change(&str_option(), 0, 3, &weapon_ctx()), -15);
    }

    #[test]
    fn test_potential_refund_when_removing() {
        // 3 * 5 * 30.5% = 4.575 -> 4
        assert_eq!(potential_change(&str_option(), 3, 0, &weapon_ctx()), 4);
    }

    #[test]
    fn test_potential_bonus_range_costs_double() {
        // 20 normal * 5 + 5 bonus * 5 * 2
        assert_eq!(potential_change(&str_option(), 0, 25, &weapon_ctx()), -150);
        // both ends past the cap: only bonus steps
        assert_eq!(potential_change(&str_option(), 22, 25, &weapon_ctx()), -30);
        // deeper into the negative bonus range refunds: 3 * 5 * 2 * 7.625%
        assert_eq!(potential_change(&str_option(), -22, -25, &weapon_ctx()), 2);
    }

    #[test]
    fn test_potential_bonus_refund_rate() {
        // 5 bonus steps * 5 * 2 * 7.625% = 3.8125 -> 3
        assert_eq!(potential_change(&str_option(), 25, 20, &weapon_ctx()), 3);
    }

    #[test]
    fn test_negative_steps_refund_potential() {
        // 4 * 5 * 30.5% = 6.1
        assert_eq!(potential_change(&str_option(), 0, -4, &weapon_ctx()), 6);
        assert_eq!(potential_change(&str_option(), -4, 0, &weapon_ctx()), -20);
    }

    #[test]
    fn test_mismatched_applicability_doubles() {
        let def = EnhancementOption::new(
            "DEF",
            MaterialType::Metal,
            3.0,
            16.49,
            "Defense",
            Applicability::ArmorOnly,
        );
        assert_eq!(potential_change(&def, 0, 2, &weapon_ctx()), -12);
        let armor = PotentialContext::new(ItemKind::Armor, 255);
        assert_eq!(potential_change(&def, 0, 2, &armor), -6);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(5.0), "5");
        assert_eq!(format_value(-30.0), "-30");
        assert_eq!(format_value(0.1 + 0.2), "0.3");
    }
}
