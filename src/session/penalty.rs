//! Category stacking penalty.

use std::collections::HashMap;

use tracing::error;

use crate::catalog::Catalog;
use crate::core::constants::PENALTY_TABLE;
use crate::slot::Slot;

/// Slots that count toward the penalty: assigned, and not a freshly
/// chosen option that has no steps yet.
fn is_active(slot: &Slot) -> bool {
    slot.is_assigned() && !slot.is_placeholder()
}

fn category_penalty(count: usize) -> u32 {
    match PENALTY_TABLE.get(count) {
        Some(penalty) => *penalty,
        None => {
            error!(count, "penalty table has no entry for category count");
            debug_assert!(false, "penalty table overflow: {count}");
            PENALTY_TABLE[PENALTY_TABLE.len() - 1]
        }
    }
}

/// Multiplier applied to the summed potential change of all slots.
///
/// Each category used by `n` active slots adds `PENALTY_TABLE[n]` percent.
pub fn penalty_multiplier(slots: &[Slot], catalog: &Catalog) -> f64 {
    let mut categories: HashMap<&str, usize> = HashMap::new();
    for slot in slots.iter().filter(|s| is_active(s)) {
        if let Some(option) = catalog.get(slot.option_id()) {
            *categories.entry(option.category.as_str()).or_insert(0) += 1;
        }
    }

    if categories.is_empty() {
        return 1.0;
    }
    let sum: u32 = categories.values().map(|&n| category_penalty(n)).sum();
    1.0 + 0.01 * sum as f64
}
