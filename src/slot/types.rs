//! Mutable enhancement slot state.

use serde::{Deserialize, Serialize};

use super::logic::{
    max_stat, max_steps, potential_change, step_cost, step_limit, steps_to_value,
    value_to_steps, PotentialContext,
};
use crate::catalog::{Catalog, EnhancementOption};

/// One of the eight enhancement positions on an item.
///
/// Edits only touch the `pending_*` fields; [`Slot::confirm`] copies them
/// into the committed pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    index: usize,
    /// Catalog id, 0 when unassigned
    option_id: usize,
    committed_value: f64,
    pending_value: f64,
    committed_steps: i32,
    pending_steps: i32,
    /// Option chosen (or slot empty) but not yet committed
    is_new: bool,
}

impl Slot {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            option_id: 0,
            committed_value: 0.0,
            pending_value: 0.0,
            committed_steps: 0,
            pending_steps: 0,
            is_new: true,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn option_id(&self) -> usize {
        self.option_id
    }

    pub fn is_assigned(&self) -> bool {
        self.option_id != 0
    }

    pub fn committed_value(&self) -> f64 {
        self.committed_value
    }

    pub fn pending_value(&self) -> f64 {
        self.pending_value
    }

    pub fn committed_steps(&self) -> i32 {
        self.committed_steps
    }

    pub fn pending_steps(&self) -> i32 {
        self.pending_steps
    }

    /// The option may still be swapped or cleared before the next confirm.
    pub fn is_unconfirmed_assignment(&self) -> bool {
        self.is_assigned() && self.is_new
    }

    /// Whether the option selector may change on this slot.
    pub fn option_locked(&self) -> bool {
        !self.is_new
    }

    /// Freshly chosen option with no steps: treated as not selected.
    pub fn is_placeholder(&self) -> bool {
        self.is_new && self.pending_steps == 0
    }

    pub fn has_pending_change(&self) -> bool {
        self.is_assigned() && self.committed_steps != self.pending_steps
    }

    pub fn step_delta(&self) -> i32 {
        self.pending_steps - self.committed_steps
    }

    pub fn value_delta(&self) -> f64 {
        self.pending_value - self.committed_value
    }

    /// Unassigns the slot and zeroes every value.
    pub fn clear(&mut self) {
        *self = Slot::new(self.index);
    }

    /// Sets the pending option and value. The caller guarantees `option`
    /// is the catalog entry for `option_id`.
    ///
    /// The value is snapped to the nearest whole step toward zero and held
    /// within [`step_limit`].
    pub fn assign(&mut self, option_id: usize, option: &EnhancementOption, value: f64) {
        self.option_id = option_id;
        let steps = value_to_steps(value, option);
        let limit = step_limit(option, steps < 0);
        self.pending_steps = steps.clamp(-limit, limit);
        self.pending_value = steps_to_value(self.pending_steps, option);
    }

    /// Moves pending steps by `delta`, rederiving the value.
    pub fn shift_pending(&mut self, delta: i32, option: &EnhancementOption) {
        self.pending_steps += delta;
        self.pending_value = steps_to_value(self.pending_steps, option);
    }

    pub fn confirm(&mut self) {
        self.committed_value = self.pending_value;
        self.committed_steps = self.pending_steps;
        self.is_new = false;
    }

    /// Drops uncommitted edits; a never-committed option is removed.
    pub fn reset_to_committed(&mut self) {
        if self.is_new {
            self.clear();
        } else {
            self.pending_steps = self.committed_steps;
            self.pending_value = self.committed_value;
        }
    }

    /// Replays one encoded history change.
    ///
    /// `new_option` of `Some(0)` unassigns the slot and ignores the delta;
    /// `Some(id)` installs a committed option before applying the delta.
    pub fn raw_override(&mut self, step_delta: i32, new_option: Option<usize>, catalog: &Catalog) {
        match new_option {
            Some(0) => {
                self.clear();
                return;
            }
            Some(id) => {
                self.option_id = id;
                self.is_new = false;
            }
            None => {}
        }

        self.pending_steps += step_delta;
        self.committed_steps = self.pending_steps;
        self.pending_value = catalog
            .get(self.option_id)
            .map(|option| steps_to_value(self.pending_steps, option))
            .unwrap_or(0.0);
        self.committed_value = self.pending_value;
    }

    /// Pending value exceeds the option's range, or goes negative where
    /// negatives are not allowed.
    pub fn is_valid_value(&self, option: &EnhancementOption) -> bool {
        let allowed = max_stat(option, self.pending_value < 0.0);
        !(self.pending_value.abs() > allowed || (self.pending_steps < 0 && option.no_negative))
    }

    pub fn max_stat(&self, option: &EnhancementOption) -> f64 {
        max_stat(option, self.pending_value < 0.0)
    }

    pub fn max_steps(&self, option: &EnhancementOption) -> i32 {
        max_steps(option, self.pending_value < 0.0)
    }

    /// Material cost of the pending edit.
    pub fn cost(&self, option: &EnhancementOption, reduction: f64) -> f64 {
        step_cost(option, self.committed_steps, self.pending_steps, reduction)
    }

    /// Potential delta of the pending edit, before the category penalty.
    pub fn potential_change(&self, option: &EnhancementOption, ctx: &PotentialContext) -> i32 {
        potential_change(option, self.committed_steps, self.pending_steps, ctx)
    }
}
