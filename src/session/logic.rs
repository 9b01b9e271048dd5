//! The crafting session: slot edits, confirmation and step history.

use std::sync::Arc;

use tracing::{debug, warn};

use super::errors::{Result, SessionError};
use super::penalty::penalty_multiplier;
use super::types::{SessionConfig, SessionState, SlotView, Snapshot};
use crate::catalog::{Catalog, CategoryGroup, MaterialType};
use crate::core::constants::SLOT_COUNT;
use crate::core::math::{cost_reduction, success_rate, toram_round, toram_round_i32, SuccessTier};
use crate::formula::{FormulaLog, FormulaStep, Materials, StepChange};
use crate::slot::{format_value, PotentialContext, Slot};

/// One fill-stat attempt on a single item.
///
/// All mutations return `Err` and leave the session untouched when they
/// are not allowed in the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    catalog: Arc<Catalog>,
    config: SessionConfig,
    ctx: PotentialContext,
    reduction: f64,
    current_potential: i32,
    future_potential: i32,
    slots: Vec<Slot>,
    materials: Materials,
    max_materials: i64,
    finished: Option<i32>,
    formula: FormulaLog,
}

impl Session {
    pub fn new(catalog: Arc<Catalog>, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog,
            ctx: PotentialContext::new(config.item_kind, config.technique),
            reduction: cost_reduction(config.proficiency, config.material_reduction),
            current_potential: config.starting_potential,
            future_potential: config.starting_potential,
            slots: (0..SLOT_COUNT).map(Slot::new).collect(),
            materials: Materials::default(),
            max_materials: 0,
            finished: None,
            formula: FormulaLog::new(),
            config,
        })
    }

    // ---- accessors ----

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn formula(&self) -> &FormulaLog {
        &self.formula
    }

    pub fn current_potential(&self) -> i32 {
        self.current_potential
    }

    pub fn future_potential(&self) -> i32 {
        self.future_potential
    }

    pub fn materials(&self) -> &Materials {
        &self.materials
    }

    /// Largest single-material amount spent in any one step.
    pub fn max_materials(&self) -> i64 {
        self.max_materials
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    pub fn state(&self) -> SessionState {
        match self.finished {
            Some(rate) => SessionState::Terminal(rate),
            None => SessionState::Active,
        }
    }

    /// Frozen once the session is finished.
    pub fn success_rate(&self) -> i32 {
        self.finished.unwrap_or_else(|| {
            success_rate(
                self.current_potential,
                self.future_potential,
                self.config.recipe_potential,
            )
        })
    }

    pub fn success_tier(&self) -> SuccessTier {
        SuccessTier::from_rate(self.success_rate())
    }

    pub fn can_undo(&self) -> bool {
        !self.formula.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.formula.can_redo()
    }

    pub fn formula_display_lines(&self) -> Vec<String> {
        self.formula.display_lines()
    }

    /// Catalog options usable on this session's item kind.
    pub fn options(&self) -> Vec<CategoryGroup<'_>> {
        self.catalog.options_for(self.config.item_kind)
    }

    pub fn slot_state(&self, index: usize) -> Result<SlotView> {
        let slot = self.slots.get(index).ok_or(SessionError::InvalidSlot(index))?;
        let option = self.catalog.get(slot.option_id());
        Ok(SlotView {
            index,
            option_id: slot.option_id(),
            option_name: option.map(|o| o.name.clone()),
            material: option.map(|o| o.material),
            committed_value: slot.committed_value(),
            pending_value: slot.pending_value(),
            committed_steps: slot.committed_steps(),
            pending_steps: slot.pending_steps(),
            pending_cost: option.map_or(0.0, |o| slot.cost(o, self.reduction)),
            is_valid: option.map_or(true, |o| slot.is_valid_value(o)),
            max_stat: option.map_or(0.0, |o| slot.max_stat(o)),
            max_steps: option.map_or(0, |o| slot.max_steps(o)),
            option_locked: slot.option_locked(),
        })
    }

    /// Rounded material cost of the uncommitted edits.
    pub fn pending_materials(&self) -> Materials {
        let mut raw = [0.0f64; MaterialType::ALL.len()];
        for slot in self.slots.iter().filter(|s| s.has_pending_change()) {
            if let Some(option) = self.catalog.get(slot.option_id()) {
                raw[option.material.index()] += slot.cost(option, self.reduction);
            }
        }
        round_materials(&raw)
    }

    /// Accumulated materials plus the pending edits.
    pub fn projected_materials(&self) -> Materials {
        let mut total = self.materials;
        total += self.pending_materials();
        total
    }

    // ---- mutations ----

    fn ensure_active(&self) -> Result<()> {
        if self.finished.is_some() {
            return Err(SessionError::InvalidState("session is finished"));
        }
        Ok(())
    }

    /// Sets the pending option and value of a slot. `option_id` 0 clears it.
    ///
    /// Out-of-range values are accepted and held within the slot's step
    /// limit; check `SlotView::is_valid`. NaN and infinities are rejected.
    pub fn update_slot(&mut self, index: usize, option_id: usize, value: f64) -> Result<()> {
        self.ensure_active()?;
        if index >= self.slots.len() {
            return Err(SessionError::InvalidSlot(index));
        }
        if !value.is_finite() {
            return Err(SessionError::InvalidState("value must be finite"));
        }
        let catalog = Arc::clone(&self.catalog);
        let slot = &mut self.slots[index];

        if option_id == 0 {
            if slot.option_locked() {
                return Err(SessionError::InvalidState("committed option cannot be cleared"));
            }
            slot.clear();
            self.recompute_future();
            return Ok(());
        }

        let option = catalog
            .get(option_id)
            .ok_or(SessionError::InvalidOptionReference {
                id: option_id,
                len: catalog.len(),
            })?;
        if slot.option_locked() && slot.option_id() != option_id {
            return Err(SessionError::InvalidState("committed option cannot be replaced"));
        }
        if !option.is_available_for(self.config.item_kind) {
            warn!(
                option = %option.name,
                item = self.config.item_kind.name(),
                "option does not apply to this item kind; potential cost doubles"
            );
        }

        slot.assign(option_id, option, value);
        self.recompute_future();
        Ok(())
    }

    fn recompute_future(&mut self) {
        let delta: i32 = self
            .slots
            .iter()
            .filter(|s| s.is_assigned())
            .filter_map(|s| {
                self.catalog
                    .get(s.option_id())
                    .map(|option| s.potential_change(option, &self.ctx))
            })
            .sum();
        let penalty = penalty_multiplier(&self.slots, &self.catalog);
        self.future_potential = self.current_potential + toram_round_i32(penalty * delta as f64);
    }

    /// Commits every pending edit as one formula step.
    pub fn confirm(&mut self) -> Result<()> {
        self.ensure_active()?;
        if !self.slots.iter().any(Slot::has_pending_change) {
            return Err(SessionError::InvalidState("no pending changes to confirm"));
        }

        for slot in self.slots.iter_mut().filter(|s| s.is_placeholder()) {
            slot.clear();
        }

        let mut raw = [0.0f64; MaterialType::ALL.len()];
        let mut changes = Vec::new();
        let mut fragments = Vec::new();
        for slot in self.slots.iter_mut() {
            if !slot.has_pending_change() {
                continue;
            }
            let Some(option) = self.catalog.get(slot.option_id()) else {
                continue;
            };
            raw[option.material.index()] += slot.cost(option, self.reduction);

            let sign = if slot.step_delta() > 0 { "+" } else { "" };
            fragments.push(format!(
                "{} {}{}",
                option.name,
                sign,
                format_value(slot.value_delta())
            ));
            changes.push(StepChange {
                slot: slot.index(),
                step_delta: slot.step_delta(),
                new_option: slot.is_unconfirmed_assignment().then(|| slot.option_id()),
            });
            slot.confirm();
        }

        let step_materials = round_materials(&raw);
        self.materials += step_materials;
        let max_before = self.max_materials;
        let max_after = max_before.max(step_materials.max_amount());

        let all_assigned = self.slots.iter().all(Slot::is_assigned);
        let finished = (all_assigned || self.future_potential <= 0).then(|| {
            success_rate(
                self.current_potential,
                self.future_potential,
                self.config.recipe_potential,
            )
        });

        let step = FormulaStep {
            changes,
            text: fragments.join(" "),
            potential_before: self.current_potential,
            potential_after: self.future_potential,
            materials: step_materials,
            max_materials_before: max_before,
            max_materials_after: max_after,
            finished,
        };
        debug!(
            text = %step.text,
            before = step.potential_before,
            after = step.potential_after,
            finished = ?step.finished,
            "step committed"
        );
        self.formula.commit(step);
        self.max_materials = max_after;

        match finished {
            Some(rate) => self.finished = Some(rate),
            None => self.current_potential = self.future_potential,
        }
        Ok(())
    }

    /// Drops every uncommitted edit. Fresh assignments are removed.
    pub fn discard_pending(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.reset_to_committed();
        }
        // A finished session keeps its final potential on display
        if self.finished.is_none() {
            self.future_potential = self.current_potential;
        }
    }

    /// Reverts the latest step. Allowed from a finished session.
    pub fn undo(&mut self) -> Result<()> {
        if self.formula.is_empty() {
            return Err(SessionError::InvalidState("nothing to undo"));
        }
        self.discard_pending();
        let step = self
            .formula
            .undo()
            .ok_or(SessionError::InvalidState("nothing to undo"))?;

        self.current_potential = step.potential_before;
        self.future_potential = step.potential_before;
        self.materials -= step.materials;
        self.max_materials = step.max_materials_before;

        for change in step.changes.iter().rev() {
            // A slot this step introduced goes back to unassigned
            let new_option = change.new_option.map(|_| 0);
            self.slots[change.slot].raw_override(-change.step_delta, new_option, &self.catalog);
        }
        self.finished = None;
        debug!(text = %step.text, potential = self.current_potential, "step undone");
        Ok(())
    }

    /// Reapplies the latest undone step.
    pub fn redo(&mut self) -> Result<()> {
        if !self.formula.can_redo() {
            return Err(SessionError::InvalidState("nothing to redo"));
        }
        self.discard_pending();
        let step = self
            .formula
            .redo()
            .ok_or(SessionError::InvalidState("nothing to redo"))?;
        self.apply_step(&step);
        debug!(text = %step.text, potential = self.future_potential, "step redone");
        Ok(())
    }

    /// Restores the "after" side of a recorded step onto the session.
    fn apply_step(&mut self, step: &FormulaStep) {
        self.future_potential = step.potential_after;
        self.current_potential = match step.finished {
            Some(_) => step.potential_before,
            None => step.potential_after,
        };
        self.materials += step.materials;
        self.max_materials = step.max_materials_after;

        for change in &step.changes {
            self.slots[change.slot].raw_override(
                change.step_delta,
                change.new_option,
                &self.catalog,
            );
        }
        self.finished = step.finished;
    }

    /// Adds the latest step's deltas on top of the pending values and
    /// confirms again.
    pub fn repeat(&mut self) -> Result<()> {
        self.ensure_active()?;
        let changes = match self.formula.last() {
            Some(step) => step.changes.clone(),
            None => return Err(SessionError::InvalidState("no step to repeat")),
        };

        let saved_slots = self.slots.clone();
        let saved_future = self.future_potential;
        for change in &changes {
            let slot = &mut self.slots[change.slot];
            if let Some(option) = self.catalog.get(slot.option_id()) {
                slot.shift_pending(change.step_delta, option);
            }
        }
        self.recompute_future();

        if let Err(e) = self.confirm() {
            self.slots = saved_slots;
            self.future_potential = saved_future;
            return Err(e);
        }
        debug!(changes = changes.len(), "step repeated");
        Ok(())
    }

    // ---- persistence ----

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            formula_steps: self.formula.steps().to_vec(),
            settings: self.config,
        }
    }

    /// Rebuilds a session by replaying every recorded step onto a fresh
    /// one. Pending edits and redo history are not part of a snapshot.
    pub fn auto_load(catalog: Arc<Catalog>, snapshot: Snapshot) -> Result<Self> {
        let mut session = Session::new(catalog, snapshot.settings)?;

        for step in &snapshot.formula_steps {
            for change in &step.changes {
                if change.slot >= SLOT_COUNT {
                    return Err(SessionError::InvalidSlot(change.slot));
                }
                if let Some(id) = change.new_option {
                    if session.catalog.get(id).is_none() {
                        return Err(SessionError::InvalidOptionReference {
                            id,
                            len: session.catalog.len(),
                        });
                    }
                }
            }
        }

        for step in &snapshot.formula_steps {
            session.apply_step(step);
        }
        session.formula = FormulaLog::from_steps(snapshot.formula_steps);
        debug!(steps = session.formula.len(), "session loaded from snapshot");
        Ok(session)
    }

    /// Independent copy of the committed history.
    pub fn duplicate(&self) -> Result<Self> {
        Session::auto_load(Arc::clone(&self.catalog), self.snapshot())
    }
}

fn round_materials(raw: &[f64; 6]) -> Materials {
    let mut materials = Materials::default();
    for material in MaterialType::ALL {
        *materials.get_mut(material) = toram_round(raw[material.index()]) as i64;
    }
    materials
}
