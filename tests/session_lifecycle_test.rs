//! Session lifecycle: start, edit, confirm, terminal conditions, undo/redo, repeat.

use std::sync::Arc;

use fillstat::catalog::{Applicability, Catalog, EnhancementOption, ItemKind, MaterialType};
use fillstat::core::math::toram_round;
use fillstat::session::{Session, SessionConfig, SessionError, SessionState};

fn default_session() -> Session {
    Session::new(Arc::new(Catalog::default()), SessionConfig::default()).unwrap()
}

fn id(session: &Session, name: &str) -> usize {
    session.catalog().find(name).unwrap()
}

/// Eight cheap options, each in its own category so no penalty applies.
fn filler_catalog() -> Arc<Catalog> {
    let options = (0..8)
        .map(|i| {
            let name = format!("Filler {}", i);
            let category = format!("Group {}", i);
            EnhancementOption::new(
                &name,
                MaterialType::Cloth,
                1.0,
                10.0,
                &category,
                Applicability::Universal,
            )
        })
        .collect();
    Arc::new(Catalog::new(options))
}

// =========================================================================
// Numeric helpers
// =========================================================================

#[test]
fn test_toram_round_truncates() {
    assert_eq!(toram_round(2.7), 2.0);
    assert_eq!(toram_round(-2.7), -2.0);
    assert_eq!(toram_round(0.0), 0.0);
}

// =========================================================================
// Start
// =========================================================================

#[test]
fn test_start_requires_positive_potentials() {
    let catalog = Arc::new(Catalog::default());
    let mut config = SessionConfig::default();
    config.starting_potential = 0;
    assert!(matches!(
        Session::new(Arc::clone(&catalog), config),
        Err(SessionError::InvalidConfiguration(_))
    ));

    let mut config = SessionConfig::for_item(ItemKind::Armor);
    config.recipe_potential = 0;
    assert!(matches!(
        Session::new(catalog, config),
        Err(SessionError::InvalidConfiguration(_))
    ));
}

// =========================================================================
// Potential, success rate and cost
// =========================================================================

#[test]
fn test_three_steps_of_five_potency() {
    let mut session = default_session();
    let str_id = id(&session, "STR");
    session.update_slot(0, str_id, 3.0).unwrap();

    assert_eq!(session.future_potential(), 84);
    assert_eq!(session.success_rate(), 100);
}

#[test]
fn test_material_cost_for_three_steps() {
    let mut session = default_session();
    let str_id = id(&session, "STR");
    session.update_slot(0, str_id, 3.0).unwrap();
    assert_eq!(session.pending_materials().beast, 350);

    session.confirm().unwrap();
    assert_eq!(session.materials().beast, 350);
    assert_eq!(session.max_materials(), 350);
}

#[test]
fn test_category_penalty_applies_to_sum() {
    let mut session = default_session();
    let str_id = id(&session, "STR");
    let int_id = id(&session, "INT");
    session.update_slot(0, str_id, 2.0).unwrap();
    session.update_slot(1, int_id, 2.0).unwrap();
    // (-10 + -10) * 1.2
    assert_eq!(session.future_potential(), 99 - 24);
}

#[test]
fn test_max_materials_only_rises() {
    let mut session = default_session();
    let str_id = id(&session, "STR");
    session.update_slot(0, str_id, 3.0).unwrap();
    session.confirm().unwrap();
    session.update_slot(0, str_id, 4.0).unwrap();
    session.confirm().unwrap();
    assert_eq!(session.max_materials(), 400);

    let int_id = id(&session, "INT");
    session.update_slot(1, int_id, 1.0).unwrap();
    session.confirm().unwrap();
    assert_eq!(session.max_materials(), 400);
    assert_eq!(session.formula().last().unwrap().max_materials_before, 400);
}

#[test]
fn test_extreme_values_are_flagged_not_stalled() {
    let mut session = default_session();
    let str_id = id(&session, "STR");
    let before = session.clone();
    assert!(matches!(
        session.update_slot(0, str_id, f64::INFINITY),
        Err(SessionError::InvalidState(_))
    ));
    assert_eq!(session, before);

    session.update_slot(0, str_id, 1e12).unwrap();
    let view = session.slot_state(0).unwrap();
    assert!(!view.is_valid);
    assert!(view.pending_steps > view.max_steps);
    assert!(view.pending_steps <= view.max_steps + 10);

    session.confirm().unwrap();
    assert_eq!(session.slots()[0].committed_steps(), view.pending_steps);
}

// =========================================================================
// Confirm
// =========================================================================

#[test]
fn test_confirm_with_nothing_pending_is_rejected() {
    let mut session = default_session();
    let str_id = id(&session, "STR");
    session.update_slot(0, str_id, 3.0).unwrap();
    session.confirm().unwrap();

    let before = session.clone();
    assert!(matches!(session.confirm(), Err(SessionError::InvalidState(_))));
    assert_eq!(session, before);
    assert_eq!(session.formula().len(), 1);
}

#[test]
fn test_step_text_lists_every_change() {
    let mut session = default_session();
    let str_id = id(&session, "STR");
    let acc_id = id(&session, "Accuracy");
    session.update_slot(0, str_id, 5.0).unwrap();
    session.update_slot(1, acc_id, 2.0).unwrap();
    session.confirm().unwrap();
    assert_eq!(session.formula().last().unwrap().text, "STR +5 Accuracy +2");
}

// =========================================================================
// Terminal conditions
// =========================================================================

#[test]
fn test_terminal_when_all_slots_assigned() {
    let catalog = filler_catalog();
    let mut session = Session::new(catalog, SessionConfig::default()).unwrap();

    for slot in 0..7 {
        session.update_slot(slot, slot + 1, 1.0).unwrap();
        session.confirm().unwrap();
        assert_eq!(session.state(), SessionState::Active);
    }
    session.update_slot(7, 8, 1.0).unwrap();
    session.confirm().unwrap();

    assert!(session.is_finished());
    assert_eq!(session.state(), SessionState::Terminal(100));
    assert_eq!(session.future_potential(), 91);
    assert_eq!(session.current_potential(), 92);
}

#[test]
fn test_terminal_when_potential_exhausted() {
    let catalog = Arc::new(Catalog::new(vec![
        EnhancementOption::new(
            "STR",
            MaterialType::Beast,
            5.0,
            25.0,
            "Stats",
            Applicability::Universal,
        ),
        EnhancementOption::new(
            "Accuracy",
            MaterialType::Wood,
            20.0,
            150.0,
            "Hit",
            Applicability::Universal,
        ),
    ]));
    let mut config = SessionConfig::default();
    config.starting_potential = 10;
    config.recipe_potential = 10;
    let mut session = Session::new(catalog, config).unwrap();

    session.update_slot(0, 1, 1.0).unwrap();
    session.update_slot(1, 2, 1.0).unwrap();
    assert_eq!(session.future_potential(), -15);
    session.confirm().unwrap();

    assert_eq!(session.state(), SessionState::Terminal(0));
    assert_eq!(session.current_potential(), 10);
    assert_eq!(session.success_rate(), 0);
}

#[test]
fn test_terminal_rejects_mutation_until_undo() {
    let catalog = filler_catalog();
    let mut session = Session::new(catalog, SessionConfig::default()).unwrap();
    for slot in 0..8 {
        session.update_slot(slot, slot + 1, 1.0).unwrap();
    }
    session.confirm().unwrap();
    assert!(session.is_finished());

    let frozen = session.clone();
    assert!(matches!(session.update_slot(0, 1, 2.0), Err(SessionError::InvalidState(_))));
    assert!(matches!(session.confirm(), Err(SessionError::InvalidState(_))));
    assert!(matches!(session.repeat(), Err(SessionError::InvalidState(_))));
    session.discard_pending();
    assert_eq!(session, frozen);

    session.undo().unwrap();
    assert_eq!(session.state(), SessionState::Active);
    assert_eq!(session.current_potential(), 99);
    assert!(session.slots().iter().all(|s| !s.is_assigned()));
}

// =========================================================================
// Undo / redo
// =========================================================================

#[test]
fn test_undo_then_redo_is_identity() {
    let mut session = default_session();
    let str_id = id(&session, "STR");
    let int_id = id(&session, "INT");
    session.update_slot(0, str_id, 3.0).unwrap();
    session.confirm().unwrap();
    session.update_slot(0, str_id, 6.0).unwrap();
    session.update_slot(1, int_id, -2.0).unwrap();
    session.confirm().unwrap();

    let before = session.clone();
    session.undo().unwrap();
    assert_ne!(session, before);
    session.redo().unwrap();
    assert_eq!(session, before);
}

#[test]
fn test_undo_then_redo_into_terminal_is_identity() {
    let catalog = filler_catalog();
    let mut session = Session::new(catalog, SessionConfig::default()).unwrap();
    for slot in 0..8 {
        session.update_slot(slot, slot + 1, 2.0).unwrap();
    }
    session.confirm().unwrap();

    let before = session.clone();
    session.undo().unwrap();
    session.redo().unwrap();
    assert_eq!(session, before);
    assert!(session.is_finished());
}

#[test]
fn test_undo_discards_pending_edits() {
    let mut session = default_session();
    let str_id = id(&session, "STR");
    let int_id = id(&session, "INT");
    session.update_slot(0, str_id, 3.0).unwrap();
    session.confirm().unwrap();
    session.update_slot(1, int_id, 4.0).unwrap();

    session.undo().unwrap();
    assert!(session.slots().iter().all(|s| !s.is_assigned()));
    assert_eq!(session.future_potential(), 99);
    assert_eq!(session.materials().beast, 0);
}

#[test]
fn test_new_commit_clears_redo() {
    let mut session = default_session();
    let str_id = id(&session, "STR");
    session.update_slot(0, str_id, 3.0).unwrap();
    session.confirm().unwrap();
    session.undo().unwrap();
    assert!(session.can_redo());

    session.update_slot(0, str_id, 1.0).unwrap();
    session.confirm().unwrap();
    assert!(!session.can_redo());
    assert!(matches!(session.redo(), Err(SessionError::InvalidState(_))));
}

// =========================================================================
// Repeat
// =========================================================================

#[test]
fn test_repeat_on_empty_log_is_rejected() {
    let mut session = default_session();
    let before = session.clone();
    assert!(matches!(session.repeat(), Err(SessionError::InvalidState(_))));
    assert_eq!(session, before);
}

#[test]
fn test_repeat_reproduces_last_deltas() {
    let mut session = default_session();
    let str_id = id(&session, "STR");
    let int_id = id(&session, "INT");
    session.update_slot(0, str_id, 2.0).unwrap();
    session.update_slot(1, int_id, -1.0).unwrap();
    session.confirm().unwrap();
    session.repeat().unwrap();

    let steps = session.formula().steps();
    assert_eq!(steps.len(), 2);
    let deltas = |i: usize| -> Vec<(usize, i32)> {
        steps[i].changes.iter().map(|c| (c.slot, c.step_delta)).collect()
    };
    assert_eq!(deltas(0), deltas(1));
    assert!(steps[1].changes.iter().all(|c| c.new_option.is_none()));
    assert_eq!(session.slots()[0].committed_steps(), 4);
    assert_eq!(session.slots()[1].committed_steps(), -2);
    assert_eq!(session.current_potential(), steps[1].potential_after);
}

#[test]
fn test_condensed_formula_display() {
    let mut session = default_session();
    let str_id = id(&session, "STR");
    session.update_slot(0, str_id, 1.0).unwrap();
    session.confirm().unwrap();
    session.repeat().unwrap();
    session.repeat().unwrap();

    let lines = session.formula_display_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("#1. STR +1 (x3) ("));
}
