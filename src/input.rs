//! Key handling for the editor screen.
//!
//! Maps key presses onto session operations; errors become a status line.

use crossterm::event::{KeyCode, KeyEvent};
use fillstat::core::constants::SLOT_COUNT;
use fillstat::session::{Result, Session};
use fillstat::slot::steps_to_value;

/// Option picker overlay: a flat list of catalog ids usable on the item.
pub struct Picker {
    pub ids: Vec<usize>,
    pub selected: usize,
}

impl Picker {
    pub fn new(session: &Session) -> Self {
        let ids = session
            .options()
            .iter()
            .flat_map(|group| group.entries.iter().map(|entry| entry.id))
            .collect();
        Self { ids, selected: 0 }
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self) {
        if self.selected + 1 < self.ids.len() {
            self.selected += 1;
        }
    }

    fn current(&self) -> Option<usize> {
        self.ids.get(self.selected).copied()
    }
}

pub struct EditorState {
    pub selected_slot: usize,
    pub picker: Option<Picker>,
    pub status: Option<String>,
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            selected_slot: 0,
            picker: None,
            status: None,
        }
    }
}

/// Result of handling an editor key.
pub enum InputResult {
    Continue,
    /// A step was committed or reverted; save soon.
    NeedsSave,
    Quit,
}

pub fn handle_editor_input(
    key: KeyEvent,
    session: &mut Session,
    editor: &mut EditorState,
) -> InputResult {
    if editor.picker.is_some() {
        return handle_picker(key, session, editor);
    }

    editor.status = None;
    let index = editor.selected_slot;
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return InputResult::Quit,
        KeyCode::Up => editor.selected_slot = index.saturating_sub(1),
        KeyCode::Down => editor.selected_slot = (index + 1).min(SLOT_COUNT - 1),
        KeyCode::Enter => {
            let locked = session.slots()[index].option_locked();
            if locked {
                editor.status = Some("Option is committed; adjust its value instead".to_string());
            } else if !session.is_finished() {
                editor.picker = Some(Picker::new(session));
            }
        }
        KeyCode::Right | KeyCode::Char('+') => report(editor, shift_steps(session, index, 1)),
        KeyCode::Left | KeyCode::Char('-') => report(editor, shift_steps(session, index, -1)),
        KeyCode::Delete | KeyCode::Char('x') => report(editor, session.update_slot(index, 0, 0.0)),
        KeyCode::Char('d') => session.discard_pending(),
        KeyCode::Char('c') => return saved(editor, session.confirm()),
        KeyCode::Char('u') => return saved(editor, session.undo()),
        KeyCode::Char('r') => return saved(editor, session.redo()),
        KeyCode::Char('p') => return saved(editor, session.repeat()),
        _ => {}
    }
    InputResult::Continue
}

fn handle_picker(key: KeyEvent, session: &mut Session, editor: &mut EditorState) -> InputResult {
    let Some(picker) = editor.picker.as_mut() else {
        return InputResult::Continue;
    };
    match key.code {
        KeyCode::Esc => editor.picker = None,
        KeyCode::Up => picker.move_up(),
        KeyCode::Down => picker.move_down(),
        KeyCode::Enter => {
            let choice = picker.current();
            editor.picker = None;
            if let Some(id) = choice {
                let value = session.catalog().get(id).map_or(0.0, |o| o.unit());
                let result = session.update_slot(editor.selected_slot, id, value);
                report(editor, result);
            }
        }
        _ => {}
    }
    InputResult::Continue
}

/// Moves a slot's pending value by whole steps.
fn shift_steps(session: &mut Session, index: usize, delta: i32) -> Result<()> {
    let slot = &session.slots()[index];
    let id = slot.option_id();
    let Some(option) = session.catalog().get(id) else {
        return Ok(());
    };
    let value = steps_to_value(slot.pending_steps() + delta, option);
    session.update_slot(index, id, value)
}

fn report(editor: &mut EditorState, result: Result<()>) {
    if let Err(e) = result {
        editor.status = Some(e.to_string());
    }
}

fn saved(editor: &mut EditorState, result: Result<()>) -> InputResult {
    match result {
        Ok(()) => InputResult::NeedsSave,
        Err(e) => {
            editor.status = Some(e.to_string());
            InputResult::Continue
        }
    }
}
