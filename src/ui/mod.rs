mod formula_panel;
mod picker;
mod slots_panel;

use crate::input::EditorState;
use fillstat::core::math::SuccessTier;
use fillstat::session::{MaterialBudget, Session};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const KEY_HINTS: &str = "[Enter] Option  [←/→] Steps  [x] Clear  [c] Confirm  [u] Undo  \
[r] Redo  [p] Repeat  [d] Discard  [q] Quit";

pub fn tier_color(tier: SuccessTier) -> Color {
    match tier {
        SuccessTier::High => Color::Green,
        SuccessTier::Medium => Color::Yellow,
        SuccessTier::Low => Color::Red,
    }
}

/// Draws the whole editor screen.
pub fn draw_editor(
    frame: &mut Frame,
    session: &Session,
    editor: &EditorState,
    budget: &MaterialBudget,
) {
    let size = frame.size();

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Potential / success header
            Constraint::Min(10),   // Slots + formula
            Constraint::Length(5), // Materials
            Constraint::Length(3), // Footer
        ])
        .split(size);

    draw_header(frame, v_chunks[0], session);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(v_chunks[1]);
    slots_panel::draw_slots_panel(frame, h_chunks[0], session, editor.selected_slot);
    formula_panel::draw_formula_panel(frame, h_chunks[1], session);

    formula_panel::draw_materials_panel(frame, v_chunks[2], session, budget);
    draw_footer(frame, v_chunks[3], editor);

    if let Some(picker) = &editor.picker {
        picker::draw_picker(frame, size, session, picker);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, session: &Session) {
    let config = session.config();
    let rate = session.success_rate();
    let state = if session.is_finished() {
        Span::styled(
            "  FINISHED",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw("")
    };

    let line = Line::from(vec![
        Span::styled(
            format!("{} ", config.item_kind.name()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "| Pot: {} -> {} | Recipe: {} | ",
            session.current_potential(),
            session.future_potential(),
            config.recipe_potential
        )),
        Span::styled(
            format!("Success: {}%", rate),
            Style::default()
                .fg(tier_color(session.success_tier()))
                .add_modifier(Modifier::BOLD),
        ),
        state,
    ]);

    let header = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title(" Fill Stat "))
        .alignment(Alignment::Left);
    frame.render_widget(header, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, editor: &EditorState) {
    let line = match &editor.status {
        Some(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray))),
    };
    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
