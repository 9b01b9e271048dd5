use fillstat::session::{Session, SlotView};
use fillstat::slot::format_value;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws the eight slots with committed and pending values.
pub fn draw_slots_panel(frame: &mut Frame, area: Rect, session: &Session, selected: usize) {
    let lines: Vec<Line> = (0..session.slots().len())
        .filter_map(|index| session.slot_state(index).ok())
        .map(|view| slot_line(&view, view.index == selected))
        .collect();

    let panel =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Slots "));
    frame.render_widget(panel, area);
}

fn slot_line(view: &SlotView, selected: bool) -> Line<'static> {
    let marker = if selected { "> " } else { "  " };
    let Some(name) = &view.option_name else {
        return Line::from(vec![
            Span::raw(format!("{}{}. ", marker, view.index + 1)),
            Span::styled("(empty)", Style::default().fg(Color::DarkGray)),
        ]);
    };

    let name_style = if view.option_locked {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let mut spans = vec![
        Span::raw(format!("{}{}. ", marker, view.index + 1)),
        Span::styled(format!("{:<16}", name), name_style),
        Span::raw(format_value(view.committed_value)),
    ];

    if view.pending_steps != view.committed_steps {
        let value_style = if view.is_valid {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };
        spans.push(Span::raw(" -> "));
        spans.push(Span::styled(format_value(view.pending_value), value_style));
        if let Some(material) = view.material {
            spans.push(Span::styled(
                format!("  ({} {})", view.pending_cost.trunc(), material.name()),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    spans.push(Span::styled(
        format!("  max {}", format_value(view.max_stat)),
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}
