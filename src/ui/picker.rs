use crate::input::Picker;
use fillstat::session::Session;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Option picker popup, scrolled to keep the selection visible.
pub fn draw_picker(frame: &mut Frame, area: Rect, session: &Session, picker: &Picker) {
    let popup = centered(area, 44, 20);
    let visible = popup.height.saturating_sub(2) as usize;
    let skip = (picker.selected + 1).saturating_sub(visible);

    let lines: Vec<Line> = picker
        .ids
        .iter()
        .enumerate()
        .skip(skip)
        .take(visible)
        .filter_map(|(row, id)| {
            let option = session.catalog().get(*id)?;
            let style = if row == picker.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Some(Line::from(vec![
                Span::styled(format!(" {:<24}", option.name), style),
                Span::styled(
                    format!(" {:<10}", option.category),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    frame.render_widget(Clear, popup);
    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Choose option (Esc cancels) "),
    );
    frame.render_widget(panel, popup);
}
