use fillstat::session::{MaterialBudget, Session, Severity};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draws the condensed formula, newest at the bottom.
pub fn draw_formula_panel(frame: &mut Frame, area: Rect, session: &Session) {
    let display = session.formula_display_lines();
    let visible = area.height.saturating_sub(2) as usize;
    let skip = display.len().saturating_sub(visible);

    let lines: Vec<Line> = if display.is_empty() {
        vec![Line::from(Span::styled(
            "No steps yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        display.into_iter().skip(skip).map(Line::from).collect()
    };

    let title = format!(" Formula ({} steps) ", session.formula().len());
    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

/// Accumulated materials, pending cost, the per-step high-water mark,
/// efficiency and budget warnings.
pub fn draw_materials_panel(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    budget: &MaterialBudget,
) {
    let pending = session.pending_materials();
    let spans: Vec<Span> = session
        .materials()
        .iter()
        .map(|(material, amount)| {
            let extra = pending.get(material);
            let limit = budget
                .limit(material)
                .map(|l| format!("/{}", l))
                .unwrap_or_default();
            if extra > 0 {
                Span::raw(format!("{}: {}{} (+{})  ", material.name(), amount, limit, extra))
            } else {
                Span::raw(format!("{}: {}{}  ", material.name(), amount, limit))
            }
        })
        .collect();

    let mut summary = format!("Max per step: {}", session.max_materials());
    if let Some(efficiency) = session.material_efficiency() {
        summary.push_str(&format!(
            "  Efficiency: {} ({:.1} mats/pot)",
            efficiency.score,
            efficiency.total_materials as f64 / efficiency.potential_used.max(1) as f64
        ));
    }

    let warnings: Vec<Span> = session
        .material_warnings(budget)
        .iter()
        .map(|warning| {
            let color = match warning.severity() {
                Severity::Warning => Color::Yellow,
                Severity::Error => Color::Red,
            };
            Span::styled(format!("{}  ", warning.message()), Style::default().fg(color))
        })
        .collect();

    let mut lines = vec![
        Line::from(spans),
        Line::from(Span::styled(summary, Style::default().fg(Color::DarkGray))),
    ];
    if !warnings.is_empty() {
        lines.push(Line::from(warnings));
    }
    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Materials "))
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}
