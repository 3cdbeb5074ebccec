//! Register pane rendering

use super::utils::pane_block;
use crate::interpreter::engine::InterpreterState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render register values sorted by name.
///
/// Registers read or written by the next instruction are highlighted.
pub fn render_registers_pane(frame: &mut Frame, area: Rect, state: &InterpreterState) {
    let block = pane_block(" Registers ");

    let entries = state.sorted_registers();
    if entries.is_empty() {
        let paragraph = Paragraph::new("(no registers)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let involved = state
        .next_instruction()
        .map(|instruction| instruction.involved_registers())
        .unwrap_or_default();
    let name_width = entries
        .iter()
        .map(|(name, _)| name.as_str().len())
        .max()
        .unwrap_or(0);

    let lines: Vec<Line> = entries
        .iter()
        .map(|(name, value)| {
            let name_style = if involved.contains(name) {
                Style::default()
                    .fg(DEFAULT_THEME.involved)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.register)
            };
            Line::from(vec![
                Span::styled(format!(" {:<width$} ", name.as_str(), width = name_width), name_style),
                Span::styled("= ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(value.to_string(), Style::default().fg(DEFAULT_THEME.number)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
