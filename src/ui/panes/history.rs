//! History pane: instructions executed so far, newest at the bottom

use super::utils::{instruction_spans, pane_block};
use crate::parser::ast::Instruction;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_history_pane<'a>(
    frame: &mut Frame,
    area: Rect,
    past_instructions: impl Iterator<Item = &'a Instruction>,
) {
    let block = pane_block(" History ");

    let lines: Vec<Line> = past_instructions
        .enumerate()
        .map(|(idx, instruction)| {
            let mut spans = vec![Span::styled(
                format!("{:5}: ", idx + 1),
                Style::default().fg(DEFAULT_THEME.comment),
            )];
            spans.extend(instruction_spans(instruction));
            Line::from(spans)
        })
        .collect();

    if lines.is_empty() {
        let paragraph = Paragraph::new("(nothing executed yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // Always show the most recent entries
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let skip = lines.len().saturating_sub(visible_height);
    let visible: Vec<Line> = lines.into_iter().skip(skip).collect();

    let paragraph = Paragraph::new(visible).block(block);
    frame.render_widget(paragraph, area);
}
