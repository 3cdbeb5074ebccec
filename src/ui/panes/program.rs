//! Program listing pane
//!
//! Shows every instruction with its 1-based line number and an arrow on the
//! instruction the program counter points at. Once the program has ended the
//! arrow sits on a trailing `end` row. The listing scrolls so the arrow stays
//! near the middle of the pane.

use super::utils::{instruction_spans, pane_block};
use crate::interpreter::engine::InterpreterState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the program pane. `error_pc` marks an instruction that failed.
pub fn render_program_pane(
    frame: &mut Frame,
    area: Rect,
    state: &InterpreterState,
    error_pc: Option<usize>,
) {
    let block = pane_block(" Program ");
    let total_rows = state.instructions.len() + 1; // Trailing end-of-program row
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders

    let current = state.program_counter.min(state.instructions.len());
    let max_scroll = total_rows.saturating_sub(visible_height);
    let offset = current.saturating_sub(visible_height / 2).min(max_scroll);

    let mut rows: Vec<Line> = state
        .instructions
        .iter()
        .enumerate()
        .map(|(idx, instruction)| {
            let is_current = idx == current;
            let is_error = error_pc == Some(idx);

            let marker = if is_current { "＞ " } else { "  " };
            let num_style = if is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![
                Span::styled(format!("{:4} ", idx + 1), num_style),
                Span::styled(marker, num_style),
            ];
            let mut content = instruction_spans(instruction);
            if is_error {
                for span in &mut content {
                    span.style = Style::default()
                        .bg(DEFAULT_THEME.error)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD);
                }
            } else if is_current {
                for span in &mut content {
                    span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                }
            }
            spans.extend(content);
            Line::from(spans)
        })
        .collect();

    let at_end = state.is_at_end();
    rows.push(Line::from(vec![
        Span::raw("     "),
        Span::styled(
            if at_end { "＞ " } else { "  " },
            Style::default().fg(DEFAULT_THEME.secondary),
        ),
        Span::styled("end", Style::default().fg(DEFAULT_THEME.comment)),
    ]));

    let visible: Vec<Line> = rows.into_iter().skip(offset).take(visible_height).collect();

    let paragraph = Paragraph::new(visible).block(block);
    frame.render_widget(paragraph, area);
}
