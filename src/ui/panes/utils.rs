//! Shared rendering helpers

use crate::parser::ast::{Instruction, Operand};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};

/// Bordered block with the standard title style
pub fn pane_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border))
}

fn operand_span(operand: &Operand) -> Span<'static> {
    match operand {
        Operand::Literal(value) => {
            Span::styled(value.to_string(), Style::default().fg(DEFAULT_THEME.number))
        }
        Operand::Register(name) => {
            Span::styled(name.to_string(), Style::default().fg(DEFAULT_THEME.register))
        }
    }
}

/// Syntax-highlighted spans for one instruction
pub fn instruction_spans(instruction: &Instruction) -> Vec<Span<'static>> {
    let mnemonic = Span::styled(
        instruction.command(),
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
    );
    let space = || Span::raw(" ");

    match instruction {
        Instruction::Dec { register } | Instruction::Inc { register } => vec![
            mnemonic,
            space(),
            operand_span(&Operand::Register(register.clone())),
        ],
        Instruction::Jnz { test, offset } => vec![
            mnemonic,
            space(),
            operand_span(test),
            space(),
            operand_span(&Operand::Literal(*offset)),
        ],
        Instruction::Mov { to, source } => vec![
            mnemonic,
            space(),
            operand_span(&Operand::Register(to.clone())),
            space(),
            operand_span(source),
        ],
    }
}
