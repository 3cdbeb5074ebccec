//! Explanation pane
//!
//! Describes in plain English what the next instruction will do, using the
//! current register values. Registers that have never been written are shown
//! as `empty` and count as 0.

use super::utils::pane_block;
use crate::interpreter::engine::{InterpreterState, Registers};
use crate::parser::ast::{Instruction, Operand, RegisterName};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Paragraph, Wrap},
    Frame,
};

fn register_with_value(name: &RegisterName, registers: &Registers) -> String {
    match registers.get(name.as_str()) {
        Some(value) => format!("{} ({})", name, value),
        None => format!("{} (empty)", name),
    }
}

fn operand_description(operand: &Operand, registers: &Registers) -> String {
    match operand {
        Operand::Literal(value) => value.to_string(),
        Operand::Register(name) => register_with_value(name, registers),
    }
}

fn operand_value(operand: &Operand, registers: &Registers) -> i64 {
    match operand {
        Operand::Literal(value) => *value,
        Operand::Register(name) => registers.get(name.as_str()).copied().unwrap_or(0),
    }
}

/// Describe what `instruction` will do given the current `registers`
pub fn explain_instruction(instruction: &Instruction, registers: &Registers) -> String {
    match instruction {
        Instruction::Mov { to, source } => format!(
            "Move {} into register {}",
            operand_description(source, registers),
            register_with_value(to, registers)
        ),

        Instruction::Inc { register } | Instruction::Dec { register } => {
            let (verb, delta) = match instruction {
                Instruction::Inc { .. } => ("Increment", 1),
                _ => ("Decrement", -1),
            };
            let current = registers.get(register.as_str()).copied().unwrap_or(0);
            let result = current
                .checked_add(delta)
                .map_or_else(|| "out of range".to_string(), |v| v.to_string());
            format!(
                "{} the value in register {} by 1 to become {}",
                verb,
                register_with_value(register, registers),
                result
            )
        }

        Instruction::Jnz { test, offset } => {
            let description = operand_description(test, registers);
            if operand_value(test, registers) == 0 {
                format!("No jump by {} because {} is 0", offset, description)
            } else {
                format!("Jump by {} because {} is not 0", offset, description)
            }
        }
    }
}

/// Render the explanation of the next instruction
pub fn render_explain_pane(frame: &mut Frame, area: Rect, state: &InterpreterState) {
    let block = pane_block(" Next Instruction ");

    let (text, color) = match state.next_instruction() {
        Some(instruction) => (
            format!(
                "Next instruction will: {}",
                explain_instruction(instruction, &state.registers)
            ),
            DEFAULT_THEME.fg,
        ),
        None => (
            "No next instruction - program ended".to_string(),
            DEFAULT_THEME.comment,
        ),
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
