// Execution engine for the register machine

use crate::interpreter::constants::DEFAULT_STEP_LIMIT;
use crate::interpreter::errors::{InterpretError, RuntimeError};
use crate::parser::ast::{Instruction, Operand, RegisterName};
use crate::parser::parse::{
    parse_instructions_collecting_errors_with, InstructionParseError, ParseMode,
};
use rustc_hash::FxHashMap;
use std::collections::HashMap;
use std::rc::Rc;

/// Register file: name -> value. Registers spring into existence on first write.
pub type Registers = FxHashMap<RegisterName, i64>;

/// What reading a never-written register yields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UninitializedReads {
    /// Missing registers read as 0
    #[default]
    Zero,
    /// Missing registers raise [`RuntimeError::UninitializedRegister`]
    Fail,
}

/// Knobs for parsing and running a program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionConfig {
    pub parse_mode: ParseMode,
    pub uninitialized: UninitializedReads,
    /// `None` runs without a limit
    pub step_limit: Option<usize>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        ExecutionConfig {
            parse_mode: ParseMode::Lenient,
            uninitialized: UninitializedReads::Zero,
            step_limit: Some(DEFAULT_STEP_LIMIT),
        }
    }
}

/// Complete run-time state of a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterState {
    pub registers: Registers,
    /// Index of the next instruction; `>= instructions.len()` means the program ended
    pub program_counter: usize,
    /// The program itself. Shared, never modified after construction.
    pub instructions: Rc<[Instruction]>,
}

impl InterpreterState {
    /// Fresh state at the first instruction with no registers
    pub fn new(instructions: Vec<Instruction>) -> Self {
        InterpreterState {
            registers: Registers::default(),
            program_counter: 0,
            instructions: instructions.into(),
        }
    }

    /// The same program, rewound to its initial state
    pub fn reset(&self) -> Self {
        InterpreterState {
            registers: Registers::default(),
            program_counter: 0,
            instructions: Rc::clone(&self.instructions),
        }
    }

    /// The program has finished once the program counter runs off the end
    pub fn is_at_end(&self) -> bool {
        self.program_counter >= self.instructions.len()
    }

    /// The instruction that will execute next, or `None` at the end
    pub fn next_instruction(&self) -> Option<&Instruction> {
        self.instructions.get(self.program_counter)
    }

    /// Registers ordered by name
    pub fn sorted_registers(&self) -> Vec<(&RegisterName, i64)> {
        let mut entries: Vec<_> = self
            .registers
            .iter()
            .map(|(name, value)| (name, *value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Execute the next instruction in place.
    ///
    /// Returns the executed instruction, or `None` (leaving the state untouched)
    /// when the program has already ended. On error the state is unchanged.
    pub fn advance(
        &mut self,
        reads: UninitializedReads,
    ) -> Result<Option<&Instruction>, RuntimeError> {
        let pc = self.program_counter;
        let Some(instruction) = self.instructions.get(pc) else {
            return Ok(None);
        };

        let offset = execute_instruction_with(instruction, &mut self.registers, reads)
            .map_err(|err| err.at(pc))?;
        self.program_counter = next_program_counter(pc, offset)?;

        Ok(Some(instruction))
    }

    /// Pure step: the state after the next instruction, plus that instruction.
    ///
    /// `Ok(None)` when the program has already ended.
    pub fn step(
        &self,
        reads: UninitializedReads,
    ) -> Result<Option<(InterpreterState, Instruction)>, RuntimeError> {
        let mut next = self.clone();
        let executed = next.advance(reads)?.cloned();
        Ok(executed.map(|instruction| (next, instruction)))
    }

    /// Execute until the program ends. Returns the number of instructions run.
    pub fn run_to_end(&mut self, config: &ExecutionConfig) -> Result<usize, RuntimeError> {
        let mut steps = 0;

        while !self.is_at_end() {
            if let Some(limit) = config.step_limit {
                if steps >= limit {
                    return Err(RuntimeError::StepLimitExceeded { limit });
                }
            }
            self.advance(config.uninitialized)?;
            steps += 1;
        }

        Ok(steps)
    }
}

fn next_program_counter(pc: usize, offset: Option<i64>) -> Result<usize, RuntimeError> {
    match offset {
        None => Ok(pc + 1),
        Some(offset) => isize::try_from(offset)
            .ok()
            .and_then(|delta| pc.checked_add_signed(delta))
            .ok_or(RuntimeError::JumpOutOfBounds { pc, offset }),
    }
}

/// Parse `lines` and build the initial state.
///
/// All-or-nothing: if any line fails to parse, every error is returned and
/// no state is built.
pub fn create_initial_state<S: AsRef<str>>(
    lines: &[S],
) -> Result<InterpreterState, Vec<InstructionParseError>> {
    create_initial_state_with(lines, ParseMode::Lenient)
}

pub fn create_initial_state_with<S: AsRef<str>>(
    lines: &[S],
    mode: ParseMode,
) -> Result<InterpreterState, Vec<InstructionParseError>> {
    let (instructions, errors) = parse_instructions_collecting_errors_with(lines, mode);
    if errors.is_empty() {
        Ok(InterpreterState::new(instructions))
    } else {
        Err(errors)
    }
}

/// Execute a single instruction against `registers`, reading missing registers as 0.
///
/// Mutates `registers` in place and never touches the program counter.
/// Returns the jump offset for a taken `jnz`, `None` to advance by one.
pub fn execute_instruction(
    instruction: &Instruction,
    registers: &mut Registers,
) -> Result<Option<i64>, RuntimeError> {
    execute_instruction_with(instruction, registers, UninitializedReads::Zero)
}

/// [`execute_instruction`] with an explicit policy for missing registers.
///
/// Errors raised here report program counter 0; [`InterpreterState::advance`]
/// fills in the real one.
pub fn execute_instruction_with(
    instruction: &Instruction,
    registers: &mut Registers,
    reads: UninitializedReads,
) -> Result<Option<i64>, RuntimeError> {
    match instruction {
        Instruction::Dec { register } => {
            let value = read_register(registers, register, reads)?
                .checked_sub(1)
                .ok_or_else(|| overflow(instruction))?;
            registers.insert(register.clone(), value);
            Ok(None)
        }

        Instruction::Inc { register } => {
            let value = read_register(registers, register, reads)?
                .checked_add(1)
                .ok_or_else(|| overflow(instruction))?;
            registers.insert(register.clone(), value);
            Ok(None)
        }

        Instruction::Jnz { test, offset } => {
            if resolve_operand(test, registers, reads)? != 0 {
                Ok(Some(*offset))
            } else {
                Ok(None)
            }
        }

        Instruction::Mov { to, source } => {
            let value = resolve_operand(source, registers, reads)?;
            registers.insert(to.clone(), value);
            Ok(None)
        }
    }
}

/// Current value of a literal-or-register operand
pub fn resolve_operand(
    operand: &Operand,
    registers: &Registers,
    reads: UninitializedReads,
) -> Result<i64, RuntimeError> {
    match operand {
        Operand::Literal(value) => Ok(*value),
        Operand::Register(name) => read_register(registers, name, reads),
    }
}

fn read_register(
    registers: &Registers,
    name: &RegisterName,
    reads: UninitializedReads,
) -> Result<i64, RuntimeError> {
    match (registers.get(name.as_str()), reads) {
        (Some(value), _) => Ok(*value),
        (None, UninitializedReads::Zero) => Ok(0),
        (None, UninitializedReads::Fail) => Err(RuntimeError::UninitializedRegister {
            name: name.to_string(),
            pc: 0,
        }),
    }
}

fn overflow(instruction: &Instruction) -> RuntimeError {
    RuntimeError::IntegerOverflow {
        operation: instruction.to_string(),
        pc: 0,
    }
}

/// Parse and run a program to completion, returning the final registers
pub fn interpret<S: AsRef<str>>(lines: &[S]) -> Result<Registers, InterpretError> {
    interpret_with(lines, &ExecutionConfig::default())
}

pub fn interpret_with<S: AsRef<str>>(
    lines: &[S],
    config: &ExecutionConfig,
) -> Result<Registers, InterpretError> {
    let mut state = create_initial_state_with(lines, config.parse_mode)?;
    state.run_to_end(config)?;
    Ok(state.registers)
}

/// Run a program and return its registers as a plain map.
///
/// Kept under this name and signature for compatibility with the coding
/// exercise the language comes from.
///
/// # Panics
///
/// Panics with the full error list if any line fails to parse, or if the
/// program fails at run time.
pub fn simple_assembler(program: Vec<&str>) -> HashMap<String, i64> {
    match interpret(&program[..]) {
        Ok(registers) => registers
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
        Err(err) => panic!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::parse_instruction;

    fn regs(pairs: &[(&str, i64)]) -> Registers {
        pairs
            .iter()
            .map(|(name, value)| (RegisterName::new(name).unwrap(), *value))
            .collect()
    }

    fn exec(line: &str, registers: &mut Registers) -> Option<i64> {
        execute_instruction(&parse_instruction(line).unwrap(), registers).unwrap()
    }

    #[test]
    fn test_mov_literal() {
        let mut registers = regs(&[]);
        assert_eq!(exec("mov a 5", &mut registers), None);
        assert_eq!(registers, regs(&[("a", 5)]));
    }

    #[test]
    fn test_mov_register() {
        let mut registers = regs(&[("b", 99)]);
        assert_eq!(exec("mov a b", &mut registers), None);
        assert_eq!(registers, regs(&[("a", 99), ("b", 99)]));
    }

    #[test]
    fn test_inc_dec() {
        let mut registers = regs(&[("a", 3), ("b", 100)]);
        assert_eq!(exec("inc a", &mut registers), None);
        assert_eq!(exec("dec b", &mut registers), None);
        assert_eq!(registers, regs(&[("a", 4), ("b", 99)]));
    }

    #[test]
    fn test_jnz() {
        let mut registers = regs(&[("a", 0), ("b", 100), ("c", 2)]);
        assert_eq!(exec("jnz a -5", &mut registers), None);
        assert_eq!(exec("jnz c -5", &mut registers), Some(-5));
        assert_eq!(exec("jnz 17 -5", &mut registers), Some(-5));
        assert_eq!(exec("jnz 0 -5", &mut registers), None);
        assert_eq!(registers, regs(&[("a", 0), ("b", 100), ("c", 2)]));
    }

    #[test]
    fn test_uninitialized_reads() {
        let mut registers = regs(&[]);
        assert_eq!(exec("mov a b", &mut registers), None);
        assert_eq!(registers, regs(&[("a", 0)]));

        let instruction = parse_instruction("inc x").unwrap();
        let err = execute_instruction_with(&instruction, &mut registers, UninitializedReads::Fail)
            .unwrap_err();
        assert!(matches!(err, RuntimeError::UninitializedRegister { ref name, .. } if name == "x"));
        assert!(!registers.contains_key("x"));
    }

    #[test]
    fn test_overflow() {
        let mut registers = regs(&[("a", i64::MAX)]);
        let instruction = parse_instruction("inc a").unwrap();
        let err = execute_instruction(&instruction, &mut registers).unwrap_err();
        assert!(matches!(err, RuntimeError::IntegerOverflow { .. }));
        assert_eq!(registers, regs(&[("a", i64::MAX)]));
    }

    #[test]
    fn test_advance_attaches_pc() {
        let mut state = create_initial_state(&["inc a", "mov b c"]).unwrap();
        state.advance(UninitializedReads::Fail).unwrap();
        let err = state.advance(UninitializedReads::Fail).unwrap_err();
        assert_eq!(err.pc(), Some(1));
        assert_eq!(state.program_counter, 1);
    }

    #[test]
    fn test_jump_before_start() {
        let mut state = create_initial_state(&["jnz 1 -1"]).unwrap();
        let err = state.advance(UninitializedReads::Zero).unwrap_err();
        assert_eq!(err, RuntimeError::JumpOutOfBounds { pc: 0, offset: -1 });
        assert_eq!(state.program_counter, 0);
    }

    #[test]
    fn test_jump_past_end_finishes() {
        let mut state = create_initial_state(&["jnz 1 10", "inc a"]).unwrap();
        state.advance(UninitializedReads::Zero).unwrap();
        assert!(state.is_at_end());
        assert_eq!(state.next_instruction(), None);
    }

    #[test]
    fn test_advance_at_end_is_noop() {
        let mut state = create_initial_state(&["inc a"]).unwrap();
        assert!(state.advance(UninitializedReads::Zero).unwrap().is_some());
        let before = state.clone();
        assert!(state.advance(UninitializedReads::Zero).unwrap().is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_step_is_pure() {
        let state = create_initial_state(&["inc a"]).unwrap();
        let (next, executed) = state.step(UninitializedReads::Zero).unwrap().unwrap();
        assert_eq!(executed.to_string(), "inc a");
        assert_eq!(state.program_counter, 0);
        assert!(state.registers.is_empty());
        assert_eq!(next.registers, regs(&[("a", 1)]));
        assert!(next.step(UninitializedReads::Zero).unwrap().is_none());
    }

    #[test]
    fn test_step_limit() {
        let config = ExecutionConfig {
            step_limit: Some(100),
            ..ExecutionConfig::default()
        };
        let err = interpret_with(&["jnz 1 0"], &config).unwrap_err();
        assert_eq!(
            err,
            InterpretError::Runtime(RuntimeError::StepLimitExceeded { limit: 100 })
        );
    }

    #[test]
    fn test_reset_shares_program() {
        let mut state = create_initial_state(&["inc a", "inc a"]).unwrap();
        state.run_to_end(&ExecutionConfig::default()).unwrap();
        let fresh = state.reset();
        assert_eq!(fresh.program_counter, 0);
        assert!(fresh.registers.is_empty());
        assert!(Rc::ptr_eq(&fresh.instructions, &state.instructions));
    }
}
