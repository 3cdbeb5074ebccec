//! Error types for the interpreter
//!
//! This module defines [`RuntimeError`], which represents everything that can
//! stop a running program, and [`InterpretError`], which is what the batch
//! entry point returns: either the full list of parse errors or the runtime
//! error that halted execution.
//!
//! All runtime errors are fatal - the state is left as it was before the
//! failing instruction.

use crate::parser::parse::InstructionParseError;
use std::fmt;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Read from a register that was never written (strict reads only)
    UninitializedRegister { name: String, pc: usize },

    /// Arithmetic left the range of a 64-bit integer
    IntegerOverflow { operation: String, pc: usize },

    /// A jump would move the program counter before the first instruction
    /// (or past the addressable range)
    JumpOutOfBounds { pc: usize, offset: i64 },

    /// Batch run executed more instructions than allowed
    StepLimitExceeded { limit: usize },

    /// Snapshot history limit exceeded
    SnapshotLimitExceeded { current: usize, limit: usize },
}

impl RuntimeError {
    /// Program counter of the failing instruction, if the error has one
    pub fn pc(&self) -> Option<usize> {
        match self {
            RuntimeError::UninitializedRegister { pc, .. } => Some(*pc),
            RuntimeError::IntegerOverflow { pc, .. } => Some(*pc),
            RuntimeError::JumpOutOfBounds { pc, .. } => Some(*pc),
            RuntimeError::StepLimitExceeded { .. } => None,
            RuntimeError::SnapshotLimitExceeded { .. } => None,
        }
    }

    /// Attach the program counter of the instruction that raised this error
    pub(crate) fn at(self, pc: usize) -> Self {
        match self {
            RuntimeError::UninitializedRegister { name, .. } => {
                RuntimeError::UninitializedRegister { name, pc }
            }
            RuntimeError::IntegerOverflow { operation, .. } => {
                RuntimeError::IntegerOverflow { operation, pc }
            }
            other => other,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::UninitializedRegister { name, pc } => {
                write!(
                    f,
                    "Read from uninitialized register '{}' at instruction {}",
                    name, pc
                )
            }
            RuntimeError::IntegerOverflow { operation, pc } => {
                write!(
                    f,
                    "Integer overflow in operation: {} at instruction {}",
                    operation, pc
                )
            }
            RuntimeError::JumpOutOfBounds { pc, offset } => {
                write!(
                    f,
                    "Jump by {} at instruction {} lands outside the program",
                    offset, pc
                )
            }
            RuntimeError::StepLimitExceeded { limit } => {
                write!(f, "Step limit of {} instructions exceeded", limit)
            }
            RuntimeError::SnapshotLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Snapshot memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

/// Failure of a whole batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpretError {
    /// The program did not parse; every bad line is listed
    Parse(Vec<InstructionParseError>),

    /// The program parsed but stopped with an error
    Runtime(RuntimeError),
}

impl fmt::Display for InterpretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpretError::Parse(errors) => {
                write!(f, "{} parse error(s):", errors.len())?;
                for error in errors {
                    write!(f, "\n  {}", error)?;
                }
                Ok(())
            }
            InterpretError::Runtime(err) => write!(f, "Runtime error: {}", err),
        }
    }
}

impl std::error::Error for InterpretError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InterpretError::Parse(_) => None,
            InterpretError::Runtime(err) => Some(err),
        }
    }
}

impl From<RuntimeError> for InterpretError {
    fn from(err: RuntimeError) -> Self {
        InterpretError::Runtime(err)
    }
}

impl From<Vec<InstructionParseError>> for InterpretError {
    fn from(errors: Vec<InstructionParseError>) -> Self {
        InterpretError::Parse(errors)
    }
}
