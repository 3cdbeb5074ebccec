//! Structured program representation
//!
//! A program is a flat list of [`Instruction`]s. Every operand that may be
//! either a literal or a register reference is an [`Operand`], so the
//! interpreter never has to guess what a token meant.

use std::borrow::Borrow;
use std::fmt;

/// A validated register name: one or more ASCII letters, case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegisterName(String);

impl RegisterName {
    /// Returns `true` if `candidate` is usable as a register name
    pub fn is_valid(candidate: &str) -> bool {
        !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_alphabetic())
    }

    /// Build a register name, or `None` if `candidate` contains anything but letters
    pub fn new(candidate: &str) -> Option<Self> {
        if Self::is_valid(candidate) {
            Some(RegisterName(candidate.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Lets `FxHashMap<RegisterName, _>` be queried with a plain `&str`.
impl Borrow<str> for RegisterName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegisterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An operand that is either an integer literal or a register reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(i64),
    Register(RegisterName),
}

impl Operand {
    /// The register this operand reads from, if any
    pub fn register(&self) -> Option<&RegisterName> {
        match self {
            Operand::Literal(_) => None,
            Operand::Register(name) => Some(name),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(value) => write!(f, "{}", value),
            Operand::Register(name) => write!(f, "{}", name),
        }
    }
}

/// One parsed instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `dec r`: decrement `r` by one
    Dec { register: RegisterName },

    /// `inc r`: increment `r` by one
    Inc { register: RegisterName },

    /// `jnz x offset`: jump by `offset` when `x` is not zero
    Jnz { test: Operand, offset: i64 },

    /// `mov r x`: copy `x` into `r`
    Mov { to: RegisterName, source: Operand },
}

impl Instruction {
    /// The mnemonic as written in source
    pub fn command(&self) -> &'static str {
        match self {
            Instruction::Dec { .. } => "dec",
            Instruction::Inc { .. } => "inc",
            Instruction::Jnz { .. } => "jnz",
            Instruction::Mov { .. } => "mov",
        }
    }

    /// Registers read or written by this instruction, in operand order
    pub fn involved_registers(&self) -> Vec<&RegisterName> {
        match self {
            Instruction::Dec { register } | Instruction::Inc { register } => vec![register],
            Instruction::Jnz { test, .. } => test.register().into_iter().collect(),
            Instruction::Mov { to, source } => {
                let mut names = vec![to];
                names.extend(source.register());
                names
            }
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Dec { register } | Instruction::Inc { register } => {
                write!(f, "{} {}", self.command(), register)
            }
            Instruction::Jnz { test, offset } => write!(f, "jnz {} {}", test, offset),
            Instruction::Mov { to, source } => write!(f, "mov {} {}", to, source),
        }
    }
}
