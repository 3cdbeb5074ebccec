//! Instruction parser
//!
//! This module provides [`parse_instruction`] for a single line and
//! [`parse_instructions_collecting_errors`] for a whole program.
//!
//! # Operand rules
//!
//! - `dec`/`inc` take a register name.
//! - `jnz` takes a literal-or-register test value and an integer offset.
//! - `mov` takes a register name target and a literal-or-register source.
//!
//! A literal-or-register token is tried as an integer first and falls back to
//! a register name, so `jnz 5 1` tests the constant 5 and `jnz a 1` tests `a`.
//!
//! # Parse modes
//!
//! [`ParseMode::Lenient`] accepts any token with a numeric prefix (`5x` reads
//! as 5) and ignores trailing tokens. [`ParseMode::Strict`] rejects both.

use crate::parser::ast::{Instruction, Operand, RegisterName};
use std::fmt;

/// How forgiving the parser is about malformed tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    #[default]
    Lenient,
    Strict,
}

/// What went wrong while parsing a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The line contains no tokens at all
    Empty,

    /// The first token is not one of `dec`, `inc`, `jnz`, `mov`
    UnknownCommand { command: String },

    /// The line ended before a required operand
    MissingOperand { expected: &'static str },

    /// A token in register position contains something other than letters
    InvalidRegisterName { token: String },

    /// A token in integer position does not start with a number
    InvalidInteger { token: String },

    /// A number that does not fit in 64 bits
    IntegerOutOfRange { token: String },

    /// A token after the last operand (strict mode only)
    UnexpectedToken { token: String },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Empty => write!(f, "empty instruction"),
            ParseErrorKind::UnknownCommand { command } => {
                write!(f, "unknown command '{}'", command)
            }
            ParseErrorKind::MissingOperand { expected } => {
                write!(f, "missing operand: expected {}", expected)
            }
            ParseErrorKind::InvalidRegisterName { token } => {
                write!(f, "invalid register name '{}'", token)
            }
            ParseErrorKind::InvalidInteger { token } => {
                write!(f, "expected number, got '{}'", token)
            }
            ParseErrorKind::IntegerOutOfRange { token } => {
                write!(f, "number '{}' is out of range", token)
            }
            ParseErrorKind::UnexpectedToken { token } => {
                write!(f, "unexpected trailing token '{}'", token)
            }
        }
    }
}

/// Parser error for a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// The raw line being parsed
    pub line: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in instruction '{}'", self.kind, self.line)
    }
}

impl std::error::Error for ParseError {}

/// A parse failure tagged with its position in the program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionParseError {
    /// The offending line, exactly as supplied
    pub raw: String,
    /// 0-based index of the line in the program
    pub line_number: usize,
    pub error: ParseErrorKind,
}

impl fmt::Display for InstructionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}: {} in '{}'",
            self.line_number + 1,
            self.error,
            self.raw
        )
    }
}

impl std::error::Error for InstructionParseError {}

/// Parse one instruction such as `mov a -10`
pub fn parse_instruction(line: &str) -> Result<Instruction, ParseError> {
    parse_instruction_with(line, ParseMode::Lenient)
}

/// Parse one instruction with an explicit [`ParseMode`]
pub fn parse_instruction_with(line: &str, mode: ParseMode) -> Result<Instruction, ParseError> {
    LineParser::new(line, mode)
        .parse()
        .map_err(|kind| ParseError {
            kind,
            line: line.to_string(),
        })
}

/// Parse every line independently.
///
/// Returns the instructions that parsed (in program order) and one error per
/// line that did not. A bad line never stops later lines from being parsed.
pub fn parse_instructions_collecting_errors<S: AsRef<str>>(
    lines: &[S],
) -> (Vec<Instruction>, Vec<InstructionParseError>) {
    parse_instructions_collecting_errors_with(lines, ParseMode::Lenient)
}

pub fn parse_instructions_collecting_errors_with<S: AsRef<str>>(
    lines: &[S],
    mode: ParseMode,
) -> (Vec<Instruction>, Vec<InstructionParseError>) {
    let mut instructions = Vec::with_capacity(lines.len());
    let mut errors = Vec::new();

    for (line_number, line) in lines.iter().enumerate() {
        match parse_instruction_with(line.as_ref(), mode) {
            Ok(instruction) => instructions.push(instruction),
            Err(err) => errors.push(InstructionParseError {
                raw: err.line,
                line_number,
                error: err.kind,
            }),
        }
    }

    (instructions, errors)
}

/// Cursor over the whitespace-separated tokens of one line
struct LineParser<'a> {
    tokens: Vec<&'a str>,
    position: usize,
    mode: ParseMode,
}

impl<'a> LineParser<'a> {
    fn new(line: &'a str, mode: ParseMode) -> Self {
        LineParser {
            tokens: line.split_whitespace().collect(),
            position: 0,
            mode,
        }
    }

    fn parse(mut self) -> Result<Instruction, ParseErrorKind> {
        let command = self.advance().ok_or(ParseErrorKind::Empty)?;

        let instruction = match command {
            "dec" => Instruction::Dec {
                register: self.expect_register()?,
            },
            "inc" => Instruction::Inc {
                register: self.expect_register()?,
            },
            "jnz" => Instruction::Jnz {
                test: self.expect_operand()?,
                offset: self.expect_integer()?,
            },
            "mov" => Instruction::Mov {
                to: self.expect_register()?,
                source: self.expect_operand()?,
            },
            other => {
                return Err(ParseErrorKind::UnknownCommand {
                    command: other.to_string(),
                })
            }
        };

        self.finish()?;
        Ok(instruction)
    }

    // ===== Helper methods =====

    fn advance(&mut self) -> Option<&'a str> {
        let token = self.tokens.get(self.position).copied();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn expect_token(&mut self, expected: &'static str) -> Result<&'a str, ParseErrorKind> {
        self.advance()
            .ok_or(ParseErrorKind::MissingOperand { expected })
    }

    fn expect_register(&mut self) -> Result<RegisterName, ParseErrorKind> {
        let token = self.expect_token("register name")?;
        RegisterName::new(token).ok_or_else(|| ParseErrorKind::InvalidRegisterName {
            token: token.to_string(),
        })
    }

    fn expect_integer(&mut self) -> Result<i64, ParseErrorKind> {
        let token = self.expect_token("number")?;
        self.integer(token)?
            .ok_or_else(|| ParseErrorKind::InvalidInteger {
                token: token.to_string(),
            })
    }

    fn expect_operand(&mut self) -> Result<Operand, ParseErrorKind> {
        let token = self.expect_token("number or register name")?;
        if let Some(value) = self.integer(token)? {
            return Ok(Operand::Literal(value));
        }
        RegisterName::new(token)
            .map(Operand::Register)
            .ok_or_else(|| ParseErrorKind::InvalidRegisterName {
                token: token.to_string(),
            })
    }

    /// `Ok(None)` when the token is not a number under the current mode
    fn integer(&self, token: &str) -> Result<Option<i64>, ParseErrorKind> {
        let digits = match numeric_prefix(token) {
            Some(prefix) if self.mode == ParseMode::Lenient || prefix.len() == token.len() => {
                prefix
            }
            _ => return Ok(None),
        };

        digits
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ParseErrorKind::IntegerOutOfRange {
                token: token.to_string(),
            })
    }

    fn finish(&mut self) -> Result<(), ParseErrorKind> {
        match (self.mode, self.advance()) {
            (ParseMode::Strict, Some(token)) => Err(ParseErrorKind::UnexpectedToken {
                token: token.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// The leading `[+-]?[0-9]+` part of `token`, if there is one
fn numeric_prefix(token: &str) -> Option<&str> {
    let bytes = token.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'-') | Some(b'+')));
    let digits = bytes[sign..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();

    if digits == 0 {
        None
    } else {
        Some(&token[..sign + digits])
    }
}
