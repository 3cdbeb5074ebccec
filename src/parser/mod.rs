//! Instruction parser
//!
//! This module turns raw program lines into structured instructions:
//! - [`ast`]: [`ast::Instruction`], [`ast::Operand`] and [`ast::RegisterName`]
//! - [`parse`]: line parsing and batch parsing with per-line errors
//!
//! # Instruction Set
//!
//! ```text
//! mov <reg> <reg|int>    copy a value into a register
//! inc <reg>              add one
//! dec <reg>              subtract one
//! jnz <reg|int> <int>    jump by an offset when the value is not zero
//! ```
//!
//! Tokens are separated by whitespace. Register names are letters only and
//! case-sensitive.

pub mod ast;
pub mod parse;
