//! Register machine execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: [`engine::InterpreterState`], single-instruction execution and batch runs
//! - [`errors`]: Runtime and batch error types
//! - [`constants`]: Default limits
//!
//! # Execution Model
//!
//! A program is a fixed list of instructions plus a program counter and a
//! register file. Each step executes the instruction under the program
//! counter, then advances it by one or by the offset of a taken `jnz`. The
//! program ends when the counter runs past the last instruction; there is no
//! halt instruction.

pub mod constants;
pub mod engine;
pub mod errors;
