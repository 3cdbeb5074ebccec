//! # Introduction
//!
//! asmtty parses and executes programs written in a four-instruction register
//! assembly language (`mov`, `inc`, `dec`, `jnz`), either in one go or one
//! instruction at a time. Step-by-step runs keep a snapshot history that a
//! terminal UI built with [ratatui](https://docs.rs/ratatui) navigates
//! forward and backward.
//!
//! ## Execution pipeline
//!
//! ```text
//! Lines → Parser → Instructions → InterpreterState → Snapshots → TUI
//! ```
//!
//! 1. [`parser`] — turns each line into an [`parser::ast::Instruction`],
//!    collecting every bad line instead of stopping at the first.
//! 2. [`interpreter`] — the program counter + registers state machine:
//!    single-instruction execution, stepping and batch runs.
//! 3. [`snapshot`] — history of intermediate states for stepping backward.
//! 4. [`programs`] — built-in example programs.
//! 5. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Quick start
//!
//! ```
//! use asmtty::interpreter::engine::interpret;
//!
//! let registers = interpret(&["mov a 5", "dec a", "jnz a -1"]).unwrap();
//! assert_eq!(registers.get("a"), Some(&0));
//! ```

pub mod interpreter;
pub mod parser;
pub mod programs;
pub mod snapshot;
pub mod ui;

pub use interpreter::engine::simple_assembler;
