//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`program`]: Instruction listing with the program counter marker
//! - [`registers`]: Register values, highlighting those the next instruction touches
//! - [`explain`]: Plain-English description of what the next instruction will do
//! - [`history`]: Instructions executed so far
//! - [`status`]: Status bar with keybindings and execution state
//! - `utils`: Shared helpers for blocks and instruction highlighting
//!
//! Each pane module exports a primary `render_*` function.

mod utils;

pub mod explain;
pub mod history;
pub mod program;
pub mod registers;
pub mod status;

// Re-export render functions for convenience
pub use explain::{explain_instruction, render_explain_pane};
pub use history::render_history_pane;
pub use program::render_program_pane;
pub use registers::render_registers_pane;
pub use status::{render_status_bar, StatusRenderData};
