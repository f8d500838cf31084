//! Utilities for writing to the terminal.

#[macro_use]
mod macros;

pub mod shell;
pub mod style;

pub use shell::Shell;
