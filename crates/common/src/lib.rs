//! Common utilities for building and using atlas's tools.

#![warn(missing_docs, unused_crate_dependencies)]

#[macro_use]
pub mod io;

pub mod errors;
pub mod term;

pub use io::{Shell, shell};
