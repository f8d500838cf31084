//! # atlas
//!
//! A command line client for ENS: resolve names and addresses, read records and edit them.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate atlas_common;

#[macro_use]
extern crate tracing;

pub mod args;
pub mod cmd;
pub mod opts;
