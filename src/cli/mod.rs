//! CLI module for storsmoke
//!
//! Command definitions, argument parsing, and variant execution.

pub mod commands;

pub use commands::*;
