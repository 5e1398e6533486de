//! Utility functions module
//!
//! This module contains ephemeral resource naming and shared HTTP client
//! helpers.

pub mod naming;
pub mod network;

pub use naming::*;
pub use network::*;
