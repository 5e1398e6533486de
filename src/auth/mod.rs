//! Authentication module
//!
//! Service-principal authentication against the target cloud's authority.

pub mod provider;

pub use provider::*;
