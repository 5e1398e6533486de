//! Provisioning pipeline module
//!
//! A fixed ordered sequence of management-plane steps, awaited strictly
//! sequentially and aborted at the first failure. No rollback is attempted;
//! cleanup is an explicit follow-up command printed to the user.

pub mod runner;
pub mod steps;

pub use runner::*;
pub use steps::*;
