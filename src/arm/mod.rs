//! Azure Resource Manager module
//!
//! This module provides the management-plane operations the walkthrough
//! exercises: resource-group creation and the storage-account operation set,
//! all spoken as ARM REST over a shared authenticated client.

pub mod client;
pub mod models;
pub mod resources;
pub mod storage;

pub use client::*;
pub use models::*;
pub use resources::*;
pub use storage::*;
