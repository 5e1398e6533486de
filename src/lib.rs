//! storsmoke - Azure Storage provisioning walkthrough
//!
//! A command-line tool that exercises the Azure Storage management plane
//! end to end: it provisions a resource group and a storage account, then
//! inspects, rekeys, and updates the account in a fixed fail-fast sequence.

pub mod arm;
pub mod auth;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types
pub use error::{Result, StorsmokeError};
