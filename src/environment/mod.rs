//! Cloud environment module
//!
//! This module describes the target cloud (endpoints, token audience,
//! authority) as an explicit record passed into authentication and the ARM
//! clients, and — for the hybrid variant — derives that record from the
//! unauthenticated metadata-endpoints call.

pub mod discovery;
pub mod models;

pub use discovery::*;
pub use models::*;
