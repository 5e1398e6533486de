//! Configuration management module
//!
//! This module handles loading the run configuration from environment
//! variables at process start. The configuration is captured once into an
//! immutable value and passed explicitly into the pipeline.

pub mod settings;

pub use settings::*;
