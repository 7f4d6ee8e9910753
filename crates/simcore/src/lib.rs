//! Shared simulation core for the tape deck
//!
//! This crate provides:
//! - The deck state record and transport modes
//! - Model traits the control and mechanics stages implement
//! - A first-order lag filter and angle helpers
//! - The sliding-window telemetry trace
//! - Configuration loading

pub mod config;
pub mod error;
pub mod filters;
pub mod telemetry;
pub mod traits;

pub use config::*;
pub use error::ConfigError;
pub use filters::*;
pub use telemetry::*;
pub use traits::*;
