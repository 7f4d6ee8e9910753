//! Speed control for the capstan
//!
//! This crate provides:
//! - A clamped proportional speed loop
//! - Setpoint selection from the transport mode

pub mod speed_loop;

pub use speed_loop::*;
