//! Tape transport simulator
//!
//! Composes the speed loop, capstan drive, encoder and spindle models into a
//! single per-tick `step`, and formats the telemetry readout.

pub mod readout;
pub mod simulator;

pub use readout::Readout;
pub use simulator::Simulator;
