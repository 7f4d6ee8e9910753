use std::fmt;

use serde::{Deserialize, Serialize};

/// Operating state of the deck. Each mode maps to a target capstan speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransportMode {
    #[default]
    Stop,
    Play,
    FastForward,
    Rewind,
    Pause,
}

impl TransportMode {
    /// Button order used by the front panel
    pub const ALL: [TransportMode; 5] = [
        TransportMode::Stop,
        TransportMode::Play,
        TransportMode::FastForward,
        TransportMode::Rewind,
        TransportMode::Pause,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::Stop => "STOP",
            TransportMode::Play => "PLAY",
            TransportMode::FastForward => "FF",
            TransportMode::Rewind => "REW",
            TransportMode::Pause => "PAUSE",
        }
    }

    /// Parse a front-panel label. Anything unrecognized is treated as STOP.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        TransportMode::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(label))
            .unwrap_or(TransportMode::Stop)
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for TransportMode {
    fn from(label: &str) -> Self {
        TransportMode::from_label(label)
    }
}

/// The whole mutable state of the deck, advanced once per tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckState {
    pub transport: TransportMode,
    pub rpm_setpoint: f64,
    pub rpm: f64,
    pub pwm: f64, // [-1, 1]
    pub err: f64,
    pub tension: f64,

    // Injected faults, 0..1
    pub tape_friction: f64,
    pub encoder_jitter: f64,

    /// Encoder reading used for the visual spindle update only
    pub encoder_rpm: f64,

    // Spindle angles in degrees, [0, 360)
    pub reel_left_deg: f64,
    pub reel_right_deg: f64,
    pub capstan_deg: f64,
}

impl DeckState {
    /// Set both fault levels, clamped to the slider range.
    pub fn set_faults(&mut self, tape_friction: f64, encoder_jitter: f64) {
        self.tape_friction = clamp_unit(tape_friction);
        self.encoder_jitter = clamp_unit(encoder_jitter);
    }

    /// Power-on values for everything except the injected faults.
    pub fn reset_keeping_faults(&mut self) {
        *self = DeckState {
            tape_friction: self.tape_friction,
            encoder_jitter: self.encoder_jitter,
            ..Default::default()
        };
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

#[derive(Debug, Clone, Copy)]
pub struct SimContext {
    pub dt: f64,
    pub t: f64,
}

impl SimContext {
    /// Tick length with non-finite and negative values collapsed to zero
    pub fn effective_dt(&self) -> f64 {
        if self.dt.is_finite() && self.dt > 0.0 { self.dt } else { 0.0 }
    }
}

pub trait Model {
    fn reset(&mut self);
}

pub trait ControlModel: Model {
    fn step_control(&mut self, ctx: SimContext, state: &mut DeckState);
}

pub trait MechanicsModel: Model {
    fn step_physics(&mut self, ctx: SimContext, state: &mut DeckState);
}

pub trait SensorModel: Model {
    fn step_sensor(&mut self, ctx: SimContext, state: &mut DeckState);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_parse_back() {
        for mode in TransportMode::ALL {
            assert_eq!(TransportMode::from_label(mode.label()), mode);
        }
    }

    #[test]
    fn test_label_parse_is_lenient() {
        assert_eq!(TransportMode::from_label(" play "), TransportMode::Play);
        assert_eq!(TransportMode::from_label("rew"), TransportMode::Rewind);
        assert_eq!(TransportMode::from("EJECT"), TransportMode::Stop);
        assert_eq!(TransportMode::from(""), TransportMode::Stop);
    }

    #[test]
    fn test_set_faults_clamps() {
        let mut state = DeckState::default();
        state.set_faults(1.7, -0.2);
        assert_eq!(state.tape_friction, 1.0);
        assert_eq!(state.encoder_jitter, 0.0);

        state.set_faults(f64::NAN, 0.35);
        assert_eq!(state.tape_friction, 0.0);
        assert_eq!(state.encoder_jitter, 0.35);
    }

    #[test]
    fn test_reset_keeps_faults() {
        let mut state = DeckState {
            transport: TransportMode::Play,
            rpm: 1200.0,
            capstan_deg: 42.0,
            ..Default::default()
        };
        state.set_faults(0.4, 0.6);
        state.reset_keeping_faults();

        assert_eq!(state.transport, TransportMode::Stop);
        assert_eq!(state.rpm, 0.0);
        assert_eq!(state.capstan_deg, 0.0);
        assert_eq!(state.tape_friction, 0.4);
        assert_eq!(state.encoder_jitter, 0.6);
    }

    #[test]
    fn test_effective_dt() {
        assert_eq!(SimContext { dt: 0.016, t: 0.0 }.effective_dt(), 0.016);
        assert_eq!(SimContext { dt: -0.5, t: 0.0 }.effective_dt(), 0.0);
        assert_eq!(SimContext { dt: f64::NAN, t: 0.0 }.effective_dt(), 0.0);
    }
}
