use std::f64::consts::PI;

use simcore::{DeckState, MechanicsModel, Model, SimContext, SpindleRatios, wrap_degrees};

/// Converts rpm to rad/s
pub fn rpm_to_rad_per_s(rpm: f64) -> f64 {
    rpm * 2.0 * PI / 60.0
}

/// Visual rotation of the capstan and both reels.
///
/// Driven from the encoder reading, so jitter shows up as wobble.
#[derive(Debug, Clone, Default)]
pub struct Spindles {
    pub ratios: SpindleRatios,
}

impl Spindles {
    pub fn new(ratios: SpindleRatios) -> Self {
        Spindles { ratios }
    }

    /// Advance an angle (deg) by `ratio * omega * dt`, wrapped to [0, 360)
    fn advance(angle_deg: f64, ratio: f64, omega: f64, dt: f64) -> f64 {
        wrap_degrees(angle_deg + (ratio * omega * dt).to_degrees())
    }
}

impl Model for Spindles {
    fn reset(&mut self) {
        // Angles live in DeckState
    }
}

impl MechanicsModel for Spindles {
    fn step_physics(&mut self, ctx: SimContext, state: &mut DeckState) {
        let dt = ctx.effective_dt();
        let omega = rpm_to_rad_per_s(state.encoder_rpm);

        state.capstan_deg = Self::advance(state.capstan_deg, self.ratios.capstan_ratio, omega, dt);
        state.reel_left_deg = Self::advance(state.reel_left_deg, self.ratios.reel_left_ratio, omega, dt);
        state.reel_right_deg = Self::advance(state.reel_right_deg, self.ratios.reel_right_ratio, omega, dt);
    }
}
