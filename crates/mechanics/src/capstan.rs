use simcore::{CapstanConstant, DeckState, FirstOrderLag, MechanicsModel, Model, SimContext};

/// Capstan motor and tape path.
///
/// Speed follows the commanded setpoint through a first-order lag. Tape
/// friction pulls the target down in proportion to how hard the motor is
/// being driven, and shows up as tension.
#[derive(Debug, Clone)]
pub struct CapstanDrive {
    pub constants: CapstanConstant,
    lag: FirstOrderLag,
}

impl CapstanDrive {
    pub fn new(constants: CapstanConstant) -> Self {
        CapstanDrive {
            lag: FirstOrderLag::new(constants.tau_s),
            constants,
        }
    }

    /// Speed lost to tape drag (rpm)
    pub fn friction_load(&self, tape_friction: f64, pwm: f64) -> f64 {
        tape_friction * self.constants.friction_load_rpm * pwm.abs()
    }

    /// Speed the lag settles toward this tick (rpm), never negative
    pub fn target_rpm(&self, rpm_setpoint: f64, tape_friction: f64, pwm: f64) -> f64 {
        (rpm_setpoint - self.friction_load(tape_friction, pwm)).max(0.0)
    }

    pub fn tension(&self, tape_friction: f64, pwm: f64) -> f64 {
        tape_friction * (self.constants.tension_base + self.constants.tension_gain * pwm.abs())
    }
}

impl Default for CapstanDrive {
    fn default() -> Self {
        Self::new(CapstanConstant::default())
    }
}

impl Model for CapstanDrive {
    fn reset(&mut self) {
        // The only state is the rpm in DeckState
    }
}

impl MechanicsModel for CapstanDrive {
    fn step_physics(&mut self, ctx: SimContext, state: &mut DeckState) {
        let dt = ctx.effective_dt();

        state.tension = self.tension(state.tape_friction, state.pwm);

        let target = self.target_rpm(state.rpm_setpoint, state.tape_friction, state.pwm);
        state.rpm = self.lag.step(state.rpm, target, dt);
    }
}
