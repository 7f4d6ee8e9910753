//! Capstan speed loop
//!
//! Picks the rpm setpoint for the current transport mode and turns the speed
//! error into a saturated proportional command.

use simcore::{ControlModel, DeckState, Model, SetpointTable, SimContext, SpeedLoopConfig};

/// Result of one loop evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopOutput {
    pub setpoint: f64,
    pub error: f64,
    pub command: f64,
}

#[derive(Debug, Clone)]
pub struct SpeedLoop {
    config: SpeedLoopConfig,
    setpoints: SetpointTable,
}

impl SpeedLoop {
    /// Inverted limits are swapped and NaN limits fall back to [-1, 1], so
    /// the command is always bounded.
    pub fn new(config: SpeedLoopConfig, setpoints: SetpointTable) -> Self {
        Self { config: normalize_limits(config), setpoints }
    }

    /// Proportional command for a given setpoint and measurement
    pub fn update(&self, setpoint: f64, measurement: f64) -> LoopOutput {
        let error = setpoint - measurement;
        let command = (self.config.kp * error)
            .max(self.config.output_min)
            .min(self.config.output_max);
        LoopOutput { setpoint, error, command }
    }
}

fn normalize_limits(mut config: SpeedLoopConfig) -> SpeedLoopConfig {
    let defaults = SpeedLoopConfig::default();
    if config.output_min.is_nan() || config.output_max.is_nan() {
        log::warn!(
            "speed loop limits [{}, {}] are not numbers, using [{}, {}]",
            config.output_min, config.output_max, defaults.output_min, defaults.output_max
        );
        config.output_min = defaults.output_min;
        config.output_max = defaults.output_max;
    } else if config.output_min > config.output_max {
        log::warn!("speed loop limits [{}, {}] inverted, swapping", config.output_min, config.output_max);
        std::mem::swap(&mut config.output_min, &mut config.output_max);
    }
    config
}

impl Default for SpeedLoop {
    fn default() -> Self {
        Self::new(SpeedLoopConfig::default(), SetpointTable::default())
    }
}

impl Model for SpeedLoop {
    fn reset(&mut self) {
        // Stateless: the command depends only on the current error
    }
}

impl ControlModel for SpeedLoop {
    fn step_control(&mut self, _ctx: SimContext, state: &mut DeckState) {
        let setpoint = self.setpoints.setpoint(state.transport);
        let out = self.update(setpoint, state.rpm);
        state.rpm_setpoint = out.setpoint;
        state.err = out.error;
        state.pwm = out.command;
    }
}
