use control::SpeedLoop;
use mechanics::{CapstanDrive, Encoder, Spindles};
use simcore::{
    ControlModel, DeckConfig, DeckState, MechanicsModel, Model, SensorModel, SimContext, TransportMode,
};

/// The deck: one state record advanced by a fixed chain of models.
///
/// Each tick runs, in order: speed loop, capstan drive, encoder, spindles.
#[derive(Debug, Clone)]
pub struct Simulator {
    state: DeckState,
    speed_loop: SpeedLoop,
    capstan: CapstanDrive,
    encoder: Encoder,
    spindles: Spindles,
    /// Simulated time (s)
    t: f64,
}

impl Simulator {
    pub fn new(config: &DeckConfig) -> Self {
        log::debug!(
            "building simulator: kp={} tau={}s friction_load={}rpm jitter={}rpm",
            config.speed_loop.kp,
            config.capstan.tau_s,
            config.capstan.friction_load_rpm,
            config.encoder.jitter_rpm
        );
        Simulator {
            state: DeckState::default(),
            speed_loop: SpeedLoop::new(config.speed_loop, config.setpoints),
            capstan: CapstanDrive::new(config.capstan),
            encoder: Encoder::new(config.encoder),
            spindles: Spindles::new(config.spindles),
            t: 0.0,
        }
    }

    pub fn set_transport(&mut self, mode: TransportMode) {
        if self.state.transport != mode {
            log::info!("transport {} -> {}", self.state.transport, mode);
        }
        self.state.transport = mode;
    }

    /// Set the mode from a front-panel label; unknown labels mean STOP.
    pub fn set_transport_label(&mut self, label: &str) {
        self.set_transport(TransportMode::from_label(label));
    }

    /// Fault levels, each clamped to [0, 1]
    pub fn set_faults(&mut self, tape_friction: f64, encoder_jitter: f64) {
        self.state.set_faults(tape_friction, encoder_jitter);
    }

    pub fn state(&self) -> &DeckState {
        &self.state
    }

    /// Simulated seconds since construction or the last reset
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Advance the deck by `dt` seconds.
    ///
    /// Non-positive or non-finite `dt` refreshes setpoint, error and command
    /// without moving anything.
    pub fn step(&mut self, dt: f64) -> &DeckState {
        let ctx = SimContext { dt, t: self.t };

        self.speed_loop.step_control(ctx, &mut self.state);
        self.capstan.step_physics(ctx, &mut self.state);
        self.encoder.step_sensor(ctx, &mut self.state);
        self.spindles.step_physics(ctx, &mut self.state);

        self.t += ctx.effective_dt();
        &self.state
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(&DeckConfig::default())
    }
}

impl Model for Simulator {
    fn reset(&mut self) {
        log::debug!("resetting simulator at t={:.3}s", self.t);
        self.speed_loop.reset();
        self.capstan.reset();
        self.encoder.reset();
        self.spindles.reset();
        self.state.reset_keeping_faults();
        self.t = 0.0;
    }
}
