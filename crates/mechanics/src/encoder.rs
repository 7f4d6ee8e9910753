use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use simcore::{DeckState, EncoderConfig, Model, SensorModel, SimContext};

/// Speed encoder with injectable Gaussian jitter.
///
/// The reading only drives the spindle animation; the speed loop keeps
/// using the true rpm.
#[derive(Debug, Clone)]
pub struct Encoder {
    pub config: EncoderConfig,
    rng: StdRng,
}

impl Encoder {
    pub fn new(config: EncoderConfig) -> Self {
        Encoder { rng: Self::make_rng(config.seed), config }
    }

    fn make_rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => {
                log::debug!("encoder rng seeded with {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        }
    }

    /// Noisy reading of `rpm` at the given jitter level (0..1), never negative
    pub fn read(&mut self, rpm: f64, encoder_jitter: f64) -> f64 {
        let sigma = encoder_jitter * self.config.jitter_rpm;
        if sigma == 0.0 {
            return rpm.max(0.0);
        }
        let noise: f64 = self.rng.sample(StandardNormal);
        (rpm + noise * sigma).max(0.0)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

impl Model for Encoder {
    fn reset(&mut self) {
        // Reseeding makes a seeded run repeat exactly after reset
        self.rng = Self::make_rng(self.config.seed);
    }
}

impl SensorModel for Encoder {
    fn step_sensor(&mut self, _ctx: SimContext, state: &mut DeckState) {
        state.encoder_rpm = self.read(state.rpm, state.encoder_jitter);
    }
}
