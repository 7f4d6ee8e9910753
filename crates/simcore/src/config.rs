//! Deck configuration
//!
//! All constants of the model live here so a run can be tuned from a JSON
//! file without rebuilding. Every section falls back to its defaults, so a
//! partial file only needs the keys it changes.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, TransportMode};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "tapepilot.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    #[serde(default)]
    pub setpoints: SetpointTable,
    #[serde(default)]
    pub speed_loop: SpeedLoopConfig,
    #[serde(default)]
    pub capstan: CapstanConstant,
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub spindles: SpindleRatios,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Target capstan speed per transport mode (rpm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetpointTable {
    pub stop: f64,
    pub play: f64,
    pub fast_forward: f64,
    pub rewind: f64,
    pub pause: f64,
}

impl Default for SetpointTable {
    fn default() -> Self {
        SetpointTable {
            stop: 0.0,
            play: 1800.0,
            fast_forward: 2600.0,
            rewind: 2600.0,
            pause: 300.0,
        }
    }
}

impl SetpointTable {
    pub fn setpoint(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Stop => self.stop,
            TransportMode::Play => self.play,
            TransportMode::FastForward => self.fast_forward,
            TransportMode::Rewind => self.rewind,
            TransportMode::Pause => self.pause,
        }
    }
}

/// Proportional speed loop gains
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedLoopConfig {
    /// Proportional gain (command per rpm of error)
    pub kp: f64,
    /// Minimum command value
    pub output_min: f64,
    /// Maximum command value
    pub output_max: f64,
}

impl Default for SpeedLoopConfig {
    fn default() -> Self {
        SpeedLoopConfig {
            kp: 0.02,
            output_min: -1.0,
            output_max: 1.0,
        }
    }
}

impl SpeedLoopConfig {
    pub fn p(kp: f64) -> Self {
        Self { kp, ..Default::default() }
    }

    pub fn with_limits(mut self, min: f64, max: f64) -> Self {
        self.output_min = min;
        self.output_max = max;
        self
    }
}

/// Capstan drive plant constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapstanConstant {
    /// Time constant of the speed response (s)
    pub tau_s: f64,
    /// Speed lost at full friction and full command (rpm)
    pub friction_load_rpm: f64,
    /// Tension at zero command, per unit friction
    pub tension_base: f64,
    /// Extra tension at full command, per unit friction
    pub tension_gain: f64,
}

impl Default for CapstanConstant {
    fn default() -> Self {
        CapstanConstant {
            tau_s: 0.25,
            friction_load_rpm: 600.0,
            tension_base: 0.3,
            tension_gain: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Standard deviation of the encoder noise at full jitter (rpm)
    pub jitter_rpm: f64,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig { jitter_rpm: 20.0, seed: None }
    }
}

/// Spindle speeds relative to the capstan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpindleRatios {
    pub capstan_ratio: f64,
    pub reel_left_ratio: f64,
    pub reel_right_ratio: f64,
}

impl Default for SpindleRatios {
    fn default() -> Self {
        SpindleRatios {
            capstan_ratio: 1.0,
            reel_left_ratio: 0.6,
            reel_right_ratio: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Visible history (s)
    pub window_s: f64,
}

impl TelemetryConfig {
    /// Range offered by the trace window slider (s)
    pub const MIN_WINDOW_S: f64 = 2.0;
    pub const MAX_WINDOW_S: f64 = 120.0;
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        TelemetryConfig { window_s: 20.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Repaint cadence (ms)
    pub tick_ms: u64,
    /// Longest tick fed to the simulator (s)
    pub max_frame_dt: f64,
    pub width: f32,
    pub height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            tick_ms: 16,
            max_frame_dt: 0.05,
            width: 1200.0,
            height: 700.0,
        }
    }
}

impl DeckConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: DeckConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded deck config from {}", path.display());
        Ok(config)
    }

    /// Like [`DeckConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path.as_ref()) {
            Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.as_ref().display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.setpoints;
        for (name, rpm) in [
            ("stop", s.stop),
            ("play", s.play),
            ("fast_forward", s.fast_forward),
            ("rewind", s.rewind),
            ("pause", s.pause),
        ] {
            if !is_non_negative(rpm) {
                return Err(invalid(format!("setpoints.{name} must be a finite rpm >= 0, got {rpm}")));
            }
        }

        let l = &self.speed_loop;
        if !l.kp.is_finite() {
            return Err(invalid(format!("speed_loop.kp must be finite, got {}", l.kp)));
        }
        if l.output_min.is_nan() || l.output_max.is_nan() || l.output_min >= l.output_max {
            return Err(invalid(format!(
                "speed_loop.output_min ({}) must be below output_max ({})",
                l.output_min, l.output_max
            )));
        }

        if !is_positive(self.capstan.tau_s) {
            return Err(invalid(format!("capstan.tau_s must be > 0, got {}", self.capstan.tau_s)));
        }
        if !is_non_negative(self.capstan.friction_load_rpm) {
            return Err(invalid(format!(
                "capstan.friction_load_rpm must be >= 0, got {}",
                self.capstan.friction_load_rpm
            )));
        }
        if !is_non_negative(self.encoder.jitter_rpm) {
            return Err(invalid(format!("encoder.jitter_rpm must be >= 0, got {}", self.encoder.jitter_rpm)));
        }
        let window = TelemetryConfig::MIN_WINDOW_S..=TelemetryConfig::MAX_WINDOW_S;
        if !window.contains(&self.telemetry.window_s) {
            return Err(invalid(format!(
                "telemetry.window_s must be within {}..={} s, got {}",
                window.start(),
                window.end(),
                self.telemetry.window_s
            )));
        }
        if self.ui.tick_ms == 0 {
            return Err(invalid("ui.tick_ms must be > 0".to_string()));
        }
        if !is_positive(self.ui.max_frame_dt) {
            return Err(invalid(format!("ui.max_frame_dt must be > 0, got {}", self.ui.max_frame_dt)));
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
