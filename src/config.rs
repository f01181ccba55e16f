//! Gesture tuning knobs. Defaults match the stock player behaviour; a host can
//! override any subset through localStorage JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_STORAGE_KEY: &str = "tsp_gesture_config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("localStorage is not available")]
    Storage,
    #[error("gesture config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("gesture config rejected: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Horizontal travel (CSS px) before a touch becomes a drag-seek.
    pub drag_threshold_px: f64,
    pub seconds_per_px: f64,
    /// Touches held longer than this are long presses, not taps.
    pub tap_max_ms: f64,
    pub double_tap_window_ms: f64,
    pub left_zone_fraction: f64,
    pub right_zone_fraction: f64,
    pub seek_step_seconds: f64,
    pub seek_overlay_clear_ms: u32,
    pub flash_duration_ms: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 20.0,
            seconds_per_px: 0.2,
            tap_max_ms: 300.0,
            double_tap_window_ms: 300.0,
            left_zone_fraction: 0.35,
            right_zone_fraction: 0.65,
            seek_step_seconds: 10.0,
            seek_overlay_clear_ms: 200,
            flash_duration_ms: 600,
        }
    }
}

impl GestureConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: GestureConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("drag_threshold_px", self.drag_threshold_px),
            ("seconds_per_px", self.seconds_per_px),
            ("tap_max_ms", self.tap_max_ms),
            ("double_tap_window_ms", self.double_tap_window_ms),
            ("seek_step_seconds", self.seek_step_seconds),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be a positive number, got {value}")));
            }
        }
        if self.seek_overlay_clear_ms == 0 || self.flash_duration_ms == 0 {
            return Err(ConfigError::Invalid("timer durations must be non-zero".into()));
        }
        let (l, r) = (self.left_zone_fraction, self.right_zone_fraction);
        if !(l > 0.0 && l < r && r < 1.0) {
            return Err(ConfigError::Invalid(format!("zone fractions must satisfy 0 < left < right < 1, got {l} / {r}")));
        }
        Ok(())
    }

    /// Reads `tsp_gesture_config` from localStorage. `Ok(None)` when nothing is stored.
    pub fn load_from_storage() -> Result<Option<Self>, ConfigError> {
        let store = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .ok_or(ConfigError::Storage)?;
        match store.get_item(CONFIG_STORAGE_KEY) {
            Ok(Some(raw)) => Self::from_json(&raw).map(Some),
            Ok(None) => Ok(None),
            Err(_) => Err(ConfigError::Storage),
        }
    }

    pub fn load_or_default() -> Self {
        match Self::load_from_storage() {
            Ok(Some(cfg)) => {
                log::info!("gesture config loaded from {CONFIG_STORAGE_KEY}");
                cfg
            }
            Ok(None) => Self::default(),
            Err(err) => {
                log::warn!("{err}; using default gesture config");
                Self::default()
            }
        }
    }
}
