//! Engine configuration.
//!
//! The sample rate lives here instead of in process-wide state so that
//! independent engines can render at different rates side by side.

use serde::{Deserialize, Serialize};

use crate::error::{AudioError, Result};

/// Default engine sample rate. 16 kHz keeps stored files small; it is not a
/// fidelity choice.
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

/// Settings shared by every recipe an `AudioEngine` renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Fixed seed for white noise. `None` draws a fresh seed per render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_seed: Option<u64>,
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            noise_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(sample_rate: u32) -> Self {
        EngineConfig {
            sample_rate,
            ..Default::default()
        }
    }

    /// Parse and validate a JSON config, e.g. `{"sampleRate": 22050}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(AudioError::invalid(
                "sampleRate",
                self.sample_rate,
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
