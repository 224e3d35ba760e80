//! Device configuration
//!
//! Stored as a postcard blob so a platform can keep it in flash or pass it
//! in from the host.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::mapper::TEMPERATURE_BLEND_WEIGHT;
use crate::screen::{Labels, Locale};
use crate::sensors::SamplingRate;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to encode config: {0}")]
    Encode(postcard::Error),
    #[error("Failed to decode config: {0}")]
    Decode(postcard::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Delivery cadence requested when sensors are registered.
    pub sampling_rate: SamplingRate,
    /// Weight of the temperature color in the background blend.
    pub temperature_weight: f32,
    pub locale: Locale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sampling_rate: SamplingRate::Ui,
            temperature_weight: TEMPERATURE_BLEND_WEIGHT,
            locale: Locale::default(),
        }
    }
}

impl Config {
    pub fn labels(&self) -> &'static Labels {
        Labels::for_locale(self.locale)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(ConfigError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(ConfigError::Decode)
    }
}
