//! # Engine Configuration
//!
//! Immutable construction parameters for the engine, with a builder and
//! validation. Everything runtime-adjustable (weights, ballistics, bypass)
//! lives in the control block instead; this covers only what is fixed at
//! create time.
//!
//! ## Example
//!
//! ```rust
//! use automix_core::config::EngineConfig;
//!
//! let config = EngineConfig::builder()
//!     .num_channels(8)
//!     .sample_rate(48_000.0)
//!     .max_block_size(512)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.num_channels, 8);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::{MAX_BLOCK_SIZE, MAX_CHANNELS};

/// Why a configuration was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("channel count {0} out of range 1..={MAX_CHANNELS}")]
    ChannelCount(usize),
    #[error("sample rate {0} must be positive and finite")]
    SampleRate(f64),
    #[error("block size {0} out of range 1..={MAX_BLOCK_SIZE}")]
    BlockSize(usize),
}

/// Validated construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub num_channels: usize,
    pub sample_rate: f64,
    pub max_block_size: usize,
}

impl EngineConfig {
    /// Validate raw values into a config.
    pub fn new(
        num_channels: usize,
        sample_rate: f64,
        max_block_size: usize,
    ) -> Result<Self, ConfigError> {
        if num_channels == 0 || num_channels > MAX_CHANNELS {
            return Err(ConfigError::ChannelCount(num_channels));
        }
        if !(sample_rate > 0.0) || !sample_rate.is_finite() {
            return Err(ConfigError::SampleRate(sample_rate));
        }
        if max_block_size == 0 || max_block_size > MAX_BLOCK_SIZE {
            return Err(ConfigError::BlockSize(max_block_size));
        }
        Ok(Self {
            num_channels,
            sample_rate,
            max_block_size,
        })
    }

    /// Start a builder with typical defaults (2 channels, 48 kHz, 512).
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

/// Builder for [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct EngineConfigBuilder {
    num_channels: usize,
    sample_rate: f64,
    max_block_size: usize,
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self {
            num_channels: 2,
            sample_rate: 48_000.0,
            max_block_size: 512,
        }
    }
}

impl EngineConfigBuilder {
    pub fn num_channels(mut self, n: usize) -> Self {
        self.num_channels = n;
        self
    }

    pub fn sample_rate(mut self, rate: f64) -> Self {
        self.sample_rate = rate;
        self
    }

    pub fn max_block_size(mut self, size: usize) -> Self {
        self.max_block_size = size;
        self
    }

    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        EngineConfig::new(self.num_channels, self.sample_rate, self.max_block_size)
    }
}
