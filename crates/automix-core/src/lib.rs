//! # Automix Core DSP Library
//!
//! Dugan-style gain-sharing automatic microphone mixer. Given up to 32
//! simultaneously open speech microphones, the engine continuously
//! redistributes gain so the summed mix behaves as if only one microphone
//! were fully open, suppressing comb filtering, room noise build-up, and
//! feedback while preserving natural vocal dynamics.
//!
//! ## Signal Flow
//!
//! ```text
//! per channel:  input -> envelope -> noise floor -> activity gate -+
//!                                                                  |
//! cross-channel:        contributions -> gain sharing -> NOM atten |
//!                                                                  |
//! per channel:  gain smoother -> in-place multiply <---------------+
//!                      |
//!                   metering (lock-free, read from any thread)
//! ```
//!
//! The hot path is wait-free and allocation-free: all state lives in
//! fixed-capacity arrays sized for [`tuning::MAX_CHANNELS`], control
//! parameters are relaxed atomics snapshotted once per block, and meters
//! are published through relaxed atomics readable concurrently.
//!
//! ## Example
//!
//! ```rust
//! use automix_core::config::EngineConfig;
//! use automix_core::engine::AutomixEngine;
//!
//! let config = EngineConfig::builder()
//!     .num_channels(2)
//!     .sample_rate(48_000.0)
//!     .build()
//!     .unwrap();
//! let mut engine = AutomixEngine::new(config);
//!
//! // The host owns the buffers; the engine mutates them in place.
//! let mut ch0 = vec![0.5_f32; 256];
//! let mut ch1 = vec![0.1_f32; 256];
//! engine.process(&mut [&mut ch0, &mut ch1]);
//!
//! // Meters may be read from any thread.
//! let global = engine.global_metering();
//! assert!(global.nom_count >= 0.0);
//! ```

pub mod activity;
pub mod channel;
pub mod config;
pub mod engine;
pub mod envelope;
pub mod gain_sharing;
pub mod metering;
pub mod noise_floor;
pub mod nom;
pub mod params;
pub mod smoothing;
pub mod tuning;
pub mod units;

pub use config::{ConfigError, EngineConfig};
pub use engine::AutomixEngine;
pub use metering::{ChannelMetering, GlobalMetering};
pub use tuning::{MAX_BLOCK_SIZE, MAX_CHANNELS};
