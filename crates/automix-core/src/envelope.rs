//! # Envelope Detector
//!
//! Per-sample signal level tracker. A peak-style one-pole follows the
//! rectified input and drives the activity gate and the gain-sharing sum;
//! a parallel mean-square follower with the same time constant feeds the
//! RMS meters. Non-finite input samples are treated as zero before they
//! touch any state.
//!
//! ## Example
//!
//! ```rust
//! use automix_core::envelope::EnvelopeDetector;
//!
//! let mut det = EnvelopeDetector::new(5.0, 48_000.0);
//! for _ in 0..4_800 {
//!     det.process(0.5);
//! }
//! assert!((det.level() - 0.5).abs() < 0.01);
//! ```

use crate::units::{finite_or, smoothing_coeff};

/// Peak + RMS envelope follower for one channel.
#[derive(Debug, Clone)]
pub struct EnvelopeDetector {
    coeff: f64,
    level: f64,
    mean_square: f64,
}

impl EnvelopeDetector {
    /// Create a detector with the given time constant in milliseconds.
    pub fn new(window_ms: f64, sample_rate: f64) -> Self {
        Self {
            coeff: smoothing_coeff(window_ms, sample_rate),
            level: 0.0,
            mean_square: 0.0,
        }
    }

    /// Advance both followers by one input sample and return the peak
    /// envelope. NaN and infinite samples count as silence.
    #[inline]
    pub fn process(&mut self, sample: f32) -> f64 {
        let x = if sample.is_finite() {
            sample as f64
        } else {
            0.0
        };

        let level = self.level + self.coeff * (x.abs() - self.level);
        self.level = finite_or(level, self.level).max(0.0);

        let ms = self.mean_square + self.coeff * (x * x - self.mean_square);
        self.mean_square = finite_or(ms, self.mean_square).max(0.0);

        self.level
    }

    /// Current peak envelope (linear, >= 0).
    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Current short-window RMS (linear, >= 0).
    #[inline]
    pub fn rms(&self) -> f64 {
        self.mean_square.sqrt()
    }

    /// Clear all state.
    pub fn reset(&mut self) {
        self.level = 0.0;
        self.mean_square = 0.0;
    }
}
