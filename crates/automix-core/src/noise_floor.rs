//! # Noise Floor Tracker
//!
//! Slow-adapting estimate of a channel's resting level. The tracker follows
//! the envelope asymmetrically: it falls quickly when the envelope drops
//! below the current floor and rises very slowly when the envelope sits
//! above it, so sustained speech cannot drag the floor up to its own level.
//! The estimate is clamped so that -120 dBFS remains representable and the
//! activity ratio test never divides by zero.
//!
//! ## Example
//!
//! ```rust
//! use automix_core::noise_floor::NoiseFloorTracker;
//! use automix_core::units::db_to_linear;
//!
//! let mut tracker = NoiseFloorTracker::new(48_000.0);
//! for _ in 0..48_000 {
//!     tracker.update(db_to_linear(-60.0));
//! }
//! // One second of a -60 dB room brings the floor well above the clamp.
//! assert!(tracker.floor_db() > -90.0);
//! ```

use crate::tuning::{FLOOR_FALL_MS, FLOOR_MAX, FLOOR_MIN, FLOOR_RISE_MS};
use crate::units::{finite_or, linear_to_db, smoothing_coeff};

/// Asymmetric follower for the per-channel resting level.
#[derive(Debug, Clone)]
pub struct NoiseFloorTracker {
    floor: f64,
    rise_coeff: f64,
    fall_coeff: f64,
}

impl NoiseFloorTracker {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            floor: FLOOR_MIN,
            rise_coeff: smoothing_coeff(FLOOR_RISE_MS, sample_rate),
            fall_coeff: smoothing_coeff(FLOOR_FALL_MS, sample_rate),
        }
    }

    /// Advance the estimate by one sample of envelope and return it.
    #[inline]
    pub fn update(&mut self, envelope: f64) -> f64 {
        let coeff = if envelope < self.floor {
            self.fall_coeff
        } else {
            self.rise_coeff
        };
        let next = self.floor + coeff * (envelope - self.floor);
        self.floor = finite_or(next, self.floor).clamp(FLOOR_MIN, FLOOR_MAX);
        self.floor
    }

    /// Current floor estimate (linear, in `[FLOOR_MIN, FLOOR_MAX]`).
    #[inline]
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Current floor estimate in dB.
    #[inline]
    pub fn floor_db(&self) -> f64 {
        linear_to_db(self.floor)
    }

    /// Return the floor to its post-construction value.
    pub fn reset(&mut self) {
        self.floor = FLOOR_MIN;
    }
}
