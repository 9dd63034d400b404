//! # Gain Sharing
//!
//! The defining step of a Dugan-style automatic mixer: each channel's raw
//! gain is its contribution divided by the sum of all contributions, so the
//! gains always sum to (approximately) one. A dominant channel approaches
//! unity while the rest approach zero; K equally loud channels each settle
//! at 1/K. The function is pure and stateless; per-sample ballistics live
//! in the smoother downstream.
//!
//! ## Example
//!
//! ```rust
//! use automix_core::gain_sharing::share_gains;
//!
//! let contributions = [0.3, 0.1, 0.0];
//! let mut gains = [0.0; 3];
//! share_gains(&contributions, &mut gains);
//! assert!((gains[0] - 0.75).abs() < 1e-6);
//! assert!((gains[1] - 0.25).abs() < 1e-6);
//! assert_eq!(gains[2], 0.0);
//! ```

use crate::tuning::SHARE_EPSILON;
use crate::units::finite_or;

/// Fill `gains` with `contribution / sum(contributions)`.
///
/// The denominator carries a small epsilon so all-silent input yields zeros
/// instead of dividing by zero. Negative or non-finite contributions are
/// treated as zero. Every resulting gain lies in `[0, 1]`.
pub fn share_gains(contributions: &[f64], gains: &mut [f64]) {
    debug_assert_eq!(contributions.len(), gains.len());

    let mut sum = SHARE_EPSILON;
    for &c in contributions {
        sum += finite_or(c, 0.0).max(0.0);
    }

    for (gain, &c) in gains.iter_mut().zip(contributions) {
        let c = finite_or(c, 0.0).max(0.0);
        *gain = (c / sum).clamp(0.0, 1.0);
    }
}
