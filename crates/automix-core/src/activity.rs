//! # Activity Gate
//!
//! Per-channel speech gate with hysteresis and last-mic hold. A channel is
//! *hot* while its envelope sits far enough above the tracked noise floor;
//! hysteresis keeps the decision from chattering near the threshold. When
//! the most recently hot channel goes cold and nothing else is hot, it
//! enters a hold state that keeps it counted as active for a configurable
//! time, so the tail of a sentence is not clipped.
//!
//! The gate itself is single-channel; the engine feeds it the cross-channel
//! facts it cannot know (whether it is the most recently hot channel and
//! whether any other channel is hot).
//!
//! ## Example
//!
//! ```rust
//! use automix_core::activity::{ActivityGate, ActivityState};
//!
//! let mut gate = ActivityGate::new();
//! gate.set_hold_samples(100);
//!
//! // Envelope 10x the floor: hot.
//! let hot = gate.is_hot_for(1e-2, 1e-3);
//! gate.advance(hot, true, false);
//! assert_eq!(gate.state(), ActivityState::Hot);
//!
//! // Back to the floor while last-hot and alone: holding.
//! let hot = gate.is_hot_for(1e-3, 1e-3);
//! gate.advance(hot, true, false);
//! assert_eq!(gate.state(), ActivityState::Holding);
//! ```

use crate::tuning::{ACTIVITY_OFF_RATIO, ACTIVITY_ON_RATIO};

/// Gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityState {
    /// Below threshold, not held open.
    Idle,
    /// Envelope above the (hysteretic) threshold.
    Hot,
    /// Recently hot, kept active while the hold counter runs down.
    Holding,
}

/// Hysteretic activity gate with last-mic hold.
#[derive(Debug, Clone)]
pub struct ActivityGate {
    state: ActivityState,
    hold_remaining: u64,
    hold_samples: u64,
}

impl ActivityGate {
    pub fn new() -> Self {
        Self {
            state: ActivityState::Idle,
            hold_remaining: 0,
            hold_samples: 0,
        }
    }

    /// Would this channel count as hot for the given levels? Entering hot
    /// requires the on ratio; staying hot only the (lower) off ratio.
    #[inline]
    pub fn is_hot_for(&self, envelope: f64, floor: f64) -> bool {
        let ratio = if self.state == ActivityState::Hot {
            ACTIVITY_OFF_RATIO
        } else {
            ACTIVITY_ON_RATIO
        };
        envelope > floor * ratio
    }

    /// Advance the state machine by one sample.
    ///
    /// `hot` must be this sample's [`is_hot_for`](Self::is_hot_for) result;
    /// `is_last_hot` and `any_other_hot` come from the engine's cross-channel
    /// bookkeeping. Returns whether the channel is active (hot or holding).
    #[inline]
    pub fn advance(&mut self, hot: bool, is_last_hot: bool, any_other_hot: bool) -> bool {
        match self.state {
            ActivityState::Idle => {
                if hot {
                    self.state = ActivityState::Hot;
                }
            }
            ActivityState::Hot => {
                if !hot {
                    if is_last_hot && !any_other_hot && self.hold_samples > 0 {
                        self.state = ActivityState::Holding;
                        self.hold_remaining = self.hold_samples;
                    } else {
                        self.state = ActivityState::Idle;
                    }
                }
            }
            ActivityState::Holding => {
                if hot {
                    self.state = ActivityState::Hot;
                } else if self.hold_remaining == 0 {
                    self.state = ActivityState::Idle;
                } else {
                    self.hold_remaining -= 1;
                }
            }
        }
        self.is_active()
    }

    /// Hot or holding.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state != ActivityState::Idle
    }

    #[inline]
    pub fn is_hot(&self) -> bool {
        self.state == ActivityState::Hot
    }

    #[inline]
    pub fn state(&self) -> ActivityState {
        self.state
    }

    /// Configure the hold duration. Takes effect at the next hold entry.
    pub fn set_hold_samples(&mut self, samples: u64) {
        self.hold_samples = samples;
    }

    /// Force the gate closed and clear the hold counter.
    pub fn reset(&mut self) {
        self.state = ActivityState::Idle;
        self.hold_remaining = 0;
    }
}

impl Default for ActivityGate {
    fn default() -> Self {
        Self::new()
    }
}
