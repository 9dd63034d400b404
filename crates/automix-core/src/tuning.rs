//! Compile-time tunables for the gain-sharing engine.
//!
//! Thresholds and time constants that shape the mixer's behaviour but are
//! not exposed as runtime parameters. Calibrate against a reference mixer
//! and rebuild.

/// Maximum number of channels the engine supports.
pub const MAX_CHANNELS: usize = 32;

/// Maximum block size in samples.
pub const MAX_BLOCK_SIZE: usize = 4096;

/// A channel turns hot when its envelope exceeds `floor * ACTIVITY_ON_RATIO`
/// (4.0 = +12 dB over the tracked noise floor).
pub const ACTIVITY_ON_RATIO: f64 = 4.0;

/// A hot channel stays hot until its envelope drops to
/// `floor * ACTIVITY_OFF_RATIO` (2.0 = +6 dB, hysteresis below the on ratio).
pub const ACTIVITY_OFF_RATIO: f64 = 2.0;

/// Envelope detector time constant in milliseconds.
pub const ENVELOPE_WINDOW_MS: f64 = 5.0;

/// Noise floor upward (rise) time constant in milliseconds. Slow, so speech
/// does not drag the floor up.
pub const FLOOR_RISE_MS: f64 = 10_000.0;

/// Noise floor downward (fall) time constant in milliseconds. Fast, so the
/// floor settles quickly when the room goes quiet.
pub const FLOOR_FALL_MS: f64 = 1_000.0;

/// Smoothing time constant for the number-of-open-mics count, in
/// milliseconds.
pub const NOM_SMOOTHING_MS: f64 = 50.0;

/// Lowest representable noise floor (linear). -120 dBFS.
pub const FLOOR_MIN: f64 = 1e-6;

/// Highest noise floor the tracker will report (linear, full scale).
pub const FLOOR_MAX: f64 = 1.0;

/// Added to the gain-sharing denominator to keep it strictly positive.
pub const SHARE_EPSILON: f64 = 1e-10;

/// Added inside log arguments before dB conversion.
pub const DB_EPSILON: f64 = 1e-12;

/// Floor for every published dB value.
pub const SILENCE_DB: f64 = -120.0;

/// Ceiling for every published dB value.
pub const METER_MAX_DB: f64 = 24.0;

// --- Parameter defaults and clamp ranges ---

pub const DEFAULT_ATTACK_MS: f64 = 5.0;
pub const MIN_ATTACK_MS: f64 = 0.1;
pub const MAX_ATTACK_MS: f64 = 100.0;

pub const DEFAULT_RELEASE_MS: f64 = 150.0;
pub const MIN_RELEASE_MS: f64 = 1.0;
pub const MAX_RELEASE_MS: f64 = 1000.0;

pub const DEFAULT_HOLD_MS: f64 = 500.0;
pub const MIN_HOLD_MS: f64 = 0.0;
pub const MAX_HOLD_MS: f64 = 5000.0;

pub const DEFAULT_WEIGHT: f64 = 1.0;
pub const MIN_WEIGHT: f64 = 0.0;
pub const MAX_WEIGHT: f64 = 1.0;
