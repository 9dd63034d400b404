//! # Metering
//!
//! Lock-free bridge between the audio thread and meter readers. The audio
//! thread publishes one snapshot per channel per block; any number of
//! reader threads (GUI timers, bridges) poll concurrently. Every field is
//! an independent relaxed atomic (floats as `u32` bit patterns), so
//! readers may observe skew between fields or between channels, but never
//! a torn or non-finite value.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use crate::tuning::{MAX_CHANNELS, METER_MAX_DB, SILENCE_DB};

/// Per-channel meter snapshot. All dB values lie in `[-120, +24]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChannelMetering {
    pub input_rms_db: f32,
    pub gain_db: f32,
    pub output_rms_db: f32,
    pub noise_floor_db: f32,
    pub is_active: bool,
}

impl Default for ChannelMetering {
    fn default() -> Self {
        Self {
            input_rms_db: SILENCE_DB as f32,
            gain_db: SILENCE_DB as f32,
            output_rms_db: SILENCE_DB as f32,
            noise_floor_db: SILENCE_DB as f32,
            is_active: false,
        }
    }
}

/// Engine-wide meter snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GlobalMetering {
    /// Smoothed number of open mics, in `[0, num_channels]`.
    pub nom_count: f32,
    /// NOM compensation currently applied, `<= 0` dB.
    pub nom_attenuation_db: f32,
}

impl Default for GlobalMetering {
    fn default() -> Self {
        Self {
            nom_count: 0.0,
            nom_attenuation_db: 0.0,
        }
    }
}

struct ChannelCells {
    input_rms_db: AtomicU32,
    gain_db: AtomicU32,
    output_rms_db: AtomicU32,
    noise_floor_db: AtomicU32,
    is_active: AtomicBool,
}

impl ChannelCells {
    fn new() -> Self {
        let silence = (SILENCE_DB as f32).to_bits();
        Self {
            input_rms_db: AtomicU32::new(silence),
            gain_db: AtomicU32::new(silence),
            output_rms_db: AtomicU32::new(silence),
            noise_floor_db: AtomicU32::new(silence),
            is_active: AtomicBool::new(false),
        }
    }
}

/// Write-by-audio, read-by-anyone meter storage.
pub struct MeterStore {
    channels: [ChannelCells; MAX_CHANNELS],
    nom_count: AtomicU32,
    nom_attenuation_db: AtomicU32,
}

/// Clamp a dB value into the published meter range, mapping non-finite
/// values to silence.
#[inline]
fn meter_db(db: f64) -> f32 {
    if db.is_finite() {
        db.clamp(SILENCE_DB, METER_MAX_DB) as f32
    } else {
        SILENCE_DB as f32
    }
}

#[inline]
fn store_f32(cell: &AtomicU32, value: f32) {
    cell.store(value.to_bits(), Ordering::Relaxed);
}

#[inline]
fn load_f32(cell: &AtomicU32) -> f32 {
    f32::from_bits(cell.load(Ordering::Relaxed))
}

impl MeterStore {
    pub fn new() -> Self {
        Self {
            channels: std::array::from_fn(|_| ChannelCells::new()),
            nom_count: AtomicU32::new(0.0_f32.to_bits()),
            nom_attenuation_db: AtomicU32::new(0.0_f32.to_bits()),
        }
    }

    /// Publish one channel's block snapshot. dB inputs are clamped into the
    /// meter range here so readers never see an out-of-range value.
    pub fn publish_channel(
        &self,
        channel: usize,
        input_rms_db: f64,
        gain_db: f64,
        output_rms_db: f64,
        noise_floor_db: f64,
        is_active: bool,
    ) {
        let cells = &self.channels[channel];
        store_f32(&cells.input_rms_db, meter_db(input_rms_db));
        store_f32(&cells.gain_db, meter_db(gain_db));
        store_f32(&cells.output_rms_db, meter_db(output_rms_db));
        store_f32(&cells.noise_floor_db, meter_db(noise_floor_db));
        cells.is_active.store(is_active, Ordering::Relaxed);
    }

    /// Publish the engine-wide snapshot.
    pub fn publish_global(&self, nom_count: f64, nom_attenuation_db: f64) {
        let count = if nom_count.is_finite() {
            nom_count.max(0.0) as f32
        } else {
            0.0
        };
        let atten = if nom_attenuation_db.is_finite() {
            nom_attenuation_db.min(0.0).max(SILENCE_DB) as f32
        } else {
            0.0
        };
        store_f32(&self.nom_count, count);
        store_f32(&self.nom_attenuation_db, atten);
    }

    /// Read one channel's snapshot.
    pub fn channel(&self, channel: usize) -> ChannelMetering {
        let cells = &self.channels[channel];
        ChannelMetering {
            input_rms_db: load_f32(&cells.input_rms_db),
            gain_db: load_f32(&cells.gain_db),
            output_rms_db: load_f32(&cells.output_rms_db),
            noise_floor_db: load_f32(&cells.noise_floor_db),
            is_active: cells.is_active.load(Ordering::Relaxed),
        }
    }

    /// Read the engine-wide snapshot.
    pub fn global(&self) -> GlobalMetering {
        GlobalMetering {
            nom_count: load_f32(&self.nom_count),
            nom_attenuation_db: load_f32(&self.nom_attenuation_db),
        }
    }

    /// Return every channel to the silent snapshot.
    pub fn reset(&self) {
        for i in 0..MAX_CHANNELS {
            self.publish_channel(i, SILENCE_DB, SILENCE_DB, SILENCE_DB, SILENCE_DB, false);
        }
        self.publish_global(0.0, 0.0);
    }
}

impl Default for MeterStore {
    fn default() -> Self {
        Self::new()
    }
}
