//! # Control Block
//!
//! Lock-free parameter storage. Hosts write control values from UI or
//! automation threads through the setters; the audio thread snapshots the
//! whole block once at the top of each process call. Every value is a
//! single word accessed with relaxed ordering (floats travel as their
//! `u32` bit patterns), so setters never block and the audio thread never
//! observes a torn value.
//!
//! Setters clamp rather than reject, and silently ignore out-of-range
//! channel indices, matching the engine's "garbage in, no-op" contract.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::tuning::{
    DEFAULT_ATTACK_MS, DEFAULT_HOLD_MS, DEFAULT_RELEASE_MS, DEFAULT_WEIGHT, MAX_ATTACK_MS,
    MAX_CHANNELS, MAX_HOLD_MS, MAX_RELEASE_MS, MAX_WEIGHT, MIN_ATTACK_MS, MIN_HOLD_MS,
    MIN_RELEASE_MS, MIN_WEIGHT,
};

/// Per-channel control values as the audio thread sees them.
#[derive(Debug, Clone, Copy)]
pub struct ChannelControls {
    pub weight: f64,
    pub muted: bool,
    pub soloed: bool,
    pub bypassed: bool,
}

/// Global control values as the audio thread sees them.
#[derive(Debug, Clone, Copy)]
pub struct GlobalControls {
    pub attack_ms: f64,
    pub release_ms: f64,
    pub hold_ms: f64,
    pub nom_atten_enabled: bool,
    pub global_bypass: bool,
}

struct ChannelCells {
    weight: AtomicU32,
    muted: AtomicBool,
    soloed: AtomicBool,
    bypassed: AtomicBool,
}

impl ChannelCells {
    fn new() -> Self {
        Self {
            weight: AtomicU32::new((DEFAULT_WEIGHT as f32).to_bits()),
            muted: AtomicBool::new(false),
            soloed: AtomicBool::new(false),
            bypassed: AtomicBool::new(false),
        }
    }
}

/// Shared control state for one engine.
pub struct ControlBlock {
    channels: [ChannelCells; MAX_CHANNELS],
    attack_ms: AtomicU32,
    release_ms: AtomicU32,
    hold_ms: AtomicU32,
    nom_atten_enabled: AtomicBool,
    global_bypass: AtomicBool,
}

#[inline]
fn store_f32(cell: &AtomicU32, value: f32) {
    cell.store(value.to_bits(), Ordering::Relaxed);
}

#[inline]
fn load_f32(cell: &AtomicU32) -> f32 {
    f32::from_bits(cell.load(Ordering::Relaxed))
}

impl ControlBlock {
    pub fn new() -> Self {
        Self {
            channels: std::array::from_fn(|_| ChannelCells::new()),
            attack_ms: AtomicU32::new((DEFAULT_ATTACK_MS as f32).to_bits()),
            release_ms: AtomicU32::new((DEFAULT_RELEASE_MS as f32).to_bits()),
            hold_ms: AtomicU32::new((DEFAULT_HOLD_MS as f32).to_bits()),
            nom_atten_enabled: AtomicBool::new(true),
            global_bypass: AtomicBool::new(false),
        }
    }

    // --- setters (any thread) ---

    pub fn set_weight(&self, channel: usize, weight: f64) {
        if let Some(cells) = self.channels.get(channel) {
            let clamped = if weight.is_finite() {
                weight.clamp(MIN_WEIGHT, MAX_WEIGHT)
            } else {
                DEFAULT_WEIGHT
            };
            store_f32(&cells.weight, clamped as f32);
        }
    }

    pub fn set_muted(&self, channel: usize, muted: bool) {
        if let Some(cells) = self.channels.get(channel) {
            cells.muted.store(muted, Ordering::Relaxed);
        }
    }

    pub fn set_soloed(&self, channel: usize, soloed: bool) {
        if let Some(cells) = self.channels.get(channel) {
            cells.soloed.store(soloed, Ordering::Relaxed);
        }
    }

    pub fn set_bypassed(&self, channel: usize, bypassed: bool) {
        if let Some(cells) = self.channels.get(channel) {
            cells.bypassed.store(bypassed, Ordering::Relaxed);
        }
    }

    pub fn set_attack_ms(&self, ms: f64) {
        let clamped = if ms.is_finite() {
            ms.clamp(MIN_ATTACK_MS, MAX_ATTACK_MS)
        } else {
            DEFAULT_ATTACK_MS
        };
        store_f32(&self.attack_ms, clamped as f32);
    }

    pub fn set_release_ms(&self, ms: f64) {
        let clamped = if ms.is_finite() {
            ms.clamp(MIN_RELEASE_MS, MAX_RELEASE_MS)
        } else {
            DEFAULT_RELEASE_MS
        };
        store_f32(&self.release_ms, clamped as f32);
    }

    pub fn set_hold_ms(&self, ms: f64) {
        let clamped = if ms.is_finite() {
            ms.clamp(MIN_HOLD_MS, MAX_HOLD_MS)
        } else {
            DEFAULT_HOLD_MS
        };
        store_f32(&self.hold_ms, clamped as f32);
    }

    pub fn set_nom_atten_enabled(&self, enabled: bool) {
        self.nom_atten_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn set_global_bypass(&self, bypass: bool) {
        self.global_bypass.store(bypass, Ordering::Relaxed);
    }

    // --- snapshots (audio thread, once per block) ---

    pub fn channel(&self, channel: usize) -> ChannelControls {
        let cells = &self.channels[channel];
        ChannelControls {
            weight: load_f32(&cells.weight) as f64,
            muted: cells.muted.load(Ordering::Relaxed),
            soloed: cells.soloed.load(Ordering::Relaxed),
            bypassed: cells.bypassed.load(Ordering::Relaxed),
        }
    }

    pub fn global(&self) -> GlobalControls {
        GlobalControls {
            attack_ms: load_f32(&self.attack_ms) as f64,
            release_ms: load_f32(&self.release_ms) as f64,
            hold_ms: load_f32(&self.hold_ms) as f64,
            nom_atten_enabled: self.nom_atten_enabled.load(Ordering::Relaxed),
            global_bypass: self.global_bypass.load(Ordering::Relaxed),
        }
    }
}

impl Default for ControlBlock {
    fn default() -> Self {
        Self::new()
    }
}
