//! # Automix FFI - C/C++ Bindings for the Gain-Sharing Engine
//!
//! This crate exposes the automix engine through a C-compatible API so a
//! plug-in host written in another language can embed it. The handle is
//! opaque; every function tolerates null handles, null buffers, and
//! out-of-range indices by doing nothing, so the host may pass garbage
//! without risk.
//!
//! ## Building
//!
//! ```bash
//! cargo build --release -p automix-ffi
//! ```
//!
//! This generates:
//! - `target/release/libautomix.so` (shared library)
//! - `target/release/libautomix.a` (static library)
//!
//! The matching C header is checked in at `include/automix.h`.
//!
//! ## Usage from C
//!
//! ```c
//! #include <automix.h>
//!
//! int main() {
//!     AutomixEngine* engine = automix_create(4, 48000.0f, 256);
//!
//!     float ch0[256], ch1[256], ch2[256], ch3[256];
//!     float* channels[4] = { ch0, ch1, ch2, ch3 };
//!
//!     // Fill buffers from the host, then mix in place:
//!     automix_process(engine, channels, 4, 256);
//!
//!     AutomixChannelMetering meters;
//!     if (automix_get_channel_metering(engine, 0, &meters))
//!         printf("ch0 gain: %f dB\n", meters.gain_db);
//!
//!     automix_destroy(engine);
//! }
//! ```
//!
//! ## Threading
//!
//! One audio thread calls `automix_process`. Setters and meter getters may
//! be called concurrently from other threads: every shared value crosses as
//! a relaxed atomic. The buffer pointers passed to `automix_process` must
//! be distinct and are borrowed only for the duration of the call.

use std::ffi::c_char;
use std::ptr;
use std::slice;

use automix_core::config::EngineConfig;
use automix_core::engine::AutomixEngine as CoreEngine;
use automix_core::tuning::{MAX_BLOCK_SIZE, MAX_CHANNELS};

/// Opaque engine handle.
pub struct AutomixEngine {
    inner: CoreEngine,
}

/// Per-channel meter snapshot. All dB values lie in [-120, +24].
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct AutomixChannelMetering {
    pub input_rms_db: f32,
    pub gain_db: f32,
    pub output_rms_db: f32,
    pub noise_floor_db: f32,
    pub is_active: bool,
}

/// Engine-wide meter snapshot.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct AutomixGlobalMetering {
    pub nom_count: f32,
    pub nom_attenuation_db: f32,
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Create a new engine.
///
/// Returns null when `num_channels` is 0 or greater than 32, or when the
/// sample rate is not positive and finite. `max_block_size` is advisory and
/// clamped to [1, 4096]. The returned handle must be freed with
/// [`automix_destroy`].
#[no_mangle]
pub extern "C" fn automix_create(
    num_channels: u32,
    sample_rate: f32,
    max_block_size: u32,
) -> *mut AutomixEngine {
    let block = (max_block_size as usize).clamp(1, MAX_BLOCK_SIZE);
    let config = match EngineConfig::new(num_channels as usize, sample_rate as f64, block) {
        Ok(config) => config,
        Err(_) => return ptr::null_mut(),
    };
    Box::into_raw(Box::new(AutomixEngine {
        inner: CoreEngine::new(config),
    }))
}

/// Destroy an engine and free its memory. Null-safe and idempotent on null.
///
/// # Safety
/// `engine` must be null or a pointer returned by [`automix_create`] that
/// has not been destroyed yet.
#[no_mangle]
pub unsafe extern "C" fn automix_destroy(engine: *mut AutomixEngine) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// Null-terminated semantic version string, stable for the process lifetime.
#[no_mangle]
pub extern "C" fn automix_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

// =============================================================================
// Processing
// =============================================================================

/// Process a block of audio in place.
///
/// `channel_ptrs` is an array of `num_channels` pointers, each to at least
/// `num_samples` f32 samples. If `num_channels` exceeds the engine's
/// configured count, the excess pointers are ignored. A null engine, null
/// pointer array, null channel pointer, or zero sample count is a no-op.
///
/// # Safety
/// Non-null channel pointers must be valid for reads and writes of
/// `num_samples` f32 values each and must not alias one another.
#[no_mangle]
pub unsafe extern "C" fn automix_process(
    engine: *mut AutomixEngine,
    channel_ptrs: *const *mut f32,
    num_channels: u32,
    num_samples: u32,
) {
    if engine.is_null() || channel_ptrs.is_null() || num_samples == 0 {
        return;
    }
    let engine = &mut *engine;
    let num_ch = (num_channels as usize).min(engine.inner.num_channels());
    if num_ch == 0 {
        return;
    }

    let ptrs = slice::from_raw_parts(channel_ptrs, num_ch);
    let mut buffers: [&mut [f32]; MAX_CHANNELS] = Default::default();
    for (buffer, &ptr) in buffers.iter_mut().zip(ptrs) {
        if ptr.is_null() {
            return;
        }
        *buffer = slice::from_raw_parts_mut(ptr, num_samples as usize);
    }

    engine.inner.process(&mut buffers[..num_ch]);
}

// =============================================================================
// Parameters
// =============================================================================

/// Set a channel's sharing weight, clamped to [0, 1]. Out-of-range channel
/// indices and null handles are ignored.
#[no_mangle]
pub unsafe extern "C" fn automix_set_channel_weight(
    engine: *mut AutomixEngine,
    channel: u32,
    weight: f32,
) {
    if let Some(engine) = engine.as_ref() {
        engine.inner.set_channel_weight(channel as usize, weight as f64);
    }
}

/// Mute or unmute a channel.
#[no_mangle]
pub unsafe extern "C" fn automix_set_channel_mute(
    engine: *mut AutomixEngine,
    channel: u32,
    muted: bool,
) {
    if let Some(engine) = engine.as_ref() {
        engine.inner.set_channel_mute(channel as usize, muted);
    }
}

/// Solo or unsolo a channel. While any channel is soloed, non-soloed
/// channels leave the mix.
#[no_mangle]
pub unsafe extern "C" fn automix_set_channel_solo(
    engine: *mut AutomixEngine,
    channel: u32,
    soloed: bool,
) {
    if let Some(engine) = engine.as_ref() {
        engine.inner.set_channel_solo(channel as usize, soloed);
    }
}

/// Bypass a channel: it passes through at unity and leaves the sharing sum.
#[no_mangle]
pub unsafe extern "C" fn automix_set_channel_bypass(
    engine: *mut AutomixEngine,
    channel: u32,
    bypassed: bool,
) {
    if let Some(engine) = engine.as_ref() {
        engine.inner.set_channel_bypass(channel as usize, bypassed);
    }
}

/// Bypass the whole engine: process calls leave the audio untouched.
#[no_mangle]
pub unsafe extern "C" fn automix_set_global_bypass(engine: *mut AutomixEngine, bypass: bool) {
    if let Some(engine) = engine.as_ref() {
        engine.inner.set_global_bypass(bypass);
    }
}

/// Gain smoothing attack time, clamped to [0.1, 100] ms.
#[no_mangle]
pub unsafe extern "C" fn automix_set_attack_ms(engine: *mut AutomixEngine, ms: f32) {
    if let Some(engine) = engine.as_ref() {
        engine.inner.set_attack_ms(ms as f64);
    }
}

/// Gain smoothing release time, clamped to [1, 1000] ms.
#[no_mangle]
pub unsafe extern "C" fn automix_set_release_ms(engine: *mut AutomixEngine, ms: f32) {
    if let Some(engine) = engine.as_ref() {
        engine.inner.set_release_ms(ms as f64);
    }
}

/// Last-mic hold time, clamped to [0, 5000] ms.
#[no_mangle]
pub unsafe extern "C" fn automix_set_hold_time_ms(engine: *mut AutomixEngine, ms: f32) {
    if let Some(engine) = engine.as_ref() {
        engine.inner.set_hold_time_ms(ms as f64);
    }
}

/// Enable or disable number-of-open-mics attenuation.
#[no_mangle]
pub unsafe extern "C" fn automix_set_nom_atten_enabled(
    engine: *mut AutomixEngine,
    enabled: bool,
) {
    if let Some(engine) = engine.as_ref() {
        engine.inner.set_nom_atten_enabled(enabled);
    }
}

// =============================================================================
// Metering
// =============================================================================

/// Copy one channel's meter snapshot into `out`.
///
/// Returns false on a null engine, null `out`, or out-of-range channel.
#[no_mangle]
pub unsafe extern "C" fn automix_get_channel_metering(
    engine: *const AutomixEngine,
    channel: u32,
    out: *mut AutomixChannelMetering,
) -> bool {
    let Some(engine) = engine.as_ref() else {
        return false;
    };
    if out.is_null() {
        return false;
    }
    match engine.inner.channel_metering(channel as usize) {
        Some(m) => {
            *out = AutomixChannelMetering {
                input_rms_db: m.input_rms_db,
                gain_db: m.gain_db,
                output_rms_db: m.output_rms_db,
                noise_floor_db: m.noise_floor_db,
                is_active: m.is_active,
            };
            true
        }
        None => false,
    }
}

/// Copy the engine-wide meter snapshot into `out`.
///
/// Returns false on a null engine or null `out`.
#[no_mangle]
pub unsafe extern "C" fn automix_get_global_metering(
    engine: *const AutomixEngine,
    out: *mut AutomixGlobalMetering,
) -> bool {
    let Some(engine) = engine.as_ref() else {
        return false;
    };
    if out.is_null() {
        return false;
    }
    let g = engine.inner.global_metering();
    *out = AutomixGlobalMetering {
        nom_count: g.nom_count,
        nom_attenuation_db: g.nom_attenuation_db,
    };
    true
}

/// Copy up to `max_channels` channel snapshots into the array at `out`.
///
/// Returns the number of channels written, `min(engine channels, max)`;
/// 0 on a null engine or null `out`.
///
/// # Safety
/// `out` must be null or point to at least `max_channels` records.
#[no_mangle]
pub unsafe extern "C" fn automix_get_all_channel_metering(
    engine: *const AutomixEngine,
    out: *mut AutomixChannelMetering,
    max_channels: u32,
) -> u32 {
    let Some(engine) = engine.as_ref() else {
        return 0;
    };
    if out.is_null() {
        return 0;
    }
    let count = engine.inner.num_channels().min(max_channels as usize);
    for i in 0..count {
        let mut record = AutomixChannelMetering {
            input_rms_db: 0.0,
            gain_db: 0.0,
            output_rms_db: 0.0,
            noise_floor_db: 0.0,
            is_active: false,
        };
        automix_get_channel_metering(engine, i as u32, &mut record);
        *out.add(i) = record;
    }
    count as u32
}
