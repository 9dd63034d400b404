//! # Engine
//!
//! The per-block orchestrator tying the pipeline together: parameter
//! snapshot, per-sample envelope/floor/gate advancement, the cross-channel
//! gain-sharing step, NOM compensation, gain smoothing, in-place
//! application, and meter publication.
//!
//! The audio path allocates nothing, takes no locks, and performs
//! O(channels * samples) bounded work. Control values arrive through the
//! shared [`ControlBlock`] and are snapshotted once per block; meters leave
//! through the lock-free [`MeterStore`].
//!
//! ## Example
//!
//! ```rust
//! use automix_core::config::EngineConfig;
//! use automix_core::engine::AutomixEngine;
//!
//! let config = EngineConfig::builder().num_channels(2).build().unwrap();
//! let mut engine = AutomixEngine::new(config);
//!
//! let mut left = vec![0.5_f32; 256];
//! let mut right = vec![0.1_f32; 256];
//! engine.process(&mut [&mut left, &mut right]);
//!
//! let meters = engine.channel_metering(0).unwrap();
//! assert!(meters.input_rms_db.is_finite());
//! ```

use tracing::debug;

use crate::channel::ChannelState;
use crate::config::EngineConfig;
use crate::gain_sharing::share_gains;
use crate::metering::{ChannelMetering, GlobalMetering, MeterStore};
use crate::nom::NomAttenuator;
use crate::params::{ChannelControls, ControlBlock};
use crate::tuning::{DB_EPSILON, DEFAULT_HOLD_MS, MAX_CHANNELS, SHARE_EPSILON};
use crate::units::{finite_or, finite_or_f32, linear_to_db, ms_to_samples, power_to_db};

/// Dugan-style gain-sharing automatic mixer.
///
/// One audio thread calls [`process`](Self::process); setters and meter
/// getters may be called concurrently from other threads (every shared
/// value is a relaxed atomic).
pub struct AutomixEngine {
    num_channels: usize,
    sample_rate: f64,
    max_block_size: usize,
    channels: Box<[ChannelState; MAX_CHANNELS]>,
    controls: ControlBlock,
    meters: MeterStore,
    nom: NomAttenuator,
    /// Most recently hot participating channel; receives last-mic hold.
    last_hot: Option<usize>,
    // ms values behind the current smoothing coefficients, so coefficients
    // are recomputed only when a parameter actually changed.
    attack_ms: f64,
    release_ms: f64,
    hold_ms: f64,
    // Fixed-capacity scratch, so the audio path never allocates.
    ctrl: [ChannelControls; MAX_CHANNELS],
    participating: [bool; MAX_CHANNELS],
    hot: [bool; MAX_CHANNELS],
    active: [bool; MAX_CHANNELS],
    contributions: [f64; MAX_CHANNELS],
    gains: [f64; MAX_CHANNELS],
}

impl AutomixEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: EngineConfig) -> Self {
        let controls = ControlBlock::new();
        let global = controls.global();

        let mut channels: Box<[ChannelState; MAX_CHANNELS]> = Box::new(std::array::from_fn(
            |_| ChannelState::new(config.sample_rate),
        ));
        let hold_samples = ms_to_samples(DEFAULT_HOLD_MS, config.sample_rate);
        for ch in channels.iter_mut() {
            ch.gate.set_hold_samples(hold_samples);
        }

        debug!(
            num_channels = config.num_channels,
            sample_rate = config.sample_rate,
            max_block_size = config.max_block_size,
            "automix engine created"
        );

        Self {
            num_channels: config.num_channels,
            sample_rate: config.sample_rate,
            max_block_size: config.max_block_size,
            channels,
            meters: MeterStore::new(),
            nom: NomAttenuator::new(config.sample_rate, config.num_channels),
            last_hot: None,
            attack_ms: global.attack_ms,
            release_ms: global.release_ms,
            hold_ms: global.hold_ms,
            controls,
            ctrl: std::array::from_fn(|_| ChannelControls {
                weight: 1.0,
                muted: false,
                soloed: false,
                bypassed: false,
            }),
            participating: [false; MAX_CHANNELS],
            hot: [false; MAX_CHANNELS],
            active: [false; MAX_CHANNELS],
            contributions: [0.0; MAX_CHANNELS],
            gains: [0.0; MAX_CHANNELS],
        }
    }

    /// Crate version, for the ABI's version string.
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    #[inline]
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    #[inline]
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Process one block in place. `buffers[c]` is channel `c`'s samples;
    /// channels beyond the configured count are ignored, and the shortest
    /// buffer bounds the number of samples processed. Empty input is a
    /// valid no-op.
    pub fn process(&mut self, buffers: &mut [&mut [f32]]) {
        let num_ch = buffers.len().min(self.num_channels);
        if num_ch == 0 {
            return;
        }
        let num_samples = buffers[..num_ch]
            .iter()
            .map(|b| b.len())
            .min()
            .unwrap_or(0);
        if num_samples == 0 {
            return;
        }

        let global = self.controls.global();
        self.refresh_coefficients(global.attack_ms, global.release_ms, global.hold_ms);
        self.nom.set_enabled(global.nom_atten_enabled);

        if global.global_bypass {
            self.publish_bypass_meters(buffers, num_ch, num_samples);
            return;
        }

        for i in 0..num_ch {
            self.ctrl[i] = self.controls.channel(i);
        }
        let any_solo = self.ctrl[..num_ch].iter().any(|c| c.soloed);
        for i in 0..num_ch {
            let c = &self.ctrl[i];
            self.participating[i] = !c.muted && !c.bypassed && (!any_solo || c.soloed);
            self.channels[i].begin_block();
        }

        for s in 0..num_samples {
            // Envelope and noise floor advance for every channel, bypassed
            // included, so their gates stay warm.
            for i in 0..num_ch {
                let ch = &mut self.channels[i];
                let env = ch.envelope.process(buffers[i][s]);
                ch.noise_floor.update(env);
            }

            // Hotness and last-hot bookkeeping over participating channels.
            let mut hot_count = 0usize;
            for i in 0..num_ch {
                let ch = &self.channels[i];
                let hot = self.participating[i]
                    && ch.gate.is_hot_for(ch.envelope.level(), ch.noise_floor.floor());
                self.hot[i] = hot;
                hot_count += hot as usize;
            }
            let newly_hot = (0..num_ch).find(|&i| self.hot[i] && !self.channels[i].gate.is_hot());
            if let Some(i) = newly_hot {
                self.last_hot = Some(i);
            } else if hot_count > 0 {
                let still_hot = self
                    .last_hot
                    .map_or(false, |i| i < num_ch && self.hot[i]);
                if !still_hot {
                    self.last_hot = self.hot[..num_ch].iter().position(|&h| h);
                }
            }
            if let Some(i) = self.last_hot {
                if i >= num_ch || !self.participating[i] {
                    self.last_hot = None;
                }
            }

            // Gate transitions; NOM counts hot and holding channels.
            let mut open = 0usize;
            for i in 0..num_ch {
                let is_last = self.last_hot == Some(i);
                let any_other_hot = hot_count > self.hot[i] as usize;
                let gate_active =
                    self.channels[i]
                        .gate
                        .advance(self.hot[i], is_last, any_other_hot);
                self.active[i] = self.participating[i] && gate_active;
                open += self.active[i] as usize;
            }

            // Contributions and the Dugan step.
            let mut contrib_sum = 0.0;
            for i in 0..num_ch {
                self.contributions[i] = if self.active[i] {
                    self.channels[i].envelope.level() * self.ctrl[i].weight
                } else {
                    0.0
                };
                contrib_sum += self.contributions[i];
            }
            share_gains(&self.contributions[..num_ch], &mut self.gains[..num_ch]);
            if contrib_sum <= SHARE_EPSILON {
                // All envelopes have decayed to nothing. A held channel
                // stays open at unity so the tail of speech is not clipped.
                if let Some(h) = self.last_hot {
                    if h < num_ch && self.active[h] {
                        self.gains[h] = 1.0;
                    }
                }
            }

            let nom_gain = self.nom.advance(open);

            // Smoothing, in-place application, meter accumulation.
            for i in 0..num_ch {
                let input = buffers[i][s];
                let in_sq = if input.is_finite() {
                    (input as f64) * (input as f64)
                } else {
                    0.0
                };
                let ch = &mut self.channels[i];
                if self.ctrl[i].bypassed {
                    ch.gain.set_immediate(1.0);
                    ch.sum_in_sq += in_sq;
                    ch.sum_out_sq += in_sq;
                    continue;
                }
                let gain = ch.gain.process(self.gains[i] * nom_gain);
                let out = finite_or_f32((finite_or(input as f64, 0.0) * gain) as f32, 0.0);
                buffers[i][s] = out;
                ch.sum_in_sq += in_sq;
                ch.sum_out_sq += (out as f64) * (out as f64);
            }
        }

        let n = num_samples as f64;
        for i in 0..num_ch {
            let ch = &self.channels[i];
            self.meters.publish_channel(
                i,
                power_to_db(ch.sum_in_sq / n + DB_EPSILON),
                linear_to_db(ch.gain.current() + DB_EPSILON),
                power_to_db(ch.sum_out_sq / n + DB_EPSILON),
                ch.noise_floor.floor_db(),
                self.active[i],
            );
        }
        self.meters
            .publish_global(self.nom.count(), self.nom.attenuation_db());
    }

    /// Recompute smoothing coefficients and hold durations, but only when
    /// the underlying ms values actually changed.
    fn refresh_coefficients(&mut self, attack_ms: f64, release_ms: f64, hold_ms: f64) {
        if attack_ms != self.attack_ms || release_ms != self.release_ms {
            self.attack_ms = attack_ms;
            self.release_ms = release_ms;
            for ch in self.channels.iter_mut() {
                ch.gain
                    .set_coefficients(attack_ms, release_ms, self.sample_rate);
            }
        }
        if hold_ms != self.hold_ms {
            self.hold_ms = hold_ms;
            let samples = ms_to_samples(hold_ms, self.sample_rate);
            for ch in self.channels.iter_mut() {
                ch.gate.set_hold_samples(samples);
            }
        }
    }

    /// Global bypass leaves the audio untouched and publishes passthrough
    /// meters: input RMS equals output RMS at unity gain, nothing active.
    fn publish_bypass_meters(&self, buffers: &[&mut [f32]], num_ch: usize, num_samples: usize) {
        let n = num_samples as f64;
        for i in 0..num_ch {
            let mut sum_sq = 0.0;
            for &x in buffers[i].iter().take(num_samples) {
                if x.is_finite() {
                    sum_sq += (x as f64) * (x as f64);
                }
            }
            let rms_db = power_to_db(sum_sq / n + DB_EPSILON);
            self.meters.publish_channel(
                i,
                rms_db,
                0.0,
                rms_db,
                self.channels[i].noise_floor.floor_db(),
                false,
            );
        }
        self.meters.publish_global(self.nom.count(), 0.0);
    }

    /// Return every channel and the NOM tracker to the post-construction
    /// state. Control parameters are preserved.
    pub fn reset(&mut self) {
        for ch in self.channels.iter_mut() {
            ch.reset();
        }
        self.nom.reset();
        self.last_hot = None;
        self.meters.reset();
        debug!("automix engine reset");
    }

    // --- control surface (callable from any thread) ---

    pub fn set_channel_weight(&self, channel: usize, weight: f64) {
        if channel < self.num_channels {
            self.controls.set_weight(channel, weight);
        }
    }

    pub fn set_channel_mute(&self, channel: usize, muted: bool) {
        if channel < self.num_channels {
            self.controls.set_muted(channel, muted);
        }
    }

    pub fn set_channel_solo(&self, channel: usize, soloed: bool) {
        if channel < self.num_channels {
            self.controls.set_soloed(channel, soloed);
        }
    }

    pub fn set_channel_bypass(&self, channel: usize, bypassed: bool) {
        if channel < self.num_channels {
            self.controls.set_bypassed(channel, bypassed);
        }
    }

    pub fn set_global_bypass(&self, bypass: bool) {
        self.controls.set_global_bypass(bypass);
    }

    pub fn set_attack_ms(&self, ms: f64) {
        self.controls.set_attack_ms(ms);
    }

    pub fn set_release_ms(&self, ms: f64) {
        self.controls.set_release_ms(ms);
    }

    pub fn set_hold_time_ms(&self, ms: f64) {
        self.controls.set_hold_ms(ms);
    }

    pub fn set_nom_atten_enabled(&self, enabled: bool) {
        self.controls.set_nom_atten_enabled(enabled);
    }

    // --- metering (callable from any thread) ---

    /// Meter snapshot for one channel, `None` if the index is out of range.
    pub fn channel_metering(&self, channel: usize) -> Option<ChannelMetering> {
        if channel < self.num_channels {
            Some(self.meters.channel(channel))
        } else {
            None
        }
    }

    /// Engine-wide meter snapshot.
    pub fn global_metering(&self) -> GlobalMetering {
        self.meters.global()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::db_to_linear;
    use approx::assert_relative_eq;

    const BLOCK: usize = 256;
    const RATE: f64 = 48_000.0;

    fn engine(num_channels: usize) -> AutomixEngine {
        let config = EngineConfig::builder()
            .num_channels(num_channels)
            .sample_rate(RATE)
            .max_block_size(BLOCK)
            .build()
            .unwrap();
        AutomixEngine::new(config)
    }

    /// Run `blocks` blocks of per-channel constant input, returning the
    /// buffers from the final block.
    fn run_constant(engine: &mut AutomixEngine, levels: &[f32], blocks: usize) -> Vec<Vec<f32>> {
        let mut last = Vec::new();
        for _ in 0..blocks {
            let mut bufs: Vec<Vec<f32>> = levels.iter().map(|&v| vec![v; BLOCK]).collect();
            let mut refs: Vec<&mut [f32]> = bufs.iter_mut().map(|b| b.as_mut_slice()).collect();
            engine.process(&mut refs);
            last = bufs;
        }
        last
    }

    #[test]
    fn silence_in_silence_out() {
        let mut engine = engine(2);
        let out = run_constant(&mut engine, &[0.0, 0.0], 100);
        for ch in &out {
            for &s in ch {
                assert_eq!(s, 0.0);
            }
        }
        for i in 0..2 {
            let m = engine.channel_metering(i).unwrap();
            assert_eq!(m.input_rms_db, -120.0);
            assert_eq!(m.output_rms_db, -120.0);
            assert!(!m.is_active);
        }
        assert!(engine.global_metering().nom_count < 0.01);
    }

    #[test]
    fn single_channel_converges_to_unity() {
        let mut engine = engine(1);
        let out = run_constant(&mut engine, &[0.5], 200);
        let last = out[0][BLOCK - 1];
        assert!(
            (last - 0.5).abs() < 0.05,
            "expected passthrough near 0.5, got {last}"
        );
    }

    #[test]
    fn louder_channel_dominates() {
        let mut engine = engine(2);
        let out = run_constant(&mut engine, &[0.8, 0.2], 200);
        let ch0 = out[0][BLOCK - 1].abs();
        let ch1 = out[1][BLOCK - 1].abs();
        assert!(ch0 > ch1, "ch0={ch0} should exceed ch1={ch1}");
        assert!(ch0.is_finite() && ch1.is_finite());

        let m0 = engine.channel_metering(0).unwrap();
        let m1 = engine.channel_metering(1).unwrap();
        assert!(m0.gain_db > m1.gain_db);
    }

    #[test]
    fn weight_skews_sharing() {
        let mut engine = engine(2);
        engine.set_channel_weight(0, 1.0);
        engine.set_channel_weight(1, 0.1);
        let out = run_constant(&mut engine, &[0.5, 0.5], 200);
        assert!(out[0][BLOCK - 1].abs() > out[1][BLOCK - 1].abs());
    }

    #[test]
    fn equal_channels_share_unity_sum() {
        let mut engine = engine(4);
        engine.set_nom_atten_enabled(false);
        run_constant(&mut engine, &[0.5; 4], 200);

        let mut gain_sum = 0.0;
        for i in 0..4 {
            let m = engine.channel_metering(i).unwrap();
            let gain = db_to_linear(m.gain_db as f64);
            assert_relative_eq!(gain, 0.25, epsilon = 0.02);
            gain_sum += gain;
        }
        assert_relative_eq!(gain_sum, 1.0, epsilon = 0.05);
    }

    #[test]
    fn nom_attenuation_halves_two_open_mics() {
        let mut engine = engine(2);
        run_constant(&mut engine, &[0.5, 0.5], 200);
        let g = engine.global_metering();
        assert_relative_eq!(g.nom_count, 2.0, epsilon = 0.1);
        assert_relative_eq!(g.nom_attenuation_db, -6.02, epsilon = 0.2);
        // Each channel: 1/2 share * 1/2 NOM = 1/4.
        let m = engine.channel_metering(0).unwrap();
        assert_relative_eq!(db_to_linear(m.gain_db as f64), 0.25, epsilon = 0.03);
    }

    #[test]
    fn global_bypass_is_bit_exact_identity() {
        let mut engine = engine(2);
        engine.set_global_bypass(true);

        let mut ch0: Vec<f32> = (0..BLOCK).map(|i| (i as f32 * 0.001).sin() * 0.5).collect();
        let mut ch1 = vec![0.3_f32; BLOCK];
        let orig0 = ch0.clone();
        let orig1 = ch1.clone();

        engine.process(&mut [&mut ch0, &mut ch1]);
        assert_eq!(ch0, orig0);
        assert_eq!(ch1, orig1);

        // Passthrough metering: input equals output.
        let m = engine.channel_metering(1).unwrap();
        assert_eq!(m.input_rms_db, m.output_rms_db);
        assert_eq!(m.gain_db, 0.0);
    }

    #[test]
    fn muted_channel_fades_to_silence() {
        let mut engine = engine(2);
        engine.set_channel_mute(1, true);
        let out = run_constant(&mut engine, &[0.5, 0.5], 200);
        assert!(out[1][BLOCK - 1].abs() < 0.01);
        assert!(out[0][BLOCK - 1].abs() > 0.4);
    }

    #[test]
    fn bypassed_channel_passes_unity_and_leaves_the_sum() {
        let mut engine = engine(2);
        engine.set_channel_bypass(0, true);
        let out = run_constant(&mut engine, &[0.5, 0.5], 200);
        // Bypassed channel is untouched.
        assert_eq!(out[0][BLOCK - 1], 0.5);
        // The other channel now shares with nobody and converges to unity.
        assert!((out[1][BLOCK - 1] - 0.5).abs() < 0.05);
        let m = engine.channel_metering(0).unwrap();
        assert_relative_eq!(m.gain_db, 0.0, epsilon = 0.01);
    }

    #[test]
    fn solo_isolates_the_soloed_channel() {
        let mut engine = engine(2);
        engine.set_channel_solo(0, true);
        let out = run_constant(&mut engine, &[0.5, 0.5], 200);
        assert!(out[0][BLOCK - 1].abs() > 0.1);
        assert!(out[1][BLOCK - 1].abs() < 0.01);
    }

    #[test]
    fn nan_injection_recovers() {
        let mut engine = engine(2);
        run_constant(&mut engine, &[0.5, 0.3], 100);

        let out = run_constant(&mut engine, &[f32::NAN, 0.3], 1);
        for ch in &out {
            for &s in ch {
                assert!(s.is_finite());
            }
        }
        let m = engine.channel_metering(0).unwrap();
        assert!(m.input_rms_db.is_finite() && m.gain_db.is_finite());

        // Finite input afterwards keeps producing finite output.
        let out = run_constant(&mut engine, &[0.5, 0.3], 100);
        for ch in &out {
            for &s in ch {
                assert!(s.is_finite());
            }
        }
    }

    #[test]
    fn inf_injection_stays_finite() {
        let mut engine = engine(2);
        run_constant(&mut engine, &[0.5, 0.3], 100);
        let out = run_constant(&mut engine, &[f32::INFINITY, f32::NEG_INFINITY], 1);
        for ch in &out {
            for &s in ch {
                assert!(s.is_finite());
            }
        }
    }

    #[test]
    fn hold_keeps_last_mic_active_through_silence() {
        let mut engine = engine(2);
        // Speak on channel 0 for half a second.
        run_constant(&mut engine, &[0.5, 0.0], 94);

        // 100 ms of silence: well inside the 500 ms default hold.
        run_constant(&mut engine, &[0.0, 0.0], 19);
        let m = engine.channel_metering(0).unwrap();
        assert!(m.is_active, "held channel should still be active");
        assert!(m.gain_db > -3.0, "held gain should stay near unity");

        // Two more seconds: hold expired, gain released.
        run_constant(&mut engine, &[0.0, 0.0], 375);
        let m = engine.channel_metering(0).unwrap();
        assert!(!m.is_active);
        assert!(m.gain_db < -40.0);
    }

    #[test]
    fn zero_hold_releases_immediately() {
        let mut engine = engine(1);
        engine.set_hold_time_ms(0.0);
        run_constant(&mut engine, &[0.5], 94);
        // 100 ms of silence is enough for the envelope to collapse and the
        // gate to close with no hold.
        run_constant(&mut engine, &[0.0], 19);
        let m = engine.channel_metering(0).unwrap();
        assert!(!m.is_active);
    }

    #[test]
    fn excess_buffers_are_ignored() {
        let mut engine = engine(2);
        let mut bufs: Vec<Vec<f32>> = vec![vec![0.5; BLOCK]; 4];
        let mut refs: Vec<&mut [f32]> = bufs.iter_mut().map(|b| b.as_mut_slice()).collect();
        engine.process(&mut refs);
        // Channels beyond the configured two are untouched.
        assert_eq!(bufs[2], vec![0.5; BLOCK]);
        assert_eq!(bufs[3], vec![0.5; BLOCK]);
    }

    #[test]
    fn empty_input_is_a_noop() {
        let mut engine = engine(2);
        engine.process(&mut []);
        let mut empty: [&mut [f32]; 2] = [&mut [], &mut []];
        engine.process(&mut empty);
        let m = engine.channel_metering(0).unwrap();
        assert_eq!(m.input_rms_db, -120.0);
    }

    #[test]
    fn meter_ranges_always_respected() {
        let mut engine = engine(3);
        run_constant(&mut engine, &[1.0, 0.001, f32::NAN], 50);
        for i in 0..3 {
            let m = engine.channel_metering(i).unwrap();
            for v in [m.input_rms_db, m.gain_db, m.output_rms_db, m.noise_floor_db] {
                assert!(v.is_finite());
                assert!((-120.0..=24.0).contains(&v), "meter out of range: {v}");
            }
        }
        let g = engine.global_metering();
        assert!((0.0..=3.0).contains(&g.nom_count));
        assert!(g.nom_attenuation_db <= 0.0);
    }

    #[test]
    fn out_of_range_metering_index_is_none() {
        let engine = engine(2);
        assert!(engine.channel_metering(2).is_none());
        assert!(engine.channel_metering(MAX_CHANNELS).is_none());
    }

    #[test]
    fn attack_release_changes_apply() {
        let mut engine = engine(1);
        engine.set_attack_ms(0.1);
        let out = run_constant(&mut engine, &[0.5], 20);
        let fast = out[0][BLOCK - 1];

        let mut engine = self::engine(1);
        engine.set_attack_ms(100.0);
        let out = run_constant(&mut engine, &[0.5], 20);
        let slow = out[0][BLOCK - 1];

        assert!(
            fast > slow,
            "faster attack should be further along: fast={fast}, slow={slow}"
        );
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut engine = engine(2);
        run_constant(&mut engine, &[0.5, 0.5], 100);
        engine.reset();
        let m = engine.channel_metering(0).unwrap();
        assert_eq!(m.input_rms_db, -120.0);
        assert!(!m.is_active);
        assert_eq!(engine.global_metering().nom_count, 0.0);
    }

    #[test]
    fn version_is_non_empty() {
        assert!(!AutomixEngine::version().is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_block() -> impl Strategy<Value = Vec<f32>> {
        proptest::collection::vec(
            prop_oneof![
                8 => (-1.0..1.0_f32),
                1 => Just(f32::NAN),
                1 => Just(f32::INFINITY),
            ],
            64,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn output_always_finite_and_bounded(
            block_a in arb_block(),
            block_b in arb_block(),
        ) {
            let config = EngineConfig::builder().num_channels(2).build().unwrap();
            let mut engine = AutomixEngine::new(config);

            let mut a = block_a;
            let mut b = block_b;
            engine.process(&mut [&mut a, &mut b]);

            for &s in a.iter().chain(b.iter()) {
                prop_assert!(s.is_finite());
                prop_assert!(s.abs() <= 1.1, "sample {s} exceeds bound");
            }
        }
    }
}
