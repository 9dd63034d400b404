//! Throughput benchmarks for the gain-sharing engine.
//!
//! Run with: cargo bench -p automix-core --bench engine_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use automix_core::config::EngineConfig;
use automix_core::engine::AutomixEngine;

const BLOCK: usize = 256;
const RATE: f64 = 48_000.0;

fn bench_process_by_channel_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");

    for &num_channels in &[1usize, 2, 8, 16, 32] {
        let config = EngineConfig::builder()
            .num_channels(num_channels)
            .sample_rate(RATE)
            .max_block_size(BLOCK)
            .build()
            .unwrap();
        let mut engine = AutomixEngine::new(config);

        let mut bufs: Vec<Vec<f32>> = (0..num_channels)
            .map(|i| {
                (0..BLOCK)
                    .map(|s| ((s + i) as f32 * 0.01).sin() * 0.5)
                    .collect()
            })
            .collect();

        group.throughput(Throughput::Elements((num_channels * BLOCK) as u64));
        group.bench_with_input(
            BenchmarkId::new("channels", num_channels),
            &num_channels,
            |b, _| {
                b.iter(|| {
                    let mut refs: Vec<&mut [f32]> =
                        bufs.iter_mut().map(|v| v.as_mut_slice()).collect();
                    engine.process(black_box(&mut refs));
                })
            },
        );
    }

    group.finish();
}

fn bench_global_bypass(c: &mut Criterion) {
    let config = EngineConfig::builder()
        .num_channels(32)
        .sample_rate(RATE)
        .max_block_size(BLOCK)
        .build()
        .unwrap();
    let mut engine = AutomixEngine::new(config);
    engine.set_global_bypass(true);

    let mut bufs: Vec<Vec<f32>> = vec![vec![0.5; BLOCK]; 32];

    c.bench_function("process_global_bypass_32ch", |b| {
        b.iter(|| {
            let mut refs: Vec<&mut [f32]> = bufs.iter_mut().map(|v| v.as_mut_slice()).collect();
            engine.process(black_box(&mut refs));
        })
    });
}

criterion_group!(benches, bench_process_by_channel_count, bench_global_bypass);
criterion_main!(benches);
