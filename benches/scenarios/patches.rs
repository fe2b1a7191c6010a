//! Benchmarks for the three fixed topologies.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stepseq_dsp::{graph::ModulationKind, patch, EngineConfig};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_patches(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/patches");
    let config = EngineConfig::default().with_sample_rate(SAMPLE_RATE);

    for &size in BLOCK_SIZES {
        // === STEP SEQUENCER ===
        // clock → gain, 16 voices, fastest tempo so steps fire often
        let frequencies: Vec<f64> = (0..16).map(|i| 200.0 + 50.0 * i as f64).collect();
        let clock = patch::sequencer_clock(&config.clone().with_tempo(300), &frequencies)
            .expect("default config is valid");
        let mut seq = patch::step_sequencer(&config, clock);
        seq.control.restart();

        group.bench_with_input(BenchmarkId::new("sequencer", size), &size, |b, _| {
            b.iter(|| {
                black_box(seq.graph.pull(size));
            })
        });

        // === AUTO-PAN / TREMOLO ===
        // triangle → effect → gain
        for (name, kind) in [
            ("autopan", ModulationKind::AutoPan),
            ("tremolo", ModulationKind::Tremolo),
        ] {
            let mut fx = patch::modulation(&config, kind).expect("default config is valid");
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    black_box(fx.graph.pull(size));
                })
            });
        }
    }

    group.finish();
}
