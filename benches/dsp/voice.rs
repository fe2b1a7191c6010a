//! Benchmarks for a single decaying sine voice.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stepseq_dsp::synth::{NoteDuration, Voice};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/voice");
    // Long enough that the note never runs out mid-benchmark
    let duration = NoteDuration::new(i64::MAX / 2);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // process + output per sample, the clock's inner loop for one voice
        let voice = Voice::new(440.0, SAMPLE_RATE, &duration);
        voice.start();
        group.bench_with_input(BenchmarkId::new("sounding", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    voice.process();
                    *sample = voice.output() as f32;
                }
                black_box(&buffer);
            })
        });

        // Finished voices still get polled every sample
        let idle = Voice::new(440.0, SAMPLE_RATE, &NoteDuration::default());
        group.bench_with_input(BenchmarkId::new("idle_poll", size), &size, |b, _| {
            b.iter(|| {
                for _ in 0..size {
                    black_box(idle.has_data());
                }
            })
        });
    }

    group.finish();
}
