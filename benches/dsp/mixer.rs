//! Benchmarks for the headroom mixer across a full step grid.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stepseq_dsp::synth::{mixer, NoteDuration, Voice, VoiceRef};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn grid(count: usize, sounding: usize) -> Vec<VoiceRef> {
    let duration = NoteDuration::new(i64::MAX / 2);
    (0..count)
        .map(|i| {
            let voice = Voice::shared(200.0 + 50.0 * i as f64, SAMPLE_RATE, &duration);
            if i < sounding {
                voice.start();
            }
            voice
        })
        .collect()
}

pub fn bench_mixer(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mixer");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Typical: one or two notes overlapping, the rest silent
        let voices = grid(16, 2);
        group.bench_with_input(BenchmarkId::new("16_voices_2_sounding", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = mixer::mix(black_box(&voices));
                }
            })
        });

        // Worst case: every voice sounding at once
        let voices = grid(16, 16);
        group.bench_with_input(BenchmarkId::new("16_voices_all_sounding", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = mixer::mix(black_box(&voices));
                }
            })
        });
    }

    group.finish();
}
