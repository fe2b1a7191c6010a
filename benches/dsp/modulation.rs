//! Benchmarks for the LFO amplitude effects.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stepseq_dsp::graph::{AudioBuffer, ModulationEffect, Node, NodeContext, NodeFormat};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_modulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/modulation");
    let ctx = NodeContext::new(SAMPLE_RATE, NodeFormat::STEREO);

    for &size in BLOCK_SIZES {
        let mut buffer = AudioBuffer::with_frames(2, size);
        buffer.data_mut().fill(0.5);

        // One sin() per frame, two channels
        let mut pan = ModulationEffect::auto_pan();
        pan.initialize(&ctx);
        group.bench_with_input(BenchmarkId::new("auto_pan", size), &size, |b, _| {
            b.iter(|| {
                pan.process(black_box(&mut buffer));
            })
        });

        // Half depth exercises the dry path too
        let mut trem = ModulationEffect::tremolo();
        trem.initialize(&ctx);
        trem.mix().set(0.5);
        group.bench_with_input(BenchmarkId::new("tremolo_half_mix", size), &size, |b, _| {
            b.iter(|| {
                trem.process(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
