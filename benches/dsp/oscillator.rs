//! Benchmarks for the triangle source node.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stepseq_dsp::graph::{AudioBuffer, Node, NodeContext, NodeFormat, TriangleNode};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let ctx = NodeContext::new(SAMPLE_RATE, NodeFormat::STEREO);

    for &size in BLOCK_SIZES {
        let mut buffer = AudioBuffer::with_frames(2, size);

        let mut osc = TriangleNode::default();
        osc.initialize(&ctx);
        group.bench_with_input(BenchmarkId::new("triangle_stereo", size), &size, |b, _| {
            b.iter(|| {
                osc.process(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
