//! Benchmarks for the block primitives and the complete topologies.
//!
//! Run with: cargo bench
//!
//! Everything here runs on the audio thread in a real session, so it has to
//! finish well inside the block deadline.
//!
//! Reference timing at 44.1kHz sample rate:
//!   - 64 samples  = 1.45ms deadline
//!   - 128 samples = 2.90ms deadline
//!   - 256 samples = 5.80ms deadline
//!   - 512 samples = 11.61ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Single nodes and per-sample voice work
//!   - scenarios/*  The sequencer, auto-pan and tremolo chains end to end

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

/// Sample rate shared by every benchmark.
pub const SAMPLE_RATE: f64 = 44_100.0;

criterion_group!(
    benches,
    // Nodes and voices
    dsp::bench_oscillator,
    dsp::bench_voice,
    dsp::bench_mixer,
    dsp::bench_modulation,
    // Complete chains
    scenarios::bench_patches,
);
criterion_main!(benches);
