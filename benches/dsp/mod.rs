//! Benchmarks for nodes and per-sample voice work.

mod mixer;
mod modulation;
mod oscillator;
mod voice;

pub use mixer::bench_mixer;
pub use modulation::bench_modulation;
pub use oscillator::bench_oscillator;
pub use voice::bench_voice;
