//! Low-level DSP primitives used by the graph nodes and voices.
//!
//! Pure per-sample math: no allocation, no shared state. Everything here is
//! safe to call from the audio thread.

/// One-shot linear decay envelope.
pub mod envelope;
/// Radian-phase LFO helpers for the stereo modulators.
pub mod lfo;
/// Phase accumulators and waveforms.
pub mod oscillator;
