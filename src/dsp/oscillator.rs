use std::f64::consts::TAU;

/*
Phase-Accumulator Oscillators
=============================

Every oscillator in this crate is a phase accumulator: a number that walks
forward by a fixed increment each sample and wraps at the end of a cycle.
The waveform is then a pure function of that phase.

Vocabulary
----------

  phase       Position inside one cycle, normalised to [0, 1).
              0.0 = start of cycle, 0.5 = half way, 1.0 wraps back to 0.0.

  increment   How far the phase moves per sample:

                  increment = frequency / sample_rate

              At 440 Hz and 44100 Hz: 440 / 44100 ≈ 0.009977 cycles/sample.


Why wrap?
---------

The phase could grow forever and `sin(2π·phase)` would still produce the
right values mathematically. In floating point it does not: after a few
minutes the phase is large enough that the fractional part loses precision
and the tone starts to drift and buzz. Wrapping into [0, 1) keeps full
precision no matter how long the engine runs.


Shapes
------

  sine        sin(2π·phase). The voice tone.

  triangle    Linear ramp -1 → +1 → -1 over one cycle. The test source that
              feeds the auto-pan and tremolo topologies.

                 +1 ┤    ╱╲
                    │   ╱  ╲
                  0 ┼──╱────╲────
                    │ ╱      ╲  ╱
                 -1 ┤╱        ╲╱
*/

/// Phase increment in cycles per sample.
#[inline]
pub fn phase_increment(frequency_hz: f64, sample_rate: f64) -> f64 {
    frequency_hz / sample_rate
}

/// Wrap a phase in cycles back into `[0, 1)`.
#[inline]
pub fn wrap_unit(phase: f64) -> f64 {
    phase - phase.floor()
}

#[inline]
pub fn sine(phase: f64) -> f64 {
    (TAU * phase).sin()
}

/// Naive (non band-limited) triangle, phase 0 starts at -1.
#[inline]
pub fn triangle(phase: f64) -> f64 {
    let p = wrap_unit(phase);
    if p < 0.5 {
        4.0 * p - 1.0
    } else {
        3.0 - 4.0 * p
    }
}
