//! Low Frequency Oscillator (LFO) helpers in radians.

use std::f64::consts::TAU;

/*
Low Frequency Oscillators
=========================

An LFO is an oscillator running at sub-audio frequencies. The stereo
modulation effects keep their phase in RADIANS, [0, 2π), rather than the
normalised cycles the audio oscillators use, because the gain curve is read
straight off `sin(phase)`.

Vocabulary
----------

  control-rate    Frequencies below hearing: ~0.01 Hz to ~20 Hz.

  period          Time for one cycle. At 2.1 Hz: 1/2.1 ≈ 0.476 s.

  rectified       |sin(phase)|. Folds the negative half up, so the curve
                  goes 0 → 1 → 0 TWICE per LFO cycle:

                     1 ┤ ╱╲  ╱╲
                       │╱  ╲╱  ╲
                     0 ┼────────→
                       0   π   2π

                  A 2.1 Hz LFO therefore sweeps the gain at 4.2 Hz.


Typical Rates
-------------

    0.5 - 2 Hz      Classic tremolo, slow auto-pan
    2 - 7 Hz        Pulsing, vibrato-speed movement
    7 - 15 Hz       Fast "helicopter" tremolo
    > 20 Hz         Audio-rate AM: sidebands, no perceived wobble
*/

/// Phase increment in radians per sample.
#[inline]
pub fn phase_increment(frequency_hz: f64, sample_rate: f64) -> f64 {
    TAU * frequency_hz / sample_rate
}

/// Advance a radian phase and wrap it into `[0, 2π)`.
#[inline]
pub fn advance(phase: f64, increment: f64) -> f64 {
    (phase + increment).rem_euclid(TAU)
}

/// Rectified sine, the unipolar gain curve used by the stereo modulators.
#[inline]
pub fn rectified_sine(phase: f64) -> f64 {
    phase.sin().abs()
}

/// Samples per LFO period.
///
/// # Example
/// ```
/// use stepseq_dsp::dsp::lfo::samples_per_period;
/// assert_eq!(samples_per_period(2.0, 48_000.0), 24_000.0);
/// ```
#[inline]
pub fn samples_per_period(frequency_hz: f64, sample_rate: f64) -> f64 {
    sample_rate / frequency_hz
}
