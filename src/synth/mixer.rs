use crate::synth::voice::Voice;

/*
Voice Mixer with Fixed Headroom
===============================

Sums one sample from every sounding voice. Each voice is scaled by a fixed
1/4 before summing, so up to four overlapping voices at full level fit in
[-1, 1] without clipping:

    out = Σ voice.output() · 1/4      over voices that are active AND enabled

This is static headroom, not a limiter: no gain reduction, no lookahead, no
state. More than four loud voices at once can still exceed 1.0.

A muted (disabled) voice that is still active contributes nothing here, but
the sequencer keeps advancing its envelope so it stays in time.
*/

pub const HEADROOM: f64 = 0.25;

/// Mix one sample from `voices`. Returns 0.0 when nothing is sounding.
#[inline]
pub fn mix<I>(voices: I) -> f32
where
    I: IntoIterator,
    I::Item: AsRef<Voice>,
{
    let mut sum = 0.0;
    for voice in voices {
        let voice = voice.as_ref();
        if voice.has_data() && voice.is_enabled() {
            sum += voice.output() * HEADROOM;
        }
    }
    sum as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::voice::{NoteDuration, VoiceRef};

    fn sounding(frequency: f64, duration: &NoteDuration, steps: usize) -> VoiceRef {
        let voice = Voice::shared(frequency, 44_100.0, duration);
        voice.start();
        for _ in 0..steps {
            voice.process();
        }
        voice
    }

    #[test]
    fn silent_when_nothing_active() {
        let duration = NoteDuration::new(100);
        let idle: Vec<VoiceRef> = (0..4)
            .map(|i| Voice::shared(200.0 * (i + 1) as f64, 44_100.0, &duration))
            .collect();
        assert_eq!(mix(&idle), 0.0);
        assert_eq!(mix(Vec::<VoiceRef>::new()), 0.0);
    }

    #[test]
    fn sums_scaled_outputs_of_active_voices() {
        let duration = NoteDuration::new(1_000);
        let voices = vec![
            sounding(300.0, &duration, 17),
            sounding(500.0, &duration, 40),
            Voice::shared(700.0, 44_100.0, &duration), // never started
        ];

        let expected = (voices[0].output() + voices[1].output()) * HEADROOM;
        assert!((mix(&voices) as f64 - expected).abs() < 1e-6);
    }

    #[test]
    fn muted_voice_contributes_nothing() {
        let duration = NoteDuration::new(1_000);
        let loud = sounding(300.0, &duration, 25);
        let muted = sounding(500.0, &duration, 25);
        muted.set_enabled(false);

        assert!(muted.has_data());
        let expected = loud.output() * HEADROOM;
        assert!((mix([&loud, &muted]) as f64 - expected).abs() < 1e-6);
    }
}
