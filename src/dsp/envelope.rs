/*
One-Shot Linear Decay Envelope
==============================

The sequencer voices do not use an ADSR. A trigger jumps straight to full
level and the level falls in a straight line to zero over the note duration:

  Level
    1.0 ┤╲
        │ ╲
        │  ╲
        │   ╲
    0.0 ┼────╲──────────→ elapsed samples
        0    note_duration

    level = 1 - elapsed / note_duration

There is no gate and no release stage. The voice is audible while
`elapsed < note_duration` and silent afterwards.

The envelope is evaluated from the elapsed sample count every time instead of
being accumulated. Nothing is cached, so if the duration changes while a note
is sounding the very next sample follows the new slope. The level can then
jump up (longer duration) or drop below zero (shorter duration, the voice goes
silent on the next `has_data` check).
*/

/// Level of the linear decay after `elapsed` samples of a `duration`-sample note.
///
/// Returns 1.0 at `elapsed == 0` and 0.0 at `elapsed == duration`. Values past
/// the end are negative and callers gate on `elapsed < duration` first.
#[inline]
pub fn linear_decay(elapsed: i64, duration: i64) -> f64 {
    1.0 - elapsed as f64 / duration as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one_ends_at_zero() {
        assert_eq!(linear_decay(0, 22_050), 1.0);
        assert_eq!(linear_decay(22_050, 22_050), 0.0);
        assert!((linear_decay(11_025, 22_050) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn monotonically_non_increasing() {
        let duration = 2_000;
        let mut previous = f64::INFINITY;
        for elapsed in 0..=duration + 10 {
            let level = linear_decay(elapsed, duration);
            assert!(level <= previous, "level rose at {elapsed}");
            previous = level;
        }
        assert!(previous <= 0.0);
    }
}
