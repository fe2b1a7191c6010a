/*
Beat Subdivisions and the Timing Table
======================================

The sequencer measures time in samples only. Tempo is turned into a table of
integer sample lengths, one per note value, and every boundary test is an
integer modulo against that table. No seconds, no floating-point clock, so
nothing drifts no matter how long the engine runs.

Subdivisions
------------

A subdivision names a fraction of a whole note (one 4/4 bar):

    Whole         1     ────────────────────────────────
    Half          2     ────────────────┬───────────────
    Quarter       4     ───────┬────────┬───────┬───────
    Eighth        8     ───┬───┬───┬────┬───┬───┬───┬───
    Sixteenth    16     ─┬─┬─┬─┬─┬─┬─┬──┬─┬─┬─┬─┬─┬─┬─┬─
    ThirtySecond 32     (twice as fine again)


Building the Table
------------------

Everything derives from the thirty-second note, the "base unit":

    base = floor( (sample_rate · 60) / (tempo · 8) )

A beat (quarter note) lasts sample_rate·60/tempo samples and holds eight
thirty-seconds, hence the ·8. Every coarser value is an exact multiple:

    Whole = 32·base   Half = 16·base   Quarter = 8·base
    Eighth = 4·base   Sixteenth = 2·base   ThirtySecond = base

Example: 44100 Hz at 120 BPM
  - base = floor(2_646_000 / 960) = floor(2756.25) = 2756
  - Sixteenth = 5512 samples, Whole = 88192 samples

Flooring the base (rather than each value separately) is what keeps the grid
nested: every 16th boundary is also a 32nd boundary, every quarter boundary
is also a 16th boundary, and so on. The price is a tiny tempo error (here
0.25 samples per 32nd, ≈0.009%).
*/

pub const MIN_TEMPO: i32 = 1;
pub const MAX_TEMPO: i32 = 300;
pub const DEFAULT_TEMPO: i32 = 120;

/// Clamp a tempo in BPM into the supported range.
pub fn clamp_tempo(bpm: i32) -> i32 {
    bpm.clamp(MIN_TEMPO, MAX_TEMPO)
}

/// Note value as a fraction of a whole note.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subdivision {
    Whole = 1,
    Half = 2,
    Quarter = 4,
    Eighth = 8,
    Sixteenth = 16,
    ThirtySecond = 32,
}

impl Subdivision {
    /// Every subdivision, coarsest first.
    pub const ALL: [Subdivision; 6] = [
        Subdivision::Whole,
        Subdivision::Half,
        Subdivision::Quarter,
        Subdivision::Eighth,
        Subdivision::Sixteenth,
        Subdivision::ThirtySecond,
    ];

    /// 1, 2, 4, 8, 16 or 32.
    pub const fn denominator(self) -> u32 {
        self as u32
    }

    pub fn from_denominator(denominator: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.denominator() == denominator)
    }

    /// How many thirty-second notes fit in one of these.
    pub const fn thirty_seconds(self) -> i64 {
        32 / self as i64
    }

    const fn index(self) -> usize {
        self.denominator().trailing_zeros() as usize
    }
}

/// Sample length of every subdivision at one tempo and sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingTable {
    lengths: [i64; 6],
}

impl TimingTable {
    pub fn new(sample_rate: f64, tempo: i32) -> Self {
        let tempo = clamp_tempo(tempo);
        let base = ((sample_rate * 60.0) / (tempo * 8) as f64).floor() as i64;
        // Sub-kHz sample rates at high tempo would round the base to zero
        let base = base.max(1);

        let mut lengths = [0; 6];
        for subdivision in Subdivision::ALL {
            lengths[subdivision.index()] = base * subdivision.thirty_seconds();
        }
        Self { lengths }
    }

    /// Samples per subdivision.
    #[inline]
    pub fn sample_length(&self, subdivision: Subdivision) -> i64 {
        self.lengths[subdivision.index()]
    }

    /// Length of a thirty-second note, the unit every other length divides by.
    pub fn base_unit(&self) -> i64 {
        self.sample_length(Subdivision::ThirtySecond)
    }

    /// True when `sample_index` sits exactly on a `subdivision` boundary.
    #[inline]
    pub fn is_boundary(&self, sample_index: i64, subdivision: Subdivision) -> bool {
        sample_index % self.sample_length(subdivision) == 0
    }

    /// Emit every length at debug level. Control-thread only.
    pub fn log_lengths(&self, tempo: i32) {
        for subdivision in Subdivision::ALL {
            tracing::debug!(
                tempo,
                subdivision = subdivision.denominator(),
                samples = self.sample_length(subdivision),
                "timing updated"
            );
        }
    }

    /// 1-based position of `sample_index` within the next coarser grid.
    ///
    /// For `Whole` this is the bar number (1, 2, 3, ...). For the others it
    /// counts 1..=denominator within the bar: the 3rd quarter of a bar is
    /// `beat(.., Quarter) == 3`.
    pub fn beat(&self, sample_index: i64, subdivision: Subdivision) -> i64 {
        if sample_index == 0 {
            return 1;
        }
        let n = sample_index / self.sample_length(subdivision);
        match subdivision {
            Subdivision::Whole => 1 + n,
            _ => 1 + n % subdivision.denominator() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_lengths_at_120_bpm() {
        let table = TimingTable::new(44_100.0, 120);
        assert_eq!(table.base_unit(), 2756);
        assert_eq!(table.sample_length(Subdivision::Sixteenth), 5512);
        assert_eq!(table.sample_length(Subdivision::Quarter), 22_048);
        assert_eq!(table.sample_length(Subdivision::Whole), 88_192);
    }

    #[test]
    fn every_tempo_gives_nested_multiples() {
        for &sample_rate in &[44_100.0, 48_000.0, 96_000.0] {
            for tempo in MIN_TEMPO..=MAX_TEMPO {
                let table = TimingTable::new(sample_rate, tempo);
                let base = table.base_unit();
                assert!(base > 0);
                assert_eq!(table.sample_length(Subdivision::Whole), 32 * base);

                let mut previous = i64::MAX;
                for subdivision in Subdivision::ALL {
                    let length = table.sample_length(subdivision);
                    assert_eq!(length % base, 0, "{subdivision:?} at {tempo} BPM");
                    assert!(length < previous, "{subdivision:?} not finer at {tempo} BPM");
                    previous = length;
                }
            }
        }
    }

    #[test]
    fn tempo_is_clamped() {
        assert_eq!(TimingTable::new(44_100.0, 0), TimingTable::new(44_100.0, 1));
        assert_eq!(TimingTable::new(44_100.0, 900), TimingTable::new(44_100.0, 300));
        assert_eq!(clamp_tempo(-5), MIN_TEMPO);
        assert_eq!(clamp_tempo(301), MAX_TEMPO);
    }

    #[test]
    fn denominators_round_trip() {
        for subdivision in Subdivision::ALL {
            assert_eq!(
                Subdivision::from_denominator(subdivision.denominator()),
                Some(subdivision)
            );
        }
        assert_eq!(Subdivision::from_denominator(3), None);
    }

    #[test]
    fn beat_counts_within_bar() {
        let table = TimingTable::new(44_100.0, 120);
        let quarter = table.sample_length(Subdivision::Quarter);

        assert_eq!(table.beat(0, Subdivision::Quarter), 1);
        assert_eq!(table.beat(quarter - 1, Subdivision::Quarter), 1);
        assert_eq!(table.beat(2 * quarter, Subdivision::Quarter), 3);
        // Wraps back to 1 in the next bar
        assert_eq!(table.beat(4 * quarter, Subdivision::Quarter), 1);
        // Bars count up without wrapping
        assert_eq!(table.beat(4 * quarter, Subdivision::Whole), 2);
        assert_eq!(table.beat(9 * 4 * quarter, Subdivision::Whole), 10);
    }
}
