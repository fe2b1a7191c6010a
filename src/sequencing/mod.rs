pub mod clock;
pub mod control;
pub mod diagnostics;
pub mod subdivision;

pub use clock::{SequencerClock, DEFAULT_STEPS};
pub use control::SequencerControl;
#[cfg(feature = "rtrb")]
pub use diagnostics::{beat_channel, BeatMonitor};
pub use diagnostics::{BeatEvent, BeatSink};
pub use subdivision::{Subdivision, TimingTable, DEFAULT_TEMPO, MAX_TEMPO, MIN_TEMPO};
