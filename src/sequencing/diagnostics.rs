//! Beat-boundary events and the lock-free sink that carries them off the
//! audio thread.

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

use crate::sequencing::subdivision::Subdivision;

/// A subdivision boundary the clock crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeatEvent {
    pub subdivision: Subdivision,
    pub sample_index: i64,
    /// The step that fired, set only on the trigger subdivision.
    pub step: Option<i32>,
}

/// Where the clock reports beat events.
///
/// Called on the audio thread: implementations must not block or allocate.
pub trait BeatSink: Send {
    fn push(&mut self, event: BeatEvent);
}

#[cfg(feature = "rtrb")]
impl BeatSink for Producer<BeatEvent> {
    fn push(&mut self, event: BeatEvent) {
        // A full ring drops the event; diagnostics never stall audio
        let _ = Producer::push(self, event);
    }
}

/// Control-thread end of a beat channel.
#[cfg(feature = "rtrb")]
pub struct BeatMonitor {
    rx: Consumer<BeatEvent>,
}

#[cfg(feature = "rtrb")]
impl BeatMonitor {
    pub fn new(rx: Consumer<BeatEvent>) -> Self {
        Self { rx }
    }

    /// Hand every pending event to `f`, returning how many there were.
    pub fn drain_with(&mut self, mut f: impl FnMut(BeatEvent)) -> usize {
        let mut count = 0;
        while let Ok(event) = self.rx.pop() {
            f(event);
            count += 1;
        }
        count
    }

    /// Log every pending event at trace level.
    pub fn drain(&mut self) -> usize {
        self.drain_with(|event| match event.step {
            Some(step) => tracing::trace!(
                subdivision = event.subdivision.denominator(),
                sample_index = event.sample_index,
                step,
                "step"
            ),
            None => tracing::trace!(
                subdivision = event.subdivision.denominator(),
                sample_index = event.sample_index,
                "beat"
            ),
        })
    }
}

/// Create a beat channel holding up to `capacity` undrained events.
#[cfg(feature = "rtrb")]
pub fn beat_channel(capacity: usize) -> (Producer<BeatEvent>, BeatMonitor) {
    let (tx, rx) = RingBuffer::new(capacity);
    (tx, BeatMonitor::new(rx))
}
