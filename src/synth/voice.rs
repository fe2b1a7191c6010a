use std::sync::{
    atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering},
    Arc,
};

use crate::dsp::{envelope::linear_decay, oscillator};

/*
Sequencer Voices
================

A Voice is one sine oscillator with a one-shot linear decay. The sequencer
owns one (or more) per step and re-triggers the same instance every time the
step comes around; voices are created at setup and never freed during a run.

Lifecycle
---------

    new ──→ inactive ──start()──→ active ──elapsed reaches duration──→ inactive
                ↑                   │
                └──────reset()──────┘

    active  ⇔  elapsed < note_duration

A new voice starts inactive (elapsed = note_duration).


Shared Note Duration
--------------------

Every voice in an engine holds a handle to the SAME `NoteDuration`. The
envelope is recomputed from it on every sample:

    envelope = 1 - elapsed / note_duration

so moving the duration control reshapes notes that are already sounding,
not just the next ones. Shortening can push the envelope below zero and cut
the note on the next sample; lengthening can raise the level of a fading
note, or wake a voice that had already finished.


Threading
---------

Voices are shared between the sequencer (audio thread) and the host's
control handle. All state is atomic so the host can `reset`, `start` or mute
a voice without a lock. The audio thread is the only one that advances a
voice; a control-thread `start`/`reset` racing with `process` may lose one
sample of progress.
*/

pub const DEFAULT_NOTE_DURATION: i64 = 22_050;

/// Note length in samples, shared by every voice of an engine.
#[derive(Debug, Clone)]
pub struct NoteDuration(Arc<AtomicI64>);

impl NoteDuration {
    pub fn new(samples: i64) -> Self {
        Self(Arc::new(AtomicI64::new(samples.max(1))))
    }

    #[inline]
    pub fn get(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }

    /// Set the duration, clamped to at least one sample.
    pub fn set(&self, samples: i64) {
        self.0.store(samples.max(1), Ordering::Relaxed);
    }
}

impl Default for NoteDuration {
    fn default() -> Self {
        Self::new(DEFAULT_NOTE_DURATION)
    }
}

pub type VoiceRef = Arc<Voice>;

#[derive(Debug)]
pub struct Voice {
    frequency: f64,
    phase_increment: f64,
    phase: AtomicU64,
    elapsed: AtomicI64,
    enabled: AtomicBool,
    note_duration: NoteDuration,
}

impl Voice {
    pub fn new(frequency: f64, sample_rate: f64, note_duration: &NoteDuration) -> Self {
        Self {
            frequency,
            phase_increment: oscillator::phase_increment(frequency, sample_rate),
            phase: AtomicU64::new(0.0f64.to_bits()),
            elapsed: AtomicI64::new(note_duration.get()),
            enabled: AtomicBool::new(true),
            note_duration: note_duration.clone(),
        }
    }

    /// Build a voice already wrapped for sharing.
    pub fn shared(frequency: f64, sample_rate: f64, note_duration: &NoteDuration) -> VoiceRef {
        Arc::new(Self::new(frequency, sample_rate, note_duration))
    }

    /// Begin a note from the top of the envelope.
    pub fn start(&self) {
        self.elapsed.store(0, Ordering::Relaxed);
        self.set_phase(0.0);
    }

    /// Force the voice silent.
    pub fn reset(&self) {
        self.set_phase(0.0);
        self.elapsed.store(self.note_duration.get(), Ordering::Relaxed);
    }

    /// Advance one sample.
    #[inline]
    pub fn process(&self) {
        self.elapsed.fetch_add(1, Ordering::Relaxed);
        let next = oscillator::wrap_unit(self.phase() + self.phase_increment);
        self.set_phase(next);
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.elapsed() < self.note_duration.get()
    }

    /// Current envelope level; 1.0 right after `start`.
    #[inline]
    pub fn envelope(&self) -> f64 {
        linear_decay(self.elapsed(), self.note_duration.get())
    }

    #[inline]
    pub fn output(&self) -> f64 {
        oscillator::sine(self.phase()) * self.envelope()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Mute or unmute. A muted voice keeps running its envelope.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Oscillator phase in cycles, `[0, 1)`.
    pub fn phase(&self) -> f64 {
        f64::from_bits(self.phase.load(Ordering::Relaxed))
    }

    pub fn elapsed(&self) -> i64 {
        self.elapsed.load(Ordering::Relaxed)
    }

    pub fn note_duration(&self) -> &NoteDuration {
        &self.note_duration
    }

    fn set_phase(&self, phase: f64) {
        self.phase.store(phase.to_bits(), Ordering::Relaxed);
    }
}
