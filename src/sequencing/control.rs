//! Control-thread handle for a running SequencerClock.

use std::sync::{atomic::Ordering, Arc};

use crate::{
    graph::node::NodeSwitch,
    sequencing::{
        clock::ClockShared,
        subdivision::{clamp_tempo, TimingTable},
    },
    synth::{NoteDuration, VoiceRef},
};

/// Everything the host may change while the clock runs on the audio thread.
///
/// Cheap to clone. Every method is a handful of atomic loads and stores, so
/// it is fine to call from a UI callback or key handler.
#[derive(Clone)]
pub struct SequencerControl {
    shared: Arc<ClockShared>,
    switch: NodeSwitch,
    note_duration: NoteDuration,
    voices: Arc<[VoiceRef]>,
}

impl SequencerControl {
    pub(crate) fn new(
        shared: Arc<ClockShared>,
        switch: NodeSwitch,
        note_duration: NoteDuration,
        voices: Vec<VoiceRef>,
    ) -> Self {
        Self {
            shared,
            switch,
            note_duration,
            voices: voices.into(),
        }
    }

    /// Request a new tempo, clamped to 1..=300. Returns the tempo stored.
    ///
    /// The clock picks it up at the start of its next block.
    pub fn set_tempo(&self, bpm: i32) -> i32 {
        let tempo = clamp_tempo(bpm);
        let previous = self.shared.tempo.swap(tempo, Ordering::Relaxed);
        if previous != tempo {
            self.log_timing(tempo);
        }
        tempo
    }

    pub fn tempo(&self) -> i32 {
        self.shared.tempo.load(Ordering::Relaxed)
    }

    /// Set the shared note length in samples (at least 1).
    ///
    /// Applies to every voice on its next sample, including notes already
    /// sounding.
    pub fn set_note_duration(&self, samples: i64) {
        self.note_duration.set(samples);
    }

    pub fn note_duration(&self) -> i64 {
        self.note_duration.get()
    }

    pub fn enable(&self) {
        self.switch.enable();
    }

    pub fn disable(&self) {
        self.switch.disable();
    }

    pub fn is_playing(&self) -> bool {
        self.switch.is_enabled()
    }

    pub fn switch(&self) -> &NodeSwitch {
        &self.switch
    }

    /// Silence every voice.
    pub fn reset_voices(&self) {
        for voice in self.voices.iter() {
            voice.reset();
        }
    }

    /// Ask the clock to rewind to sample 0, step 0 on its next block.
    pub fn request_reset(&self) {
        self.shared.reset_requested.store(true, Ordering::Release);
    }

    /// Start from the top with every voice silenced.
    pub fn restart(&self) {
        self.reset_voices();
        self.request_reset();
        self.switch.enable();
        tracing::info!(tempo = self.tempo(), "sequencer started");
    }

    pub fn stop(&self) {
        self.switch.disable();
        tracing::info!("sequencer stopped");
    }

    /// Play/stop button: stops if playing, otherwise restarts. Returns the new state.
    pub fn toggle_playback(&self) -> bool {
        if self.is_playing() {
            self.stop();
            false
        } else {
            self.restart();
            true
        }
    }

    /// Every voice mapped to the clock when this handle was taken.
    pub fn voices(&self) -> &[VoiceRef] {
        &self.voices
    }

    fn log_timing(&self, tempo: i32) {
        let sample_rate = self.shared.sample_rate();
        if sample_rate <= 0.0 {
            tracing::debug!(tempo, "tempo set before initialize");
            return;
        }
        TimingTable::new(sample_rate, tempo).log_lengths(tempo);
    }
}
