//! SequencerClock - sample-accurate step sequencing
//!
//! The clock runs on the audio thread as a graph node. It counts samples,
//! fires voices on step boundaries and writes the mixed voices into the block.

use std::sync::{
    atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering},
    Arc,
};

use crate::{
    graph::{
        buffer::AudioBuffer,
        node::{Node, NodeContext, NodeSwitch},
    },
    sequencing::{
        control::SequencerControl,
        diagnostics::{BeatEvent, BeatSink},
        subdivision::{clamp_tempo, Subdivision, TimingTable, DEFAULT_TEMPO},
    },
    synth::{mixer, NoteDuration, VoiceRef},
};

/*
How the Clock Ticks
===================

Per output sample, while the node is enabled:

  1. Boundary check, coarsest to finest. For each subdivision where
     `sample_index % length == 0` a BeatEvent goes to the diagnostics sink.
     On the TRIGGER subdivision (16ths by default) the clock also:
       a. starts every voice mapped to `current_step`
       b. moves to the next step, wrapping at `steps`

  2. Every active voice advances one sample, muted or not, so a muted voice
     keeps its place in the envelope.

  3. The mixer sums active, unmuted voices at 1/4 headroom and the result is
     written to every channel of the frame.

  4. `sample_index += 1`

    sample_index:  0 ... 5512 ... 11024 ... 16536 ...      (120 BPM, 44.1 kHz)
    step fired:    0      1        2         3      ...    15, 0, 1, ...

Tempo Changes
-------------

A new tempo rebuilds the timing table but leaves `sample_index` and
`current_step` alone. The next boundary is found against the NEW grid from
the OLD position, so the first step after a change can come early or late.
This is accepted; resetting the position would be worse (a restart on every
tempo nudge).

Control From Other Threads
--------------------------

Tempo and reset requests arrive through atomics in `ClockShared` and are
picked up at the top of the next block. See `SequencerControl`.
*/

pub const DEFAULT_STEPS: i32 = 16;

/// State shared between the clock and its control handles.
#[derive(Debug)]
pub(crate) struct ClockShared {
    pub(crate) tempo: AtomicI32,
    pub(crate) reset_requested: AtomicBool,
    sample_rate_bits: AtomicU64,
}

impl ClockShared {
    fn new(tempo: i32) -> Self {
        Self {
            tempo: AtomicI32::new(clamp_tempo(tempo)),
            reset_requested: AtomicBool::new(false),
            sample_rate_bits: AtomicU64::new(0.0f64.to_bits()),
        }
    }

    /// Sample rate the clock was initialized with, 0.0 before that.
    pub(crate) fn sample_rate(&self) -> f64 {
        f64::from_bits(self.sample_rate_bits.load(Ordering::Relaxed))
    }
}

pub struct SequencerClock {
    switch: NodeSwitch,
    shared: Arc<ClockShared>,
    note_duration: NoteDuration,
    sample_rate: f64,
    timing: TimingTable,
    applied_tempo: i32,
    sample_index: i64,
    current_step: i32,
    steps: i32,
    trigger: Subdivision,
    step_voices: Vec<Vec<VoiceRef>>,
    beat_sink: Option<Box<dyn BeatSink>>,
    initialized: bool,
}

impl SequencerClock {
    /// A clock with `steps` steps (at least one) whose voices share `note_duration`.
    pub fn new(steps: i32, note_duration: NoteDuration) -> Self {
        let steps = steps.max(1);
        Self {
            switch: NodeSwitch::default(),
            shared: Arc::new(ClockShared::new(DEFAULT_TEMPO)),
            note_duration,
            sample_rate: 0.0,
            timing: TimingTable::new(0.0, DEFAULT_TEMPO),
            applied_tempo: DEFAULT_TEMPO,
            sample_index: 0,
            current_step: 0,
            steps,
            trigger: Subdivision::Sixteenth,
            step_voices: vec![Vec::new(); steps as usize],
            beat_sink: None,
            initialized: false,
        }
    }

    pub fn with_tempo(mut self, bpm: i32) -> Self {
        self.set_tempo(bpm);
        self
    }

    /// Choose which subdivision advances the steps (16ths by default).
    pub fn with_trigger(mut self, trigger: Subdivision) -> Self {
        self.trigger = trigger;
        self
    }

    /// Send beat events to `sink`.
    pub fn with_beat_sink(mut self, sink: impl BeatSink + 'static) -> Self {
        self.beat_sink = Some(Box::new(sink));
        self
    }

    /// Map `voice` to `step`. Steps outside `0..steps` are ignored.
    ///
    /// Setup-time only: call before the clock is moved into a graph.
    pub fn add_voice_to_step(&mut self, step: i32, voice: VoiceRef) {
        if !(0..self.steps).contains(&step) {
            tracing::warn!(step, steps = self.steps, "voice mapped to missing step, ignored");
            return;
        }
        self.step_voices[step as usize].push(voice);
    }

    /// Handle for the control thread.
    ///
    /// Snapshots the current voice mapping, so take it after the last
    /// `add_voice_to_step`.
    pub fn control(&self) -> SequencerControl {
        let voices = self.step_voices.iter().flatten().cloned().collect();
        SequencerControl::new(
            Arc::clone(&self.shared),
            self.switch.clone(),
            self.note_duration.clone(),
            voices,
        )
    }

    /// Set the tempo in BPM, clamped to 1..=300.
    ///
    /// Takes effect immediately once initialized; position is kept.
    pub fn set_tempo(&mut self, bpm: i32) {
        let tempo = clamp_tempo(bpm);
        let previous = self.shared.tempo.swap(tempo, Ordering::Relaxed);
        if !self.initialized {
            return;
        }
        self.apply_tempo();
        if previous != tempo {
            self.timing.log_lengths(tempo);
        }
    }

    pub fn tempo(&self) -> i32 {
        self.shared.tempo.load(Ordering::Relaxed)
    }

    /// Rewind to sample 0, step 0. Voices are left as they are.
    pub fn reset(&mut self) {
        self.sample_index = 0;
        self.current_step = 0;
    }

    pub fn sample_index(&self) -> i64 {
        self.sample_index
    }

    pub fn current_step(&self) -> i32 {
        self.current_step
    }

    pub fn steps(&self) -> i32 {
        self.steps
    }

    pub fn trigger(&self) -> Subdivision {
        self.trigger
    }

    pub fn note_duration(&self) -> &NoteDuration {
        &self.note_duration
    }

    /// Voices mapped to `step`; empty for unmapped or missing steps.
    pub fn voices_at(&self, step: i32) -> &[VoiceRef] {
        usize::try_from(step)
            .ok()
            .and_then(|s| self.step_voices.get(s))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Samples per `subdivision` at the current tempo, 0 before initialize.
    pub fn sample_length(&self, subdivision: Subdivision) -> i64 {
        if !self.initialized {
            return 0;
        }
        self.timing.sample_length(subdivision)
    }

    /// 1-based position within the bar for `subdivision` (bar number for `Whole`).
    pub fn beat(&self, subdivision: Subdivision) -> i64 {
        self.timing.beat(self.sample_index, subdivision)
    }

    fn apply_tempo(&mut self) {
        let tempo = self.tempo();
        if tempo != self.applied_tempo {
            self.timing = TimingTable::new(self.sample_rate, tempo);
            self.applied_tempo = tempo;
        }
    }

    fn apply_control(&mut self) {
        if self.shared.reset_requested.swap(false, Ordering::AcqRel) {
            self.reset();
        }
        self.apply_tempo();
    }

    /// Boundary checks for one sample; fires voices on the trigger grid.
    fn tick(&mut self) {
        for subdivision in Subdivision::ALL {
            if !self.timing.is_boundary(self.sample_index, subdivision) {
                continue;
            }

            let step = if subdivision == self.trigger {
                Some(self.advance_step())
            } else {
                None
            };

            if let Some(sink) = self.beat_sink.as_mut() {
                sink.push(BeatEvent {
                    subdivision,
                    sample_index: self.sample_index,
                    step,
                });
            }
        }
    }

    fn advance_step(&mut self) -> i32 {
        let step = self.current_step;
        for voice in &self.step_voices[step as usize] {
            voice.start();
        }
        self.current_step = (step + 1) % self.steps;
        step
    }
}

impl Node for SequencerClock {
    fn initialize(&mut self, ctx: &NodeContext) {
        self.sample_rate = ctx.sample_rate;
        self.shared
            .sample_rate_bits
            .store(ctx.sample_rate.to_bits(), Ordering::Relaxed);
        self.sample_index = 0;
        self.applied_tempo = self.tempo();
        self.timing = TimingTable::new(self.sample_rate, self.applied_tempo);
        self.initialized = true;
    }

    fn process(&mut self, buffer: &mut AudioBuffer) {
        debug_assert!(self.initialized, "SequencerClock processed before initialize");
        if !self.is_enabled() {
            return;
        }

        self.apply_control();

        for frame in 0..buffer.frames() {
            self.tick();

            for voice in self.step_voices.iter().flatten() {
                if voice.has_data() {
                    voice.process();
                }
            }

            buffer.set_frame(frame, mixer::mix(self.step_voices.iter().flatten()));
            self.sample_index += 1;
        }
    }

    fn switch(&self) -> &NodeSwitch {
        &self.switch
    }

    fn name(&self) -> &'static str {
        "sequencer"
    }
}
