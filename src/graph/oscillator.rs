use crate::{
    dsp::oscillator::{phase_increment, triangle, wrap_unit},
    graph::{
        buffer::AudioBuffer,
        node::{Node, NodeContext, NodeSwitch},
        param::Param,
    },
};

/*
Triangle Source
===============

A free-running triangle oscillator at a fixed (but live-adjustable)
frequency. It overwrites every channel of the block with the same signal, so
a stereo effect downstream starts from identical left and right channels and
any difference you hear is the effect's doing.

    [TriangleNode 220 Hz] ──→ [AutoPan] ──→ [Gain] ──→ output

Not band-limited. The waveform starts at -1 (phase 0) and peaks at +1 half a
cycle later.
*/

pub const DEFAULT_FREQUENCY: f64 = 220.0;

pub struct TriangleNode {
    switch: NodeSwitch,
    frequency: Param,
    phase: f64,
    sample_rate: f64,
    initialized: bool,
}

impl TriangleNode {
    pub fn new(frequency: f64) -> Self {
        Self {
            switch: NodeSwitch::default(),
            frequency: Param::new(frequency, 0.0, 20_000.0),
            phase: 0.0,
            sample_rate: 0.0,
            initialized: false,
        }
    }

    /// Shared handle to the oscillator frequency in Hz.
    pub fn frequency(&self) -> Param {
        self.frequency.clone()
    }
}

impl Default for TriangleNode {
    fn default() -> Self {
        Self::new(DEFAULT_FREQUENCY)
    }
}

impl Node for TriangleNode {
    fn initialize(&mut self, ctx: &NodeContext) {
        self.sample_rate = ctx.sample_rate;
        self.phase = 0.0;
        self.initialized = true;
    }

    fn process(&mut self, buffer: &mut AudioBuffer) {
        debug_assert!(self.initialized, "TriangleNode processed before initialize");

        let inc = phase_increment(self.frequency.get(), self.sample_rate);
        for frame in 0..buffer.frames() {
            buffer.set_frame(frame, triangle(self.phase) as f32);
            self.phase = wrap_unit(self.phase + inc);
        }
    }

    fn switch(&self) -> &NodeSwitch {
        &self.switch
    }

    fn name(&self) -> &'static str {
        "triangle"
    }
}
