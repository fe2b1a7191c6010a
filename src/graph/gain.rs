use crate::graph::{
    buffer::AudioBuffer,
    node::{Node, NodeContext, NodeSwitch},
    param::Param,
};

/*
Gain Stage
==========

The generic pass-through node: multiplies every sample of the block by one
shared gain value. At the default gain of 1.0 it leaves the block untouched,
which makes it the neutral tail of every topology:

    [SequencerClock] ──→ [Gain] ──→ output
    [Triangle] ──→ [AutoPan] ──→ [Gain] ──→ output

Gain is linear (not dB) and clamped to [0, 2].
*/

pub const DEFAULT_GAIN: f64 = 1.0;
pub const MAX_GAIN: f64 = 2.0;

pub struct GainNode {
    switch: NodeSwitch,
    gain: Param,
    initialized: bool,
}

impl GainNode {
    pub fn new() -> Self {
        Self::with_gain(DEFAULT_GAIN)
    }

    pub fn with_gain(gain: f64) -> Self {
        Self {
            switch: NodeSwitch::default(),
            gain: Param::new(gain, 0.0, MAX_GAIN),
            initialized: false,
        }
    }

    /// Shared handle to the gain parameter.
    pub fn gain(&self) -> Param {
        self.gain.clone()
    }
}

impl Default for GainNode {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for GainNode {
    fn initialize(&mut self, _ctx: &NodeContext) {
        self.initialized = true;
    }

    fn process(&mut self, buffer: &mut AudioBuffer) {
        debug_assert!(self.initialized, "GainNode processed before initialize");

        let gain = self.gain.get() as f32;
        if gain == 1.0 {
            return;
        }
        for sample in buffer.data_mut() {
            *sample *= gain;
        }
    }

    fn switch(&self) -> &NodeSwitch {
        &self.switch
    }

    fn name(&self) -> &'static str {
        "gain"
    }
}
