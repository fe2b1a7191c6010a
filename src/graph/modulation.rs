use crate::{
    dsp::lfo,
    graph::{
        buffer::AudioBuffer,
        node::{Node, NodeContext, NodeSwitch},
        param::Param,
    },
};

/*
Stereo Amplitude Modulation (Auto-Pan / Tremolo)
================================================

One LFO, two complementary gain curves. The node reads a block that an
upstream source already filled and rescales it in place.

The Math
--------

Per frame, the LFO phase (radians) advances and wraps:

    phase = (phase + 2π · rate / sample_rate) mod 2π

The rectified sine gives the wet gain for the left channel. The right
channel gets the opposite curve, so when one side is loud the other is quiet:

    wet_L = |sin(phase)| · mix
    wet_R = mix - wet_L                   = (1 - |sin(phase)|) · mix

Each channel keeps a dry share of (1 - mix):

    out = in · wet + in · (1 - mix)

    mix = 1.0   full depth, the two channels trade places
    mix = 0.5   half depth, gains swing between 0.5 and 1.0
    mix = 0.0   dry pass-through on both channels

      gain
       1 ┤ L╱╲   ╱╲      R╲  ╱╲  ╱
         │ ╱  ╲ ╱  ╲       ╲╱  ╲╱
       0 ┼─────────→  vs   ────────→
         0   π   2π        0   π   2π

At full depth this is exactly the ping-pong "1 - pan" flip. Below full depth
the right channel deliberately departs from a literal `1 - pan`: that form
would leave the right wet gain at 1 while the dry share is added on top
(doubling the input at mix = 0). Flipping against `mix` keeps both channels
inside [1 - mix, 1] and makes mix = 0 a true pass-through.

Auto-Pan vs Tremolo
-------------------

The two effects run the same algorithm. The names describe how it is heard:
with a stereo source the energy swings left/right (auto-pan); summed to mono
or heard on one side only, the level pulses (tremolo). `ModulationKind` only
labels the node.

Channel Layout
--------------

The flip happens when the inner loop reaches channel 1. Channels 2 and up
are not re-derived: they reuse channel 1's flipped gain. The effect is only
ever built for stereo blocks, where this does not arise.

Parameters
----------

  rate    LFO frequency in Hz, default 2.1 (the rectified curve pulses at
          twice this rate). Accepted up to 20 kHz, so audio-rate AM is
          reachable; anything above Nyquist aliases.
  mix     modulation depth, 0..1, default 1.0

Both are read once per block; changes land on the next block boundary.
*/

pub const DEFAULT_RATE_HZ: f64 = 2.1;
pub const DEFAULT_MIX: f64 = 1.0;
pub const MAX_RATE_HZ: f64 = 20_000.0;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModulationKind {
    AutoPan,
    Tremolo,
}

pub struct ModulationEffect {
    kind: ModulationKind,
    switch: NodeSwitch,
    rate: Param,
    mix: Param,
    phase: f64,
    sample_rate: f64,
    initialized: bool,
}

impl ModulationEffect {
    pub fn new(kind: ModulationKind) -> Self {
        Self {
            kind,
            switch: NodeSwitch::default(),
            rate: Param::new(DEFAULT_RATE_HZ, 0.0, MAX_RATE_HZ),
            mix: Param::new(DEFAULT_MIX, 0.0, 1.0),
            phase: 0.0,
            sample_rate: 0.0,
            initialized: false,
        }
    }

    pub fn auto_pan() -> Self {
        Self::new(ModulationKind::AutoPan)
    }

    pub fn tremolo() -> Self {
        Self::new(ModulationKind::Tremolo)
    }

    pub fn kind(&self) -> ModulationKind {
        self.kind
    }

    /// Shared handle to the LFO rate in Hz.
    pub fn rate(&self) -> Param {
        self.rate.clone()
    }

    /// Shared handle to the modulation depth (0..1).
    pub fn mix(&self) -> Param {
        self.mix.clone()
    }

    /// Current LFO phase in radians, `[0, 2π)`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Jump the LFO to `phase` radians (wrapped).
    pub fn set_phase(&mut self, phase: f64) {
        self.phase = lfo::advance(phase, 0.0);
    }
}

impl Node for ModulationEffect {
    fn initialize(&mut self, ctx: &NodeContext) {
        self.sample_rate = ctx.sample_rate;
        self.phase = 0.0;
        self.initialized = true;
    }

    fn process(&mut self, buffer: &mut AudioBuffer) {
        debug_assert!(self.initialized, "ModulationEffect processed before initialize");

        let frames = buffer.frames();
        let channels = buffer.channels();
        let inc = lfo::phase_increment(self.rate.get(), self.sample_rate);
        let mix = self.mix.get();
        let dry = 1.0 - mix;
        let data = buffer.data_mut();

        for frame in 0..frames {
            self.phase = lfo::advance(self.phase, inc);
            let mut pan = lfo::rectified_sine(self.phase) * mix;

            for channel in 0..channels {
                if channel == 1 {
                    pan = mix - pan;
                }
                let index = channel * frames + frame;
                let input = data[index] as f64;
                data[index] = (input * pan + input * dry) as f32;
            }
        }
    }

    fn switch(&self) -> &NodeSwitch {
        &self.switch
    }

    fn name(&self) -> &'static str {
        match self.kind {
            ModulationKind::AutoPan => "auto-pan",
            ModulationKind::Tremolo => "tremolo",
        }
    }
}
