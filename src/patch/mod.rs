//! Ready-made topologies.
//!
//! The engine only ever runs three fixed chains:
//!
//! ```text
//! sequencer:  [SequencerClock] ──→ [Gain] ──→ host
//! autopan:    [Triangle 220 Hz] ──→ [AutoPan] ──→ [Gain] ──→ host
//! tremolo:    [Triangle 220 Hz] ──→ [Tremolo] ──→ [Gain] ──→ host
//! ```
//!
//! Each builder returns the finished `Graph` (hand it to the audio thread)
//! together with the control handles the host keeps.

use std::str::FromStr;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    config::{ConfigError, EngineConfig},
    graph::{
        modulation::ModulationKind, GainNode, Graph, GraphBuilder, ModulationEffect, Node,
        NodeSwitch, Param, TriangleNode,
    },
    sequencing::{SequencerClock, SequencerControl},
    synth::{NoteDuration, Voice},
};

/// Lowest voice pitch picked by `random_frequencies`.
pub const MIN_VOICE_FREQUENCY: u32 = 200;
/// Highest voice pitch picked by `random_frequencies`.
pub const MAX_VOICE_FREQUENCY: u32 = 1_000;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    StepSequencer,
    AutoPan,
    Tremolo,
}

impl FromStr for Topology {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequencer" | "step-sequencer" | "steps" => Ok(Topology::StepSequencer),
            "autopan" | "auto-pan" | "pan" => Ok(Topology::AutoPan),
            "tremolo" | "trem" => Ok(Topology::Tremolo),
            _ => Err(ConfigError::UnknownTopology(s.to_string())),
        }
    }
}

/// Whole-number pitches in `MIN_VOICE_FREQUENCY..=MAX_VOICE_FREQUENCY`, one per step.
pub fn random_frequencies<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<f64> {
    (0..count)
        .map(|_| rng.gen_range(MIN_VOICE_FREQUENCY..=MAX_VOICE_FREQUENCY) as f64)
        .collect()
}

/// A clock with one voice per step, `frequencies[i]` on step `i`.
///
/// Extra frequencies are ignored; steps without one stay empty. The clock is
/// returned before it joins a graph so a beat sink can still be attached.
pub fn sequencer_clock(
    config: &EngineConfig,
    frequencies: &[f64],
) -> Result<SequencerClock, ConfigError> {
    config.validate()?;

    let note_duration = NoteDuration::new(config.note_duration);
    let mut clock = SequencerClock::new(config.steps, note_duration.clone())
        .with_tempo(config.tempo)
        .with_trigger(config.trigger);

    for (step, &frequency) in frequencies.iter().take(config.steps as usize).enumerate() {
        let voice = Voice::shared(frequency, config.sample_rate, &note_duration);
        clock.add_voice_to_step(step as i32, voice);
    }
    Ok(clock)
}

pub struct StepSequencerPatch {
    pub graph: Graph,
    pub control: SequencerControl,
    pub gain: Param,
}

/// Wire `clock → gain`. The clock starts stopped; play it through `control`.
pub fn step_sequencer(config: &EngineConfig, clock: SequencerClock) -> StepSequencerPatch {
    let control = clock.control();
    let gain = GainNode::new();
    gain.switch().enable();
    let gain_param = gain.gain();

    let graph = GraphBuilder::new()
        .then(clock)
        .then(gain)
        .build(config.sample_rate, config.format());

    StepSequencerPatch {
        graph,
        control,
        gain: gain_param,
    }
}

pub struct ModulationPatch {
    pub graph: Graph,
    pub kind: ModulationKind,
    /// On/off for the triangle source.
    pub source: NodeSwitch,
    /// On/off for the effect; off is a bypass.
    pub effect: NodeSwitch,
    pub source_frequency: Param,
    pub rate: Param,
    pub mix: Param,
    pub gain: Param,
}

/// Wire `triangle → effect → gain`, everything enabled.
pub fn modulation(
    config: &EngineConfig,
    kind: ModulationKind,
) -> Result<ModulationPatch, ConfigError> {
    config.validate()?;
    if config.channels != 2 {
        tracing::warn!(
            channels = config.channels,
            "stereo modulation built for a non-stereo block"
        );
    }

    let source = TriangleNode::default();
    let effect = ModulationEffect::new(kind);
    let gain = GainNode::new();
    for switch in [source.switch(), effect.switch(), gain.switch()] {
        switch.enable();
    }

    let patch_source = source.switch().clone();
    let patch_effect = effect.switch().clone();
    let source_frequency = source.frequency();
    let rate = effect.rate();
    let mix = effect.mix();
    let gain_param = gain.gain();

    let graph = GraphBuilder::new()
        .then(source)
        .then(effect)
        .then(gain)
        .build(config.sample_rate, config.format());

    Ok(ModulationPatch {
        graph,
        kind,
        source: patch_source,
        effect: patch_effect,
        source_frequency,
        rate,
        mix,
        gain: gain_param,
    })
}
