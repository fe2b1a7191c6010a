//! Stepseq - device setup and patch selection

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use stepseq_dsp::{
    graph::{Graph, ModulationKind},
    patch::{self, ModulationPatch, StepSequencerPatch, Topology},
    sequencing::beat_channel,
    EngineConfig,
};

use super::controls::{self, Surface};

/// Room for roughly a second of sixteenth-note events at 300 BPM.
const BEAT_QUEUE_CAPACITY: usize = 1_024;

pub struct Stepseq {
    topology: Topology,
}

impl Stepseq {
    pub fn new(topology: Topology) -> Self {
        Self { topology }
    }

    /// Open the default device, start the stream and hand the terminal to the controls.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let stream_config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = stream_config.sample_rate().0 as f64;
        let channels = stream_config.channels() as usize;
        let config = EngineConfig::default().with_sample_rate(sample_rate);
        config.validate()?;

        println!("=== stepseq ===");
        println!("Topology: {:?}", self.topology);
        println!("Sample rate: {} Hz", sample_rate);
        println!("Device channels: {}", channels);
        println!();

        let (mut graph, surface) = self.build(&config)?;
        tracing::info!(
            nodes = ?graph.node_names().collect::<Vec<_>>(),
            "starting output stream"
        );

        let stream = device.build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _| graph.render_interleaved(data, channels),
            |err| tracing::error!(%err, "audio stream error"),
            None,
        )?;
        stream.play()?;

        controls::run(surface)
    }

    fn build(&self, config: &EngineConfig) -> EyreResult<(Graph, Surface)> {
        match self.topology {
            Topology::StepSequencer => {
                let frequencies = patch::random_frequencies(&mut rand::thread_rng(), config.steps as usize);
                tracing::info!(?frequencies, "voice pitches");

                let (beat_tx, beats) = beat_channel(BEAT_QUEUE_CAPACITY);
                let clock = patch::sequencer_clock(config, &frequencies)?.with_beat_sink(beat_tx);
                let StepSequencerPatch {
                    graph,
                    control,
                    gain,
                } = patch::step_sequencer(config, clock);

                control.restart();
                Ok((
                    graph,
                    Surface::Sequencer {
                        control,
                        gain,
                        beats,
                    },
                ))
            }
            Topology::AutoPan | Topology::Tremolo => {
                let kind = if self.topology == Topology::AutoPan {
                    ModulationKind::AutoPan
                } else {
                    ModulationKind::Tremolo
                };
                let ModulationPatch {
                    graph,
                    kind,
                    effect,
                    rate,
                    mix,
                    gain,
                    ..
                } = patch::modulation(config, kind)?;

                Ok((
                    graph,
                    Surface::Modulation {
                        kind,
                        effect,
                        rate,
                        mix,
                        gain,
                    },
                ))
            }
        }
    }
}
