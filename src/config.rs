//! Engine configuration and its validation errors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    graph::node::NodeFormat,
    sequencing::{subdivision::DEFAULT_TEMPO, Subdivision, DEFAULT_STEPS},
    synth::voice::DEFAULT_NOTE_DURATION,
    MAX_BLOCK_SIZE,
};

/// Fixed settings for one engine run.
///
/// Tempo outside 1..=300 is clamped when applied, not rejected. Everything
/// else is checked by `validate`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f64,
    pub channels: usize,
    /// Frames per block the host is expected to pull.
    pub block_size: usize,
    pub steps: i32,
    pub tempo: i32,
    /// Shared note length in samples.
    pub note_duration: i64,
    /// Subdivision that advances the steps.
    pub trigger: Subdivision,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100.0,
            channels: 2,
            block_size: 512,
            steps: DEFAULT_STEPS,
            tempo: DEFAULT_TEMPO,
            note_duration: DEFAULT_NOTE_DURATION,
            trigger: Subdivision::Sixteenth,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_tempo(mut self, tempo: i32) -> Self {
        self.tempo = tempo;
        self
    }

    pub fn format(&self) -> NodeFormat {
        NodeFormat {
            channels: self.channels,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.channels == 0 {
            return Err(ConfigError::NoChannels);
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(ConfigError::BlockSizeOutOfRange {
                block_size: self.block_size,
                max: MAX_BLOCK_SIZE,
            });
        }
        if self.steps < 1 {
            return Err(ConfigError::NoSteps(self.steps));
        }
        if self.note_duration < 1 {
            return Err(ConfigError::InvalidNoteDuration(self.note_duration));
        }
        Ok(())
    }
}

/// Errors that can occur when validating a configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Sample rate is zero, negative or not finite
    InvalidSampleRate(f64),
    /// Zero channels requested
    NoChannels,
    /// Block size is zero or above `MAX_BLOCK_SIZE`
    BlockSizeOutOfRange { block_size: usize, max: usize },
    /// Sequencer needs at least one step
    NoSteps(i32),
    /// Note duration must be at least one sample
    InvalidNoteDuration(i64),
    /// Topology name not recognised
    UnknownTopology(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidSampleRate(rate) => {
                write!(f, "Invalid sample rate: {} Hz", rate)
            }
            ConfigError::NoChannels => write!(f, "At least one channel is required"),
            ConfigError::BlockSizeOutOfRange { block_size, max } => {
                write!(
                    f,
                    "Block size {} out of range: expected 1..={} frames",
                    block_size, max
                )
            }
            ConfigError::NoSteps(steps) => {
                write!(f, "Sequencer needs at least one step, got {}", steps)
            }
            ConfigError::InvalidNoteDuration(samples) => {
                write!(f, "Note duration must be at least 1 sample, got {}", samples)
            }
            ConfigError::UnknownTopology(name) => {
                write!(
                    f,
                    "Unknown topology '{}' (expected sequencer, autopan or tremolo)",
                    name
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
