pub mod config; // Engine settings and validation
pub mod dsp;
pub mod graph; // Nodes, blocks and the serial chain
pub mod patch; // The fixed topologies
pub mod sequencing; // Sample-accurate step clock
pub mod synth; // Voices and the headroom mixer

pub use config::{ConfigError, EngineConfig};

pub const MAX_BLOCK_SIZE: usize = 2048;
