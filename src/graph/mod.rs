//! Audio graph: planar blocks, the node trait, and the fixed node set.
//!
//! A graph is a serial chain of nodes processing one shared block in place.
//! Nodes expose lock-free handles (switches and params) that the control
//! thread keeps after the nodes themselves move to the audio thread.

/// Fixed-capacity planar sample blocks.
pub mod buffer;
/// Ordered node chain and its builder.
pub mod chain;
/// Generic pass-through gain stage.
pub mod gain;
/// LFO-driven stereo amplitude modulation (auto-pan / tremolo).
pub mod modulation;
/// Core traits shared by all graph nodes.
pub mod node;
/// Triangle test source.
pub mod oscillator;
/// Lock-free f64 parameters.
pub mod param;

pub use buffer::AudioBuffer;
pub use chain::{Graph, GraphBuilder};
pub use gain::GainNode;
pub use modulation::{ModulationEffect, ModulationKind};
pub use node::{Node, NodeContext, NodeFormat, NodeSwitch};
pub use oscillator::TriangleNode;
pub use param::Param;
