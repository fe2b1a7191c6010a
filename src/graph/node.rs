use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::graph::buffer::AudioBuffer;

/// Channel layout a node is initialized for.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeFormat {
    pub channels: usize,
}

impl NodeFormat {
    pub const MONO: NodeFormat = NodeFormat { channels: 1 };
    pub const STEREO: NodeFormat = NodeFormat { channels: 2 };
}

impl Default for NodeFormat {
    fn default() -> Self {
        Self::STEREO
    }
}

/// Context passed to nodes when the graph initializes them
///
/// Fixed for the lifetime of the graph:
/// - sample_rate: Audio sample rate (e.g., 44100.0)
/// - format: Channel count of every block the node will see
#[derive(Debug, Clone, Copy)]
pub struct NodeContext {
    pub sample_rate: f64,
    pub format: NodeFormat,
}

impl NodeContext {
    pub fn new(sample_rate: f64, format: NodeFormat) -> Self {
        Self {
            sample_rate,
            format,
        }
    }
}

/// Shared on/off flag for a node.
///
/// The audio thread reads it at the top of every block; any thread may flip
/// it. Cloning gives another handle to the same flag.
#[derive(Debug, Clone)]
pub struct NodeSwitch(Arc<AtomicBool>);

impl NodeSwitch {
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    pub fn enable(&self) {
        self.set_enabled(true);
    }

    pub fn disable(&self) {
        self.set_enabled(false);
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Release);
    }

    /// Flip the flag and return the new state.
    pub fn toggle(&self) -> bool {
        !self.0.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for NodeSwitch {
    /// Nodes start disabled until the host enables them.
    fn default() -> Self {
        Self::new(false)
    }
}

/// Core trait for audio graph nodes
///
/// Every node processes the graph's block in place. The graph calls
/// `initialize` exactly once before the first `process`, and only calls
/// `process` while the node's switch is on.
pub trait Node: Send {
    /// Set up per-instance state (sample rate, oscillator phase).
    fn initialize(&mut self, ctx: &NodeContext);

    /// Render into or transform `buffer` for the current block.
    fn process(&mut self, buffer: &mut AudioBuffer);

    fn switch(&self) -> &NodeSwitch;

    fn is_enabled(&self) -> bool {
        self.switch().is_enabled()
    }

    /// Short name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Allow boxed nodes to be used as nodes (for dynamic dispatch)
impl Node for Box<dyn Node> {
    fn initialize(&mut self, ctx: &NodeContext) {
        (**self).initialize(ctx)
    }

    fn process(&mut self, buffer: &mut AudioBuffer) {
        (**self).process(buffer)
    }

    fn switch(&self) -> &NodeSwitch {
        (**self).switch()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_clones_share_state() {
        let a = NodeSwitch::default();
        let b = a.clone();
        assert!(!b.is_enabled());

        a.enable();
        assert!(b.is_enabled());

        assert!(!b.toggle());
        assert!(!a.is_enabled());
        assert!(a.toggle());
        assert!(b.is_enabled());
    }
}
