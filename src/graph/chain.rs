use crate::{
    graph::{
        buffer::AudioBuffer,
        node::{Node, NodeContext, NodeFormat},
    },
    MAX_BLOCK_SIZE,
};

/*
Serial Node Chain
=================

A Graph is an ordered list of nodes that all work on ONE shared block:

    [Source] ──→ [Effect] ──→ [Gain] ──→ host

Each pull:
1. Zero the block
2. Walk the nodes in order; each enabled node processes the block in place
3. Hand the block to the host

Because the block starts as silence, a disabled source contributes nothing
and a disabled effect is bypassed: the next node sees whatever came before.

Building
--------

    let graph = GraphBuilder::new()
        .then(clock)
        .then(GainNode::new())
        .build(44_100.0, NodeFormat::STEREO);

`build` initializes every node exactly once, so a node inside a Graph can
never be processed uninitialized. The list is fixed after that; nothing is
added, removed or reordered while audio runs.

Keep the control handles you need (switches, params, SequencerControl)
before moving nodes into the builder.
*/

#[derive(Default)]
pub struct GraphBuilder {
    nodes: Vec<Box<dyn Node>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node after the ones already added.
    pub fn then(mut self, node: impl Node + 'static) -> Self {
        self.nodes.push(Box::new(node));
        self
    }

    /// Initialize every node and freeze the order.
    pub fn build(mut self, sample_rate: f64, format: NodeFormat) -> Graph {
        let ctx = NodeContext::new(sample_rate, format);
        for node in &mut self.nodes {
            node.initialize(&ctx);
        }
        tracing::debug!(
            sample_rate,
            channels = format.channels,
            nodes = ?self.nodes.iter().map(|n| n.name()).collect::<Vec<_>>(),
            "graph built"
        );
        Graph {
            nodes: self.nodes,
            buffer: AudioBuffer::new(format.channels),
            ctx,
        }
    }
}

pub struct Graph {
    nodes: Vec<Box<dyn Node>>,
    buffer: AudioBuffer,
    ctx: NodeContext,
}

impl Graph {
    /// Render one block of up to `MAX_BLOCK_SIZE` frames.
    ///
    /// Larger requests are a caller bug: they panic in debug builds and are
    /// cut to `MAX_BLOCK_SIZE` in release. Use `bounce` or
    /// `render_interleaved` for longer runs.
    pub fn pull(&mut self, frames: usize) -> &AudioBuffer {
        debug_assert!(
            frames <= MAX_BLOCK_SIZE,
            "pull of {} frames exceeds MAX_BLOCK_SIZE ({})",
            frames,
            MAX_BLOCK_SIZE
        );
        self.buffer.set_frames(frames);
        self.buffer.clear();
        for node in &mut self.nodes {
            if node.is_enabled() {
                node.process(&mut self.buffer);
            }
        }
        &self.buffer
    }

    /// Fill an interleaved device buffer of any length.
    ///
    /// Splits into `MAX_BLOCK_SIZE` blocks; a trailing partial frame is left
    /// untouched.
    pub fn render_interleaved(&mut self, out: &mut [f32], out_channels: usize) {
        let out_channels = out_channels.max(1);
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE * out_channels) {
            let frames = chunk.len() / out_channels;
            self.pull(frames).write_interleaved(chunk, out_channels);
        }
    }

    /// Render `frames` frames offline into one Vec per channel.
    pub fn bounce(&mut self, frames: usize, block_size: usize) -> Vec<Vec<f32>> {
        let block_size = block_size.clamp(1, MAX_BLOCK_SIZE);
        let mut channels = vec![Vec::with_capacity(frames); self.channels()];
        let mut remaining = frames;
        while remaining > 0 {
            let block = self.pull(remaining.min(block_size));
            for (ch, samples) in channels.iter_mut().enumerate() {
                samples.extend_from_slice(block.channel(ch));
            }
            remaining -= block.frames();
        }
        channels
    }

    pub fn sample_rate(&self) -> f64 {
        self.ctx.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.ctx.format.channels
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node names in processing order.
    pub fn node_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.nodes.iter().map(|n| n.name())
    }
}
