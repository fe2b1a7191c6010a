//! stepseq - play one of the engine's topologies on the default output device
//!
//! Run with: cargo run -- [sequencer|autopan|tremolo]
//!
//! Beat diagnostics: RUST_LOG=stepseq_dsp=trace cargo run

mod app;
mod controls;

use app::Stepseq;
use stepseq_dsp::patch::Topology;
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Logs go to stderr so they don't fight the status line on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let topology = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<Topology>())
        .transpose()?
        .unwrap_or(Topology::StepSequencer);

    Stepseq::new(topology).run()
}
