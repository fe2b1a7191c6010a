//! Complete-chain benchmarks.
//!
//! These pull the same graphs the `stepseq` binary plays, block by block.

mod patches;

pub use patches::bench_patches;
