// Purpose: the sequencer's voices and the headroom mixer that sums them

pub mod mixer;
pub mod voice;

pub use voice::{NoteDuration, Voice, VoiceRef};
