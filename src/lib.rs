//! Real-time polyphonic wavetable synthesis engine.
//!
//! Turns note-on/note-off events and continuous control parameters into a
//! stream of 16-bit PCM samples at a fixed sample rate, one sample at a
//! time, with bounded per-sample cost and zero dynamic allocation inside
//! [`synth::Synth::render_slice`]. The MIDI transport, USB host stack, audio
//! output driver, and sequencer are all out of scope: this crate exposes a
//! narrow API ([`synth::Synth`]) for those collaborators to call.
//!
//! Module map, leaf first: [`wavetable`] -> [`oscillator`] -> [`envelope`]
//! and [`filter`] -> [`delay`] (feature-gated) -> [`voice`] -> [`synth`].
//! [`config`] and [`error`] are used throughout; [`driver`] is the one
//! piece of shared state crossing the interrupt/control boundary.

pub mod config;
#[cfg(feature = "delay-bus")]
pub mod delay;
pub mod driver;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod oscillator;
pub mod synth;
pub mod voice;
pub mod wavetable;

pub use error::{SynthError, SynthResult};
pub use synth::Synth;
pub use voice::Voice;
