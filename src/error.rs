//! Error types for the synth engine.
//!
//! The DSP core is total -- every sample path always produces a value (see
//! the crate-level docs). The only reportable failure is allocation failure
//! for the delay bus's backing ring at construction time.

use std::fmt;

/// Errors that can occur while constructing a [`crate::synth::Synth`].
#[derive(Debug)]
pub enum SynthError {
    /// The delay bus ring buffer could not be allocated.
    InitializationFailed(String),
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitializationFailed(msg) => write!(f, "synth initialization failed: {msg}"),
        }
    }
}

impl std::error::Error for SynthError {}

/// Result type for synth construction.
pub type SynthResult<T> = Result<T, SynthError>;
