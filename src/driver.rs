//! The single piece of shared mutable state crossing the interrupt/driver
//! boundary described in §5: which half of the double PCM buffer the driver
//! has finished transmitting.
//!
//! A single `AtomicU8` with `Relaxed` ordering on both sides is sufficient
//! because nothing else is shared across this boundary -- there is no data
//! this flag protects beyond "which half is free to render into now", so a
//! stronger ordering buys nothing.

use std::sync::atomic::{AtomicU8, Ordering};

/// Which half of the double buffer the driver has just finished
/// transmitting (or neither, at startup).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    None,
    Half,
    Full,
}

impl BufferState {
    fn from_tag(tag: u8) -> Self {
        match tag {
            1 => BufferState::Half,
            2 => BufferState::Full,
            _ => BufferState::None,
        }
    }

    fn to_tag(self) -> u8 {
        match self {
            BufferState::None => 0,
            BufferState::Half => 1,
            BufferState::Full => 2,
        }
    }
}

/// Shared flag the driver writes from interrupt/callback context and the
/// control context reads and clears after rendering into the freed half.
pub struct BufferFlag(AtomicU8);

impl BufferFlag {
    pub fn new() -> Self {
        Self(AtomicU8::new(BufferState::None.to_tag()))
    }

    /// Called from driver context when the DMA/audio callback finishes
    /// transmitting a half of the buffer.
    pub fn signal(&self, state: BufferState) {
        self.0.store(state.to_tag(), Ordering::Relaxed);
    }

    /// Called from control context to observe which half is free to render
    /// into.
    pub fn load(&self) -> BufferState {
        BufferState::from_tag(self.0.load(Ordering::Relaxed))
    }

    /// Called from control context once it has consumed the signalled state.
    pub fn clear(&self) {
        self.0.store(BufferState::None.to_tag(), Ordering::Relaxed);
    }
}

impl Default for BufferFlag {
    fn default() -> Self {
        Self::new()
    }
}
