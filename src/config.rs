//! Build-time constants and small numeric helpers shared by every DSP module.
//!
//! Everything here is a `const` or a free function -- there is no runtime
//! configuration layer (no file formats, no env vars, no CLI): a single build
//! targets a single sample rate, a single polyphony count, and a single
//! wavetable size, matching the firmware this engine is descended from.

use std::f32::consts::{PI, TAU};

/// Fixed sample rate this build renders at. Changing it requires a rebuild,
/// not a runtime parameter -- sample-rate conversion is out of scope.
pub const SAMPLE_RATE: f32 = 44_100.0;

/// Number of simultaneous voices in the pool.
pub const SYNTH_POLYPHONY: usize = 6;

/// Size, in bytes, of the double-buffered PCM output the driver owns.
/// 256 bytes = 64 stereo i16 frames = 128 i16 words.
pub const AUDIO_BUFFER_SIZE: usize = 256;

/// Length, in samples, of the feedback delay bus ring buffer.
pub const DELAY_LENGTH: usize = (SAMPLE_RATE * 0.375) as usize;

/// Length, in samples, of one period in a wavetable.
pub const WAVE_TABLE_LENGTH: usize = 1024;

/// Scale factor used by the int16 <-> float conversion at the master bus.
pub const ADSR_SCALE: f32 = 32767.0;

/// `2*pi*freq / SAMPLE_RATE` -- converts a frequency in Hz to radians/sample,
/// the unit every `Oscillator::freq` is stored in.
#[inline]
pub fn freq_to_rad(freq_hz: f32) -> f32 {
    TAU * freq_hz / SAMPLE_RATE
}

/// Wraps a phase into `[0, 2*pi)` using Euclidean modulo.
///
/// The original firmware's `truncPhase` subtracts `TAU` in a loop, which
/// never terminates in bounded time if `phase` is driven arbitrarily
/// negative by LFO modulation (see SPEC_FULL.md §9). `rem_euclid` is O(1)
/// regardless of sign or magnitude, which is what the wait-free render path
/// requires.
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    phase.rem_euclid(TAU)
}

#[inline]
pub fn clampf(x: f32, min: f32, max: f32) -> f32 {
    x.clamp(min, max)
}

/// Saturating conversion to i16, matching `clamp16` in the original firmware:
/// the negative extreme is `-32768`, not `-32767`.
#[inline]
pub fn clamp16(x: i32) -> i16 {
    x.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Linear interpolation: `a` at `t=0`, `b` at `t=1`.
#[inline]
pub fn mixf(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Index into a `WAVE_TABLE_LENGTH`-sample table for a phase in `[0, 2*pi)`.
#[inline]
pub fn wave_table_index(phase: f32) -> usize {
    let wrapped = wrap_phase(phase);
    let scale = WAVE_TABLE_LENGTH as f32 / TAU;
    ((wrapped * scale) as usize).min(WAVE_TABLE_LENGTH - 1)
}

/// Half period, used by the `tri` and `rect_phase` oscillator variants.
pub const HALF_TAU: f32 = PI;
