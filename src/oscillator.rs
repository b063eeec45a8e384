//! Phase-accumulating oscillator with optional wavetable lookup/morph.
//!
//! Mirrors the original firmware's `SynthOsc` / `OscFn` design (function
//! pointer per waveform) but dispatches through a tagged `enum` instead of an
//! indirect call -- the design note in SPEC_FULL.md §9 prefers this exactly
//! because it removes the indirect call from the hot loop and lets the
//! compiler specialise each `match` arm.

use rand::{rngs::SmallRng, Rng};

use crate::config::{self, HALF_TAU};
use crate::wavetable::Table;

/// Selects how [`Oscillator::tick`] computes its output sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscVariant {
    Sin,
    SinDc,
    Sin2,
    Rect,
    RectPhase,
    RectDc,
    Saw,
    Tri,
    Noise,
    WtableSimple,
    WtableMorph,
    Nop,
}

/// A single phase-accumulating oscillator.
///
/// `freq` is stored pre-scaled to radians/sample (see
/// [`config::freq_to_rad`]) so that `tick` never needs the sample rate.
#[derive(Clone, Copy)]
pub struct Oscillator {
    pub phase: f32,
    pub freq: f32,
    pub amp: f32,
    pub dc_offset: f32,
    pub variant: OscVariant,
    wavetable1: Option<&'static Table>,
    wavetable2: Option<&'static Table>,
}

impl Oscillator {
    /// Builds an oscillator at `freq_hz`, phase 0, the given amplitude/dc
    /// offset and variant. Matches `synth_osc_init` in the original firmware.
    pub fn new(variant: OscVariant, amp: f32, phase: f32, freq_hz: f32, dc_offset: f32) -> Self {
        Self {
            phase: config::wrap_phase(phase),
            freq: config::freq_to_rad(freq_hz),
            amp,
            dc_offset,
            variant,
            wavetable1: None,
            wavetable2: None,
        }
    }

    /// Re-initialises an existing oscillator in place (voice reuse at
    /// note-on), avoiding any allocation.
    pub fn init(&mut self, variant: OscVariant, amp: f32, phase: f32, freq_hz: f32, dc_offset: f32) {
        self.phase = config::wrap_phase(phase);
        self.freq = config::freq_to_rad(freq_hz);
        self.amp = amp;
        self.dc_offset = dc_offset;
        self.variant = variant;
        self.wavetable1 = None;
        self.wavetable2 = None;
    }

    /// Sets the frequency directly in radians/sample (used by LFOs and by
    /// pitch-bend style modulation where the caller already did the Hz
    /// conversion once).
    pub fn set_freq_hz(&mut self, freq_hz: f32) {
        self.freq = config::freq_to_rad(freq_hz);
    }

    /// Attaches one or two non-owning wavetable references. Tables may be
    /// swapped between note-ons without reallocating the oscillator.
    pub fn set_wavetables(&mut self, table1: &'static Table, table2: &'static Table) {
        self.wavetable1 = Some(table1);
        self.wavetable2 = Some(table2);
    }

    /// Advances phase by `freq` radians/sample, wraps into `[0, 2*pi)`, and
    /// produces one output sample. `lfo1`/`lfo2` are additive phase
    /// modulation inputs (radians), sampled at call time. `rng` backs the
    /// `Noise` variant -- always the `Synth`-owned PRNG, never global state.
    pub fn tick(&mut self, lfo1: f32, lfo2: f32, rng: &mut SmallRng) -> f32 {
        self.phase = config::wrap_phase(self.phase + self.freq);

        let raw = match self.variant {
            OscVariant::Sin => config::wrap_phase(self.phase + lfo1).sin(),
            OscVariant::SinDc => config::wrap_phase(self.phase + lfo1).sin(),
            OscVariant::Sin2 => {
                let s = config::wrap_phase(self.phase + lfo1).sin();
                s * s
            }
            OscVariant::Rect => {
                if config::wrap_phase(self.phase + lfo1).sin() >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            OscVariant::RectPhase | OscVariant::RectDc => {
                if self.phase < HALF_TAU {
                    1.0
                } else {
                    -1.0
                }
            }
            OscVariant::Saw => self.phase / std::f32::consts::PI - 1.0,
            OscVariant::Tri => {
                if self.phase < HALF_TAU {
                    (2.0 / HALF_TAU) * self.phase - 1.0
                } else {
                    3.0 - (2.0 / HALF_TAU) * self.phase
                }
            }
            OscVariant::Noise => rng.gen_range(-1.0..1.0),
            OscVariant::WtableSimple => {
                let idx = config::wave_table_index(self.phase + lfo1);
                self.wavetable1.map_or(0.0, |t| t[idx])
            }
            OscVariant::WtableMorph => {
                let idx = config::wave_table_index(self.phase + lfo1);
                match (self.wavetable1, self.wavetable2) {
                    (Some(t1), Some(t2)) => config::mixf(t1[idx], t2[idx], (lfo2 + 1.0) * 0.5),
                    (Some(t1), None) => t1[idx],
                    _ => 0.0,
                }
            }
            OscVariant::Nop => 0.0,
        };

        let out = raw * self.amp;
        match self.variant {
            OscVariant::SinDc | OscVariant::RectDc => out + self.dc_offset,
            _ => out,
        }
    }
}
