//! Chamberlin-style two-pole state-variable filter (LP/HP/BP/BR).
//!
//! The original firmware models the input-source and LFO-source as
//! non-owning pointers stored on the filter struct. Translating that
//! literally into Rust would mean a struct holding references into sibling
//! fields of the same `Voice` -- awkward and effectively `unsafe` for no
//! benefit, since the caller already has both values on hand every sample.
//! `process` takes them as arguments instead (documented in DESIGN.md as a
//! deliberate translation, not a silent simplification).

use crate::config::{clampf, SAMPLE_RATE};
use std::f32::consts::PI;

/// Selects which simultaneously-computed tap `process` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
    BandReject,
}

const F_MIN: f32 = 0.0005;
const F_MAX: f32 = 0.999;
const LFO_COEFF_SCALE: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct IirFilter {
    pub filter_type: FilterType,
    /// Low-pass / band-pass state (the two load-bearing integrators).
    f_low: f32,
    f_band: f32,
    /// High-pass / band-reject taps, recomputed each sample but kept
    /// alongside the integrators to mirror the original's `f[0..3]` array.
    f_high: f32,
    f_notch: f32,
    cutoff: f32,
    resonance: f32,
    damping: f32,
    /// Derived base frequency coefficient, `2*sin(pi*cutoff/SR)`.
    coeff: f32,
}

impl IirFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32, resonance: f32, damping: f32) -> Self {
        let mut filter = Self {
            filter_type,
            f_low: 0.0,
            f_band: 0.0,
            f_high: 0.0,
            f_notch: 0.0,
            cutoff: 0.0,
            resonance: 0.0,
            damping: 0.0,
            coeff: 0.0,
        };
        filter.set_coeff(cutoff_hz, resonance, damping);
        filter
    }

    /// Recomputes the internal frequency coefficient from `cutoff_hz`.
    /// `resonance` and `damping` are clamped into their documented ranges;
    /// calling this twice with identical inputs yields an identical `coeff`
    /// (idempotent, per SPEC_FULL.md §8).
    pub fn set_coeff(&mut self, cutoff_hz: f32, resonance: f32, damping: f32) {
        self.cutoff = cutoff_hz.max(0.0);
        self.resonance = clampf(resonance, 0.0, 0.95);
        self.damping = clampf(damping, 0.05, 0.95);
        self.coeff = 2.0 * (PI * self.cutoff / SAMPLE_RATE).sin();
    }

    /// Resets filter memory to silence without touching coefficients.
    pub fn reset(&mut self) {
        self.f_low = 0.0;
        self.f_band = 0.0;
        self.f_high = 0.0;
        self.f_notch = 0.0;
    }

    /// Advances the filter by one sample given `input` and an LFO-sourced
    /// cutoff modulation (radians-ish; same units as the coefficient),
    /// returning the tap selected by `filter_type`.
    pub fn process(&mut self, input: f32, lfo: f32) -> f32 {
        let f_coef = clampf(self.coeff + lfo * LFO_COEFF_SCALE, F_MIN, F_MAX);
        // `damping` is the non-resonant loss term; `resonance` increases
        // feedback by reducing the effective loss, with `damping > 0`
        // preserved as the stability invariant from SPEC_FULL.md §4.4.
        let q = clampf(self.damping - self.resonance, 0.05, 0.95);

        self.f_low += f_coef * self.f_band;
        self.f_high = input - self.f_low - q * self.f_band;
        self.f_band += f_coef * self.f_high;
        self.f_notch = self.f_low + self.f_high;

        match self.filter_type {
            FilterType::LowPass => self.f_low,
            FilterType::HighPass => self.f_high,
            FilterType::BandPass => self.f_band,
            FilterType::BandReject => self.f_notch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coeff_is_idempotent() {
        let mut a = IirFilter::new(FilterType::LowPass, 1000.0, 0.5, 0.3);
        let mut b = IirFilter::new(FilterType::LowPass, 1000.0, 0.5, 0.3);
        a.set_coeff(1000.0, 0.5, 0.3);
        b.set_coeff(1000.0, 0.5, 0.3);
        assert_eq!(a.coeff, b.coeff);
    }

    #[test]
    fn state_stays_bounded_for_normalized_input() {
        let mut filter = IirFilter::new(FilterType::LowPass, 1000.0, 0.8, 0.2);
        for i in 0..50_000 {
            let input = if i % 2 == 0 { 1.0 } else { -1.0 };
            filter.process(input, 0.0);
            assert!(filter.f_low.abs() <= 4.0, "f_low diverged: {}", filter.f_low);
            assert!(filter.f_band.abs() <= 4.0, "f_band diverged: {}", filter.f_band);
        }
    }

    #[test]
    fn lowpass_attenuates_high_frequency_more_than_low() {
        let mut lp_hi = IirFilter::new(FilterType::LowPass, 200.0, 0.1, 0.5);
        let mut lp_lo = IirFilter::new(FilterType::LowPass, 200.0, 0.1, 0.5);

        let mut energy_high_input = 0.0f32;
        let mut energy_low_input = 0.0f32;
        for n in 0..2000 {
            let t = n as f32 / SAMPLE_RATE;
            let high_freq_in = (std::f32::consts::TAU * 8000.0 * t).sin();
            let low_freq_in = (std::f32::consts::TAU * 100.0 * t).sin();
            energy_high_input += lp_hi.process(high_freq_in, 0.0).powi(2);
            energy_low_input += lp_lo.process(low_freq_in, 0.0).powi(2);
        }
        assert!(energy_low_input > energy_high_input);
    }

    #[test]
    fn cutoff_and_resonance_are_clamped_to_documented_ranges() {
        let mut filter = IirFilter::new(FilterType::LowPass, 1000.0, 10.0, 10.0);
        assert!(filter.resonance <= 0.95);
        assert!(filter.damping <= 0.95);
        filter.set_coeff(1000.0, -5.0, -5.0);
        assert!(filter.resonance >= 0.0);
        assert!(filter.damping >= 0.05);
    }
}
