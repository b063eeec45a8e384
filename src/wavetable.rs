//! Static wavetables: one period of several waveforms sampled uniformly over
//! `[0, 2*pi)` at [`WAVE_TABLE_LENGTH`](crate::config::WAVE_TABLE_LENGTH)
//! resolution.
//!
//! Lookup is nearest-index (see [`crate::config::wave_table_index`]); no
//! interpolation is required for correctness. Tables are computed once, on
//! first access, behind `LazyLock` -- the modern replacement for the
//! `lazy_static!` pattern this lineage otherwise reaches for, appropriate
//! here because the tables are read-only for the remainder of the process.
//! Oscillators never own a table; they hold a `&'static` reference into one
//! of these.

use std::sync::LazyLock;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::config::WAVE_TABLE_LENGTH;

pub type Table = [f32; WAVE_TABLE_LENGTH];

fn phase_at(i: usize) -> f32 {
    (i as f32) * std::f32::consts::TAU / WAVE_TABLE_LENGTH as f32
}

fn build<F: Fn(f32) -> f32>(f: F) -> Table {
    let mut table = [0.0f32; WAVE_TABLE_LENGTH];
    for (i, slot) in table.iter_mut().enumerate() {
        *slot = f(phase_at(i));
    }
    table
}

/// Pure sine: one period of `sin(phase)`.
pub static SINE: LazyLock<Table> = LazyLock::new(|| build(|p| p.sin()));

/// First harmonic mixture: fundamental plus a half-strength 2nd harmonic.
pub static HARMONICS_1: LazyLock<Table> =
    LazyLock::new(|| build(|p| 0.67 * p.sin() + 0.33 * (2.0 * p).sin()));

/// Second harmonic mixture: fundamental plus 3rd and 4th harmonics, brighter
/// than [`HARMONICS_1`].
pub static HARMONICS_2: LazyLock<Table> = LazyLock::new(|| {
    build(|p| 0.5 * p.sin() + 0.33 * (3.0 * p).sin() + 0.17 * (4.0 * p).sin())
});

/// Third harmonic mixture: odd harmonics only, square-ish timbre.
pub static HARMONICS_3: LazyLock<Table> = LazyLock::new(|| {
    build(|p| {
        let mut acc = 0.0;
        let mut norm = 0.0;
        for k in [1.0, 3.0, 5.0, 7.0] {
            acc += (k * p).sin() / k;
            norm += 1.0 / k;
        }
        acc / norm
    })
});

/// Static white-noise table, generated once from a fixed seed. Distinct from
/// the live `noise` oscillator variant, which draws from the `Synth`-owned
/// PRNG every sample; this table exists for wavetable-morph sources that
/// want a noisy endpoint without touching the live RNG stream.
pub static NOISE: LazyLock<Table> = LazyLock::new(|| {
    let mut rng = SmallRng::seed_from_u64(0x5eed_7461);
    let mut table = [0.0f32; WAVE_TABLE_LENGTH];
    for slot in table.iter_mut() {
        *slot = rng.gen_range(-1.0..1.0);
    }
    table
});

/// Morph source A: signed square of sine, a mellow/rounded waveshape used as
/// one endpoint of `wtable_morph` pairs.
pub static MORPH_A: LazyLock<Table> = LazyLock::new(|| build(|p| p.sin() * p.sin().abs()));

/// Morph source B: a bandlimited sawtooth approximation (a handful of
/// harmonics), used as the other endpoint of `wtable_morph` pairs.
pub static MORPH_B: LazyLock<Table> = LazyLock::new(|| {
    build(|p| {
        let mut acc = 0.0;
        for k in 1..=6 {
            let k = k as f32;
            let sign = if (k as i32) % 2 == 0 { -1.0 } else { 1.0 };
            acc += sign * (k * p).sin() / k;
        }
        acc * (2.0 / std::f32::consts::PI)
    })
});
