//! Five-phase linear ADSR envelope.
//!
//! Linear (not exponential) staging is intentional: constant per-sample
//! deltas are cheap enough to run on fixed-point-capable hardware, per
//! SPEC_FULL.md §4.3.

use crate::config::clampf;

/// Envelope phase. `Idle` is terminal and marks the owning voice reusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvPhase {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

#[derive(Debug, Clone, Copy)]
pub struct Envelope {
    pub gain: f32,
    pub attack_gain: f32,
    pub sustain_gain: f32,
    pub attack_rate: f32,
    pub decay_rate: f32,
    pub release_rate: f32,
    pub phase: EnvPhase,
}

impl Envelope {
    /// Builds an idle, silent envelope with the given rates/levels.
    /// `attack_rate`/`decay_rate`/`release_rate` are per-sample deltas.
    pub fn new(attack_rate: f32, decay_rate: f32, release_rate: f32, attack_gain: f32, sustain_gain: f32) -> Self {
        Self {
            gain: 0.0,
            attack_gain,
            sustain_gain,
            attack_rate,
            decay_rate,
            release_rate,
            phase: EnvPhase::Idle,
        }
    }

    /// Re-initialises rates/levels and starts a fresh note (Idle -> Attack,
    /// gain reset to 0). Matches `synth_adsr_init` on the original firmware.
    pub fn init(&mut self, attack_rate: f32, decay_rate: f32, release_rate: f32, attack_gain: f32, sustain_gain: f32) {
        self.attack_rate = attack_rate;
        self.decay_rate = decay_rate;
        self.release_rate = release_rate;
        self.attack_gain = attack_gain;
        self.sustain_gain = sustain_gain;
        self.gain = 0.0;
        self.phase = EnvPhase::Attack;
    }

    /// Forces Sustain (or any non-Idle phase) into Release. The
    /// Sustain -> Release transition is externally triggered (SPEC_FULL.md
    /// §9, resolved Open Question) -- there is no implicit age-based timeout.
    pub fn release(&mut self) {
        if self.phase != EnvPhase::Idle {
            self.phase = EnvPhase::Release;
        }
    }

    /// True while the voice owning this envelope should still be rendered.
    pub fn is_active(&self) -> bool {
        self.phase != EnvPhase::Idle
    }

    /// Advances the envelope by one sample and returns the new gain.
    /// `env_mod` modulates decay speed, clamped to `[0, 1]` before use.
    pub fn update(&mut self, env_mod: f32) -> f32 {
        let env_mod = clampf(env_mod, 0.0, 1.0);
        match self.phase {
            EnvPhase::Idle => {
                self.gain = 0.0;
            }
            EnvPhase::Attack => {
                self.gain += self.attack_rate;
                if self.gain >= self.attack_gain {
                    self.gain = self.attack_gain;
                    self.phase = EnvPhase::Decay;
                }
            }
            EnvPhase::Decay => {
                self.gain -= self.decay_rate * (1.0 - env_mod);
                if self.gain <= self.sustain_gain {
                    self.gain = self.sustain_gain;
                    self.phase = EnvPhase::Sustain;
                }
            }
            EnvPhase::Sustain => {
                // Holds; Release is triggered externally via `release()`.
            }
            EnvPhase::Release => {
                self.gain -= self.release_rate;
                if self.gain <= 0.0 {
                    self.gain = 0.0;
                    self.phase = EnvPhase::Idle;
                }
            }
        }
        self.gain
    }
}
