//! One note's worth of DSP state: two oscillators, two modulation LFOs, an
//! envelope, two cascaded filters, a controller-owned flags word, and an age
//! counter used by voice allocation (§4.6/§4.7).
//!
//! Grounded in the shape of `SynthVoice` in the originating codebase's voice
//! manager (two oscillators, one envelope, filter state, age, is_active) --
//! this version keeps that shape and swaps in the tagged-enum oscillator and
//! Chamberlin SVF described elsewhere in this crate.

use rand::rngs::SmallRng;

use crate::envelope::Envelope;
use crate::filter::IirFilter;
use crate::oscillator::Oscillator;

/// Two oscillators, two LFOs, one envelope, two cascaded filters.
pub struct Voice {
    pub osc0: Oscillator,
    pub osc1: Oscillator,
    pub lfo_pitch: Oscillator,
    pub lfo_morph: Oscillator,
    pub envelope: Envelope,
    pub filter0: IirFilter,
    pub filter1: IirFilter,
    /// Controller-owned bookkeeping bits (e.g. which track owns this voice).
    /// The engine stores and returns this value but never interprets it.
    pub flags: u32,
    /// Samples since this voice's last note-on. Used by [`crate::synth::Synth`]
    /// to pick a stealing victim when all voices are active.
    pub age: usize,
}

impl Voice {
    pub fn new(
        osc0: Oscillator,
        osc1: Oscillator,
        lfo_pitch: Oscillator,
        lfo_morph: Oscillator,
        envelope: Envelope,
        filter0: IirFilter,
        filter1: IirFilter,
    ) -> Self {
        Self {
            osc0,
            osc1,
            lfo_pitch,
            lfo_morph,
            envelope,
            filter0,
            filter1,
            flags: 0,
            age: 0,
        }
    }

    /// True iff the envelope has not reached Idle; the only definition of
    /// "active" a voice has (§3).
    pub fn is_active(&self) -> bool {
        self.envelope.is_active()
    }

    /// Returns the voice to an Idle, silent state: envelope goes (back) to
    /// Idle at gain 0, filter memory is cleared, age resets to 0, and
    /// `flags` is overwritten with the controller's bookkeeping bitfield.
    /// This is a reset utility, not a note trigger -- the original firmware
    /// never calls `synth_voice_init` from its note-on path (`playNote` in
    /// `examples/original_source/src/ex08/main.c` calls `synth_new_voice`,
    /// `synth_set_iir_coeff`, `synth_adsr_init`, and `synth_osc_init`, never
    /// `synth_voice_init`). Triggering a note is `Envelope::init`'s job
    /// (Idle -> Attack); callers call that separately with the note's ADSR
    /// parameters after configuring oscillators and filters.
    pub fn init(&mut self, flags: u32) {
        self.flags = flags;
        self.age = 0;
        self.envelope.phase = crate::envelope::EnvPhase::Idle;
        self.envelope.gain = 0.0;
        self.filter0.reset();
        self.filter1.reset();
    }

    /// Forces this voice's envelope into Release (note-off).
    pub fn release(&mut self) {
        self.envelope.release();
    }

    /// Produces one sample: `envelope x filter1(filter0(osc0 + osc1))`.
    /// Idle voices short-circuit to silence without running any oscillator
    /// or filter work (§4.6). Always increments `age`.
    pub fn tick(&mut self, env_mod: f32, filter_lfo: f32, rng: &mut SmallRng) -> f32 {
        self.age = self.age.saturating_add(1);

        if !self.is_active() {
            // Still advance the envelope so a freshly-idle voice's gain
            // stays pinned at 0 rather than stale from its last note.
            self.envelope.update(env_mod);
            return 0.0;
        }

        let pitch_lfo = self.lfo_pitch.tick(0.0, 0.0, rng);
        let morph_lfo = self.lfo_morph.tick(0.0, 0.0, rng);

        let osc_sum = self.osc0.tick(pitch_lfo, morph_lfo, rng) + self.osc1.tick(pitch_lfo, morph_lfo, rng);
        let filtered = self.filter1.process(self.filter0.process(osc_sum, filter_lfo), filter_lfo);
        let gain = self.envelope.update(env_mod);

        filtered * gain
    }
}
