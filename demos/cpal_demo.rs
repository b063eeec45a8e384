//! Demo driver: plays a short, hardcoded note sequence through `cpal` to
//! exercise the external contract end to end (§6a). Stands in for the
//! MIDI/USB/BSP layers this crate does not implement, the same way the
//! original firmware's `main.c` stands in for a sequencer and USB MIDI host
//! that are not part of the engine being specified here.
//!
//! Double-buffering and the `AtomicU8` buffer-state flag are exactly the
//! contract described in `synthcore::driver`; this binary is the one place
//! in the repo that actually drives it against a real output device, built
//! the way the originating codebase wires up its own `cpal` output stream.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{error, info};

use synthcore::config::SAMPLE_RATE;
use synthcore::driver::{BufferFlag, BufferState};
use synthcore::filter::FilterType;
use synthcore::oscillator::OscVariant;
use synthcore::Synth;

const FRAMES_PER_HALF: usize = 64;

struct SharedState {
    synth: Synth,
    flag: Arc<BufferFlag>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let synth = Synth::new(0xC0FFEE).map_err(|e| {
        error!(%e, "failed to construct synth");
        e
    })?;

    let flag = Arc::new(BufferFlag::new());
    let state = Arc::new(Mutex::new(SharedState { synth, flag: flag.clone() }));

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or("no audio output device found")?;
    info!(device = %device.name()?, "audio device selected");

    let config = device.default_output_config()?;
    info!(?config, "audio output config");
    let channels = config.channels() as usize;

    let stream_state = state.clone();
    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            fill_callback(&stream_state, data, channels);
        },
        |err| error!(%err, "audio stream error"),
        None,
    )?;
    stream.play()?;
    info!(sample_rate = SAMPLE_RATE, "audio stream started");

    play_demo_sequence(&state);

    std::thread::sleep(Duration::from_secs(4));
    Ok(())
}

/// The audio callback: runs in driver context. It reports which half it
/// just consumed by signalling [`BufferState`], then asks the control
/// context (here, just this callback, for demo simplicity) to render a
/// fresh half via `render_slice`.
fn fill_callback(state: &Arc<Mutex<SharedState>>, data: &mut [f32], channels: usize) {
    let mut state = state.lock().unwrap();
    state.flag.signal(BufferState::Full);

    let frames = data.len() / channels;
    let mut pcm = vec![0i16; frames * 2];
    state.synth.render_slice(&mut pcm, frames.min(FRAMES_PER_HALF * 4));
    state.flag.clear();

    for (frame, out) in data.chunks_mut(channels).enumerate() {
        let sample = pcm.get(frame * 2).copied().unwrap_or(0) as f32 / i16::MAX as f32;
        for channel_sample in out.iter_mut() {
            *channel_sample = sample;
        }
    }
}

/// Triggers a hardcoded sequence of notes on the control thread, standing
/// in for the MIDI/sequencer layer (§1e). Alternates the two voice-setup
/// patterns from the original firmware: `trackOscRect` (plain rectangle
/// plus a rectangle sub-oscillator) and `trackOscWavetable1` (a wavetable
/// pair fed through `wtable_morph`). `Voice::init` only resets a voice to
/// Idle silence; the actual note trigger is `Envelope::init`, called after
/// oscillators and filters are configured for the new pitch.
fn play_demo_sequence(state: &Arc<Mutex<SharedState>>) {
    let notes_hz = [261.63, 329.63, 392.0, 523.25];

    for (i, &freq) in notes_hz.iter().enumerate() {
        {
            let mut state = state.lock().unwrap();
            let voice = state.synth.new_voice();
            voice.init(0);

            if i % 2 == 0 {
                // trackOscRect: plain rectangle wave plus a rectangle
                // sub-oscillator an octave up.
                voice.osc0 = synthcore::oscillator::Oscillator::new(OscVariant::Sin, 0.4, 0.0, freq, 0.0);
                voice.osc1 = synthcore::oscillator::Oscillator::new(OscVariant::Rect, 0.1, 0.0, freq * 2.0, 0.0);
            } else {
                // trackOscWavetable1: a wavetable-morph oscillator crossfading
                // between two static tables, driven by the morph LFO.
                voice.osc0 = synthcore::oscillator::Oscillator::new(OscVariant::WtableMorph, 0.4, 0.0, freq, 0.0);
                voice.osc0.set_wavetables(&synthcore::wavetable::MORPH_A, &synthcore::wavetable::MORPH_B);
                voice.osc1 = synthcore::oscillator::Oscillator::new(OscVariant::Nop, 0.0, 0.0, 0.0, 0.0);
                voice.lfo_morph = synthcore::oscillator::Oscillator::new(OscVariant::Sin, 1.0, 0.0, 0.2, 0.0);
            }

            voice.filter0 = synthcore::filter::IirFilter::new(FilterType::LowPass, 3000.0, 0.3, 0.3);
            voice.filter1 = synthcore::filter::IirFilter::new(FilterType::LowPass, 3000.0, 0.3, 0.3);
            voice.envelope.init(0.02, 0.0001, 0.01, 1.0, 0.7);
        }
        std::thread::sleep(Duration::from_millis(600));
    }
}
