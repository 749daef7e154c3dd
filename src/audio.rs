//! This module handles audio playback for the game.
//!
//! There are no sound assets: every cue is a short tone sequence synthesized
//! at startup and handed to SDL2_mixer as a raw sample buffer. Audio is
//! strictly best-effort; if the device fails to open the game plays on in
//! silence.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use sdl2::mixer::{self, Chunk, AUDIO_S16LSB};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

const AUDIO_FREQUENCY: i32 = 16_000;
const AUDIO_CHANNELS: i32 = 4;
const DEFAULT_VOLUME: u8 = 32;
const TONE_AMPLITUDE: f32 = 0.35;

/// A feedback cue kind. Positive and negative are the gameplay cues; success
/// marks a new best score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Cue {
    Positive,
    Negative,
    Success,
}

impl Cue {
    /// The tone sequence for this cue, as `(frequency_hz, duration_ms)` pairs.
    fn notes(&self) -> &'static [(f32, u32)] {
        match self {
            // Rising C5 -> E5.
            Cue::Positive => &[(523.25, 70), (659.25, 90)],
            // Falling G3 -> D3.
            Cue::Negative => &[(196.0, 140), (146.83, 180)],
            // C5 -> E5 -> G5 arpeggio.
            Cue::Success => &[(523.25, 90), (659.25, 90), (783.99, 160)],
        }
    }
}

/// Synthesizes one sine tone at the mixer's sample rate, with a linear
/// fade-out so consecutive notes don't click.
pub fn tone_samples(frequency: f32, duration_ms: u32, sample_rate: u32) -> Vec<i16> {
    let count = (sample_rate * duration_ms / 1000) as usize;
    let mut samples = Vec::with_capacity(count);
    for i in 0..count {
        let t = i as f32 / sample_rate as f32;
        let envelope = 1.0 - i as f32 / count as f32;
        let value = (t * frequency * std::f32::consts::TAU).sin() * envelope * TONE_AMPLITUDE;
        samples.push((value * i16::MAX as f32) as i16);
    }
    samples
}

fn sequence_samples(notes: &[(f32, u32)], sample_rate: u32) -> Vec<i16> {
    let mut samples = Vec::new();
    for (frequency, duration_ms) in notes {
        samples.extend(tone_samples(*frequency, *duration_ms, sample_rate));
    }
    samples
}

/// The audio system for the game.
///
/// This struct is responsible for opening the audio device, synthesizing the
/// cue chunks, and playing them. If audio fails to initialize, it will be
/// disabled and all functions will silently do nothing.
pub struct Audio {
    sounds: HashMap<Cue, Chunk>,
    state: AudioState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AudioState {
    Enabled { volume: u8 },
    Muted { previous_volume: u8 },
    Disabled,
}

impl Default for Audio {
    fn default() -> Self {
        Self::new()
    }
}

impl Audio {
    /// Creates a new `Audio` instance.
    ///
    /// If audio fails to initialize, the audio system will be disabled and
    /// all functions will silently do nothing.
    pub fn new() -> Self {
        match Self::try_new() {
            Ok(audio) => audio,
            Err(e) => {
                tracing::warn!("Failed to initialize audio: {}. Audio will be disabled.", e);
                Self {
                    sounds: HashMap::new(),
                    state: AudioState::Disabled,
                }
            }
        }
    }

    fn try_new() -> Result<Self> {
        // Mono output; the synthesized buffers are single-channel.
        mixer::open_audio(AUDIO_FREQUENCY, AUDIO_S16LSB, 1, 256).map_err(|e| anyhow!("Failed to open audio: {}", e))?;

        mixer::allocate_channels(AUDIO_CHANNELS);
        for i in 0..AUDIO_CHANNELS {
            mixer::Channel(i).set_volume(DEFAULT_VOLUME as i32);
        }

        let sounds: HashMap<Cue, Chunk> = Cue::iter()
            .filter_map(|cue| match Self::synthesize(cue) {
                Ok(chunk) => Some((cue, chunk)),
                Err(e) => {
                    tracing::warn!("Failed to synthesize cue {:?}: {}", cue, e);
                    None
                }
            })
            .collect();

        if sounds.is_empty() {
            return Err(anyhow!("No cues synthesized successfully"));
        }

        Ok(Audio {
            sounds,
            state: AudioState::Enabled { volume: DEFAULT_VOLUME },
        })
    }

    fn synthesize(cue: Cue) -> Result<Chunk> {
        let samples = sequence_samples(cue.notes(), AUDIO_FREQUENCY as u32);
        let mut bytes = Vec::with_capacity(samples.len() * 2);
        for sample in samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        Chunk::from_raw_buffer(bytes.into_boxed_slice()).map_err(|e| anyhow!("Failed to build chunk for {:?}: {}", cue, e))
    }

    /// Plays the given cue once. Silently does nothing if audio is disabled
    /// or muted.
    pub fn play(&mut self, cue: Cue) {
        if !matches!(self.state, AudioState::Enabled { .. }) {
            return;
        }

        if let Some(chunk) = self.sounds.get(&cue) {
            if let Err(e) = mixer::Channel::all().play(chunk, 0) {
                tracing::warn!("Could not play cue {:?}: {}", cue, e);
            }
        }
    }

    /// Halts all currently playing audio channels.
    pub fn stop_all(&mut self) {
        if self.state != AudioState::Disabled {
            mixer::Channel::all().halt();
        }
    }

    /// Pauses all currently playing audio channels.
    pub fn pause_all(&mut self) {
        if self.state != AudioState::Disabled {
            mixer::Channel::all().pause();
        }
    }

    /// Resumes all currently playing audio channels.
    pub fn resume_all(&mut self) {
        if self.state != AudioState::Disabled {
            mixer::Channel::all().resume();
        }
    }

    /// Instantly mutes or unmutes all audio channels by adjusting their volume.
    pub fn set_mute(&mut self, mute: bool) {
        match (mute, self.state) {
            (true, AudioState::Enabled { volume }) => {
                self.state = AudioState::Muted { previous_volume: volume };
                for i in 0..AUDIO_CHANNELS {
                    mixer::Channel(i).set_volume(0);
                }
            }
            (false, AudioState::Muted { previous_volume }) => {
                self.state = AudioState::Enabled { volume: previous_volume };
                for i in 0..AUDIO_CHANNELS {
                    mixer::Channel(i).set_volume(previous_volume as i32);
                }
            }
            _ => {}
        }
    }

    /// Returns the current mute state regardless of whether audio is functional.
    pub fn is_muted(&self) -> bool {
        matches!(self.state, AudioState::Muted { .. })
    }

    /// Returns whether the audio system failed to initialize and is non-functional.
    pub fn is_disabled(&self) -> bool {
        matches!(self.state, AudioState::Disabled)
    }
}
