//! Routes audio requests from gameplay systems to the mixer.

use bevy_ecs::prelude::*;
use bevy_ecs::system::NonSendMut;
use tracing::debug;

use crate::audio::{Audio, Cue};
use crate::events::{GameCommand, GameEvent};

/// A request for the audio side of the engine.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Play a feedback cue once.
    Cue(Cue),
    /// Pause all playing channels (game paused).
    Pause,
    /// Resume all paused channels.
    Resume,
    /// Halt everything immediately.
    StopAll,
}

/// SDL mixer handles are not `Send`, so the audio backend lives as a
/// non-send resource.
pub struct AudioResource(pub Audio);

/// Applies queued audio events and the mute toggle to the mixer.
pub fn audio_system(
    mut audio: NonSendMut<AudioResource>,
    mut audio_events: EventReader<AudioEvent>,
    mut game_events: EventReader<GameEvent>,
) {
    for event in game_events.read() {
        if matches!(event, GameEvent::Command(GameCommand::MuteAudio)) {
            let mute = !audio.0.is_muted();
            audio.0.set_mute(mute);
            debug!(muted = mute, "Audio mute toggled");
        }
    }

    for event in audio_events.read() {
        match event {
            AudioEvent::Cue(cue) => audio.0.play(*cue),
            AudioEvent::Pause => audio.0.pause_all(),
            AudioEvent::Resume => audio.0.resume_all(),
            AudioEvent::StopAll => audio.0.stop_all(),
        }
    }
}
