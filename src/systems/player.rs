//! Runner control and per-tick physics.

use bevy_ecs::prelude::*;
use tracing::trace;

use crate::audio::Cue;
use crate::events::{GameCommand, GameEvent};
use crate::systems::audio::AudioEvent;
use crate::systems::components::{PlayerControlled, Position, Runner};
use crate::systems::state::{GameStage, PauseState};

/// Translates movement commands into runner state changes.
///
/// Only active during play; menu and game-over input is handled by the stage
/// system, and a paused game ignores movement entirely.
pub fn player_control_system(
    mut events: EventReader<GameEvent>,
    stage: Res<GameStage>,
    pause: Res<PauseState>,
    runner: Single<(&mut Runner, &mut Position), With<PlayerControlled>>,
    mut audio: EventWriter<AudioEvent>,
) {
    let (mut runner, mut position) = runner.into_inner();

    for event in events.read() {
        let GameEvent::Command(command) = event else {
            continue;
        };
        if *stage != GameStage::Playing || pause.active() {
            continue;
        }

        match command {
            GameCommand::MoveLeft => {
                if runner.move_lane(-1) {
                    position.0.x = runner.lane_x();
                    trace!(lane = runner.lane, "Runner moved left");
                    audio.write(AudioEvent::Cue(Cue::Positive));
                }
            }
            GameCommand::MoveRight => {
                if runner.move_lane(1) {
                    position.0.x = runner.lane_x();
                    trace!(lane = runner.lane, "Runner moved right");
                    audio.write(AudioEvent::Cue(Cue::Positive));
                }
            }
            GameCommand::Jump => {
                if runner.jump() {
                    trace!("Runner jumped");
                    audio.write(AudioEvent::Cue(Cue::Positive));
                }
            }
            GameCommand::Slide => {
                if runner.slide() {
                    trace!("Runner sliding");
                    audio.write(AudioEvent::Cue(Cue::Positive));
                }
            }
            _ => {}
        }
    }
}

/// Advances the jump arc and slide countdown once per tick.
pub fn player_physics_system(runner: Single<&mut Runner, With<PlayerControlled>>) {
    runner.into_inner().step_physics();
}
