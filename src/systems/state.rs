//! The high-level stage machine and the end-of-run bridge.

use bevy_ecs::prelude::*;
use tracing::{debug, info};

use crate::audio::Cue;
use crate::constants::BEST_SCORE_KEY;
use crate::events::{GameCommand, GameEvent, StageTransition};
use crate::progression::{ExperienceLedger, Progression};
use crate::session::{experience_award, Session};
use crate::store::StoreResource;
use crate::systems::audio::AudioEvent;
use crate::systems::components::{ObjectTag, PlayerControlled, Position, Runner};

/// A resource to track the overall stage of the game from a high-level perspective.
#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum GameStage {
    /// The title screen. Entered at startup and on explicit reset.
    #[default]
    Menu,
    /// The main gameplay loop is active.
    Playing,
    /// The run has ended; the summary screen is shown.
    GameOver,
}

/// Whether tick advancement is frozen. Rendering continues while paused so
/// the overlay stays visible.
#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum PauseState {
    #[default]
    Inactive,
    Active,
}

impl PauseState {
    pub fn active(&self) -> bool {
        matches!(self, PauseState::Active)
    }
}

/// Signals the outer loop to shut down.
#[derive(Resource, Debug, Default)]
pub struct GlobalState {
    pub exit: bool,
}

/// The best score on record, loaded from the store at startup.
#[derive(Resource, Debug, Default)]
pub struct BestScore(pub u32);

/// Summary of the most recently completed run, for the game-over screen.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct LastRun {
    pub experience: u32,
    pub new_best: bool,
}

pub fn handle_pause_command(
    mut events: EventReader<GameEvent>,
    stage: Res<GameStage>,
    mut pause_state: ResMut<PauseState>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    for event in events.read() {
        if !matches!(event, GameEvent::Command(GameCommand::TogglePause)) {
            continue;
        }
        if *stage != GameStage::Playing {
            continue;
        }

        *pause_state = match *pause_state {
            PauseState::Active => {
                info!("Game resumed");
                audio_events.write(AudioEvent::Resume);
                PauseState::Inactive
            }
            PauseState::Inactive => {
                info!("Game paused");
                audio_events.write(AudioEvent::Pause);
                PauseState::Active
            }
        };
    }
}

/// Handles stage transitions: menu confirm, game-over requests from the
/// resolver, play-again and return-to-menu, and exit.
///
/// The end-of-run bridge (best-score compare and write, experience award)
/// runs on the Playing→GameOver edge and nowhere else, so it fires exactly
/// once per completed run.
#[allow(clippy::too_many_arguments)]
pub fn stage_system(
    mut commands: Commands,
    mut events: EventReader<GameEvent>,
    mut transitions: EventReader<StageTransition>,
    mut stage: ResMut<GameStage>,
    mut pause_state: ResMut<PauseState>,
    mut session: ResMut<Session>,
    mut best: ResMut<BestScore>,
    store: Res<StoreResource>,
    mut ledger: ResMut<ExperienceLedger>,
    mut last_run: ResMut<LastRun>,
    mut global: ResMut<GlobalState>,
    mut audio_events: EventWriter<AudioEvent>,
    runner: Single<(&mut Runner, &mut Position), With<PlayerControlled>>,
    objects: Query<Entity, With<ObjectTag>>,
) {
    let (mut runner, mut position) = runner.into_inner();

    // Game-over requests take priority over input this tick.
    for transition in transitions.read() {
        let StageTransition::GameOver = transition;
        if *stage != GameStage::Playing {
            continue;
        }

        // Cut any lingering cues before the end-of-run feedback.
        audio_events.write(AudioEvent::StopAll);

        let experience = experience_award(&session);
        ledger.award_experience(experience);

        let new_best = session.score > best.0;
        if new_best {
            debug!(old_best = best.0, new_best = session.score, "New best score");
            best.0 = session.score;
            if let Err(e) = store.0.write(BEST_SCORE_KEY, session.score) {
                tracing::warn!(error = %e, "Failed to persist best score");
            }
            audio_events.write(AudioEvent::Cue(Cue::Success));
        }

        *last_run = LastRun { experience, new_best };
        *stage = GameStage::GameOver;
        info!(
            score = session.score,
            distance = session.distance,
            experience,
            new_best,
            "Run complete"
        );
    }

    for event in events.read() {
        let GameEvent::Command(command) = event else {
            continue;
        };

        match (*stage, *command) {
            (_, GameCommand::Exit) => {
                info!("Exit requested");
                global.exit = true;
            }
            (GameStage::Menu, GameCommand::Confirm) | (GameStage::GameOver, GameCommand::Confirm) => {
                info!("Starting run");
                reset_run(&mut commands, &mut session, &mut runner, &mut position, &objects);
                *pause_state = PauseState::Inactive;
                *stage = GameStage::Playing;
            }
            (GameStage::GameOver, GameCommand::BackToMenu) => {
                info!("Returning to menu");
                reset_run(&mut commands, &mut session, &mut runner, &mut position, &objects);
                *pause_state = PauseState::Inactive;
                *stage = GameStage::Menu;
            }
            (GameStage::Menu, GameCommand::BackToMenu) => {
                // Backing out of the menu quits.
                info!("Exit requested from menu");
                global.exit = true;
            }
            _ => {}
        }
    }
}

/// Resets session, runner and the live object set for a fresh run.
fn reset_run(
    commands: &mut Commands,
    session: &mut Session,
    runner: &mut Runner,
    position: &mut Position,
    objects: &Query<Entity, With<ObjectTag>>,
) {
    *session = Session::default();
    *runner = Runner::default();
    position.0 = crate::constants::player_start_position();
    for entity in objects.iter() {
        commands.entity(entity).despawn();
    }
}
