use bevy_ecs::prelude::*;

/// A discrete input action. Key repeat is filtered out at the input layer, so
/// every command corresponds to exactly one key edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    MoveLeft,
    MoveRight,
    Jump,
    Slide,
    TogglePause,
    /// Context dependent: starts a run from the menu, plays again from the
    /// game-over screen.
    Confirm,
    BackToMenu,
    MuteAudio,
    Exit,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
    /// The runner's hitbox overlapped an object this tick.
    Collision(Entity, Entity),
}

/// Requests a stage change that the stage system must arbitrate.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageTransition {
    /// The run is over (lives exhausted). Written at most once per run by the
    /// collision resolver.
    GameOver,
}
