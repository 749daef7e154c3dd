//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod audio;
pub mod collision;
pub mod components;
pub mod hud;
pub mod input;
pub mod movement;
pub mod player;
pub mod present;
pub mod render;
pub mod spawn;
pub mod state;

pub use audio::{audio_system, AudioEvent, AudioResource};
pub use collision::{collision_system, resolver_system};
pub use components::{
    Collider, ObjectBundle, ObjectCategory, ObjectKind, ObjectTag, PlayerControlled, Position, Runner, RunnerBundle,
};
pub use hud::hud_system;
pub use input::{input_system, Bindings};
pub use movement::{advection_system, prune_system, session_tick_system};
pub use player::{player_control_system, player_physics_system};
pub use present::{present_system, BackbufferResource};
pub use render::render_system;
pub use spawn::{spawn_system, SpawnRng};
pub use state::{handle_pause_command, stage_system, BestScore, GameStage, GlobalState, LastRun, PauseState};
