//! SDL event pump polling and key binding lookup.

use std::collections::HashMap;

use bevy_ecs::prelude::*;
use bevy_ecs::system::NonSendMut;
use sdl2::{event::Event, keyboard::Keycode, EventPump};

use crate::events::{GameCommand, GameEvent};

#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<Keycode, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Runner movement
        key_bindings.insert(Keycode::Up, GameCommand::Jump);
        key_bindings.insert(Keycode::W, GameCommand::Jump);
        key_bindings.insert(Keycode::Down, GameCommand::Slide);
        key_bindings.insert(Keycode::S, GameCommand::Slide);
        key_bindings.insert(Keycode::Left, GameCommand::MoveLeft);
        key_bindings.insert(Keycode::A, GameCommand::MoveLeft);
        key_bindings.insert(Keycode::Right, GameCommand::MoveRight);
        key_bindings.insert(Keycode::D, GameCommand::MoveRight);

        // Game actions
        key_bindings.insert(Keycode::Space, GameCommand::TogglePause);
        key_bindings.insert(Keycode::Return, GameCommand::Confirm);
        key_bindings.insert(Keycode::Escape, GameCommand::BackToMenu);
        key_bindings.insert(Keycode::M, GameCommand::MuteAudio);
        key_bindings.insert(Keycode::Q, GameCommand::Exit);

        Self { key_bindings }
    }
}

impl Bindings {
    pub fn command_for(&self, key: Keycode) -> Option<GameCommand> {
        self.key_bindings.get(&key).copied()
    }
}

/// Drains the SDL event queue and emits game commands.
///
/// Only `repeat: false` key-down events are considered, so a held key produces
/// exactly one command per physical press (edge-triggered).
pub fn input_system(bindings: Res<Bindings>, mut writer: EventWriter<GameEvent>, mut pump: NonSendMut<EventPump>) {
    for event in pump.poll_iter() {
        match event {
            Event::Quit { .. } => {
                writer.write(GameEvent::Command(GameCommand::Exit));
            }
            Event::KeyDown {
                keycode: Some(key),
                repeat: false,
                ..
            } => {
                // Unbound keys are ignored outright.
                if let Some(command) = bindings.command_for(key) {
                    writer.write(GameEvent::Command(command));
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_cover_all_actions() {
        let bindings = Bindings::default();
        for command in [
            GameCommand::MoveLeft,
            GameCommand::MoveRight,
            GameCommand::Jump,
            GameCommand::Slide,
            GameCommand::TogglePause,
            GameCommand::Confirm,
            GameCommand::BackToMenu,
            GameCommand::MuteAudio,
            GameCommand::Exit,
        ] {
            assert!(
                bindings.key_bindings.values().any(|bound| *bound == command),
                "{command:?} has no key bound"
            );
        }
    }

    #[test]
    fn test_unbound_key_maps_to_nothing() {
        let bindings = Bindings::default();
        assert_eq!(bindings.command_for(Keycode::F12), None);
    }

    #[test]
    fn test_wasd_mirrors_arrows() {
        let bindings = Bindings::default();
        assert_eq!(bindings.command_for(Keycode::W), bindings.command_for(Keycode::Up));
        assert_eq!(bindings.command_for(Keycode::A), bindings.command_for(Keycode::Left));
        assert_eq!(bindings.command_for(Keycode::S), bindings.command_for(Keycode::Down));
        assert_eq!(bindings.command_for(Keycode::D), bindings.command_for(Keycode::Right));
    }
}
