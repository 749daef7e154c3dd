//! Object advection and off-screen pruning.

use bevy_ecs::prelude::*;
use tracing::trace;

use crate::constants::mechanics;
use crate::session::Session;
use crate::systems::components::{ObjectTag, Position};

/// Scrolls every live object leftward at the session speed.
pub fn advection_system(session: Res<Session>, mut objects: Query<&mut Position, With<ObjectTag>>) {
    for mut position in objects.iter_mut() {
        position.0.x -= session.speed;
    }
}

/// Advances the distance drip, the speed ramp and the power-up countdown by
/// one tick.
pub fn session_tick_system(mut session: ResMut<Session>) {
    session.advance_distance();
    session.tick_power_up();
}

/// Removes objects that scrolled past the left boundary.
///
/// Runs after collision resolution, so an object that is simultaneously
/// off-screen and overlapping still has its collision effects applied first.
pub fn prune_system(mut commands: Commands, objects: Query<(Entity, &Position), With<ObjectTag>>) {
    for (entity, position) in objects.iter() {
        if position.0.x <= mechanics::OFFSCREEN_X {
            trace!(?entity, x = position.0.x, "Pruning off-screen object");
            commands.entity(entity).despawn();
        }
    }
}
