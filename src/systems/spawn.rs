//! Randomized object spawner.
//!
//! Each tick has a small, fixed chance of producing one object: a uniformly
//! random lane and a subtype drawn from a weighted table. The spawn rate is
//! deliberately tied to the tick rate, not the scroll speed.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;
use tracing::trace;

use crate::constants::{lane_center_x, mechanics, GROUND_Y, LANE_COUNT};
use crate::systems::components::{Collider, ObjectBundle, ObjectKind, ObjectTag, Position};

/// Cumulative-weight lookup table for subtype selection. A uniform roll in
/// `[0, 1)` maps to the first entry whose threshold exceeds it: collectibles
/// occupy `[0, 0.4)`, obstacles `[0.4, 0.7)`, power-ups `[0.7, 1.0)`.
pub const SPAWN_TABLE: [(f32, ObjectKind); 9] = [
    (0.15, ObjectKind::CalmBubble),
    (0.25, ObjectKind::LightRay),
    (0.40, ObjectKind::FocusSymbol),
    (0.55, ObjectKind::StressCloud),
    (0.62, ObjectKind::RacingThoughts),
    (0.70, ObjectKind::DigitalDistraction),
    (0.75, ObjectKind::BreatheMode),
    (0.85, ObjectKind::SerenityShield),
    (1.00, ObjectKind::ZenMagnet),
];

/// Maps a uniform roll in `[0, 1)` to an object subtype.
pub fn pick_kind(roll: f32) -> ObjectKind {
    for (threshold, kind) in SPAWN_TABLE {
        if roll < threshold {
            return kind;
        }
    }
    // Only reachable if the roll is outside [0, 1).
    SPAWN_TABLE[SPAWN_TABLE.len() - 1].1
}

/// Where a freshly spawned object of this kind sits in the given lane.
pub fn spawn_position(lane: u8, kind: ObjectKind) -> glam::Vec2 {
    glam::Vec2::new(lane_center_x(lane, kind.size().x), GROUND_Y - kind.ground_offset())
}

/// The session's random source. Seeded per process; tests seed it explicitly
/// for reproducible runs.
#[derive(Resource, Debug)]
pub struct SpawnRng(pub SmallRng);

pub fn spawn_system(mut commands: Commands, mut rng: ResMut<SpawnRng>) {
    if rng.0.random::<f32>() >= mechanics::SPAWN_CHANCE {
        return;
    }

    let lane = rng.0.random_range(0..LANE_COUNT);
    let kind = pick_kind(rng.0.random::<f32>());
    let position = spawn_position(lane, kind);

    trace!(?kind, lane, x = position.x, y = position.y, "Spawning object");
    commands.spawn(ObjectBundle {
        kind,
        position: Position(position),
        collider: Collider { size: kind.size() },
        tag: ObjectTag,
    });
}
