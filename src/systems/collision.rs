//! Collision detection and scoring resolution.

use bevy_ecs::prelude::*;
use tracing::{debug, info, trace};

use crate::audio::Cue;
use crate::events::{GameEvent, StageTransition};
use crate::session::Session;
use crate::systems::audio::AudioEvent;
use crate::systems::components::{Collider, ObjectCategory, ObjectKind, ObjectTag, PlayerControlled, Position, Runner};

/// Axis-aligned bounding box overlap test. Boxes that merely touch edges do
/// not count as overlapping.
pub fn aabb_overlap(min_a: glam::Vec2, size_a: glam::Vec2, min_b: glam::Vec2, size_b: glam::Vec2) -> bool {
    min_a.x < min_b.x + size_b.x && min_a.x + size_a.x > min_b.x && min_a.y < min_b.y + size_b.y && min_a.y + size_a.y > min_b.y
}

/// Tests the runner's current hitbox against every live object and emits a
/// collision event per overlap. Resolution happens in [`resolver_system`].
pub fn collision_system(
    runner: Single<(Entity, &Runner, &Position), With<PlayerControlled>>,
    objects: Query<(Entity, &Position, &Collider), With<ObjectTag>>,
    mut events: EventWriter<GameEvent>,
) {
    let (runner_entity, runner, position) = runner.into_inner();
    let (hit_min, hit_size) = runner.hitbox(position.0);

    for (object_entity, object_position, collider) in objects.iter() {
        if aabb_overlap(hit_min, hit_size, object_position.0, collider.size) {
            trace!(?object_entity, "Runner overlaps object");
            events.write(GameEvent::Collision(runner_entity, object_entity));
        }
    }
}

/// Applies the gameplay effect of each collision found this tick.
///
/// Collectibles bump counters and score, power-ups replace the active effect,
/// obstacles cost a life unless the shield is up. Every touched object is
/// removed. When the last life is lost the resolver requests the game-over
/// transition exactly once, even if several obstacles hit on the same tick.
pub fn resolver_system(
    mut commands: Commands,
    mut events: EventReader<GameEvent>,
    mut session: ResMut<Session>,
    objects: Query<&ObjectKind, With<ObjectTag>>,
    mut audio: EventWriter<AudioEvent>,
    mut transitions: EventWriter<StageTransition>,
) {
    for event in events.read() {
        let GameEvent::Collision(_, object_entity) = event else {
            continue;
        };
        let Ok(kind) = objects.get(*object_entity) else {
            // Already consumed by an earlier event this tick.
            continue;
        };

        match kind.category() {
            ObjectCategory::Collectible => {
                session.collect(*kind);
                trace!(?kind, score = session.score, "Collectible picked up");
                audio.write(AudioEvent::Cue(Cue::Positive));
            }
            ObjectCategory::PowerUp => {
                if let Some(power_up) = kind.power_up() {
                    session.activate_power_up(power_up);
                }
                audio.write(AudioEvent::Cue(Cue::Success));
            }
            ObjectCategory::Obstacle => {
                if session.shielded() {
                    debug!(?kind, "Obstacle absorbed by shield");
                } else if session.lives > 0 {
                    session.lives -= 1;
                    debug!(?kind, lives = session.lives, "Obstacle hit");
                    audio.write(AudioEvent::Cue(Cue::Negative));
                    if session.lives == 0 {
                        info!(score = session.score, distance = session.distance, "Last life lost");
                        transitions.write(StageTransition::GameOver);
                    }
                }
            }
        }

        commands.entity(*object_entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_overlapping_boxes() {
        assert!(aabb_overlap(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(10.0, 10.0)
        ));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        assert!(!aabb_overlap(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0)
        ));
    }

    #[test]
    fn test_disjoint_boxes() {
        assert!(!aabb_overlap(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(30.0, 30.0),
            Vec2::new(5.0, 5.0)
        ));
    }

    #[test]
    fn test_contained_box_overlaps() {
        assert!(aabb_overlap(
            Vec2::new(0.0, 0.0),
            Vec2::new(40.0, 40.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(5.0, 5.0)
        ));
    }

    #[test]
    fn test_jumping_runner_clears_ground_object() {
        let mut runner = Runner::default();
        let base = crate::constants::player_start_position();
        runner.jump();
        // Ride the arc to its apex.
        for _ in 0..10 {
            runner.step_physics();
        }
        let (min, size) = runner.hitbox(base);

        let kind = ObjectKind::RacingThoughts;
        let object_min = Vec2::new(base.x, crate::constants::GROUND_Y - kind.ground_offset());
        assert!(!aabb_overlap(min, size, object_min, kind.size()));
    }

    #[test]
    fn test_sliding_runner_ducks_under_high_object() {
        let mut runner = Runner::default();
        let base = crate::constants::player_start_position();

        // A box hovering where the standing head would be.
        let object_min = Vec2::new(base.x, base.y + 2.0);
        let object_size = Vec2::new(10.0, 10.0);

        let (min, size) = runner.hitbox(base);
        assert!(aabb_overlap(min, size, object_min, object_size));

        runner.slide();
        let (min, size) = runner.hitbox(base);
        assert!(!aabb_overlap(min, size, object_min, object_size));
    }
}
