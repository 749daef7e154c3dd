//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::{UVec2, Vec2};

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of the logical canvas, in pixels. The window is scaled up from this.
pub const CANVAS_SIZE: UVec2 = UVec2::new(800, 400);

/// The scale factor for the window.
pub const SCALE: f32 = 1.5;

/// The number of lanes the runner and objects occupy.
pub const LANE_COUNT: u8 = 3;
/// The width of a single lane, in pixels.
pub const LANE_WIDTH: f32 = CANVAS_SIZE.x as f32 / LANE_COUNT as f32;

/// The side length of the runner's (unsquashed) bounding box, in pixels.
pub const PLAYER_SIZE: f32 = 40.0;
/// The vertical position the runner stands at, measured to the top of its box.
pub const GROUND_Y: f32 = CANVAS_SIZE.y as f32 - 80.0;

/// The key under which the best score is persisted.
pub const BEST_SCORE_KEY: &str = "tranquil-run-best";

/// Gameplay tuning values. All durations are in ticks at the nominal 60 Hz rate.
pub mod mechanics {
    /// Pixels the jump arc rises (and later falls) per tick.
    pub const JUMP_STEP: f32 = 8.0;
    /// The apex of the jump arc, in pixels above the ground.
    pub const MAX_JUMP_HEIGHT: f32 = 80.0;
    /// How long a slide lasts before it auto-clears (30 ticks = 500 ms).
    pub const SLIDE_TICKS: u32 = 30;
    /// How much the runner's hitbox shrinks (and drops) while sliding.
    pub const SLIDE_CROUCH: f32 = 20.0;

    /// Scroll speed at the start of a run, in pixels per tick.
    pub const BASE_SPEED: f32 = 2.0;
    /// The scroll speed cap.
    pub const MAX_SPEED: f32 = 8.0;
    /// Speed gained at each distance milestone.
    pub const SPEED_INCREMENT: f32 = 0.5;
    /// Distance between speed milestones. Each milestone also rotates the environment.
    pub const MILESTONE_DISTANCE: u32 = 500;

    /// How long a collected power-up stays active.
    pub const POWER_UP_TICKS: u32 = 300;

    /// Chance of spawning an object on any given tick. Independent of scroll
    /// speed, so the expected spawn rate scales with tick rate only.
    pub const SPAWN_CHANCE: f32 = 0.02;

    /// Lives at the start of a run.
    pub const STARTING_LIVES: u8 = 3;

    /// Objects scrolled past this x coordinate are pruned.
    pub const OFFSCREEN_X: f32 = -50.0;
}

/// Point values and experience weights.
pub mod scoring {
    pub const CALM_BUBBLE_POINTS: u32 = 10;
    pub const LIGHT_RAY_POINTS: u32 = 15;
    pub const FOCUS_SYMBOL_POINTS: u32 = 20;
    /// Focus symbols also grant coins on top of their score value.
    pub const FOCUS_SYMBOL_COINS: u32 = 5;

    pub const XP_SCORE_DIVISOR: u32 = 10;
    pub const XP_CALM_BUBBLE_WEIGHT: u32 = 2;
    pub const XP_LIGHT_RAY_WEIGHT: u32 = 3;
}

/// A background palette the scenery cycles through as the run progresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    /// Top, middle and bottom stops of the vertical background gradient.
    pub colors: [u32; 3],
}

/// The three visual environments, rotated at each distance milestone.
pub const ENVIRONMENTS: [Palette; 3] = [
    Palette {
        name: "Zen Garden",
        colors: [0xFFA8_E6CF, 0xFF88_D8A3, 0xFF4F_9F7F],
    },
    Palette {
        name: "Thought Forest",
        colors: [0xFF6B_8E52, 0xFF8F_B069, 0xFFA8_CC7A],
    },
    Palette {
        name: "Calm Sky",
        colors: [0xFF87_CEEB, 0xFFB6_E5FF, 0xFFD4_EDFF],
    },
];

/// Returns the horizontal position of the left edge of a box of `width`
/// centered in the given lane.
pub fn lane_center_x(lane: u8, width: f32) -> f32 {
    lane as f32 * LANE_WIDTH + LANE_WIDTH / 2.0 - width / 2.0
}

/// The runner's spawn position (middle lane, standing on the ground).
pub fn player_start_position() -> Vec2 {
    Vec2::new(lane_center_x(1, PLAYER_SIZE), GROUND_Y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        // 60 FPS = 16.67ms per frame
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_canvas_size() {
        assert_eq!(CANVAS_SIZE.x, 800);
        assert_eq!(CANVAS_SIZE.y, 400);
    }

    #[test]
    fn test_lane_width_covers_canvas() {
        let total = LANE_WIDTH * LANE_COUNT as f32;
        assert!((total - CANVAS_SIZE.x as f32).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ground_leaves_room_for_jump() {
        assert!(GROUND_Y - mechanics::MAX_JUMP_HEIGHT > 0.0);
    }

    #[test]
    fn test_jump_arc_divides_evenly() {
        // The arc must land back on exactly zero with fixed steps.
        let steps = mechanics::MAX_JUMP_HEIGHT / mechanics::JUMP_STEP;
        assert_eq!(steps.fract(), 0.0);
    }

    #[test]
    fn test_lane_center_x() {
        assert_eq!(lane_center_x(0, 40.0), LANE_WIDTH / 2.0 - 20.0);
        assert_eq!(lane_center_x(2, 40.0), 2.0 * LANE_WIDTH + LANE_WIDTH / 2.0 - 20.0);
    }

    #[test]
    fn test_player_starts_in_middle_lane() {
        let start = player_start_position();
        assert!(start.x > LANE_WIDTH && start.x < 2.0 * LANE_WIDTH);
        assert_eq!(start.y, GROUND_Y);
    }

    #[test]
    fn test_environment_palettes() {
        assert_eq!(ENVIRONMENTS.len(), 3);
        for palette in ENVIRONMENTS.iter() {
            assert!(!palette.name.is_empty());
            for color in palette.colors {
                // Every gradient stop is fully opaque.
                assert_eq!(color >> 24, 0xFF);
            }
        }
    }

    #[test]
    fn test_speed_ramp_reaches_cap() {
        let milestones = ((mechanics::MAX_SPEED - mechanics::BASE_SPEED) / mechanics::SPEED_INCREMENT) as u32;
        assert_eq!(milestones, 12);
    }
}
