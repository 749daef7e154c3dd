//! Components and bundles shared across systems.

use bevy_ecs::prelude::*;
use glam::Vec2;
use strum_macros::EnumIter;

use crate::constants::{lane_center_x, mechanics, LANE_COUNT, PLAYER_SIZE};
use crate::session::PowerUp;

/// The top-left corner of an entity's bounding box, in canvas pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Axis-aligned bounding box extent.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub size: Vec2,
}

/// Marker for the player-controlled runner.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerControlled;

/// Marker for spawned track objects (collectibles, obstacles, power-ups).
#[derive(Component, Debug, Clone, Copy)]
pub struct ObjectTag;

/// The broad gameplay effect of an object on contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectCategory {
    Collectible,
    Obstacle,
    PowerUp,
}

/// Every object subtype the spawner can produce. Each fixes its category,
/// box size, resting height and color.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ObjectKind {
    CalmBubble,
    LightRay,
    FocusSymbol,
    StressCloud,
    RacingThoughts,
    DigitalDistraction,
    BreatheMode,
    SerenityShield,
    ZenMagnet,
}

impl ObjectKind {
    pub fn category(&self) -> ObjectCategory {
        match self {
            Self::CalmBubble | Self::LightRay | Self::FocusSymbol => ObjectCategory::Collectible,
            Self::StressCloud | Self::RacingThoughts | Self::DigitalDistraction => ObjectCategory::Obstacle,
            Self::BreatheMode | Self::SerenityShield | Self::ZenMagnet => ObjectCategory::PowerUp,
        }
    }

    pub fn size(&self) -> Vec2 {
        match self {
            Self::CalmBubble | Self::LightRay | Self::FocusSymbol => Vec2::splat(25.0),
            Self::StressCloud => Vec2::splat(40.0),
            Self::RacingThoughts => Vec2::splat(35.0),
            Self::DigitalDistraction => Vec2::splat(38.0),
            Self::BreatheMode | Self::SerenityShield | Self::ZenMagnet => Vec2::splat(30.0),
        }
    }

    /// How far above the ground line the object rests.
    pub fn ground_offset(&self) -> f32 {
        match self {
            Self::CalmBubble | Self::LightRay | Self::FocusSymbol => 20.0,
            Self::StressCloud => 40.0,
            Self::RacingThoughts => 30.0,
            Self::DigitalDistraction => 35.0,
            Self::BreatheMode | Self::SerenityShield | Self::ZenMagnet => 25.0,
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            Self::CalmBubble => 0xFF38_B6FF,
            Self::LightRay => 0xFFFF_DE59,
            Self::FocusSymbol => 0xFF9D_4EDD,
            Self::StressCloud => 0xFF80_8080,
            Self::RacingThoughts => 0xFFFF_6B6B,
            Self::DigitalDistraction => 0xFF4E_CDC4,
            Self::BreatheMode => 0xFFA8_E6CF,
            Self::SerenityShield => 0xFFFF_D93D,
            Self::ZenMagnet => 0xFFFF_9FF3,
        }
    }

    /// The glyph drawn on top of the object's body.
    pub fn symbol(&self) -> char {
        match self {
            Self::CalmBubble => 'C',
            Self::LightRay => 'L',
            Self::FocusSymbol => 'F',
            Self::StressCloud => 'X',
            Self::RacingThoughts => 'W',
            Self::DigitalDistraction => 'D',
            Self::BreatheMode => 'B',
            Self::SerenityShield => 'S',
            Self::ZenMagnet => 'M',
        }
    }

    /// The effect a power-up object maps to; `None` for everything else.
    pub fn power_up(&self) -> Option<PowerUp> {
        match self {
            Self::BreatheMode => Some(PowerUp::Breathe),
            Self::SerenityShield => Some(PowerUp::Shield),
            Self::ZenMagnet => Some(PowerUp::Magnet),
            _ => None,
        }
    }
}

/// The runner's movement state. The jump arc and the slide countdown are
/// advanced by the physics system once per tick; input only flips the flags.
///
/// Invariant: never jumping and sliding at the same time.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Runner {
    /// One of the three fixed tracks, 0 (left) to 2 (right).
    pub lane: u8,
    pub jumping: bool,
    pub sliding: bool,
    /// Current height above the ground, in `[0, MAX_JUMP_HEIGHT]`.
    pub jump_height: f32,
    /// Remaining slide duration; the slide auto-clears when this hits zero.
    pub slide_ticks: u32,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            lane: 1,
            jumping: false,
            sliding: false,
            jump_height: 0.0,
            slide_ticks: 0,
        }
    }
}

impl Runner {
    /// Shifts the runner one lane left (-1) or right (+1), clamped to the
    /// track. Returns `true` if the lane actually changed.
    pub fn move_lane(&mut self, direction: i8) -> bool {
        let lane = (self.lane as i8 + direction).clamp(0, LANE_COUNT as i8 - 1) as u8;
        let changed = lane != self.lane;
        self.lane = lane;
        changed
    }

    /// Starts a jump. No-op while already jumping or sliding.
    pub fn jump(&mut self) -> bool {
        if self.jumping || self.sliding {
            return false;
        }
        self.jumping = true;
        self.jump_height = 0.0;
        true
    }

    /// Starts a slide. No-op while already jumping or sliding.
    pub fn slide(&mut self) -> bool {
        if self.jumping || self.sliding {
            return false;
        }
        self.sliding = true;
        self.slide_ticks = mechanics::SLIDE_TICKS;
        true
    }

    /// Advances the jump arc and the slide countdown by one tick.
    pub fn step_physics(&mut self) {
        if self.jumping {
            self.jump_height += mechanics::JUMP_STEP;
            if self.jump_height >= mechanics::MAX_JUMP_HEIGHT {
                self.jump_height = mechanics::MAX_JUMP_HEIGHT;
                self.jumping = false;
            }
        } else if self.jump_height > 0.0 {
            self.jump_height = (self.jump_height - mechanics::JUMP_STEP).max(0.0);
        }

        if self.sliding {
            self.slide_ticks = self.slide_ticks.saturating_sub(1);
            if self.slide_ticks == 0 {
                self.sliding = false;
            }
        }
    }

    /// The runner's current hitbox, given its base position. Sliding lowers
    /// and shrinks the silhouette; jumping lifts it by the arc height.
    pub fn hitbox(&self, base: Vec2) -> (Vec2, Vec2) {
        let crouch = if self.sliding { mechanics::SLIDE_CROUCH } else { 0.0 };
        let min = Vec2::new(base.x, base.y - self.jump_height + crouch);
        let size = Vec2::new(PLAYER_SIZE, PLAYER_SIZE - crouch);
        (min, size)
    }

    /// The x coordinate matching the current lane.
    pub fn lane_x(&self) -> f32 {
        lane_center_x(self.lane, PLAYER_SIZE)
    }
}

#[derive(Bundle)]
pub struct RunnerBundle {
    pub runner: Runner,
    pub position: Position,
    pub collider: Collider,
    pub player: PlayerControlled,
}

impl Default for RunnerBundle {
    fn default() -> Self {
        Self {
            runner: Runner::default(),
            position: Position(crate::constants::player_start_position()),
            collider: Collider {
                size: Vec2::splat(PLAYER_SIZE),
            },
            player: PlayerControlled,
        }
    }
}

#[derive(Bundle)]
pub struct ObjectBundle {
    pub kind: ObjectKind,
    pub position: Position,
    pub collider: Collider,
    pub tag: ObjectTag,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_kind_has_a_category() {
        let mut collectibles = 0;
        let mut obstacles = 0;
        let mut power_ups = 0;
        for kind in ObjectKind::iter() {
            match kind.category() {
                ObjectCategory::Collectible => collectibles += 1,
                ObjectCategory::Obstacle => obstacles += 1,
                ObjectCategory::PowerUp => power_ups += 1,
            }
        }
        assert_eq!((collectibles, obstacles, power_ups), (3, 3, 3));
    }

    #[test]
    fn test_power_up_mapping_matches_category() {
        for kind in ObjectKind::iter() {
            assert_eq!(kind.power_up().is_some(), kind.category() == ObjectCategory::PowerUp);
        }
    }

    #[test]
    fn test_lane_clamp_under_rapid_input() {
        let mut runner = Runner::default();
        for _ in 0..20 {
            runner.move_lane(-1);
        }
        assert_eq!(runner.lane, 0);
        for _ in 0..20 {
            runner.move_lane(1);
        }
        assert_eq!(runner.lane, 2);
    }

    #[test]
    fn test_jump_and_slide_are_mutually_exclusive() {
        let mut runner = Runner::default();
        assert!(runner.jump());
        assert!(!runner.slide());
        assert!(!runner.jump());

        let mut runner = Runner::default();
        assert!(runner.slide());
        assert!(!runner.jump());
        assert!(!runner.slide());
    }

    #[test]
    fn test_jump_arc_returns_to_zero() {
        let mut runner = Runner::default();
        runner.jump();
        let mut peak: f32 = 0.0;
        for _ in 0..100 {
            runner.step_physics();
            peak = peak.max(runner.jump_height);
        }
        assert_eq!(peak, mechanics::MAX_JUMP_HEIGHT);
        assert_eq!(runner.jump_height, 0.0);
        assert!(!runner.jumping);
    }

    #[test]
    fn test_slide_auto_clears_after_duration() {
        let mut runner = Runner::default();
        runner.slide();
        for _ in 0..mechanics::SLIDE_TICKS {
            assert!(runner.sliding);
            runner.step_physics();
        }
        assert!(!runner.sliding);
    }

    #[test]
    fn test_sliding_shrinks_hitbox() {
        let mut runner = Runner::default();
        let base = crate::constants::player_start_position();
        let (_, standing) = runner.hitbox(base);
        runner.slide();
        let (min, sliding) = runner.hitbox(base);
        assert!(sliding.y < standing.y);
        assert!(min.y > base.y - 1.0);
    }
}
