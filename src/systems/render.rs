//! Draws the scrolling scene into the framebuffer.
//!
//! Runs every frame regardless of stage, so the menu and game-over screens
//! sit on top of a live-looking backdrop. HUD text and overlays are layered
//! afterwards by the HUD system.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::constants::{CANVAS_SIZE, ENVIRONMENTS, GROUND_Y, LANE_COUNT, LANE_WIDTH, PLAYER_SIZE};
use crate::session::{PowerUp, Session};
use crate::surface::FrameBuffer;
use crate::systems::components::{ObjectCategory, ObjectKind, ObjectTag, PlayerControlled, Position, Runner};

const GROUND_COLOR: u32 = 0xFF3E_2723;
const LANE_LINE_COLOR: u32 = 0xFFFF_FFFF;
const BODY_COLOR: u32 = 0xFF38_B6FF;
const SHIELD_BODY_COLOR: u32 = 0xFFFF_D93D;
const SKIN_COLOR: u32 = 0xFF8D_5524;
const HAIR_COLOR: u32 = 0xFF2C_1810;
const BREATHE_AURA_COLOR: u32 = 0xFFA8_E6CF;
const MAGNET_AURA_COLOR: u32 = 0xFFFF_9FF3;

pub fn render_system(
    mut fb: ResMut<FrameBuffer>,
    session: Res<Session>,
    runner: Single<(&Runner, &Position), With<PlayerControlled>>,
    objects: Query<(&ObjectKind, &Position), With<ObjectTag>>,
) {
    draw_backdrop(&mut fb, &session);

    for (kind, position) in objects.iter() {
        draw_object(&mut fb, *kind, position.0);
    }

    let (runner, position) = runner.into_inner();
    draw_runner(&mut fb, runner, position.0, &session);
}

fn draw_backdrop(fb: &mut FrameBuffer, session: &Session) {
    let palette = ENVIRONMENTS[session.environment % ENVIRONMENTS.len()];
    fb.vertical_gradient(palette.colors);

    // Ground strip, slightly translucent so the gradient shows through.
    fb.blend_rect(
        Vec2::new(0.0, GROUND_Y + PLAYER_SIZE),
        Vec2::new(CANVAS_SIZE.x as f32, CANVAS_SIZE.y as f32 - GROUND_Y - PLAYER_SIZE),
        GROUND_COLOR,
        0.6,
    );

    // Lane separators.
    for lane in 1..LANE_COUNT {
        let x = lane as f32 * LANE_WIDTH;
        fb.blend_rect(
            Vec2::new(x - 1.0, 0.0),
            Vec2::new(2.0, GROUND_Y + PLAYER_SIZE),
            LANE_LINE_COLOR,
            0.25,
        );
    }
}

fn draw_object(fb: &mut FrameBuffer, kind: ObjectKind, position: Vec2) {
    let size = kind.size();
    let center = position + size / 2.0;

    match kind.category() {
        // Collectibles are round, everything else boxy.
        ObjectCategory::Collectible => fb.fill_circle(center, size.x / 2.0, kind.color()),
        ObjectCategory::Obstacle | ObjectCategory::PowerUp => fb.fill_rect(position, size, kind.color()),
    }

    let glyph = kind.symbol().to_string();
    let text_x = center.x - FrameBuffer::text_width(&glyph, 2) / 2.0;
    fb.draw_text(&glyph, Vec2::new(text_x, center.y - 7.0), 2, 0xFFFF_FFFF);
}

fn draw_runner(fb: &mut FrameBuffer, runner: &Runner, position: Vec2, session: &Session) {
    let (min, size) = runner.hitbox(position);
    let center = min + size / 2.0;

    // Active power-up auras sit behind the body.
    match session.power_up {
        Some(PowerUp::Breathe) => fb.stroke_circle(center, 50.0, 3.0, BREATHE_AURA_COLOR),
        Some(PowerUp::Magnet) => fb.stroke_circle_dashed(center, 60.0, 3.0, MAGNET_AURA_COLOR, 16),
        _ => {}
    }

    let body_color = if session.shielded() { SHIELD_BODY_COLOR } else { BODY_COLOR };
    fb.fill_rect(min, size, body_color);

    // A simple face: skin band across the upper body, hair above it, two
    // eyes and a mouth line. Squashes along with the slide hitbox.
    let face_height = (size.y * 0.35).max(6.0);
    fb.fill_rect(Vec2::new(min.x + 4.0, min.y + 4.0), Vec2::new(size.x - 8.0, face_height), SKIN_COLOR);
    fb.fill_circle(Vec2::new(center.x, min.y + 3.0), size.x * 0.3, HAIR_COLOR);
    fb.fill_rect(Vec2::new(min.x + 10.0, min.y + 8.0), Vec2::new(4.0, 4.0), 0xFFFF_FFFF);
    fb.fill_rect(Vec2::new(min.x + size.x - 14.0, min.y + 8.0), Vec2::new(4.0, 4.0), 0xFFFF_FFFF);
    fb.fill_rect(
        Vec2::new(min.x + 12.0, min.y + face_height),
        Vec2::new(size.x - 24.0, 2.0),
        HAIR_COLOR,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::player_start_position;

    #[test]
    fn test_backdrop_uses_active_palette() {
        let mut fb = FrameBuffer::default();
        let mut session = Session::default();
        session.environment = 2;
        draw_backdrop(&mut fb, &session);
        assert_eq!(fb.get_pixel(0, 0), Some(ENVIRONMENTS[2].colors[0]));
    }

    #[test]
    fn test_runner_body_reflects_shield() {
        let mut fb = FrameBuffer::default();
        let mut session = Session::default();
        let runner = Runner::default();
        let position = player_start_position();

        draw_runner(&mut fb, &runner, position, &session);
        let center = position + Vec2::splat(PLAYER_SIZE / 2.0);
        let sample = (center.x as i32 + 16, center.y as i32 + 16);
        assert_eq!(fb.get_pixel(sample.0, sample.1), Some(BODY_COLOR));

        session.activate_power_up(PowerUp::Shield);
        draw_runner(&mut fb, &runner, position, &session);
        assert_eq!(fb.get_pixel(sample.0, sample.1), Some(SHIELD_BODY_COLOR));
    }

    #[test]
    fn test_collectibles_are_round() {
        let mut fb = FrameBuffer::default();
        let position = Vec2::new(400.0, 200.0);
        draw_object(&mut fb, ObjectKind::CalmBubble, position);
        // The corner of the bounding box stays untouched for a circle.
        let corner = fb.get_pixel(position.x as i32, position.y as i32);
        assert_ne!(corner, Some(ObjectKind::CalmBubble.color()));
        let center = position + ObjectKind::CalmBubble.size() / 2.0;
        // Sample just off-center so the glyph overlay doesn't interfere.
        assert_eq!(
            fb.get_pixel(center.x as i32 - 10, center.y as i32),
            Some(ObjectKind::CalmBubble.color())
        );
    }
}
