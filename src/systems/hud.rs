//! Text overlays: in-run HUD, pause dimmer, menu and game-over screens.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::constants::CANVAS_SIZE;
use crate::session::Session;
use crate::surface::FrameBuffer;
use crate::systems::state::{BestScore, GameStage, LastRun, PauseState};

const TEXT_COLOR: u32 = 0xFFFF_FFFF;
const SHADOW_COLOR: u32 = 0xFF1A_1A2E;
const ACCENT_COLOR: u32 = 0xFFFF_DE59;

pub fn hud_system(
    mut fb: ResMut<FrameBuffer>,
    stage: Res<GameStage>,
    pause_state: Res<PauseState>,
    session: Res<Session>,
    best: Res<BestScore>,
    last_run: Res<LastRun>,
) {
    match *stage {
        GameStage::Menu => draw_menu(&mut fb, best.0),
        GameStage::Playing => {
            draw_run_hud(&mut fb, &session);
            if pause_state.active() {
                draw_pause_overlay(&mut fb);
            }
        }
        GameStage::GameOver => {
            draw_run_hud(&mut fb, &session);
            draw_game_over(&mut fb, &session, best.0, &last_run);
        }
    }
}

/// Draws a line of text with a one-pixel drop shadow for legibility against
/// the gradient.
fn shadowed(fb: &mut FrameBuffer, text: &str, origin: Vec2, scale: u32, color: u32) {
    fb.draw_text(text, origin + Vec2::splat(scale as f32), scale, SHADOW_COLOR);
    fb.draw_text(text, origin, scale, color);
}

fn centered(fb: &mut FrameBuffer, text: &str, y: f32, scale: u32, color: u32) {
    let x = (CANVAS_SIZE.x as f32 - FrameBuffer::text_width(text, scale)) / 2.0;
    shadowed(fb, text, Vec2::new(x, y), scale, color);
}

fn draw_run_hud(fb: &mut FrameBuffer, session: &Session) {
    shadowed(fb, &format!("SCORE {}", session.score), Vec2::new(10.0, 10.0), 2, TEXT_COLOR);
    shadowed(fb, &format!("DIST {}", session.distance), Vec2::new(10.0, 30.0), 2, TEXT_COLOR);
    shadowed(fb, &format!("COINS {}", session.coins), Vec2::new(10.0, 50.0), 2, TEXT_COLOR);

    // Lives as filled markers, top-right.
    let hearts = "*".repeat(session.lives as usize);
    let x = CANVAS_SIZE.x as f32 - FrameBuffer::text_width(&hearts, 3) - 10.0;
    shadowed(fb, &hearts, Vec2::new(x, 10.0), 3, 0xFFFF_6B6B);

    if let Some(power_up) = session.power_up {
        let label = format!("{} {}", power_up.to_string().to_uppercase(), session.power_up_seconds());
        centered(fb, &label, 10.0, 2, ACCENT_COLOR);
    }
}

fn draw_pause_overlay(fb: &mut FrameBuffer) {
    fb.blend_rect(
        Vec2::ZERO,
        Vec2::new(CANVAS_SIZE.x as f32, CANVAS_SIZE.y as f32),
        0xFF00_0000,
        0.5,
    );
    centered(fb, "PAUSED", 170.0, 4, TEXT_COLOR);
    centered(fb, "SPACE TO RESUME", 210.0, 2, TEXT_COLOR);
}

fn draw_menu(fb: &mut FrameBuffer, best: u32) {
    centered(fb, "TRANQUIL RUN", 110.0, 5, TEXT_COLOR);
    centered(fb, "COLLECT CALM. DODGE STRESS.", 165.0, 2, TEXT_COLOR);
    if best > 0 {
        centered(fb, &format!("BEST {best}"), 200.0, 2, ACCENT_COLOR);
    }
    centered(fb, "PRESS ENTER TO START", 250.0, 2, TEXT_COLOR);
    centered(fb, "ESC TO QUIT", 275.0, 2, TEXT_COLOR);
}

fn draw_game_over(fb: &mut FrameBuffer, session: &Session, best: u32, last_run: &LastRun) {
    fb.blend_rect(
        Vec2::ZERO,
        Vec2::new(CANVAS_SIZE.x as f32, CANVAS_SIZE.y as f32),
        0xFF00_0000,
        0.55,
    );
    centered(fb, "RUN COMPLETE", 90.0, 4, TEXT_COLOR);
    centered(fb, &format!("SCORE {}", session.score), 140.0, 3, TEXT_COLOR);
    if last_run.new_best {
        centered(fb, "NEW BEST!", 175.0, 3, ACCENT_COLOR);
    } else {
        centered(fb, &format!("BEST {best}"), 175.0, 2, TEXT_COLOR);
    }
    centered(fb, &format!("XP EARNED {}", last_run.experience), 210.0, 2, TEXT_COLOR);
    centered(fb, "ENTER TO PLAY AGAIN", 260.0, 2, TEXT_COLOR);
    centered(fb, "ESC FOR MENU", 285.0, 2, TEXT_COLOR);
}
