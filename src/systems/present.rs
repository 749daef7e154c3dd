//! Uploads the software framebuffer to the window.

use bevy_ecs::prelude::*;
use bevy_ecs::system::NonSendMut;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;
use tracing::warn;

use crate::surface::FrameBuffer;

/// A non-send resource wrapping the streaming texture the framebuffer is
/// uploaded into each frame.
pub struct BackbufferResource(pub Texture);

/// Copies the framebuffer pixels into the streaming texture and presents it.
pub fn present_system(
    fb: Res<FrameBuffer>,
    mut canvas: NonSendMut<&mut Canvas<Window>>,
    mut backbuffer: NonSendMut<BackbufferResource>,
) {
    if let Err(e) = backbuffer.0.update(None, bytemuck::cast_slice(&fb.pixels), fb.pitch()) {
        warn!(error = %e, "Backbuffer upload failed, dropping frame");
        return;
    }

    canvas.clear();
    if let Err(e) = canvas.copy(&backbuffer.0, None, None) {
        warn!(error = %e, "Backbuffer copy failed, dropping frame");
        return;
    }
    canvas.present();
}
