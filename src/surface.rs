//! The software render surface.
//!
//! All drawing happens into a plain ARGB8888 pixel buffer owned by the ECS;
//! the presenter uploads it to an SDL streaming texture once per frame. Keeping
//! the surface free of SDL types means every render system is a pure function
//! of game state and can be tested headlessly.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::constants::CANVAS_SIZE;

/// A fixed-size ARGB8888 framebuffer. Coordinates outside the canvas are
/// silently clipped by every primitive.
#[derive(Resource, Debug, Clone)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(CANVAS_SIZE.x, CANVAS_SIZE.y)
    }
}

/// Linearly interpolates two ARGB colors channel-wise.
pub fn lerp_color(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let mut out = 0u32;
    for shift in [24, 16, 8, 0] {
        let ca = ((a >> shift) & 0xFF) as f32;
        let cb = ((b >> shift) & 0xFF) as f32;
        let c = (ca + (cb - ca) * t).round() as u32;
        out |= (c & 0xFF) << shift;
    }
    out
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0xFF00_0000; (width * height) as usize],
        }
    }

    /// Bytes per row, for texture uploads.
    pub fn pitch(&self) -> usize {
        self.width as usize * 4
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.pixels[(y as u32 * self.width + x as u32) as usize] = color;
    }

    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.pixels[(y as u32 * self.width + x as u32) as usize])
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    pub fn fill_rect(&mut self, min: Vec2, size: Vec2, color: u32) {
        let x0 = min.x as i32;
        let y0 = min.y as i32;
        let x1 = (min.x + size.x) as i32;
        let y1 = (min.y + size.y) as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Fills a rect by blending `color` over what is already there.
    /// `alpha` is 0.0 (invisible) to 1.0 (opaque).
    pub fn blend_rect(&mut self, min: Vec2, size: Vec2, color: u32, alpha: f32) {
        let x0 = min.x as i32;
        let y0 = min.y as i32;
        let x1 = (min.x + size.x) as i32;
        let y1 = (min.y + size.y) as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(under) = self.get_pixel(x, y) {
                    self.set_pixel(x, y, lerp_color(under, color, alpha));
                }
            }
        }
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32) {
        let r = radius.ceil() as i32;
        let cx = center.x as i32;
        let cy = center.y as i32;
        let r2 = radius * radius;
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx * dx + dy * dy) as f32 <= r2 {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Draws a circle outline of the given stroke width.
    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: u32) {
        self.stroke_circle_arcs(center, radius, width, color, None);
    }

    /// Like [`stroke_circle`](Self::stroke_circle) but only every other
    /// angular segment is drawn, giving a dashed ring.
    pub fn stroke_circle_dashed(&mut self, center: Vec2, radius: f32, width: f32, color: u32, segments: u32) {
        self.stroke_circle_arcs(center, radius, width, color, Some(segments.max(2)));
    }

    fn stroke_circle_arcs(&mut self, center: Vec2, radius: f32, width: f32, color: u32, segments: Option<u32>) {
        let outer = radius + width / 2.0;
        let inner = (radius - width / 2.0).max(0.0);
        let r = outer.ceil() as i32;
        let cx = center.x as i32;
        let cy = center.y as i32;
        let outer2 = outer * outer;
        let inner2 = inner * inner;
        for dy in -r..=r {
            for dx in -r..=r {
                let d2 = (dx * dx + dy * dy) as f32;
                if d2 > outer2 || d2 < inner2 {
                    continue;
                }
                if let Some(segments) = segments {
                    let angle = (dy as f32).atan2(dx as f32) + std::f32::consts::PI;
                    let segment = (angle / std::f32::consts::TAU * segments as f32) as u32 % segments;
                    if segment % 2 == 1 {
                        continue;
                    }
                }
                self.set_pixel(cx + dx, cy + dy, color);
            }
        }
    }

    /// Fills the whole canvas with a vertical gradient through three stops
    /// (top, middle, bottom).
    pub fn vertical_gradient(&mut self, stops: [u32; 3]) {
        for y in 0..self.height {
            let t = y as f32 / (self.height - 1).max(1) as f32;
            let color = if t < 0.5 {
                lerp_color(stops[0], stops[1], t * 2.0)
            } else {
                lerp_color(stops[1], stops[2], (t - 0.5) * 2.0)
            };
            let row = (y * self.width) as usize;
            self.pixels[row..row + self.width as usize].fill(color);
        }
    }

    /// Draws a string with the built-in 5x7 font at an integer scale.
    /// Unsupported characters render as blanks. Returns the drawn width.
    pub fn draw_text(&mut self, text: &str, origin: Vec2, scale: u32, color: u32) -> f32 {
        let scale = scale.max(1) as i32;
        let mut pen_x = origin.x as i32;
        let pen_y = origin.y as i32;
        for ch in text.chars() {
            if let Some(rows) = glyph(ch) {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..GLYPH_WIDTH {
                        if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                            continue;
                        }
                        for sy in 0..scale {
                            for sx in 0..scale {
                                self.set_pixel(
                                    pen_x + col as i32 * scale + sx,
                                    pen_y + row as i32 * scale + sy,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
            pen_x += (GLYPH_WIDTH as i32 + 1) * scale;
        }
        (pen_x - origin.x as i32) as f32
    }

    /// The width [`draw_text`](Self::draw_text) would cover, for centering.
    pub fn text_width(text: &str, scale: u32) -> f32 {
        (text.chars().count() as u32 * (GLYPH_WIDTH as u32 + 1) * scale.max(1)) as f32
    }
}

const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;

/// Row bitmaps for a character, most significant bit leftmost. Covers
/// uppercase letters, digits and the handful of punctuation the HUD uses.
fn glyph(ch: char) -> Option<[u8; GLYPH_HEIGHT]> {
    let rows = match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b00100, 0b00100, 0b00000, 0b00100, 0b00100, 0b00000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100],
        // Drawn as a filled heart-ish lozenge for the lives display.
        '*' => [0b01010, 0b11111, 0b11111, 0b11111, 0b01110, 0b00100, 0b00000],
        ' ' => [0; GLYPH_HEIGHT],
        _ => return None,
    };
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_matches_canvas() {
        let fb = FrameBuffer::default();
        assert_eq!(fb.width, CANVAS_SIZE.x);
        assert_eq!(fb.height, CANVAS_SIZE.y);
        assert_eq!(fb.pixels.len(), (CANVAS_SIZE.x * CANVAS_SIZE.y) as usize);
    }

    #[test]
    fn test_out_of_bounds_writes_are_clipped() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.set_pixel(-1, 0, 0xFFFF_FFFF);
        fb.set_pixel(0, -1, 0xFFFF_FFFF);
        fb.set_pixel(4, 0, 0xFFFF_FFFF);
        fb.set_pixel(0, 4, 0xFFFF_FFFF);
        assert!(fb.pixels.iter().all(|&p| p == 0xFF00_0000));
    }

    #[test]
    fn test_fill_rect_clips_at_edges() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.fill_rect(Vec2::new(6.0, 6.0), Vec2::new(10.0, 10.0), 0xFFFF_FFFF);
        assert_eq!(fb.get_pixel(7, 7), Some(0xFFFF_FFFF));
        assert_eq!(fb.get_pixel(5, 5), Some(0xFF00_0000));
    }

    #[test]
    fn test_lerp_color_endpoints() {
        assert_eq!(lerp_color(0xFF00_0000, 0xFFFF_FFFF, 0.0), 0xFF00_0000);
        assert_eq!(lerp_color(0xFF00_0000, 0xFFFF_FFFF, 1.0), 0xFFFF_FFFF);
    }

    #[test]
    fn test_lerp_color_midpoint() {
        let mid = lerp_color(0xFF00_0000, 0xFF00_00FF, 0.5);
        let blue = mid & 0xFF;
        assert!((127..=128).contains(&blue));
    }

    #[test]
    fn test_gradient_hits_all_three_stops() {
        let mut fb = FrameBuffer::new(2, 101);
        let stops = [0xFF11_1111, 0xFF55_5555, 0xFF99_9999];
        fb.vertical_gradient(stops);
        assert_eq!(fb.get_pixel(0, 0), Some(stops[0]));
        assert_eq!(fb.get_pixel(0, 50), Some(stops[1]));
        assert_eq!(fb.get_pixel(0, 100), Some(stops[2]));
    }

    #[test]
    fn test_blend_rect_at_full_alpha_is_opaque() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.blend_rect(Vec2::ZERO, Vec2::new(4.0, 4.0), 0xFFAB_CDEF, 1.0);
        assert_eq!(fb.get_pixel(2, 2), Some(0xFFAB_CDEF));
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let mut fb = FrameBuffer::new(21, 21);
        fb.fill_circle(Vec2::new(10.0, 10.0), 5.0, 0xFFFF_FFFF);
        assert_eq!(fb.get_pixel(10, 10), Some(0xFFFF_FFFF));
        assert_eq!(fb.get_pixel(10, 4), Some(0xFF00_0000));
        assert_eq!(fb.get_pixel(17, 10), Some(0xFF00_0000));
    }

    #[test]
    fn test_stroke_circle_leaves_center_empty() {
        let mut fb = FrameBuffer::new(41, 41);
        fb.stroke_circle(Vec2::new(20.0, 20.0), 15.0, 3.0, 0xFFFF_FFFF);
        assert_eq!(fb.get_pixel(20, 20), Some(0xFF00_0000));
        assert_eq!(fb.get_pixel(20 + 15, 20), Some(0xFFFF_FFFF));
    }

    #[test]
    fn test_dashed_circle_draws_fewer_pixels_than_solid() {
        let mut solid = FrameBuffer::new(61, 61);
        solid.stroke_circle(Vec2::new(30.0, 30.0), 20.0, 2.0, 0xFFFF_FFFF);
        let mut dashed = FrameBuffer::new(61, 61);
        dashed.stroke_circle_dashed(Vec2::new(30.0, 30.0), 20.0, 2.0, 0xFFFF_FFFF, 12);
        let count = |fb: &FrameBuffer| fb.pixels.iter().filter(|&&p| p == 0xFFFF_FFFF).count();
        assert!(count(&dashed) < count(&solid));
        assert!(count(&dashed) > 0);
    }

    #[test]
    fn test_text_is_drawn_and_width_matches() {
        let mut fb = FrameBuffer::new(100, 20);
        let drawn = fb.draw_text("SCORE 42", Vec2::new(2.0, 2.0), 1, 0xFFFF_FFFF);
        assert_eq!(drawn, FrameBuffer::text_width("SCORE 42", 1));
        assert!(fb.pixels.iter().any(|&p| p == 0xFFFF_FFFF));
    }

    #[test]
    fn test_unknown_characters_render_blank() {
        let mut fb = FrameBuffer::new(40, 20);
        fb.draw_text("~~~", Vec2::new(0.0, 0.0), 1, 0xFFFF_FFFF);
        assert!(fb.pixels.iter().all(|&p| p == 0xFF00_0000));
    }
}
