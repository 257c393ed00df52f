use image::{imageops, ImageBuffer, Rgb, RgbImage};

use crate::palette::Color;

/// Width of every exported pin
pub const PIN_WIDTH: u32 = 1000;

/// Height of every exported pin (2:3 vertical)
pub const PIN_HEIGHT: u32 = 1500;

/// An axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the given size centered horizontally on a canvas of `canvas_width`
    pub fn centered(canvas_width: u32, y: u32, width: u32, height: u32) -> Self {
        Self::new(canvas_width.saturating_sub(width) / 2, y, width, height)
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// The raster a pin is composed on
///
/// A thin wrapper around an RGB image buffer with the alpha-blending
/// helpers the styles and the typography engine draw with.
#[derive(Clone, Debug)]
pub struct Canvas {
    buffer: RgbImage,
}

impl Canvas {
    /// Create a canvas from an RGB image buffer
    pub fn new(buffer: RgbImage) -> Self {
        Self { buffer }
    }

    /// Create a canvas with the given dimensions filled with the specified color
    pub fn new_filled(width: u32, height: u32, color: Color) -> Self {
        let buffer = ImageBuffer::from_pixel(width, height, Rgb(color.0));
        Self { buffer }
    }

    /// Scale `image` to cover `width`x`height` and crop the overflow around the center
    pub fn cover(image: &RgbImage, width: u32, height: u32) -> Self {
        if image.width() == width && image.height() == height {
            return Self::new(image.clone());
        }

        let scale = f64::max(
            width as f64 / image.width().max(1) as f64,
            height as f64 / image.height().max(1) as f64,
        );
        let scaled_w = ((image.width() as f64 * scale).ceil() as u32).max(width);
        let scaled_h = ((image.height() as f64 * scale).ceil() as u32).max(height);

        let resized = imageops::resize(image, scaled_w, scaled_h, imageops::FilterType::Lanczos3);
        let x = (scaled_w - width) / 2;
        let y = (scaled_h - height) / 2;
        Self::new(imageops::crop_imm(&resized, x, y, width, height).to_image())
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Get a pixel at the given coordinates
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        Color(self.buffer.get_pixel(x, y).0)
    }

    /// Set a pixel, ignoring coordinates outside the canvas
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if let Some((x, y)) = self.clip(x, y) {
            self.buffer.put_pixel(x, y, Rgb(color.0));
        }
    }

    /// Blend `color` over the pixel at (x, y) with the given opacity (0.0-1.0)
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        let Some((x, y)) = self.clip(x, y) else {
            return;
        };
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        let dst = self.buffer.get_pixel_mut(x, y);
        for channel in 0..3 {
            let blended = color.0[channel] as f32 * alpha + dst.0[channel] as f32 * (1.0 - alpha);
            dst.0[channel] = blended.round() as u8;
        }
    }

    /// Fill a rectangle with a translucent color
    pub fn fill_rect(&mut self, rect: Rect, color: Color, alpha: f32) {
        self.fill_rounded_rect(rect, 0, color, alpha);
    }

    /// Fill a rectangle with rounded corners with a translucent color
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: u32, color: Color, alpha: f32) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if inside_rounded(rect, radius, x, y) {
                    self.blend_pixel(x as i64, y as i64, color, alpha);
                }
            }
        }
    }

    /// Stroke the outline of a rounded rectangle
    pub fn stroke_rounded_rect(&mut self, rect: Rect, radius: u32, thickness: u32, color: Color, alpha: f32) {
        if rect.width <= thickness * 2 || rect.height <= thickness * 2 {
            self.fill_rounded_rect(rect, radius, color, alpha);
            return;
        }

        let inner = Rect::new(
            rect.x + thickness,
            rect.y + thickness,
            rect.width - thickness * 2,
            rect.height - thickness * 2,
        );
        let inner_radius = radius.saturating_sub(thickness);

        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if inside_rounded(rect, radius, x, y) && !inside_rounded(inner, inner_radius, x, y) {
                    self.blend_pixel(x as i64, y as i64, color, alpha);
                }
            }
        }
    }

    /// Copy of the pixels under `rect`, clamped to the canvas
    pub fn crop(&self, rect: Rect) -> RgbImage {
        let width = rect.width.min(self.width().saturating_sub(rect.x));
        let height = rect.height.min(self.height().saturating_sub(rect.y));
        imageops::crop_imm(&self.buffer, rect.x, rect.y, width, height).to_image()
    }

    /// Paste an image with its top-left corner at (x, y)
    pub fn paste(&mut self, image: &RgbImage, x: u32, y: u32) {
        imageops::replace(&mut self.buffer, image, x as i64, y as i64);
    }

    /// Paste an image through a rounded-rectangle mask
    pub fn paste_rounded(&mut self, image: &RgbImage, x: u32, y: u32, radius: u32) {
        let rect = Rect::new(0, 0, image.width(), image.height());
        for (px, py, pixel) in image.enumerate_pixels() {
            if inside_rounded(rect, radius, px, py) {
                self.set_pixel((x + px) as i64, (y + py) as i64, Color(pixel.0));
            }
        }
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }

    fn clip(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return None;
        }
        Some((x as u32, y as u32))
    }
}

/// Whether (x, y) lies inside `rect` once its corners are rounded by `radius`
fn inside_rounded(rect: Rect, radius: u32, x: u32, y: u32) -> bool {
    if x < rect.x || y < rect.y || x >= rect.right() || y >= rect.bottom() {
        return false;
    }

    let radius = radius.min(rect.width / 2).min(rect.height / 2) as f32;
    if radius <= 0.0 {
        return true;
    }

    let px = x as f32 + 0.5;
    let py = y as f32 + 0.5;
    let left = rect.x as f32 + radius;
    let right = rect.right() as f32 - radius;
    let top = rect.y as f32 + radius;
    let bottom = rect.bottom() as f32 - radius;

    let cx = px.clamp(left, right);
    let cy = py.clamp(top, bottom);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= radius * radius
}
