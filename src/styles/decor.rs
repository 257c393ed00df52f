//! Decoration shared by the styles: vignettes, glass panels and buttons.

use image::imageops;

use crate::{
    canvas::{Canvas, Rect},
    palette::Color,
    typography::{Align, FontFamily, TextBlock, Typesetter},
};

/// Darken toward `color` from `start` (fraction of the height) to the bottom edge
///
/// Opacity grows with the square of the distance so the top stays clear.
pub fn vignette(canvas: &mut Canvas, color: Color, start: f32, strength: f32) {
    let height = canvas.height();
    let first = (height as f32 * start.clamp(0.0, 1.0)) as u32;
    let span = height.saturating_sub(first).max(1) as f32;

    for y in first..height {
        let t = (y - first) as f32 / span;
        let alpha = strength * t * t;
        for x in 0..canvas.width() {
            canvas.blend_pixel(x as i64, y as i64, color, alpha);
        }
    }
}

/// Darken toward `color` from the top edge down to `end`
pub fn top_fade(canvas: &mut Canvas, color: Color, end: f32, strength: f32) {
    let last = (canvas.height() as f32 * end.clamp(0.0, 1.0)) as u32;
    let span = last.max(1) as f32;

    for y in 0..last {
        let t = 1.0 - y as f32 / span;
        let alpha = strength * t * t;
        for x in 0..canvas.width() {
            canvas.blend_pixel(x as i64, y as i64, color, alpha);
        }
    }
}

/// A frosted-glass backdrop for text
#[derive(Debug, Clone, Copy)]
pub struct GlassPanel {
    pub rect: Rect,
    pub radius: u32,
    pub blur: f32,
    pub tint: Color,
    pub tint_alpha: f32,
    pub border: Color,
    pub border_alpha: f32,
    pub border_width: u32,
}

impl GlassPanel {
    pub fn new(rect: Rect, tint: Color) -> Self {
        Self {
            rect,
            radius: 36,
            blur: 18.0,
            tint,
            tint_alpha: 0.35,
            border: Color::WHITE,
            border_alpha: 0.35,
            border_width: 2,
        }
    }

    pub fn tint_alpha(mut self, alpha: f32) -> Self {
        self.tint_alpha = alpha;
        self
    }

    pub fn border(mut self, color: Color, alpha: f32) -> Self {
        self.border = color;
        self.border_alpha = alpha;
        self
    }

    /// Crop the region, blur and tint it, and paste it back with a rounded border
    pub fn draw(&self, canvas: &mut Canvas) {
        let region = canvas.crop(self.rect);
        if region.width() == 0 || region.height() == 0 {
            return;
        }

        let mut frosted = Canvas::new(imageops::blur(&region, self.blur));
        let local = Rect::new(0, 0, frosted.width(), frosted.height());
        frosted.fill_rect(local, self.tint, self.tint_alpha);

        canvas.paste_rounded(frosted.as_image(), self.rect.x, self.rect.y, self.radius);
        let drawn = Rect::new(self.rect.x, self.rect.y, region.width(), region.height());
        canvas.stroke_rounded_rect(drawn, self.radius, self.border_width, self.border, self.border_alpha);
    }
}

/// Draw a pill-shaped button centered horizontally at `top`; returns its bounds
pub fn call_to_action(
    canvas: &mut Canvas,
    typesetter: &Typesetter,
    label: &str,
    top: u32,
    fill: Color,
    text: Color,
) -> Rect {
    let max_width = canvas.width() * 7 / 10;
    let layout = typesetter.fit(label, FontFamily::Display, 40.0, max_width.saturating_sub(80));

    let width = (layout.width.ceil() as u32 + 80).min(max_width);
    let height = (layout.height().ceil() as u32 + 40).max(60);
    let rect = Rect::centered(canvas.width(), top, width, height);

    canvas.fill_rounded_rect(rect, height / 2, fill, 1.0);

    let block = TextBlock {
        text: label,
        anchor: ((canvas.width() / 2) as i32, (top + 20) as i32),
        family: FontFamily::Display,
        max_font_size: layout.font_size,
        max_width: width.saturating_sub(80),
        color: text,
        align: Align::Center,
        shadow: false,
    };
    typesetter.draw_layout(canvas, &layout, &block);
    rect
}

/// Draw a text block over an additive blurred halo of `glow`; returns the y below it
pub fn neon_text(canvas: &mut Canvas, typesetter: &Typesetter, block: &TextBlock<'_>, glow: Color, sigma: f32) -> i32 {
    let layout = typesetter.fit(block.text, block.family, block.max_font_size, block.max_width);
    let next = block.anchor.1 + layout.height().ceil() as i32;

    let pad = (sigma * 3.0).ceil() as u32;
    let top = (block.anchor.1.max(0) as u32).saturating_sub(pad);
    let band = (layout.height().ceil() as u32 + pad * 2).min(canvas.height().saturating_sub(top));
    if band > 0 {
        let mut halo = Canvas::new_filled(canvas.width(), band, Color::BLACK);
        let local = TextBlock {
            anchor: (block.anchor.0, block.anchor.1 - top as i32),
            color: glow,
            shadow: false,
            ..block.clone()
        };
        typesetter.draw_layout(&mut halo, &layout, &local);

        let halo = imageops::blur(halo.as_image(), sigma);
        for (x, y, light) in halo.enumerate_pixels() {
            let base = canvas.get_pixel(x, top + y).0;
            let lit = [0, 1, 2].map(|c| base[c].saturating_add((light.0[c] as f32 * 1.2).min(255.0) as u8));
            canvas.set_pixel(x as i64, (top + y) as i64, Color(lit));
        }
    }

    typesetter.draw_layout(canvas, &layout, block);
    next
}

/// Text color readable on `background`
pub fn contrasting(background: Color) -> Color {
    if background.luma() > 150 {
        Color::rgb(15, 23, 42)
    } else {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TypographyConfig;

    #[test]
    fn test_vignette_darkens_bottom_only() {
        let mut canvas = Canvas::new_filled(20, 100, Color::WHITE);
        vignette(&mut canvas, Color::BLACK, 0.5, 0.9);

        assert_eq!(canvas.get_pixel(10, 10), Color::WHITE);
        assert_eq!(canvas.get_pixel(10, 50), Color::WHITE);
        assert!(canvas.get_pixel(10, 75).luma() < 255);
        assert!(canvas.get_pixel(10, 99).luma() < canvas.get_pixel(10, 75).luma());
    }

    #[test]
    fn test_top_fade_darkens_top_only() {
        let mut canvas = Canvas::new_filled(20, 100, Color::WHITE);
        top_fade(&mut canvas, Color::BLACK, 0.3, 0.8);

        assert!(canvas.get_pixel(10, 0).luma() < 100);
        assert_eq!(canvas.get_pixel(10, 40), Color::WHITE);
    }

    #[test]
    fn test_glass_panel_stays_inside_rect() {
        let mut canvas = Canvas::new_filled(200, 200, Color::rgb(200, 40, 40));
        let rect = Rect::new(50, 50, 100, 80);
        GlassPanel::new(rect, Color::BLACK).tint_alpha(0.5).draw(&mut canvas);

        assert_eq!(canvas.get_pixel(10, 10), Color::rgb(200, 40, 40));
        assert_eq!(canvas.get_pixel(100, 160), Color::rgb(200, 40, 40));
        // Tinted interior
        assert!(canvas.get_pixel(100, 90).luma() < Color::rgb(200, 40, 40).luma());
    }

    #[test]
    fn test_glass_panel_clamped_to_canvas() {
        let mut canvas = Canvas::new_filled(100, 100, Color::WHITE);
        GlassPanel::new(Rect::new(60, 60, 200, 200), Color::BLACK).draw(&mut canvas);
        assert!(canvas.get_pixel(80, 80).luma() < 255);
    }

    #[test]
    fn test_call_to_action_is_centered() {
        let typesetter = Typesetter::builtin(&TypographyConfig::default());
        let mut canvas = Canvas::new_filled(1000, 400, Color::BLACK);
        let rect = call_to_action(&mut canvas, &typesetter, "LEARN MORE", 100, Color::rgb(56, 189, 248), Color::WHITE);

        assert_eq!(rect.y, 100);
        assert!(rect.width <= 700);
        let left_gap = rect.x;
        let right_gap = 1000 - rect.right();
        assert!(left_gap.abs_diff(right_gap) <= 1);
        assert_eq!(canvas.get_pixel(rect.x + rect.width / 2, rect.y + 2), Color::rgb(56, 189, 248));
    }

    #[test]
    fn test_neon_text_lights_surroundings() {
        let typesetter = Typesetter::builtin(&TypographyConfig::default());
        let mut canvas = Canvas::new_filled(600, 300, Color::BLACK);
        let block = TextBlock::centered("NEON", (300, 100), 80.0, 500, Color::WHITE);
        let next = neon_text(&mut canvas, &typesetter, &block, Color::rgb(236, 72, 153), 6.0);

        assert!(next > 100);
        // Halo spills above the glyphs
        assert!((0..600).any(|x| canvas.get_pixel(x, 96).luma() > 0));
        assert!((0..600).all(|x| canvas.get_pixel(x, 0) == Color::BLACK));
    }

    #[test]
    fn test_contrasting_text() {
        assert_eq!(contrasting(Color::WHITE), Color::rgb(15, 23, 42));
        assert_eq!(contrasting(Color::BLACK), Color::WHITE);
    }
}
