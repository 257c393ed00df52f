use std::fmt;
use std::path::Path;

use rusttype::{point, Font, Scale};

use crate::{canvas::Canvas, error::TypographyError, palette::Color};

use super::bitmap::{self, CELL_COLUMNS, CELL_ROWS, GLYPH_COLUMNS, GLYPH_ROWS};

/// A font the typesetter can measure and draw with
pub enum Typeface {
    /// TrueType/OpenType outlines rasterised with rusttype
    Outline { name: String, font: Font<'static> },
    /// The built-in 5x7 bitmap font, scaled to the requested size
    Bitmap,
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Typeface").field(&self.name()).finish()
    }
}

impl Typeface {
    /// Load a TrueType font from disk
    pub fn load(path: &Path) -> Result<Self, TypographyError> {
        let data = std::fs::read(path)
            .map_err(|_| TypographyError::FontLoadFailed { path: path.display().to_string() })?;
        let font = Font::try_from_vec(data)
            .ok_or_else(|| TypographyError::InvalidFont { path: path.display().to_string() })?;

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::Outline { name, font })
    }

    pub fn builtin() -> Self {
        Self::Bitmap
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Outline { name, .. } => name,
            Self::Bitmap => "builtin-5x7",
        }
    }

    /// Advance width of `text` set at `size` pixels
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        match self {
            Self::Outline { font, .. } => {
                let scale = Scale::uniform(size);
                let mut width = 0.0;
                let mut previous = None;
                for ch in text.chars() {
                    let glyph = font.glyph(ch).scaled(scale);
                    if let Some(prev) = previous {
                        width += font.pair_kerning(scale, prev, glyph.id());
                    }
                    width += glyph.h_metrics().advance_width;
                    previous = Some(glyph.id());
                }
                width
            }
            Self::Bitmap => {
                let count = text.chars().count() as u32;
                if count == 0 {
                    return 0.0;
                }
                let dot = size / CELL_ROWS as f32;
                (count * CELL_COLUMNS - 1) as f32 * dot
            }
        }
    }

    /// Draw one line of text with its top-left corner at (`x`, `y`)
    pub fn draw(&self, canvas: &mut Canvas, text: &str, x: f32, y: f32, size: f32, color: Color, alpha: f32) {
        match self {
            Self::Outline { font, .. } => {
                let scale = Scale::uniform(size);
                let baseline = y + font.v_metrics(scale).ascent;
                let mut caret = x;
                let mut previous = None;

                for ch in text.chars() {
                    let scaled = font.glyph(ch).scaled(scale);
                    if let Some(prev) = previous {
                        caret += font.pair_kerning(scale, prev, scaled.id());
                    }
                    let advance = scaled.h_metrics().advance_width;
                    previous = Some(scaled.id());

                    let glyph = scaled.positioned(point(caret, baseline));
                    if let Some(bb) = glyph.pixel_bounding_box() {
                        glyph.draw(|gx, gy, coverage| {
                            canvas.blend_pixel(
                                (bb.min.x + gx as i32) as i64,
                                (bb.min.y + gy as i32) as i64,
                                color,
                                coverage * alpha,
                            );
                        });
                    }
                    caret += advance;
                }
            }
            Self::Bitmap => {
                let dot = size / CELL_ROWS as f32;
                for (index, ch) in text.chars().enumerate() {
                    let cell_x = x + (index as u32 * CELL_COLUMNS) as f32 * dot;
                    for column in 0..GLYPH_COLUMNS {
                        for row in 0..GLYPH_ROWS {
                            if !bitmap::is_set(ch, column, row) {
                                continue;
                            }
                            let x0 = (cell_x + column as f32 * dot).round() as i64;
                            let x1 = (cell_x + (column + 1) as f32 * dot).round() as i64;
                            let y0 = (y + row as f32 * dot).round() as i64;
                            let y1 = (y + (row + 1) as f32 * dot).round() as i64;
                            for py in y0..y1.max(y0 + 1) {
                                for px in x0..x1.max(x0 + 1) {
                                    canvas.blend_pixel(px, py, color, alpha);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_measure_scales_linearly() {
        let face = Typeface::builtin();
        assert_eq!(face.measure("", 40.0), 0.0);
        // One glyph: five dots wide at size / 8 per dot
        assert_eq!(face.measure("A", 80.0), 50.0);
        assert_eq!(face.measure("AB", 80.0), 110.0);
        assert!(face.measure("HELLO", 20.0) < face.measure("HELLO", 40.0));
    }

    #[test]
    fn test_bitmap_draw_stays_inside_measure() {
        let face = Typeface::builtin();
        let mut canvas = Canvas::new_filled(200, 60, Color::BLACK);
        face.draw(&mut canvas, "WIDE", 10.0, 10.0, 32.0, Color::WHITE, 1.0);

        let right_edge = 10.0 + face.measure("WIDE", 32.0);
        let mut inked = 0;
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.get_pixel(x, y) != Color::BLACK {
                    inked += 1;
                    assert!((x as f32) < right_edge + 1.0, "ink at {x} beyond {right_edge}");
                }
            }
        }
        assert!(inked > 0);
    }

    #[test]
    fn test_debug_names_the_face() {
        assert_eq!(format!("{:?}", Typeface::builtin()), "Typeface(\"builtin-5x7\")");
    }

    #[test]
    fn test_missing_font_file() {
        let err = Typeface::load(Path::new("/no/such/font.ttf")).unwrap_err();
        assert!(matches!(err, TypographyError::FontLoadFailed { .. }));
    }

    #[test]
    fn test_garbage_font_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let err = Typeface::load(&path).unwrap_err();
        assert!(matches!(err, TypographyError::InvalidFont { .. }));
    }
}
