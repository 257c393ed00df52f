use image::{Rgb, RgbImage};

use crate::palette::Color;

/// Procedural vertical gradient from `top` to `bottom`, the last-resort background
pub fn vertical_gradient(width: u32, height: u32, top: Color, bottom: Color) -> RgbImage {
    let span = height.saturating_sub(1).max(1) as f32;
    RgbImage::from_fn(width, height, |_, y| Rgb(top.lerp(bottom, y as f32 / span).0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        let top = Color::rgb(15, 23, 42);
        let bottom = Color::rgb(56, 189, 248);
        let image = vertical_gradient(4, 11, top, bottom);

        assert_eq!(image.dimensions(), (4, 11));
        assert_eq!(image.get_pixel(0, 0).0, top.0);
        assert_eq!(image.get_pixel(3, 10).0, bottom.0);
        // Rows are uniform
        assert_eq!(image.get_pixel(0, 5), image.get_pixel(3, 5));
    }

    #[test]
    fn test_single_row() {
        let image = vertical_gradient(3, 1, Color::WHITE, Color::BLACK);
        assert_eq!(image.get_pixel(1, 0).0, Color::WHITE.0);
    }
}
