//! # Editorial Filter Stage
//!
//! Pure image transforms applied between acquisition and composition:
//! film grain, a saturation/contrast boost, soft bloom, and the
//! luminance-masked double-exposure blend used by the visionary style.
//!
//! Every pass is deterministic. Grain comes from a fixed-seed generator
//! per row so the parallel and sequential results are identical.

use image::{imageops, GrayImage, RgbImage};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::palette::luma;

const GRAIN_SEED: u64 = 0x5EED_F114;
const GRAIN_AMPLITUDE: f32 = 6.0;
const SATURATION: f32 = 1.2;
const CONTRAST: f32 = 1.1;
const BLOOM_SIGMA: f32 = 12.0;
const BLOOM_OPACITY: f32 = 0.15;
const EXPOSURE_MASK_SIGMA: f32 = 6.0;

/// Grain, color enhancement and bloom, in that order
pub fn apply_filters(image: &RgbImage) -> RgbImage {
    debug!("Applying editorial filters to {}x{}", image.width(), image.height());

    let mut graded = image.clone();
    grade(&mut graded);
    bloom(&graded, BLOOM_SIGMA, BLOOM_OPACITY)
}

/// Merge `overlay` into a monochrome version of `base` through the overlay's blurred luminance
///
/// Bright regions of the overlay show through, dark regions leave the
/// monochrome base visible. The overlay is resized to the base first.
pub fn blend_double_exposure(base: &RgbImage, overlay: &RgbImage) -> RgbImage {
    let (width, height) = base.dimensions();
    let overlay = if overlay.dimensions() == (width, height) {
        overlay.clone()
    } else {
        imageops::resize(overlay, width, height, imageops::FilterType::Triangle)
    };
    let mask = luminance_mask(&overlay, EXPOSURE_MASK_SIGMA);

    let mut output = RgbImage::new(width, height);
    let row_len = width as usize * 3;
    output
        .par_chunks_mut(row_len.max(1))
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            for (x, pixel) in row.chunks_exact_mut(3).enumerate() {
                let x = x as u32;
                let mono = luma(base.get_pixel(x, y).0) as f32;
                let over = overlay.get_pixel(x, y).0;
                let m = mask.get_pixel(x, y).0[0] as f32 / 255.0;
                for c in 0..3 {
                    pixel[c] = (over[c] as f32 * m + mono * (1.0 - m)).round().clamp(0.0, 255.0) as u8;
                }
            }
        });
    output
}

/// Blurred grayscale of `image`
pub fn luminance_mask(image: &RgbImage, sigma: f32) -> GrayImage {
    imageops::blur(&imageops::grayscale(image), sigma)
}

/// Grain plus saturation and contrast, one row per task
fn grade(image: &mut RgbImage) {
    let row_len = image.width() as usize * 3;
    if row_len == 0 {
        return;
    }

    image.par_chunks_mut(row_len).enumerate().for_each(|(y, row)| {
        let mut rng = SmallRng::seed_from_u64(GRAIN_SEED ^ y as u64);
        for pixel in row.chunks_exact_mut(3) {
            let grain = rng.gen_range(-GRAIN_AMPLITUDE..=GRAIN_AMPLITUDE);
            let rgb = [pixel[0], pixel[1], pixel[2]];
            let gray = luma(rgb) as f32;
            for c in 0..3 {
                let saturated = gray + (rgb[c] as f32 - gray) * SATURATION;
                let contrasted = (saturated - 128.0) * CONTRAST + 128.0;
                pixel[c] = (contrasted + grain).round().clamp(0.0, 255.0) as u8;
            }
        }
    });
}

/// Blend a blurred copy over the original at `opacity`
fn bloom(image: &RgbImage, sigma: f32, opacity: f32) -> RgbImage {
    let blurred = imageops::blur(image, sigma);
    let mut output = image.clone();
    output
        .pixels_mut()
        .zip(blurred.pixels())
        .for_each(|(sharp, soft)| {
            for c in 0..3 {
                let mixed = sharp.0[c] as f32 * (1.0 - opacity) + soft.0[c] as f32 * opacity;
                sharp.0[c] = mixed.round() as u8;
            }
        });
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn checker(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            if (x / 8 + y / 8) % 2 == 0 {
                Rgb([200, 60, 40])
            } else {
                Rgb([30, 90, 160])
            }
        })
    }

    #[test]
    fn test_filters_are_deterministic() {
        let image = checker(64, 48);
        let first = apply_filters(&image);
        let second = apply_filters(&image);

        assert_eq!(first.dimensions(), (64, 48));
        assert_eq!(first, second);
        assert_ne!(first, image);
    }

    #[test]
    fn test_saturation_pushes_colors_apart() {
        let image = RgbImage::from_pixel(32, 32, Rgb([180, 100, 100]));
        let graded = apply_filters(&image);
        let center = graded.get_pixel(16, 16).0;

        // Red lead over green grows beyond grain noise
        assert!(center[0] as i32 - center[1] as i32 > 80 + 6);
    }

    #[test]
    fn test_double_exposure_follows_overlay_luminance() {
        let base = RgbImage::from_pixel(40, 40, Rgb([200, 20, 20]));
        let mut overlay = RgbImage::from_pixel(80, 80, Rgb([0, 0, 0]));
        for y in 0..80 {
            for x in 40..80 {
                overlay.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }

        let blended = blend_double_exposure(&base, &overlay);
        assert_eq!(blended.dimensions(), (40, 40));

        // Dark overlay side keeps the monochrome base
        let left = blended.get_pixel(1, 20).0;
        let mono = luma([200, 20, 20]);
        assert!(left.iter().all(|&c| (c as i32 - mono as i32).abs() <= 3));
        assert_eq!(left[0], left[1]);

        // Bright side shows the overlay
        let right = blended.get_pixel(38, 20).0;
        assert!(right.iter().all(|&c| c > 240));
    }

    #[test]
    fn test_double_exposure_is_deterministic() {
        let base = checker(30, 30);
        let overlay = checker(45, 20);
        assert_eq!(blend_double_exposure(&base, &overlay), blend_double_exposure(&base, &overlay));
    }
}
