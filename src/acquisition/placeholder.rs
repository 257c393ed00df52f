use image::RgbImage;

use crate::{config::PlaceholderConfig, error::AcquisitionError};

/// Recognises the warm-yellow "slow down" graphic free image endpoints
/// substitute for real output when rate limited.
///
/// Samples an evenly spaced `grid`x`grid` lattice of interior points (the
/// image border is never sampled) and counts samples inside the placeholder
/// color band. More than `max_matches` hits rejects the image.
#[derive(Debug, Clone)]
pub struct PlaceholderDetector {
    config: PlaceholderConfig,
}

impl PlaceholderDetector {
    pub fn new(config: PlaceholderConfig) -> Self {
        Self { config }
    }

    /// The lattice points inspected for an image of the given size
    pub fn sample_points(&self, width: u32, height: u32) -> Vec<(u32, u32)> {
        let grid = self.config.grid as u64;
        let divisions = grid + 1;

        let mut points = Vec::with_capacity((grid * grid) as usize);
        for row in 1..=grid {
            let y = (height as u64 * row / divisions) as u32;
            for col in 1..=grid {
                let x = (width as u64 * col / divisions) as u32;
                points.push((x.min(width.saturating_sub(1)), y.min(height.saturating_sub(1))));
            }
        }
        points
    }

    /// Whether a single pixel falls in the placeholder band
    pub fn in_band(&self, rgb: [u8; 3]) -> bool {
        let [r, g, b] = rgb;
        r >= self.config.red_min
            && g >= self.config.green_min
            && b <= self.config.blue_max
            && r as i16 - b as i16 >= self.config.red_blue_margin as i16
    }

    /// Number of sampled points inside the band
    pub fn count_matches(&self, image: &RgbImage) -> usize {
        if image.width() == 0 || image.height() == 0 {
            return 0;
        }

        self.sample_points(image.width(), image.height())
            .into_iter()
            .filter(|&(x, y)| self.in_band(image.get_pixel(x, y).0))
            .count()
    }

    /// Reject the image if it looks like a placeholder
    pub fn check(&self, image: &RgbImage) -> Result<(), AcquisitionError> {
        let matches = self.count_matches(image);
        if matches > self.config.max_matches {
            return Err(AcquisitionError::Placeholder {
                matches,
                samples: (self.config.grid * self.config.grid) as usize,
            });
        }
        Ok(())
    }
}
