use image::RgbImage;
use imageproc::edges::canny;
use log::debug;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    error::{AnalysisError, Result},
    image_utils::{gaussian_blur_5x5, gray_to_array, rgb_to_gray},
};

#[derive(Debug, Clone)]
pub struct PixelStatConfig {
    pub diff_threshold: f64,
    pub score_threshold: f64,
    pub canny_low: f32,
    pub canny_high: f32,
}

impl Default for PixelStatConfig {
    fn default() -> Self {
        Self {
            diff_threshold: 30.0,
            score_threshold: 0.1,
            canny_low: 50.0,
            canny_high: 150.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PixelStatResult {
    pub score: f64,
    pub flagged: bool,
    /// Fraction of Canny edge pixels. Preparatory signal only; it does not
    /// feed the manipulation score.
    pub edge_density: f64,
}

pub struct PixelStatAnalyzer {
    config: PixelStatConfig,
}

impl PixelStatAnalyzer {
    pub fn new() -> Self {
        Self {
            config: PixelStatConfig::default(),
        }
    }

    pub fn with_config(config: PixelStatConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, image: &RgbImage) -> Result<PixelStatResult> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(AnalysisError::InvalidImage(
                "zero-area image cannot be converted to grayscale".into(),
            ));
        }

        let gray = rgb_to_gray(image);

        let edges = canny(&gray, self.config.canny_low, self.config.canny_high);
        let edge_density = edges.pixels().filter(|p| p[0] > 0).count() as f64
            / (width as f64 * height as f64);

        let gray_arr = gray_to_array(&gray);
        let blurred = gaussian_blur_5x5(&gray_arr);
        let diff_threshold = self.config.diff_threshold;

        // Luminance mass concentrated in abrupt local discontinuities, relative
        // to the total luminance mass of the document.
        let (diff_mass, gray_mass) = (0..height as usize)
            .into_par_iter()
            .map(|y| {
                let mut diff_sum = 0.0;
                let mut gray_sum = 0.0;
                for x in 0..width as usize {
                    let value = gray_arr[[y, x]];
                    gray_sum += value;
                    if (value - blurred[[y, x]]).abs() >= diff_threshold {
                        diff_sum += 255.0;
                    }
                }
                (diff_sum, gray_sum)
            })
            .reduce(|| (0.0, 0.0), |a, b| (a.0 + b.0, a.1 + b.1));

        let score = if gray_mass > 0.0 {
            diff_mass / gray_mass
        } else {
            0.0
        };

        debug!("manipulation score {score:.4}, edge density {edge_density:.4}");

        Ok(PixelStatResult {
            score,
            flagged: score > self.config.score_threshold,
            edge_density,
        })
    }
}

impl Default for PixelStatAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
