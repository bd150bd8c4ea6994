use image::{GrayImage, Luma};
use imageproc::{
    contours::{BorderType, find_contours},
    distance_transform::Norm,
    morphology::dilate,
};
use log::debug;
use ndarray::Array1;

use crate::{
    Region,
    detection::{Confidence, Finding, FindingCategory},
    error::Result,
    image_utils::{contour_area, contour_region},
    report::annotation::{AnnotationSurface, GLYPH_OUTLINE},
};

#[derive(Debug, Clone)]
pub struct GlyphConfig {
    pub binarize_threshold: u8,
    pub min_area: f64,
    pub max_area: f64,
    /// Minimum number of character-scale blobs before the height statistics
    /// are considered meaningful.
    pub min_samples: usize,
    pub std_ratio_threshold: f64,
    pub outlier_sigma: f64,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            binarize_threshold: 150,
            min_area: 100.0,
            max_area: 5000.0,
            min_samples: 10,
            std_ratio_threshold: 0.4,
            outlier_sigma: 2.0,
        }
    }
}

pub struct GlyphUniformityDetector {
    config: GlyphConfig,
}

impl GlyphUniformityDetector {
    pub fn new() -> Self {
        Self {
            config: GlyphConfig::default(),
        }
    }

    pub fn with_config(config: GlyphConfig) -> Self {
        Self { config }
    }

    pub fn detect(&self, gray: &GrayImage, surface: &mut AnnotationSurface) -> Result<Vec<Finding>> {
        let (width, height) = gray.dimensions();
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        // Darker-than-threshold pixels are foreground; dilation merges adjacent
        // character strokes into blob-scale contours.
        let mut mask = GrayImage::new(width, height);
        for (x, y, pixel) in gray.enumerate_pixels() {
            if pixel[0] < self.config.binarize_threshold {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
        let dilated = dilate(&mask, Norm::LInf, 1);

        let mut blobs = Vec::new();
        for contour in find_contours::<u32>(&dilated) {
            if contour.border_type != BorderType::Outer {
                continue;
            }

            let area = contour_area(&contour.points);
            if area <= self.config.min_area || area >= self.config.max_area {
                continue;
            }

            if let Some(region) = contour_region(&contour.points, width, height) {
                blobs.push(region);
            }
        }

        if blobs.len() < self.config.min_samples {
            debug!(
                "only {} glyph-scale blob(s), below the {} needed for height statistics",
                blobs.len(),
                self.config.min_samples
            );
            return Ok(Vec::new());
        }

        let heights = Array1::from_vec(blobs.iter().map(|b| b.height as f64).collect());
        let mean = heights.mean().unwrap_or(0.0);
        let std_dev = heights.std(0.0);

        if mean <= 0.0 || std_dev / mean <= self.config.std_ratio_threshold {
            return Ok(Vec::new());
        }

        let mut findings = Vec::new();
        for region in blobs {
            if (region.height as f64 - mean).abs() > self.config.outlier_sigma * std_dev {
                surface.outline(&region, GLYPH_OUTLINE);
                findings.push(Finding {
                    category: FindingCategory::InconsistentGlyphSize,
                    explanation: "font/size inconsistent with surrounding text".into(),
                    region: Some(region),
                    confidence: Confidence::Medium,
                });
            }
        }

        debug!("glyph uniformity detector emitted {} finding(s)", findings.len());
        Ok(findings)
    }
}

impl Default for GlyphUniformityDetector {
    fn default() -> Self {
        Self::new()
    }
}
