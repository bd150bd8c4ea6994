use image::{GrayImage, Luma};
use imageproc::contours::{BorderType, find_contours};
use log::debug;

use crate::{
    detection::{Confidence, Finding, FindingCategory},
    error::Result,
    image_utils::{contour_area, contour_region, normalize_to_u8, sobel_magnitude},
    report::annotation::{AnnotationSurface, SEAM_HIGHLIGHT},
};

#[derive(Debug, Clone)]
pub struct SeamConfig {
    pub contrast_threshold: f64,
    pub min_contour_area: f64,
    /// Sum of mask values below which the detector stays silent, filtering
    /// single-pixel contour noise on clean documents.
    pub min_mask_mass: f64,
    pub overlay_opacity: f32,
}

impl Default for SeamConfig {
    fn default() -> Self {
        Self {
            contrast_threshold: 150.0,
            min_contour_area: 500.0,
            min_mask_mass: 5000.0,
            overlay_opacity: 0.4,
        }
    }
}

pub struct SeamDetector {
    config: SeamConfig,
}

impl SeamDetector {
    pub fn new() -> Self {
        Self {
            config: SeamConfig::default(),
        }
    }

    pub fn with_config(config: SeamConfig) -> Self {
        Self { config }
    }

    pub fn detect(&self, gray: &GrayImage, surface: &mut AnnotationSurface) -> Result<Vec<Finding>> {
        let (width, height) = gray.dimensions();
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        let magnitude = sobel_magnitude(gray);
        let normalized = normalize_to_u8(&magnitude);

        let mut mask = GrayImage::new(width, height);
        let mut mask_mass = 0.0;
        for y in 0..height {
            for x in 0..width {
                if normalized[[y as usize, x as usize]] > self.config.contrast_threshold {
                    mask.put_pixel(x, y, Luma([255]));
                    mask_mass += 255.0;
                }
            }
        }

        if mask_mass <= self.config.min_mask_mass {
            debug!("high-contrast mask mass {mask_mass} below activation floor, no seams reported");
            return Ok(Vec::new());
        }

        let mut findings = Vec::new();
        for contour in find_contours::<u32>(&mask) {
            if contour.border_type != BorderType::Outer {
                continue;
            }
            if contour_area(&contour.points) <= self.config.min_contour_area {
                continue;
            }

            let Some(region) = contour_region(&contour.points, width, height) else {
                continue;
            };

            surface.highlight(&region, SEAM_HIGHLIGHT, self.config.overlay_opacity);
            findings.push(Finding {
                category: FindingCategory::HighContrastSeam,
                explanation: "abrupt contrast change may indicate pasted elements".into(),
                region: Some(region),
                confidence: Confidence::High,
            });
        }

        debug!("seam detector emitted {} finding(s)", findings.len());
        Ok(findings)
    }
}

impl Default for SeamDetector {
    fn default() -> Self {
        Self::new()
    }
}
