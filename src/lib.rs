use std::path::Path;

use image::{DynamicImage, RgbImage};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    analysis::pixel_stats::PixelStatConfig,
    detection::{glyphs::GlyphConfig, seams::SeamConfig},
    error::Result,
    lexical::{
        LexicalConfig, LexicalFlagger,
        barcode::{BarcodeStatus, BarcodeValidator, DEFAULT_BARCODE_PATTERN},
    },
    report::{FraudAssessment, ReportBuilder, TamperingReport},
};

pub mod analysis;
pub mod detection;
pub mod error;
pub mod image_utils;
pub mod lexical;
pub mod report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn overlaps(&self, other: &Region) -> bool {
        !(self.x + self.width <= other.x
            || other.x + other.width <= self.x
            || self.y + self.height <= other.y
            || other.y + other.height <= self.y)
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub pixel: PixelStatConfig,
    pub seam: SeamConfig,
    pub glyph: GlyphConfig,
    pub lexical: LexicalConfig,
    pub barcode_pattern: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pixel: PixelStatConfig::default(),
            seam: SeamConfig::default(),
            glyph: GlyphConfig::default(),
            lexical: LexicalConfig::default(),
            barcode_pattern: DEFAULT_BARCODE_PATTERN.to_string(),
        }
    }
}

/// Engine facade. Owns one decoded payment-slip image; OCR text arrives
/// pre-extracted from an external engine.
pub struct BoletoAnalyzer {
    original: RgbImage,
    config: EngineConfig,
}

impl BoletoAnalyzer {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let original = image::open(path)?.to_rgb8();

        Ok(Self {
            original,
            config: EngineConfig::default(),
        })
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            original: image.to_rgb8(),
            config: EngineConfig::default(),
        }
    }

    pub fn from_rgb(image: RgbImage) -> Self {
        Self {
            original: image,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn image(&self) -> &RgbImage {
        &self.original
    }

    pub fn analyze(&self, ocr_text: &str) -> TamperingReport {
        ReportBuilder::new(&self.config).build(&self.original, ocr_text)
    }

    pub fn assess(&self, ocr_text: &str) -> FraudAssessment {
        let report = self.analyze(ocr_text);

        let flagger = LexicalFlagger::with_config(self.config.lexical.clone());
        let keyword_hit = flagger.has_fraud_keyword(ocr_text);

        let barcode = match BarcodeValidator::from_pattern(&self.config.barcode_pattern) {
            Ok(validator) => validator.validate(ocr_text),
            Err(err) => {
                warn!("barcode validation unavailable: {err}");
                BarcodeStatus {
                    valid: false,
                    message: format!("barcode pattern configuration error: {err}"),
                }
            }
        };

        FraudAssessment::compose(report, &barcode, keyword_hit)
    }
}
