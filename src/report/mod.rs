pub mod annotation;

use std::path::Path;

use image::RgbImage;
use log::{debug, warn};
use serde::Serialize;

use crate::{
    EngineConfig,
    analysis::pixel_stats::PixelStatAnalyzer,
    detection::{Confidence, Finding, FindingCategory, glyphs::GlyphUniformityDetector, seams::SeamDetector},
    error::{AnalysisError, Result},
    image_utils::rgb_to_gray,
    lexical::{LexicalFlagger, barcode::BarcodeStatus},
    report::annotation::AnnotationSurface,
};

#[derive(Debug, Clone)]
pub struct TamperingReport {
    pub manipulation_score: f64,
    pub manipulation_flagged: bool,
    pub findings: Vec<Finding>,
    pub annotated_image: RgbImage,
}

impl TamperingReport {
    pub fn save_annotated<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.annotated_image.save(path)?;
        Ok(())
    }
}

pub struct ReportBuilder<'a> {
    config: &'a EngineConfig,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Never fails past this boundary: an unanalyzable input degrades to a
    /// conservative "treat as suspicious" report.
    pub fn build(&self, image: &RgbImage, ocr_text: &str) -> TamperingReport {
        match self.try_build(image, ocr_text) {
            Ok(report) => report,
            Err(err) => {
                warn!("analysis degraded: {err}");
                self.degraded(image, &err)
            }
        }
    }

    fn try_build(&self, image: &RgbImage, ocr_text: &str) -> Result<TamperingReport> {
        let pixel_stats =
            PixelStatAnalyzer::with_config(self.config.pixel.clone()).analyze(image)?;

        let gray = rgb_to_gray(image);
        let mut surface = AnnotationSurface::new(image);
        let mut findings = Vec::new();

        // Fixed evaluation order: seams, then glyphs, then lexical flags. A
        // sub-detector that cannot run contributes zero findings.
        match SeamDetector::with_config(self.config.seam.clone()).detect(&gray, &mut surface) {
            Ok(mut seam_findings) => findings.append(&mut seam_findings),
            Err(err) => warn!("seam detection skipped: {err}"),
        }

        match GlyphUniformityDetector::with_config(self.config.glyph.clone())
            .detect(&gray, &mut surface)
        {
            Ok(mut glyph_findings) => findings.append(&mut glyph_findings),
            Err(err) => warn!("glyph uniformity detection skipped: {err}"),
        }

        findings.extend(LexicalFlagger::with_config(self.config.lexical.clone()).detect(ocr_text));

        debug!(
            "report built: score {:.4}, {} finding(s)",
            pixel_stats.score,
            findings.len()
        );

        Ok(TamperingReport {
            manipulation_score: pixel_stats.score,
            manipulation_flagged: pixel_stats.flagged,
            findings,
            annotated_image: surface.into_image(),
        })
    }

    fn degraded(&self, image: &RgbImage, err: &AnalysisError) -> TamperingReport {
        // Score pinned above the flagging threshold so the report invariant
        // (flagged == score > threshold) holds on the degraded path too.
        TamperingReport {
            manipulation_score: self.config.pixel.score_threshold + 1.0,
            manipulation_flagged: true,
            findings: vec![Finding {
                category: FindingCategory::AnalysisFailure,
                explanation: format!("analysis failed ({err}); treating document as suspicious"),
                region: None,
                confidence: Confidence::Low,
            }],
            annotated_image: image.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FraudAssessment {
    pub fraud_detected: bool,
    pub message: String,
    pub report: TamperingReport,
}

impl FraudAssessment {
    pub fn compose(report: TamperingReport, barcode: &BarcodeStatus, keyword_hit: bool) -> Self {
        let mut reasons = Vec::new();

        if !barcode.valid {
            reasons.push(format!("Invalid barcode: {}", barcode.message));
        }
        if keyword_hit {
            reasons.push("Suspicious keywords found in text".to_string());
        }
        if report.manipulation_flagged {
            reasons.push("Potential image manipulation detected".to_string());
        }

        let fraud_detected = !reasons.is_empty();
        let message = if fraud_detected {
            reasons.join(" | ")
        } else {
            "Boleto appears to be valid.".to_string()
        };

        Self {
            fraud_detected,
            message,
            report,
        }
    }
}

#[derive(Serialize)]
pub struct JsonReport {
    pub fraud_detected: bool,
    pub message: String,
    pub manipulation_score: f64,
    pub manipulation_flagged: bool,
    pub suspicious_areas: Vec<SuspiciousArea>,
    pub extracted_text: String,
}

#[derive(Serialize)]
pub struct SuspiciousArea {
    pub area: String,
    pub confidence: String,
    pub explanation: String,
    pub coordinates: Option<[u32; 4]>,
}

impl JsonReport {
    pub fn from_assessment(assessment: &FraudAssessment, extracted_text: &str) -> Self {
        let report = &assessment.report;

        Self {
            fraud_detected: assessment.fraud_detected,
            message: assessment.message.clone(),
            manipulation_score: report.manipulation_score,
            manipulation_flagged: report.manipulation_flagged,
            suspicious_areas: report
                .findings
                .iter()
                .map(|finding| SuspiciousArea {
                    area: finding.category.label().to_string(),
                    confidence: finding.confidence.label().to_string(),
                    explanation: finding.explanation.clone(),
                    coordinates: finding
                        .region
                        .map(|r| [r.x, r.y, r.width, r.height]),
                })
                .collect(),
            extracted_text: extracted_text.to_string(),
        }
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
