pub mod glyphs;
pub mod seams;

use serde::{Deserialize, Serialize};

use crate::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingCategory {
    HighContrastSeam,
    InconsistentGlyphSize,
    LexicalFlag,
    AnalysisFailure,
}

impl FindingCategory {
    pub fn label(&self) -> &'static str {
        match self {
            FindingCategory::HighContrastSeam => "High-contrast seam",
            FindingCategory::InconsistentGlyphSize => "Inconsistent glyph size",
            FindingCategory::LexicalFlag => "Suspicious wording",
            FindingCategory::AnalysisFailure => "Analysis failure",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub category: FindingCategory,
    pub explanation: String,
    pub region: Option<Region>,
    pub confidence: Confidence,
}
