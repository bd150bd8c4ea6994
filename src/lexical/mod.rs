pub mod barcode;

use log::debug;

use crate::detection::{Confidence, Finding, FindingCategory};

#[derive(Debug, Clone)]
pub struct LexicalConfig {
    /// Urgency and social-engineering phrases reported as individual findings.
    pub fine_phrases: Vec<String>,
    /// Overlapping vocabulary feeding the coarse fraud verdict.
    pub coarse_phrases: Vec<String>,
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            fine_phrases: [
                "pay urgently",
                "confidential",
                "urgent",
                "pay today",
                "secret",
                "do not share",
                "restricted payment",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            coarse_phrases: ["altered", "modified", "urgent payment", "pix boleto"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

pub struct LexicalFlagger {
    config: LexicalConfig,
}

impl LexicalFlagger {
    pub fn new() -> Self {
        Self {
            config: LexicalConfig::default(),
        }
    }

    pub fn with_config(config: LexicalConfig) -> Self {
        Self { config }
    }

    /// One finding per distinct matched phrase, regardless of how many times
    /// it occurs in the text. No positional information without OCR boxes.
    pub fn detect(&self, text: &str) -> Vec<Finding> {
        let haystack = text.to_lowercase();
        let mut findings = Vec::new();

        for phrase in &self.config.fine_phrases {
            if haystack.contains(&phrase.to_lowercase()) {
                findings.push(Finding {
                    category: FindingCategory::LexicalFlag,
                    explanation: format!(
                        "suspicious phrase \"{phrase}\" found in document text"
                    ),
                    region: None,
                    confidence: Confidence::High,
                });
            }
        }

        debug!("lexical flagger matched {} phrase(s)", findings.len());
        findings
    }

    pub fn has_fraud_keyword(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        self.config
            .coarse_phrases
            .iter()
            .any(|phrase| haystack.contains(&phrase.to_lowercase()))
    }
}

impl Default for LexicalFlagger {
    fn default() -> Self {
        Self::new()
    }
}
