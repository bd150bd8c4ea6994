use regex::Regex;

use crate::error::{AnalysisError, Result};

pub const DEFAULT_BARCODE_PATTERN: &str = r"\d{47,48}";

#[derive(Debug, Clone)]
pub struct BarcodeStatus {
    pub valid: bool,
    pub message: String,
}

pub struct BarcodeValidator {
    pattern: Regex,
}

impl BarcodeValidator {
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| AnalysisError::InvalidParameter(format!("barcode pattern: {e}")))?;
        Ok(Self { pattern })
    }

    pub fn validate(&self, text: &str) -> BarcodeStatus {
        if self.pattern.is_match(text) {
            BarcodeStatus {
                valid: true,
                message: "Valid boleto format".into(),
            }
        } else {
            BarcodeStatus {
                valid: false,
                message: "Invalid barcode format".into(),
            }
        }
    }
}
