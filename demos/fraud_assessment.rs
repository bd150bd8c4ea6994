//! Fraud Assessment Example
//!
//! Produces the full fraud verdict for a payment slip: barcode format check,
//! keyword scan, and image-tampering analysis, serialized as consumer JSON.
//!
//! Run with: cargo run --example fraud_assessment -- <image_path> <ocr_text_file>

use std::{env, fs};

use boleto_forensics::{BoletoAnalyzer, error::Result, report::JsonReport};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        println!("Boleto Forensics - Fraud Assessment Example");
        println!("===========================================");
        println!();
        println!("Usage: {} <image_path> <ocr_text_file>", args[0]);
        return Ok(());
    }

    let image_path = &args[1];
    let ocr_text = fs::read_to_string(&args[2])?;

    let analyzer = BoletoAnalyzer::new(image_path)?;
    let assessment = analyzer.assess(&ocr_text);

    if assessment.fraud_detected {
        println!("⚠️  FRAUD DETECTED: {}", assessment.message);
    } else {
        println!("✅ {}", assessment.message);
    }
    println!();

    let json = JsonReport::from_assessment(&assessment, &ocr_text)
        .to_json()
        .unwrap_or_default();
    println!("{json}");

    Ok(())
}
