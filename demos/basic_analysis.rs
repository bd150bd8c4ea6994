//! Basic Analysis Example
//!
//! Runs the tampering engine on a payment-slip image and prints every
//! finding with its location and confidence.
//!
//! Run with: cargo run --example basic_analysis -- <image_path> <ocr_text_file>

use std::{env, fs, path::Path};

use boleto_forensics::{
    BoletoAnalyzer, analysis::pixel_stats::PixelStatAnalyzer, error::Result,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Boleto Forensics - Basic Analysis Example");
        println!("=========================================");
        println!();
        println!("Usage: {} <image_path> [ocr_text_file] [output_dir]", args[0]);
        println!();
        println!("Arguments:");
        println!("  image_path    - Path to the payment-slip image to analyze");
        println!("  ocr_text_file - Optional file with the OCR-extracted text");
        println!("  output_dir    - Optional output directory (default: ./output)");
        return Ok(());
    }

    let image_path = &args[1];
    let ocr_text = match args.get(2) {
        Some(path) => fs::read_to_string(path)?,
        None => String::new(),
    };
    let output_dir = args.get(3).map(|s| s.as_str()).unwrap_or("./output");

    if !Path::new(image_path).exists() {
        eprintln!("Error: Image file '{}' not found", image_path);
        std::process::exit(1);
    }

    fs::create_dir_all(output_dir)?;

    println!("📁 Input:  {}", image_path);
    println!("📂 Output: {}", output_dir);
    println!();

    let analyzer = BoletoAnalyzer::new(image_path)?;
    let (width, height) = analyzer.image().dimensions();
    println!("  ✓ Image loaded: {}x{} pixels", width, height);
    println!();

    println!("Running pixel statistics...");
    let pixel_stats = PixelStatAnalyzer::new().analyze(analyzer.image())?;
    println!("  Manipulation score: {:.4}", pixel_stats.score);
    println!("  Edge density:       {:.4}", pixel_stats.edge_density);
    println!();

    println!("Running full tampering analysis...");
    let report = analyzer.analyze(&ocr_text);

    println!();
    println!("  Manipulation score: {:.4}", report.manipulation_score);
    println!(
        "  Flagged:            {}",
        if report.manipulation_flagged { "Yes ⚠️" } else { "No" }
    );
    println!("  Findings:           {}", report.findings.len());
    println!();

    for (i, finding) in report.findings.iter().enumerate() {
        println!(
            "  {}. [{}] {} ({})",
            i + 1,
            finding.confidence.label(),
            finding.category.label(),
            finding.explanation
        );
        if let Some(region) = finding.region {
            println!(
                "     Location: x={}, y={}, {}x{}",
                region.x, region.y, region.width, region.height
            );
        }
    }

    let annotated_output = format!("{}/annotated.png", output_dir);
    report.save_annotated(&annotated_output)?;
    println!();
    println!("Annotated image saved to: {}", annotated_output);

    Ok(())
}
