use boleto_forensics::{
    BoletoAnalyzer, Region,
    detection::FindingCategory,
};
use image::{Rgb, RgbImage};

fn blot(image: &mut RgbImage, x: u32, y: u32, width: u32, height: u32) {
    for py in y..y + height {
        for px in x..x + width {
            image.put_pixel(px, py, Rgb([0, 0, 0]));
        }
    }
}

/// White canvas carrying a pasted block, a glyph row with one oversized blob.
fn tampered_slip() -> RgbImage {
    let mut image = RgbImage::from_pixel(400, 300, Rgb([255, 255, 255]));
    for i in 0..11u32 {
        blot(&mut image, 10 + i * 30, 30, 10, 15);
    }
    blot(&mut image, 350, 30, 20, 60);
    blot(&mut image, 150, 150, 100, 100);
    image
}

fn valid_barcode_text() -> String {
    format!("BANCO 001-9\n{}\nvencimento 12/12/2026", "3".repeat(48))
}

#[test]
fn clean_slip_with_valid_barcode_passes() {
    let image = RgbImage::from_pixel(400, 300, Rgb([255, 255, 255]));
    let analyzer = BoletoAnalyzer::from_rgb(image);

    let assessment = analyzer.assess(&valid_barcode_text());

    assert!(!assessment.fraud_detected);
    assert_eq!(assessment.message, "Boleto appears to be valid.");
    assert_eq!(assessment.report.manipulation_score, 0.0);
    assert!(!assessment.report.manipulation_flagged);
    assert!(assessment.report.findings.is_empty());
}

#[test]
fn coarse_keyword_flips_the_verdict_without_touching_the_score() {
    let image = RgbImage::from_pixel(400, 300, Rgb([255, 255, 255]));
    let analyzer = BoletoAnalyzer::from_rgb(image);

    let clean = analyzer.assess(&valid_barcode_text());
    let poisoned = analyzer.assess(&format!("{} pague via pix boleto", valid_barcode_text()));

    assert!(!clean.fraud_detected);
    assert!(poisoned.fraud_detected);
    assert!(poisoned.message.contains("Suspicious keywords"));
    assert_eq!(
        clean.report.manipulation_score,
        poisoned.report.manipulation_score
    );
}

#[test]
fn findings_are_ordered_seams_then_glyphs_then_lexical() {
    let analyzer = BoletoAnalyzer::from_rgb(tampered_slip());
    let report = analyzer.analyze("payment is urgent");

    let categories: Vec<FindingCategory> =
        report.findings.iter().map(|f| f.category).collect();

    assert!(categories.contains(&FindingCategory::HighContrastSeam));
    assert!(categories.contains(&FindingCategory::InconsistentGlyphSize));
    assert!(categories.contains(&FindingCategory::LexicalFlag));

    let rank = |category: &FindingCategory| match category {
        FindingCategory::HighContrastSeam => 0,
        FindingCategory::InconsistentGlyphSize => 1,
        FindingCategory::LexicalFlag => 2,
        FindingCategory::AnalysisFailure => 3,
    };
    assert!(categories.windows(2).all(|w| rank(&w[0]) <= rank(&w[1])));

    // Identical input, identical ordering.
    let again = analyzer.analyze("payment is urgent");
    let categories_again: Vec<FindingCategory> =
        again.findings.iter().map(|f| f.category).collect();
    assert_eq!(categories, categories_again);
}

#[test]
fn pasted_block_is_located_and_flagged() {
    let mut image = RgbImage::from_pixel(200, 200, Rgb([0, 0, 0]));
    for y in 50..150 {
        for x in 50..150 {
            image.put_pixel(x, y, Rgb([255, 255, 255]));
        }
    }
    let block = Region {
        x: 50,
        y: 50,
        width: 100,
        height: 100,
    };

    let analyzer = BoletoAnalyzer::from_rgb(image);
    let report = analyzer.analyze("");

    assert!(report.manipulation_flagged);
    assert!(
        report
            .findings
            .iter()
            .filter(|f| f.category == FindingCategory::HighContrastSeam)
            .any(|f| f.region.unwrap().overlaps(&block))
    );
}

#[test]
fn every_region_lies_within_the_source_bounds() {
    let analyzer = BoletoAnalyzer::from_rgb(tampered_slip());
    let report = analyzer.analyze("urgent payment required");

    for finding in &report.findings {
        if let Some(region) = finding.region {
            assert!(region.width > 0 && region.height > 0);
            assert!(region.x + region.width <= 400);
            assert!(region.y + region.height <= 300);
        }
    }
}

#[test]
fn annotated_image_round_trips_to_disk() {
    let analyzer = BoletoAnalyzer::from_rgb(tampered_slip());
    let report = analyzer.analyze("");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("annotated.png");
    report.save_annotated(&path).unwrap();

    let reloaded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(reloaded, report.annotated_image);
    assert_ne!(reloaded, *analyzer.image());
}

#[test]
fn unanalyzable_input_degrades_to_a_suspicious_verdict() {
    let analyzer = BoletoAnalyzer::from_rgb(RgbImage::new(0, 0));
    let assessment = analyzer.assess(&valid_barcode_text());

    assert!(assessment.fraud_detected);
    assert!(assessment.message.contains("image manipulation"));

    let report = &assessment.report;
    assert!(report.manipulation_flagged);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].category, FindingCategory::AnalysisFailure);
}
