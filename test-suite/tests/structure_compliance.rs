//! Structure Compliance Tests
//!
//! Every reference document must read back with a consistent object layout
//! and well-formed content streams.

use pretty_assertions::assert_eq;
use quill_pdf_test_suite::generators::scenarios;
use quill_pdf_test_suite::utils::{create_test_output_dir, init_tracing};
use quill_pdf_test_suite::{ContentValidator, ParsedPdf, StructureValidator, SCENARIOS};

fn shown_text(pdf: &[u8]) -> Vec<String> {
    let parsed = ParsedPdf::parse(pdf).unwrap();
    parsed
        .page_contents()
        .unwrap()
        .iter()
        .flat_map(|content| ContentValidator::new().validate(content).unwrap().shown_text())
        .collect()
}

#[test]
fn test_all_scenarios_are_well_formed() {
    init_tracing();
    for scenario in SCENARIOS {
        let pdf = (scenario.build)().unwrap();

        let report = StructureValidator::new().validate(&pdf).unwrap();
        assert!(report.is_valid(), "{}: {:?}", scenario.name, report.errors);
        assert_eq!(report.version, "1.3");

        let parsed = ParsedPdf::parse(&pdf).unwrap();
        for (page, content) in parsed.page_contents().unwrap().iter().enumerate() {
            let content_report = ContentValidator::new().validate(content).unwrap();
            assert!(
                content_report.is_valid(),
                "{} page {}: {:?}",
                scenario.name,
                page + 1,
                content_report.errors
            );
        }
    }
}

#[test]
fn test_hello_world_layout() {
    let pdf = scenarios::hello_world().unwrap();
    let parsed = ParsedPdf::parse(&pdf).unwrap();

    assert_eq!(parsed.page_numbers(), vec![3]);
    assert_eq!(shown_text(&pdf), vec!["Hello World".to_string()]);
    // pages root, resources, page, content, cmap, font, info, catalog
    assert_eq!(parsed.objects.len(), 8);
    assert!(parsed.object(6).unwrap().dict.contains("/BaseFont /Helvetica-Oblique"));
    assert_eq!(parsed.root, 8);
    assert_eq!(parsed.info, Some(7));
}

#[test]
fn test_core_fonts_are_all_embedded_by_name() {
    let pdf = scenarios::core_fonts().unwrap();
    let parsed = ParsedPdf::parse(&pdf).unwrap();
    let fonts: Vec<&str> = parsed
        .objects
        .iter()
        .filter(|o| o.dict.contains("/Type /Font"))
        .map(|o| o.dict.as_str())
        .collect();
    assert_eq!(fonts.len(), 14);

    // Text fonts share one cp1252 CMap; Symbol and ZapfDingbats have their own
    let cmaps = parsed
        .objects
        .iter()
        .filter(|o| o.stream.as_deref().is_some_and(|s| s.starts_with(b"/CIDInit")))
        .count();
    assert_eq!(cmaps, 3);

    let text = shown_text(&pdf);
    assert!(text.contains(&"times BI: Grüße, déjà vu, 50 \u{80}".to_string()));
}

#[test]
fn test_invoice_breaks_once() {
    let pdf = scenarios::invoice_table().unwrap();
    let parsed = ParsedPdf::parse(&pdf).unwrap();
    assert_eq!(parsed.page_numbers().len(), 1);
    assert_eq!(parsed.info_entry("Author").as_deref(), Some("Accounts"));

    let text = shown_text(&pdf);
    assert_eq!(text[0], "Item");
    assert!(text.contains(&"Widget (29)".to_string()));
    assert!(text.contains(&"298.50".to_string()));
}

#[test]
fn test_report_footers_use_final_page_count() {
    let pdf = scenarios::long_report().unwrap();
    let parsed = ParsedPdf::parse(&pdf).unwrap();
    let pages = parsed.page_numbers().len();
    assert!(pages > 1);

    let text = shown_text(&pdf);
    for page in 1..=pages {
        let footer = format!("Page {page} of {pages}");
        assert!(text.contains(&footer), "missing {footer}");
    }
    assert_eq!(
        text.iter().filter(|t| *t == "Quarterly report").count(),
        pages
    );
}

#[test]
fn test_mixed_page_boxes() {
    let pdf = scenarios::mixed_pages().unwrap();
    let parsed = ParsedPdf::parse(&pdf).unwrap();
    let dicts: Vec<&str> = parsed
        .page_numbers()
        .into_iter()
        .map(|n| parsed.object(n).unwrap().dict.as_str())
        .collect();

    assert!(!dicts[0].contains("/MediaBox"));
    assert!(dicts[1].contains("/MediaBox [0 0 841.89 595.28]"));
    assert!(dicts[2].contains("/MediaBox [0 0 420.94 595.28]\n/Rotate 90"));
    assert!(dicts[3].contains("/MediaBox [0 0 300 300]"));

    let catalog = &parsed.object(parsed.root).unwrap().dict;
    assert!(catalog.contains("/OpenAction [3 0 R /Fit]"));
    assert!(catalog.contains("/PageLayout /TwoColumnLeft"));
}

#[test]
fn test_compressed_streams_inflate() {
    let pdf = scenarios::compressed().unwrap();
    let parsed = ParsedPdf::parse(&pdf).unwrap();
    assert!(parsed
        .objects
        .iter()
        .filter(|o| o.stream.is_some())
        .all(|o| o.is_compressed()));
    assert!(shown_text(&pdf).contains(&"Compressed line 19".to_string()));
}

#[test]
fn test_generate_all_writes_files() {
    let dir = create_test_output_dir().unwrap();
    scenarios::generate_all(dir.path()).unwrap();
    for scenario in SCENARIOS {
        let path = dir.path().join(format!("{}.pdf", scenario.name));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.3"));
    }
}
