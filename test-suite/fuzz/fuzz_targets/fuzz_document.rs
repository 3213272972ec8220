#![no_main]

use libfuzzer_sys::fuzz_target;
use quill_pdf::{Advance, Border, Cell, Document, TextAlign};
use quill_pdf_test_suite::StructureValidator;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let mut doc = Document::default();
    if let Ok(title) = std::str::from_utf8(&data[4..]) {
        let _ = doc.set_title(title);
    }
    if doc.add_page().is_err() {
        return;
    }

    // Select font and alignment based on the first bytes
    let family = ["courier", "helvetica", "times", "symbol", "zapfdingbats"][data[0] as usize % 5];
    let style = ["", "B", "I", "BIU"][data[1] as usize % 4];
    let align = [TextAlign::Left, TextAlign::Center, TextAlign::Right, TextAlign::Justified]
        [data[2] as usize % 4];
    let _ = doc.set_font(family, style, 6.0 + (data[3] % 40) as f64);

    // Text through every layout path; must not panic
    let text = String::from_utf8_lossy(&data[4..]).into_owned();
    let _ = doc.cell(Cell::new(0.0, 5.0).text(text.clone()).advance(Advance::NextLine));
    let _ = doc.multi_cell(60.0, 5.0, &text, Border::Frame, align, true);
    let _ = doc.text(20.0, 200.0, &text);

    if let Ok(pdf) = doc.to_bytes() {
        let report = StructureValidator::new().validate(&pdf).expect("readable structure");
        assert!(report.is_valid(), "{:?}", report.errors);
    }
});
