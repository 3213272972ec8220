//! Reference documents
//!
//! Each scenario exercises one area of the layout API and returns the
//! finished file.

use anyhow::{Context, Result};
use quill_pdf::{
    Advance, Border, Cell, Document, HeaderFooter, Orientation, RectStyle, StandardSize,
    TextAlign,
};
use std::fs;
use std::path::Path;

/// A named document builder
pub struct Scenario {
    pub name: &'static str,
    pub build: fn() -> quill_pdf::Result<Vec<u8>>,
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario { name: "hello_world", build: hello_world },
    Scenario { name: "core_fonts", build: core_fonts },
    Scenario { name: "invoice_table", build: invoice_table },
    Scenario { name: "long_report", build: long_report },
    Scenario { name: "mixed_pages", build: mixed_pages },
    Scenario { name: "shapes", build: shapes },
    Scenario { name: "compressed", build: compressed },
];

/// A single italic line on an A4 page
pub fn hello_world() -> quill_pdf::Result<Vec<u8>> {
    let mut doc = Document::new("P", "mm", "A4")?;
    doc.add_page()?;
    doc.set_font("helvetica", "I", 50.0)?;
    doc.set_text_color(0u8)?;
    doc.cell(Cell::new(28.0, 4.5).text("Hello World"))?;
    doc.to_bytes()
}

/// One line in every standard font
pub fn core_fonts() -> quill_pdf::Result<Vec<u8>> {
    let mut doc = Document::default();
    doc.set_title("Standard fonts")?;
    doc.add_page()?;
    for family in ["courier", "helvetica", "times"] {
        for style in ["", "B", "I", "BI"] {
            doc.set_font(family, style, 12.0)?;
            let label = format!("{family} {style}: Grüße, déjà vu, 50 €");
            doc.cell(Cell::new(0.0, 7.0).text(label).advance(Advance::NextLine))?;
        }
    }
    doc.set_font("symbol", "", 12.0)?;
    doc.cell(Cell::new(0.0, 7.0).text("abgd").advance(Advance::NextLine))?;
    doc.set_font("zapfdingbats", "", 12.0)?;
    doc.cell(Cell::new(0.0, 7.0).text("3456").advance(Advance::NextLine))?;
    doc.to_bytes()
}

/// Bordered table with a filled header row
pub fn invoice_table() -> quill_pdf::Result<Vec<u8>> {
    let mut doc = Document::new("P", "mm", "Letter")?;
    doc.set_author("Accounts")?;
    doc.add_page()?;

    doc.set_font("helvetica", "B", 11.0)?;
    doc.set_fill_color((40, 60, 120))?;
    doc.set_text_color(255u8)?;
    doc.set_draw_color(128u8)?;
    for (title, width) in [("Item", 90.0), ("Qty", 25.0), ("Price", 35.0)] {
        doc.cell(
            Cell::new(width, 8.0)
                .text(title)
                .border(Border::Frame)
                .align(TextAlign::Center)
                .fill(true),
        )?;
    }
    doc.ln(None)?;

    doc.set_font("helvetica", "", 10.0)?;
    doc.set_text_color(0u8)?;
    doc.set_fill_color((235, 238, 245))?;
    for row in 0..30 {
        let fill = row % 2 == 1;
        doc.cell(
            Cell::new(90.0, 7.0)
                .text(format!("Widget ({row})"))
                .border("LR".parse()?)
                .fill(fill),
        )?;
        doc.cell(
            Cell::new(25.0, 7.0)
                .text((row + 1).to_string())
                .border("LR".parse()?)
                .align(TextAlign::Right)
                .fill(fill),
        )?;
        doc.cell(
            Cell::new(35.0, 7.0)
                .text(format!("{:.2}", 9.95 * (row + 1) as f64))
                .border("LR".parse()?)
                .align(TextAlign::Right)
                .fill(fill)
                .advance(Advance::NextLine),
        )?;
    }
    doc.cell(Cell::new(150.0, 0.0).border("T".parse()?))?;
    doc.to_bytes()
}

/// Several pages of justified paragraphs with a header and a numbered footer
pub fn long_report() -> quill_pdf::Result<Vec<u8>> {
    let mut doc = Document::default();
    doc.set_title("Quarterly report")?;
    doc.set_alias_nb_pages("{nb}")?;
    doc.set_page_decorator((
        HeaderFooter::new_header("Quarterly report").with_font("helvetica", "B", 12.0),
        HeaderFooter::new_footer("Page {{page_number}} of {{total_pages}}")
            .with_font("helvetica", "I", 8.0),
    ));
    doc.add_page()?;
    doc.set_font("times", "", 12.0)?;

    let paragraph = "Revenue grew in every region during the quarter, driven by new \
                     contracts and steady renewals. Operating costs stayed flat while \
                     headcount rose slightly to support the expansion. ";
    for section in 1..=12 {
        doc.set_font("times", "B", 14.0)?;
        doc.cell(
            Cell::new(0.0, 8.0)
                .text(format!("Section {section}"))
                .advance(Advance::NextLine),
        )?;
        doc.set_font("times", "", 12.0)?;
        doc.multi_cell(0.0, 5.0, &paragraph.repeat(4), Border::None, TextAlign::Justified, false)?;
        doc.ln(Some(4.0))?;
    }
    doc.to_bytes()
}

/// Pages of different sizes, orientations and rotations
pub fn mixed_pages() -> quill_pdf::Result<Vec<u8>> {
    let mut doc = Document::new("P", "pt", "A4")?;
    doc.set_display_mode("fullpage".parse()?, "two".parse()?)?;
    doc.set_font("courier", "", 10.0)?;
    doc.add_page()?;
    doc.cell(Cell::new(0.0, 20.0).text("A4 portrait"))?;
    doc.add_page_with(Some(Orientation::Landscape), None, 0)?;
    doc.cell(Cell::new(0.0, 20.0).text("A4 landscape"))?;
    doc.add_page_with(None, Some(StandardSize::A5.into()), 90)?;
    doc.cell(Cell::new(0.0, 20.0).text("A5 rotated"))?;
    doc.add_page_with(None, Some((300.0, 300.0).into()), 0)?;
    doc.cell(Cell::new(0.0, 20.0).text("Square"))?;
    doc.to_bytes()
}

/// Lines, rectangles and text at absolute positions
pub fn shapes() -> quill_pdf::Result<Vec<u8>> {
    let mut doc = Document::new("L", "cm", "A5")?;
    doc.add_page()?;
    doc.set_line_width(0.1)?;
    doc.set_draw_color((200, 0, 0))?;
    doc.line(1.0, 1.0, 20.0, 1.0)?;
    doc.set_fill_color((0, 200, 0))?;
    doc.rect(2.0, 2.0, 5.0, 3.0, RectStyle::Draw)?;
    doc.rect(8.0, 2.0, 5.0, 3.0, RectStyle::Fill)?;
    doc.rect(14.0, 2.0, 5.0, 3.0, RectStyle::DrawFill)?;
    doc.set_font("helvetica", "U", 14.0)?;
    doc.text(2.0, 8.0, "Underlined (absolute)")?;
    doc.to_bytes()
}

/// Same layout as the hello world, with Flate streams
pub fn compressed() -> quill_pdf::Result<Vec<u8>> {
    let mut doc = Document::new("P", "mm", "A4")?;
    doc.set_compression(true)?;
    doc.add_page()?;
    doc.set_font("helvetica", "", 12.0)?;
    for i in 0..20 {
        doc.cell(
            Cell::new(0.0, 6.0)
                .text(format!("Compressed line {i}"))
                .advance(Advance::NextLine),
        )?;
    }
    doc.to_bytes()
}

/// Write every scenario to `dir` as `<name>.pdf`
pub fn generate_all(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    for scenario in SCENARIOS {
        let bytes = (scenario.build)().with_context(|| format!("Scenario {} failed", scenario.name))?;
        let path = dir.join(format!("{}.pdf", scenario.name));
        fs::write(&path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(scenario = scenario.name, bytes = bytes.len(), "generated");
    }
    Ok(())
}
