//! Document Generation Benchmarks
//!
//! Measures layout calls and serialization for documents of growing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quill_pdf::{Advance, Border, Cell, Document, TextAlign};
use quill_pdf_test_suite::generators::scenarios;

/// Build a document of `pages` pages filled with wrapped paragraphs
fn paragraphs(pages: usize, compress: bool) -> Vec<u8> {
    let mut doc = Document::default();
    doc.set_compression(compress).unwrap();
    doc.set_alias_nb_pages("{nb}").unwrap();
    doc.set_font("times", "", 11.0).unwrap();
    let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
                tempor incididunt ut labore et dolore magna aliqua. ";
    for _ in 0..pages {
        doc.add_page().unwrap();
        doc.multi_cell(0.0, 5.0, &text.repeat(20), Border::None, TextAlign::Justified, false)
            .unwrap();
    }
    doc.to_bytes().unwrap()
}

fn benchmark_paragraphs(c: &mut Criterion) {
    let mut group = c.benchmark_group("paragraphs");
    group.sample_size(20);

    for pages in [1, 10, 50] {
        group.bench_with_input(BenchmarkId::new("plain", pages), &pages, |b, &pages| {
            b.iter(|| black_box(paragraphs(pages, false)));
        });
        group.bench_with_input(BenchmarkId::new("compressed", pages), &pages, |b, &pages| {
            b.iter(|| black_box(paragraphs(pages, true)));
        });
    }
    group.finish();
}

fn benchmark_cells(c: &mut Criterion) {
    c.bench_function("table_1000_cells", |b| {
        b.iter(|| {
            let mut doc = Document::default();
            doc.add_page().unwrap();
            doc.set_font("helvetica", "", 8.0).unwrap();
            for i in 0..1000 {
                let advance = if i % 5 == 4 { Advance::NextLine } else { Advance::Right };
                doc.cell(
                    Cell::new(30.0, 5.0)
                        .text(format!("cell {i}"))
                        .border(Border::Frame)
                        .advance(advance),
                )
                .unwrap();
            }
            black_box(doc.to_bytes().unwrap())
        });
    });
}

fn benchmark_string_width(c: &mut Criterion) {
    let mut doc = Document::default();
    doc.set_font("helvetica", "B", 12.0).unwrap();
    let text = "The quick brown fox jumps over the lazy dog ".repeat(10);
    c.bench_function("get_string_width", |b| {
        b.iter(|| black_box(doc.get_string_width(black_box(&text)).unwrap()));
    });
}

fn benchmark_scenarios(c: &mut Criterion) {
    c.bench_function("invoice_table", |b| {
        b.iter(|| black_box(scenarios::invoice_table().unwrap()));
    });
}

criterion_group!(
    benches,
    benchmark_paragraphs,
    benchmark_cells,
    benchmark_string_width,
    benchmark_scenarios
);
criterion_main!(benches);
