//! Benchmarks for narrative parsing and page flow.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic narrative with embedded tables.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use narraflow::adapters::{PageDocumentAdapter, SlideDeckAdapter};

/// Creates synthetic narrative with the given number of sections.
fn create_test_narrative(sections: usize) -> String {
    let mut text = String::new();

    for i in 0..sections {
        text.push_str(&format!("## Section {}\n\n", i + 1));
        text.push_str(&"Revenue grew steadily across all regions this quarter. ".repeat(6));
        text.push_str("\n\n- **Key point** one\n- Key point two\n\n");

        // Alternate between the two embedded table encodings
        if i % 2 == 0 {
            text.push_str("```json:table\n[[\"Region\",\"Q1\",\"Q2\"]");
            for r in 0..10 {
                text.push_str(&format!(",[\"R{}\",\"{}\",\"{}\"]", r, r * 3, r * 4));
            }
            text.push_str("]\n```\n\n");
        } else {
            text.push_str("See [[\"Metric\",\"Value\"],[\"margin\",\"12%\"],[\"growth\",\"5%\"]] above.\n\n");
        }

        text.push_str("北京：销售额=120，增长=5%\n上海：销售额=98，增长=3%\n\n");
    }

    text
}

/// Benchmark table extraction.
fn bench_extraction(c: &mut Criterion) {
    let text = create_test_narrative(20);

    c.bench_function("extract_tables", |b| {
        b.iter(|| narraflow::parser::extract_tables(black_box(&text)));
    });
}

/// Benchmark block parsing at various sizes.
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_narrative");

    for sections in [1, 10, 50].iter() {
        let text = create_test_narrative(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| narraflow::parse_narrative(black_box(&text)));
        });
    }

    group.finish();
}

/// Benchmark full render per format.
fn bench_render(c: &mut Criterion) {
    let text = create_test_narrative(20);
    let pdf = PageDocumentAdapter::new();
    let slides = SlideDeckAdapter::new();

    c.bench_function("render_pdf", |b| {
        b.iter(|| narraflow::render_narrative(black_box(&text), &pdf).unwrap());
    });

    c.bench_function("render_slides", |b| {
        b.iter(|| narraflow::render_narrative(black_box(&text), &slides).unwrap());
    });
}

/// Benchmark parallel batch rendering.
fn bench_batch(c: &mut Criterion) {
    let texts: Vec<String> = (0..16).map(|i| create_test_narrative(5 + i % 3)).collect();
    let pdf = PageDocumentAdapter::new();

    c.bench_function("render_batch_16", |b| {
        b.iter(|| narraflow::render_batch(black_box(&texts), &pdf));
    });
}

criterion_group!(
    benches,
    bench_extraction,
    bench_parsing,
    bench_render,
    bench_batch,
);
criterion_main!(benches);
