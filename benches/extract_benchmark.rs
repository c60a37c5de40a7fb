//! Benchmarks for layoutscan extraction performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run against synthetic documents built with lopdf.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Build a synthetic document where every page carries a heading, a body
/// paragraph, and a two-column grid.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => Object::Reference(font_id) },
    });

    let mut kids: Vec<Object> = Vec::new();
    for i in 0..page_count {
        let mut operations = Vec::new();
        operations.extend(text_ops(&format!("Page {} heading", i + 1), 72.0, 750.0, 18.0));
        for line in 0..10 {
            operations.extend(text_ops(
                "Body text for performance measurement of span extraction.",
                72.0,
                710.0 - line as f32 * 16.0,
                12.0,
            ));
        }
        for row in 0..4 {
            let y = 500.0 - row as f32 * 20.0;
            operations.extend(text_ops("left", 72.0, y, 12.0));
            operations.extend(text_ops("right", 300.0, y, 12.0));
        }

        let content = Content { operations };
        let stream_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => Object::Reference(resources_id),
            "Contents" => Object::Reference(stream_id),
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn text_ops(text: &str, x: f32, y: f32, size: f32) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), Object::Real(size)]),
        Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

/// Benchmark PDF format detection.
fn bench_format_detection(c: &mut Criterion) {
    let pdf_data = create_test_pdf(1);
    let non_pdf_data = b"Not a PDF file at all, just random text content";

    c.bench_function("detect_valid_pdf", |b| {
        b.iter(|| layoutscan::detect_version_from_bytes(black_box(&pdf_data)).unwrap());
    });

    c.bench_function("detect_non_pdf", |b| {
        b.iter(|| layoutscan::detect_version_from_bytes(black_box(non_pdf_data)).is_err());
    });
}

/// Benchmark full-document extraction at various sizes.
fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    for page_count in [1, 5, 20].iter() {
        let data = create_test_pdf(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| layoutscan::analyze_bytes(black_box(&data)).unwrap());
        });

        group.bench_function(format!("{}_pages_parallel", page_count), |b| {
            b.iter(|| {
                let options = layoutscan::ExtractOptions::new().parallel();
                layoutscan::analyze_bytes_with_options(black_box(&data), options).unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark report serialization.
fn bench_report_json(c: &mut Criterion) {
    let data = create_test_pdf(5);
    let report = layoutscan::analyze_bytes(&data).unwrap();

    c.bench_function("report_to_json", |b| {
        b.iter(|| {
            report
                .to_json(black_box(layoutscan::JsonFormat::Pretty))
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_extraction,
    bench_report_json,
);
criterion_main!(benches);
