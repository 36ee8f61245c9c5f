//! Benchmarks for PDF text reconstruction and format extraction.
//!
//! Measures both fragment regimes and the plain-text extractors on
//! in-memory documents of increasing size.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use docsift_core::DocumentFormat;
use docsift_extract::ExtractorRegistry;
use docsift_extract::reconstruct::reconstruct;

/// Sample prose used to build fragment streams.
const SAMPLE_TEXT: &str = "Quarterly results exceeded expectations. Revenue grew 12% to $4.2 million, \
driven by R&D investment in the analytics platform. Operating costs fell slightly. \
The board approved a dividend of $0.15 per share, payable next quarter.";

/// Generate text of roughly the given size (in KB).
fn generate_text(size_kb: usize) -> String {
    let repetitions = (size_kb * 1024) / SAMPLE_TEXT.len() + 1;
    [SAMPLE_TEXT].repeat(repetitions).join("\n")
}

/// Word-level fragments, as drawn by most generators.
fn block_fragments(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// One fragment per glyph, with capitals drawn twice as a bold effect.
fn glyph_fragments(text: &str) -> Vec<String> {
    let mut fragments = Vec::with_capacity(text.len());
    for c in text.chars() {
        fragments.push(c.to_string());
        if c.is_uppercase() {
            fragments.push(c.to_string());
        }
    }
    fragments
}

fn reconstruct_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct");

    for size_kb in [1, 10, 100].iter() {
        let text = generate_text(*size_kb);
        group.throughput(Throughput::Bytes(text.len() as u64));

        let blocks = block_fragments(&text);
        group.bench_with_input(
            BenchmarkId::new("block", format!("{}kb", size_kb)),
            &blocks,
            |b, fragments| b.iter(|| black_box(reconstruct(fragments))),
        );

        let glyphs = glyph_fragments(&text);
        group.bench_with_input(
            BenchmarkId::new("character", format!("{}kb", size_kb)),
            &glyphs,
            |b, fragments| b.iter(|| black_box(reconstruct(fragments))),
        );
    }

    group.finish();
}

fn extraction_benchmark(c: &mut Criterion) {
    let registry = ExtractorRegistry::with_defaults();
    let mut group = c.benchmark_group("extraction");

    for size_kb in [1, 10, 100].iter() {
        let text = generate_text(*size_kb);

        let html: String = text
            .lines()
            .map(|line| format!("<p>{line}</p>"))
            .collect::<Vec<_>>()
            .concat();
        let html = format!("<html><head><title>Report</title></head><body>{html}</body></html>");

        let xml: String = text
            .lines()
            .map(|line| format!("<entry>{line}</entry>"))
            .collect::<Vec<_>>()
            .concat();
        let xml = format!("<?xml version=\"1.0\"?><report>{xml}</report>");

        for (format, body) in [
            (DocumentFormat::Txt, text.as_bytes()),
            (DocumentFormat::Html, html.as_bytes()),
            (DocumentFormat::Xml, xml.as_bytes()),
        ] {
            group.throughput(Throughput::Bytes(body.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(format.extension(), format!("{}kb", size_kb)),
                body,
                |b, data| b.iter(|| black_box(registry.extract(format, data))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, reconstruct_benchmark, extraction_benchmark);
criterion_main!(benches);
