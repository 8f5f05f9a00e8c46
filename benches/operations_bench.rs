//! Performance benchmarks for pdftools.
//!
//! Run with: cargo bench
//!
//! Inputs are generated with lopdf into a temporary directory before
//! each group runs.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lopdf::content::{Content, Operation as ContentOperation};
use lopdf::{Document, Object, Stream, dictionary};
use pdftools::compress::Compressor;
use pdftools::config::{CompressionLevel, KeyLength, MergeOptions, Metadata};
use pdftools::encrypt::Encryptor;
use pdftools::io::PdfReader;
use pdftools::merge::merge_pdfs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Build a text-only document with `pages` pages.
fn build_document(pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids: Vec<Object> = Vec::new();
    for number in 1..=pages {
        let mut operations = vec![
            ContentOperation::new("BT", vec![]),
            ContentOperation::new("Tf", vec!["F1".into(), 11.into()]),
        ];
        for line in 0..60 {
            operations.push(ContentOperation::new("Td", vec![40.into(), (780 - line * 12).into()]));
            operations.push(ContentOperation::new(
                "Tj",
                vec![Object::string_literal(format!("Benchmark page {number}, line {line}"))],
            ));
        }
        operations.push(ContentOperation::new("ET", vec![]));

        let content = Content { operations }.encode().unwrap();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

fn write_inputs(dir: &Path, count: usize, pages: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let path = dir.join(format!("input_{i}.pdf"));
            build_document(pages).save(&path).unwrap();
            path
        })
        .collect()
}

/// Benchmark: Load PDFs with different worker counts
fn bench_load_parallel(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let paths = write_inputs(temp_dir.path(), 8, 10);
    let reader = PdfReader::new();

    let mut group = c.benchmark_group("load_parallel");

    for workers in [1, 2, 4] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{workers}_workers")),
            &workers,
            |b, &workers| {
                b.to_async(&rt).iter(|| async {
                    let results = reader.load_parallel(black_box(&paths), workers).await;
                    assert_eq!(results.len(), 8);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark: Merge several PDFs without compression
fn bench_merge(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let inputs = write_inputs(temp_dir.path(), 4, 10);

    let options = MergeOptions {
        inputs,
        bookmarks: true,
        compression: CompressionLevel::None,
        metadata: Metadata::default(),
        continue_on_error: false,
        jobs: None,
    };

    c.bench_function("merge_four_pdfs", |b| {
        b.to_async(&rt).iter(|| async {
            let (document, _) = merge_pdfs(black_box(&options)).await.unwrap();
            assert_eq!(document.get_pages().len(), 40);
        });
    });
}

/// Benchmark: Compression levels on an in-memory document
fn bench_compress(c: &mut Criterion) {
    let document = build_document(20);
    let mut group = c.benchmark_group("compress");

    for level in [CompressionLevel::Standard, CompressionLevel::Maximum] {
        group.bench_with_input(BenchmarkId::from_parameter(level), &level, |b, &level| {
            b.iter(|| {
                let mut doc = document.clone();
                Compressor::new().apply(&mut doc, black_box(level))
            });
        });
    }

    group.finish();
}

/// Benchmark: RC4 encryption with both key lengths
fn bench_encrypt(c: &mut Criterion) {
    let document = build_document(20);
    let mut group = c.benchmark_group("encrypt");

    for key_length in [KeyLength::Bits40, KeyLength::Bits128] {
        group.bench_with_input(
            BenchmarkId::from_parameter(key_length.bits()),
            &key_length,
            |b, &key_length| {
                b.iter(|| {
                    let mut doc = document.clone();
                    Encryptor::new()
                        .encrypt_document(&mut doc, "user", "owner", black_box(key_length))
                        .unwrap();
                    doc
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_load_parallel,
    bench_merge,
    bench_compress,
    bench_encrypt
);
criterion_main!(benches);
