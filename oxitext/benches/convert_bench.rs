//! Benchmarks for the conversion helpers.
//!
//! This benchmark suite evaluates:
//! - Whole-buffer decoding through the registry
//! - Encoding with numeric character reference fallback
//! - Streaming transcoding between two encodings

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxitext::{
    EncodeFallback, Encoding, TranscodeOptions, decode_to_string, encode_to_bytes,
    encode_to_bytes_with, transcode,
};
use std::hint::black_box;

/// Mixed Latin, Cyrillic and Japanese text.
fn sample_text(size: usize) -> String {
    let chunk = "Mixed text: caf\u{E9}, \u{41F}\u{440}\u{438}\u{432}\u{435}\u{442}, \
                 \u{65E5}\u{672C}\u{8A9E}\u{306E}\u{6587}\u{7AE0}. ";
    chunk.repeat(size / chunk.len() + 1)
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_to_string");
    let text = sample_text(64 * 1024);

    for label in ["utf-8", "shift_jis", "gb18030", "utf-16le"] {
        let Some(encoding) = Encoding::for_label(label) else {
            continue;
        };
        let bytes = encode_to_bytes(&text, encoding);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), &bytes, |b, bytes| {
            b.iter(|| black_box(decode_to_string(encoding, bytes)));
        });
    }

    group.finish();
}

fn bench_encode_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_fallback");
    let text = sample_text(64 * 1024);
    group.throughput(Throughput::Bytes(text.len() as u64));

    for label in ["windows-1252", "koi8-r", "euc-kr"] {
        let Some(encoding) = Encoding::for_label(label) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("question", label), &text, |b, text| {
            b.iter(|| black_box(encode_to_bytes(text, encoding)));
        });
        group.bench_with_input(BenchmarkId::new("ncr", label), &text, |b, text| {
            b.iter(|| {
                black_box(encode_to_bytes_with(
                    text,
                    encoding,
                    EncodeFallback::NumericReference,
                ))
            });
        });
    }

    group.finish();
}

fn bench_transcode(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcode");
    let text = sample_text(64 * 1024);
    let pairs = [
        (Encoding::ShiftJis, Encoding::Utf8),
        (Encoding::Utf8, Encoding::EucJp),
        (Encoding::Utf8, Encoding::Iso2022Jp),
    ];

    for (from, to) in pairs {
        let input = encode_to_bytes(&text, from);
        group.throughput(Throughput::Bytes(input.len() as u64));
        let id = format!("{from}_to_{to}");
        group.bench_with_input(BenchmarkId::from_parameter(id), &input, |b, input| {
            b.iter(|| {
                let out = Vec::with_capacity(input.len() * 2);
                let result = transcode(
                    input.as_slice(),
                    from,
                    out,
                    to,
                    TranscodeOptions::default(),
                );
                black_box(result.map(|(out, stats)| (out.len(), stats)))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decode,
    bench_encode_fallback,
    bench_transcode
);
criterion_main!(benches);
