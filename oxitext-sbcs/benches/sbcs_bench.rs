//! Throughput benchmarks for the single-byte code pages.
//!
//! This benchmark suite evaluates:
//! - Table decoding for a Latin and a Cyrillic page
//! - Encoding by reverse table scan
//! - Comparison with encoding_rs

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxitext_core::{Decoder, Encoder, SliceSource, StrSource};
use oxitext_sbcs::{CodePage, SingleByteDecoder, SingleByteEncoder};
use std::hint::black_box;

/// Random data - varied byte values
fn random(size: usize) -> Vec<u8> {
    // Simple PRNG for reproducible random data
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x123456789ABCDEF0;
    for _ in 0..size {
        // Linear congruential generator
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

fn bench_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_byte");
    let data = random(64 * 1024);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for page in [CodePage::Windows1252, CodePage::Koi8R] {
        group.bench_with_input(BenchmarkId::new("decode", page.name()), &data, |b, data| {
            b.iter(|| {
                black_box(SingleByteDecoder::new(page).decode_all(&mut SliceSource::new(data)))
            });
        });

        let text = SingleByteDecoder::new(page).decode_all(&mut SliceSource::new(&data));
        group.bench_with_input(BenchmarkId::new("encode", page.name()), &text, |b, text| {
            b.iter(|| {
                let mut out = Vec::with_capacity(text.len());
                SingleByteEncoder::new(page).encode_all(&mut StrSource::new(text), &mut out, b'?');
                black_box(out)
            });
        });

        if let Some(oracle) = encoding_rs::Encoding::for_label(page.name().as_bytes()) {
            group.bench_with_input(
                BenchmarkId::new("decode_encoding_rs", page.name()),
                &data,
                |b, data| b.iter(|| black_box(oracle.decode_without_bom_handling(data).0.len())),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_pages);
criterion_main!(benches);
