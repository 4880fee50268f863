//! Benchmark – `htmlent` reference decoding
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use htmlent::{
    DecoderOptions, EntityDecoder, Locale, Narrow, Utf8, Utf16, Utf32, decode_html_entities,
};

/// Deterministic markup of at least `target_len` bytes with a reference
/// roughly every eight characters.
fn make_payload(target_len: usize) -> String {
    const PIECES: [&str; 6] = [
        "caf&eacute; ",
        "&lt;p&gt;",
        "x &amp; y ",
        "&#x1F600; ",
        "&#169; ",
        "plain text ",
    ];
    let mut s = String::with_capacity(target_len + 16);
    for piece in PIECES.iter().cycle() {
        if s.len() >= target_len {
            break;
        }
        s.push_str(piece);
    }
    s
}

fn bench_representations(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for &size in &[1_024usize, 64 * 1_024] {
        let payload = make_payload(size);
        let utf16: Vec<u16> = payload.encode_utf16().collect();
        let utf32: Vec<u32> = payload.chars().map(u32::from).collect();

        group.throughput(Throughput::Bytes(payload.len() as u64));

        group.bench_with_input(BenchmarkId::new("utf8", size), &payload, |b, p| {
            b.iter(|| decode_html_entities::<Utf8>(black_box(p.as_bytes())).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("utf16", size), &utf16, |b, p| {
            b.iter(|| decode_html_entities::<Utf16>(black_box(p)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("utf32", size), &utf32, |b, p| {
            b.iter(|| decode_html_entities::<Utf32>(black_box(p)).unwrap());
        });
        let decoder = EntityDecoder::new(DecoderOptions::default());
        let narrow = Narrow::new(Locale::UTF_8);
        group.bench_with_input(BenchmarkId::new("narrow_utf8", size), &payload, |b, p| {
            b.iter(|| decoder.decode(&narrow, black_box(p.as_bytes())).unwrap());
        });
    }

    group.finish();
}

fn bench_narrow_charset(c: &mut Criterion) {
    let decoder = EntityDecoder::new(DecoderOptions {
        locale: Locale::new(encoding_rs::WINDOWS_1252),
        ..Default::default()
    });
    let payload = make_payload(64 * 1_024);
    let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(&payload);

    c.bench_function("decode/narrow_windows_1252/65536", |b| {
        b.iter(|| decoder.decode_narrow(black_box(&bytes[..])).unwrap());
    });
}

criterion_group!(benches, bench_representations, bench_narrow_charset);
criterion_main!(benches);
