use criterion::{black_box, criterion_group, criterion_main, Criterion};
use textcodec::{get_codec, Encoding};

fn sample_text() -> Vec<u16> {
    "The quick brown fox \u{e9}\u{20AC}\u{1F600} jumps over the lazy dog. "
        .repeat(4096)
        .encode_utf16()
        .collect()
}

fn bench_utf8(c: &mut Criterion) {
    let codec = get_codec(Encoding::Utf8);
    let text = sample_text();
    let bytes = codec.encode_to_vec(&text).unwrap();
    let mut buf = vec![0u8; bytes.len()];

    c.bench_function("utf8_encode_256k", |b| b.iter(|| codec.encode_into(&mut buf, black_box(&text))));
    c.bench_function("utf8_decode_256k", |b| b.iter(|| codec.decode(black_box(&bytes))));
    c.bench_function("utf8_byte_length_256k", |b| b.iter(|| codec.byte_length(black_box(&text))));
}

fn bench_packed(c: &mut Criterion) {
    let data: Vec<u8> = (0u8..=255).cycle().take(256 * 1024).collect();

    for enc in [Encoding::Base64, Encoding::Hex, Encoding::BinStr] {
        let codec = get_codec(enc);
        let text = codec.decode(&data).unwrap();
        let mut buf = vec![0u8; data.len()];
        c.bench_function(&format!("{}_bytes_to_text_256k", enc.name()), |b| {
            b.iter(|| codec.decode(black_box(&data)))
        });
        c.bench_function(&format!("{}_text_to_bytes_256k", enc.name()), |b| {
            b.iter(|| codec.encode_into(&mut buf, black_box(&text)))
        });
    }
}

criterion_group!(benches, bench_utf8, bench_packed);
criterion_main!(benches);
