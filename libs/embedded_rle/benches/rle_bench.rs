use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn frame_like(len: usize) -> Vec<u8> {
    // Large flat areas with a noisy band, roughly what a dithered frame packs to
    (0..len)
        .map(|i| match (i / 97) % 4 {
            0 => 0x00,
            1 => 0xFF,
            2 => (i as u8).wrapping_mul(37),
            _ => 0xAA,
        })
        .collect()
}

fn rle_benchmark(c: &mut Criterion) {
    let packed = frame_like(96 * 48 / 8 * 10);
    let payload = embedded_rle::encode(&packed);

    c.bench_function("encode", |b| {
        b.iter(|| embedded_rle::encode(black_box(&packed)))
    });
    c.bench_function("decode_into", |b| {
        let mut out = vec![0u8; packed.len()];
        b.iter(|| embedded_rle::decode_into(black_box(&payload), &mut out).unwrap())
    });
}

criterion_group!(benches, rle_benchmark);
criterion_main!(benches);
