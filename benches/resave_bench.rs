use criterion::{Criterion, criterion_group, criterion_main};
use resave::checksum;
use resave::codec;
use resave::save_buffer::{SaveBufferMut, SaveReadable};
use resave::types::{CHECKSUM_OFFSET, CHECKSUM_REGIONS};
use std::hint::black_box;

// ─── Test Data ──────────────────────────────────────────────────────────────

const SAVE_LEN: usize = 23_900;

/// Deterministic pseudo-random plain image of save-file size.
fn make_plain() -> Vec<u8> {
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    (0..SAVE_LEN)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state as u8
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 1: Transcoding
// ═══════════════════════════════════════════════════════════════════════════

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let plain = make_plain();
    let cipher = codec::encode(&plain);

    group.bench_function("encode", |b| b.iter(|| codec::encode(black_box(&plain))));
    group.bench_function("decode", |b| b.iter(|| codec::decode(black_box(&cipher))));

    group.finish();
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 2: Checksum
// ═══════════════════════════════════════════════════════════════════════════

fn bench_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("checksum");
    let mut plain = make_plain();

    group.bench_function("compute", |b| {
        b.iter(|| checksum::compute(black_box(&plain), &CHECKSUM_REGIONS).unwrap())
    });
    group.bench_function("apply", |b| {
        b.iter(|| checksum::apply(black_box(&mut plain), CHECKSUM_OFFSET, &CHECKSUM_REGIONS).unwrap())
    });

    group.finish();
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 3: Field Access
// ═══════════════════════════════════════════════════════════════════════════

fn bench_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("fields");
    group.sample_size(500);

    let mut buf = SaveBufferMut::new(make_plain());

    group.bench_function("get_value", |b| {
        b.iter(|| black_box(buf.get_value(black_box(0x194), 4).unwrap()))
    });
    group.bench_function("get_bit", |b| {
        b.iter(|| black_box(buf.get_bit(black_box(0x158), 37).unwrap()))
    });
    group.bench_function("get_composite", |b| {
        b.iter(|| black_box(buf.get_composite(black_box(&[0x3BC0, 0x3BC8]), 4).unwrap()))
    });
    group.bench_function("set_value", |b| {
        b.iter(|| buf.set_value(black_box(0x194), 4, black_box(9_999_999)).unwrap())
    });
    group.bench_function("set_composite", |b| {
        b.iter(|| {
            buf.set_composite(black_box(&[0x50, 0x5D44]), 4, black_box(0x3_0000_0000))
                .unwrap()
        })
    });

    group.finish();
}

// ─── Criterion Main ─────────────────────────────────────────────────────────

criterion_group!(benches, bench_codec, bench_checksum, bench_fields);
criterion_main!(benches);
