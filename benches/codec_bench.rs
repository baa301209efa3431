use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use nwav::pcm::symbol_to_sample;
use nwav::{decode_bytes, encode_bytes};

/// Build a syntactically valid 16-bit mono WAV around `samples`.
fn wav_bytes(samples: &[i16]) -> Vec<u8> {
    let data_len = samples.len() * 2;
    let mut out = Vec::with_capacity(44 + data_len);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&((36 + data_len) as u32).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&19531u32.to_le_bytes());
    out.extend_from_slice(&39062u32.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(data_len as u32).to_le_bytes());
    for &sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    out
}

/// A noisy baseline-wander signal over device-representable values.
fn synthetic_samples(len: usize) -> Vec<i16> {
    let mut x = 1u32;
    (0..len)
        .map(|i| {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let noise = ((x >> 16) % 9) as i64 - 4;
            let baseline = 512 + ((i as f64 / 200.0).sin() * 20.0) as i64;
            symbol_to_sample((baseline + noise).clamp(0, 1023) as u16)
        })
        .collect()
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let wav = wav_bytes(&synthetic_samples(10_000));
    let compressed = encode_bytes(&wav).unwrap();

    group.bench_function("encode", |b| {
        b.iter(|| encode_bytes(black_box(&wav)).unwrap())
    });

    group.bench_function("decode", |b| {
        b.iter(|| decode_bytes(black_box(&compressed)).unwrap())
    });
}

fn bench_model_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("model");
    group.bench_function("build_tables", |b| b.iter(nwav::SignalModel::new));
}

criterion_group!(benches, bench_codec, bench_model_construction);
criterion_main!(benches);
