//! G.722 encode/decode throughput
//!
//! Run with: cargo bench -p g722-core --bench g722_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use g722_core::codecs::g722::{decode, encode, encoded_len, open};
use g722_core::{G722Bitrate, G722Options};

// One second of 16 kHz audio
const SAMPLES: usize = 16000;

fn test_signal() -> Vec<i16> {
    (0..SAMPLES)
        .map(|i| {
            let t = i as f64 / 16000.0;
            let v = 6000.0 * (2.0 * std::f64::consts::PI * 440.0 * t).sin()
                + 2500.0 * (2.0 * std::f64::consts::PI * 3100.0 * t).sin();
            v as i16
        })
        .collect()
}

const RATES: [G722Bitrate; 3] = [
    G722Bitrate::Rate64000,
    G722Bitrate::Rate56000,
    G722Bitrate::Rate48000,
];

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("g722_encode");
    group.throughput(Throughput::Elements(SAMPLES as u64));
    let pcm = test_signal();

    for bitrate in RATES {
        for packed in [false, true] {
            let options = G722Options { eight_k: false, packed };
            let id = BenchmarkId::new(if packed { "packed" } else { "unpacked" }, bitrate.bps());
            group.bench_with_input(id, &pcm, |b, pcm| {
                let mut state = open(bitrate, options);
                let mut out = vec![0u8; encoded_len(&state, pcm.len()) + 1];
                b.iter(|| {
                    state.reset();
                    encode(&mut state, black_box(pcm), &mut out)
                })
            });
        }
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("g722_decode");
    group.throughput(Throughput::Elements(SAMPLES as u64));
    let pcm = test_signal();

    for bitrate in RATES {
        let options = G722Options::default();
        let mut encoder = open(bitrate, options);
        let mut coded = vec![0u8; encoded_len(&encoder, pcm.len())];
        let written = encode(&mut encoder, &pcm, &mut coded).unwrap_or(0);
        coded.truncate(written);

        group.bench_with_input(BenchmarkId::from_parameter(bitrate.bps()), &coded, |b, coded| {
            let mut state = open(bitrate, options);
            let mut out = vec![0i16; SAMPLES];
            b.iter(|| {
                state.reset();
                decode(&mut state, black_box(coded), &mut out)
            })
        });
    }

    group.finish();
}

fn bench_eight_k(c: &mut Criterion) {
    let pcm: Vec<i16> = test_signal().into_iter().step_by(2).collect();
    let options = G722Options { eight_k: true, packed: false };

    c.bench_function("g722_encode_8k", |b| {
        let mut state = open(G722Bitrate::Rate64000, options);
        let mut out = vec![0u8; pcm.len()];
        b.iter(|| {
            state.reset();
            encode(&mut state, black_box(&pcm), &mut out)
        })
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_eight_k);
criterion_main!(benches);
