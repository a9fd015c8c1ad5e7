use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use stegatext_core::{
    codecs::{
        codec::{Codec, ConfigFlags, ConfigParams},
        lsb::StegaLsb,
    },
    pixel_buffer::PixelBuffer,
};
use std::hint::black_box;

/// The text encoded in each iteration.
const TEXT: &str = "It's a fez. I wear a fez now, fezzes are cool.";

/// Build a buffer filled with random pixels.
fn noise_buffer(width: u32, height: u32) -> PixelBuffer {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0xBE7C);
    let pixels = (0..width * height).map(|_| rng.random()).collect();
    PixelBuffer::from_pixels(width, height, pixels).unwrap()
}

fn benchmark_configs() -> [(&'static str, u32, u32); 3] {
    [("small", 640, 480), ("medium", 1920, 1080), ("large", 3840, 2160)]
}

fn benchmark_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");

    for (name, width, height) in benchmark_configs() {
        let buffer = noise_buffer(width, height);

        for scatter in [false, true] {
            let mut stega = StegaLsb::new();
            stega.set_flag_state(ConfigFlags::Scatter, scatter);
            stega.set_parameter(ConfigParams::NoiseSeed(1));

            let id = format!("{name}/{}", if scatter { "scatter" } else { "sequential" });
            group.bench_with_input(BenchmarkId::from_parameter(id), &buffer, |b, buffer| {
                b.iter(|| stega.encode_buffer(black_box(TEXT), black_box(buffer)));
            });
        }
    }
    group.finish();
}

fn benchmark_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoding");

    for (name, width, height) in benchmark_configs() {
        let mut stega = StegaLsb::new();
        let encoded = stega.encode_buffer(TEXT, &noise_buffer(width, height)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(name), &encoded, |b, encoded| {
            b.iter(|| stega.decode_buffer(black_box(encoded)));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_encoding, benchmark_decoding);
criterion_main!(benches);
