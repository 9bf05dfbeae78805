use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use grid_relay::services::texture::{encode_png, flip_rows, swap_red_blue};

fn texture_side() -> usize {
    std::env::var("TEXTURE_BENCH_SIDE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|side| side % 2 == 0)
        .unwrap_or(1024)
}

fn pixels(side: usize) -> Vec<u8> {
    (0..side * side * 4).map(|index| (index % 251) as u8).collect()
}

fn bench_pixel_transforms(c: &mut Criterion) {
    let side = texture_side();
    let mut buffer = pixels(side);

    let mut group = c.benchmark_group("texture_transform");
    group.sample_size(20);

    group.bench_function("flip_rows", |b| {
        b.iter(|| flip_rows(black_box(&mut buffer), side, side).unwrap())
    });
    group.bench_function("swap_red_blue", |b| {
        b.iter(|| swap_red_blue(black_box(&mut buffer)))
    });

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let side = texture_side().min(512);
    let buffer = pixels(side);

    let mut group = c.benchmark_group("texture_encode");
    group.sample_size(10);

    group.bench_function("encode_png", |b| {
        b.iter(|| encode_png(black_box(&buffer), side as u32, side as u32).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_pixel_transforms, bench_encode);
criterion_main!(benches);
