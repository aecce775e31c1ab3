use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array3;
use stainview::{composite, montage, MultiChannelImage};

fn stack(channels: usize, size: usize) -> MultiChannelImage {
    let data = Array3::from_shape_fn((channels, size, size), |(c, y, x)| {
        ((x * 7 + y * 13 + c * 31) % 256) as f32
    });
    MultiChannelImage::new(data).expect("benchmark stack has a valid shape")
}

fn bench_composite(c: &mut Criterion) {
    let image = stack(5, 256);
    c.bench_function("composite 5x256x256", |b| {
        b.iter(|| composite(black_box(&image), None))
    });
}

fn bench_montage(c: &mut Criterion) {
    let image = stack(5, 256);
    c.bench_function("montage render 5x256x256", |b| {
        b.iter(|| montage(black_box(&image), None).and_then(|m| m.render()))
    });
}

criterion_group!(benches, bench_composite, bench_montage);
criterion_main!(benches);
