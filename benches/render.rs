#[macro_use]
extern crate criterion;
extern crate mbrender;

use criterion::Criterion;
use mbrender::{render, Complex, PlaneRegion, RasterDimensions};

fn bench_workers(c: &mut Criterion) {
    let region = PlaneRegion::new(Complex::new(-2.0, -1.2), 3.0, 2.4).unwrap();
    let dims = RasterDimensions::new(250, 200).unwrap();
    for workers in &[1usize, 2, 4, 8] {
        let workers = *workers;
        c.bench_function(&format!("bgy-250x200-t{}", workers), move |b| {
            b.iter(|| render(region, dims, "blue-green-yellow", workers).unwrap())
        });
    }
}

fn bench_palettes(c: &mut Criterion) {
    let region = PlaneRegion::new(Complex::new(-0.75, 0.05), 0.05, 0.04).unwrap();
    let dims = RasterDimensions::new(125, 100).unwrap();
    for name in &["binary", "red", "green-cyan", "blue-green-yellow", "blue-orange"] {
        let name = *name;
        c.bench_function(&format!("{}-125x100", name), move |b| {
            b.iter(|| render(region, dims, name, 4).unwrap())
        });
    }
}

criterion_group!(benches, bench_workers, bench_palettes);
criterion_main!(benches);
