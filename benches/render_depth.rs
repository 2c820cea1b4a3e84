//! Focused benchmark: cost of building and rendering chains of 1, 4, 16, 64 nodes.
//!
//! Run with: cargo bench --bench render_depth

use causeway::{Error, ResultExt, StackTrace, join};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main, measurement::WallTime};
use std::hint::black_box;

#[inline(never)]
fn chain_prefix(depth: u32) -> Result<(), Error> {
    if depth == 0 {
        Err(Error::leaf("bottom"))
    } else {
        chain_prefix(depth - 1).prefix("level")
    }
}

#[inline(never)]
fn chain_wrap(depth: u32) -> Result<(), Error> {
    if depth == 0 {
        Err(Error::new("bottom"))
    } else {
        chain_wrap(depth - 1).wrap("level")
    }
}

fn bench_build(c: &mut Criterion<WallTime>) {
    let mut group = c.benchmark_group("build");
    group.warm_up_time(std::time::Duration::from_millis(500));
    group.measurement_time(std::time::Duration::from_secs(1));
    group.sample_size(30);

    for depth in [1, 4, 16, 64] {
        group.bench_with_input(BenchmarkId::new("prefix", depth), &depth, |b, &depth| {
            b.iter(|| {
                let _ = chain_prefix(black_box(depth));
            })
        });
        group.bench_with_input(BenchmarkId::new("wrap", depth), &depth, |b, &depth| {
            b.iter(|| {
                let _ = chain_wrap(black_box(depth));
            })
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion<WallTime>) {
    let mut group = c.benchmark_group("render");
    group.warm_up_time(std::time::Duration::from_millis(500));
    group.measurement_time(std::time::Duration::from_secs(1));
    group.sample_size(30);

    for depth in [1, 4, 16, 64] {
        let Err(err) = chain_prefix(depth) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("compact", depth), &err, |b, err| {
            b.iter(|| black_box(err.to_string()))
        });
        group.bench_with_input(BenchmarkId::new("detailed", depth), &err, |b, err| {
            b.iter(|| black_box(err.detail()))
        });
    }

    // fake addresses never resolve, so every frame prints as unknown
    let traced = (0..16).fold(Error::leaf("bottom"), |err, top| {
        let frames = (top..top + 24).rev().map(causeway::Frame::from_ip);
        err.with_stack_trace(StackTrace::from_frames(frames))
    });
    group.bench_function("detailed_16_stacks", |b| b.iter(|| black_box(traced.detail())));

    let joined = join((0..16).map(|i| Error::leaf(format!("branch {i}")).prefix("ctx"))).unwrap();
    group.bench_function("detailed_join_16", |b| b.iter(|| black_box(joined.detail())));

    group.finish();
}

criterion_group!(benches, bench_build, bench_render);
criterion_main!(benches);
