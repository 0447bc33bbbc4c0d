use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dbfig::{Figure, Theme, render_svg};
use std::hint::black_box;

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_scene");
    let theme = Theme::default();
    for figure in Figure::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(figure.id()), &figure, |b, data| {
            b.iter(|| {
                let scene = black_box(*data).build(&theme);
                black_box(scene.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let theme = Theme::default();
    for figure in Figure::ALL {
        let scene = figure.build(&theme);
        group.bench_with_input(BenchmarkId::from_parameter(figure.id()), &scene, |b, data| {
            b.iter(|| {
                let svg = render_svg(black_box(data), &theme);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

#[cfg(feature = "png")]
fn bench_rasterize(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize_png");
    group.sample_size(10);
    let theme = Theme::default();
    let render_cfg = dbfig::config::RenderConfig::default();
    for figure in [Figure::BTree, Figure::JoinVenn, Figure::AggregateFunctions] {
        let svg = render_svg(&figure.build(&theme), &theme);
        group.bench_with_input(BenchmarkId::from_parameter(figure.id()), &svg, |b, data| {
            b.iter(|| {
                let png = dbfig::render::rasterize_png(black_box(data), &render_cfg)
                    .expect("rasterize failed");
                black_box(png.len());
            });
        });
    }
    group.finish();
}

#[cfg(not(feature = "png"))]
fn bench_rasterize(_c: &mut Criterion) {}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_build, bench_render, bench_rasterize
);
criterion_main!(benches);
