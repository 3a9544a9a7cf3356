use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use progress_svg_renderer::config::Config;
use progress_svg_renderer::layout::plan_request;
use progress_svg_renderer::params::{Params, parse_request};
use progress_svg_renderer::render::render_svg;
use progress_svg_renderer::request::{ProgressKind, ProgressRequest};
use std::hint::black_box;

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn many_values(count: usize) -> String {
    (0..count)
        .map(|i| format!("{}", 1 + i % 7))
        .collect::<Vec<_>>()
        .join(",")
}

fn fixtures() -> Vec<(&'static str, ProgressKind, Params)> {
    vec![
        ("bar_single", ProgressKind::Bar, params(&[("value", "75")])),
        (
            "bar_gradient",
            ProgressKind::Bar,
            params(&[("value", "62.5"), ("color", "#EF4444,#F59E0B,#10B981,#3B82F6")]),
        ),
        (
            "bar_segmented",
            ProgressKind::Bar,
            params(&[("value", "63"), ("segments", "20"), ("color", "#3B82F6,#8B5CF6")]),
        ),
        (
            "bar_segmented_max",
            ProgressKind::Bar,
            params(&[("value", "99"), ("segments", "50"), ("gap", "1")]),
        ),
        (
            "bar_multi",
            ProgressKind::Bar,
            params(&[("values", "30,20,10"), ("colors", "#FF0000,#00FF00,#0000FF")]),
        ),
        (
            "bar_multi_wide",
            ProgressKind::Bar,
            params(&[("values", &many_values(40))]),
        ),
        ("donut_half", ProgressKind::Donut, params(&[("value", "50")])),
        (
            "donut_gradient",
            ProgressKind::Donut,
            params(&[("value", "83"), ("color", "#3B82F6,#8B5CF6"), ("size", "400")]),
        ),
    ]
}

fn parsed(config: &Config) -> Vec<(&'static str, ProgressRequest)> {
    fixtures()
        .into_iter()
        .map(|(name, kind, params)| {
            let request = parse_request(kind, &params, config).expect("parse failed");
            (name, request)
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let config = Config::default();
    for (name, kind, params) in fixtures() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &params, |b, params| {
            b.iter(|| {
                let request = parse_request(kind, black_box(params), &config).expect("parse failed");
                black_box(request);
            });
        });
    }
    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    let config = Config::default();
    for (name, request) in parsed(&config) {
        group.bench_with_input(BenchmarkId::from_parameter(name), &request, |b, request| {
            b.iter(|| {
                let plan = plan_request(black_box(request), &config);
                black_box(plan.primitives.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let config = Config::default();
    for (name, request) in parsed(&config) {
        let plan = plan_request(&request, &config);
        group.bench_with_input(BenchmarkId::from_parameter(name), &plan, |b, plan| {
            b.iter(|| {
                let svg = render_svg(black_box(plan), &config.theme);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let config = Config::default();
    for (name, kind, params) in fixtures() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &params, |b, params| {
            b.iter(|| {
                let request = parse_request(kind, black_box(params), &config).expect("parse failed");
                let plan = plan_request(&request, &config);
                let svg = render_svg(&plan, &config.theme);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_plan, bench_render, bench_end_to_end
);
criterion_main!(benches);
