use elroi_core::types::Size;
use elroi_core::{
    elroi, get_data_values, sum_series, ElroiArgs, HeadlessHost, Point, RecordingSurface, Series, SeriesOptions,
    SeriesTag, SeriesType,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};

fn gen_series(groups: usize, layers: usize, n: usize) -> Vec<Series> {
    (0..groups)
        .map(|g| {
            let series = (0..layers)
                .map(|l| {
                    (0..n)
                        .map(|i| {
                            // simple waveform with the occasional gap
                            if i % 97 == 0 { Point::null() } else { Point::new((i as f64 * 0.01 + l as f64).sin().abs() * 10.0 + g as f64) }
                        })
                        .collect()
                })
                .collect();
            Series::new(series)
        })
        .collect()
}

fn bench_data_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_data_values");
    for &n in &[1_000usize, 10_000usize] {
        let data = gen_series(3, 4, n);
        for series_type in [SeriesType::Line, SeriesType::StackedBar] {
            let options = vec![SeriesOptions { series_type: SeriesTag::Known(series_type), ..SeriesOptions::default() }; 3];
            group.bench_with_input(BenchmarkId::from_parameter(format!("{series_type}_n{n}")), &n, |b, _| {
                b.iter(|| {
                    let values = get_data_values(black_box(&data), &options);
                    black_box(sum_series(&values));
                });
            });
        }
    }
    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_recording");
    for &n in &[500usize, 5_000usize] {
        group.bench_function(format!("line_{n}"), |b| {
            let mut host = HeadlessHost::new();
            let container = host.add_container(Size::new(800.0, 500.0));
            let mut chart = elroi(ElroiArgs::new(container, gen_series(1, 3, n)), host, RecordingSurface::new);
            b.iter(|| {
                chart.clear();
                chart.draw();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_data_values, bench_draw);
criterion_main!(benches);
