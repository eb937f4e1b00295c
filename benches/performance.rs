use criterion::{black_box, criterion_group, criterion_main, Criterion};
use portfolio_theme::appearance::Appearance;
use portfolio_theme::fixtures::{memory_store, FULL_SNAPSHOT, LEGACY_SNAPSHOT};
use portfolio_theme::settings::{Setting, Settings, Theme};
use portfolio_theme::validate::parse_snapshot;

/// Benchmark snapshot parsing and validation
fn bench_snapshot_validation(c: &mut Criterion) {
    let base = Settings::default();

    let mut group = c.benchmark_group("snapshot_validation");

    group.bench_function("full_snapshot", |b| {
        b.iter(|| parse_snapshot(black_box(FULL_SNAPSHOT), black_box(&base)))
    });

    group.bench_function("legacy_snapshot", |b| {
        b.iter(|| parse_snapshot(black_box(LEGACY_SNAPSHOT), black_box(&base)))
    });

    group.bench_function("malformed_snapshot", |b| {
        b.iter(|| parse_snapshot(black_box("{\"theme\": \"neon\","), black_box(&base)))
    });

    group.finish();
}

/// Benchmark store updates (persist + notify)
fn bench_store_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");

    let mut store = memory_store(true);
    group.bench_function("update_persisted", |b| {
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let theme = if flip { Theme::Neon } else { Theme::Glass };
            store.update(black_box(Setting::Theme(theme))).theme
        })
    });

    let mut store = memory_store(false);
    let _subscriptions: Vec<_> = (0..10)
        .map(|_| {
            store.subscribe(|settings| {
                black_box(settings.particle_density);
            })
        })
        .collect();
    group.bench_function("update_ten_subscribers", |b| {
        b.iter(|| store.update(black_box(Setting::ParticleDensity(42))).particle_density)
    });

    group.finish();
}

/// Benchmark deriving and rendering the appearance
fn bench_appearance(c: &mut Criterion) {
    let settings = Settings::with_overrides(Theme::Minimal, "#ff0066");

    let mut group = c.benchmark_group("appearance");

    group.bench_function("derive", |b| {
        b.iter(|| Appearance::derive(black_box(&settings)))
    });

    group.bench_function("derive_to_css", |b| {
        b.iter(|| Appearance::derive(black_box(&settings)).to_css())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_snapshot_validation,
    bench_store_update,
    bench_appearance
);
criterion_main!(benches);
