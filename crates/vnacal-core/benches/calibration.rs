//! Benchmarks for the calibration core
//!
//! Tests performance of kit model construction, the per-frequency
//! error-network solve, and the de-embed transform.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{Array1, Array2};
use num_complex::Complex64;
use vnacal_core::calkit::CalibrationKit;
use vnacal_core::frequency::{Frequency, FrequencyUnit};
use vnacal_core::solver::{de_embed, embed, network_sparams};

fn kit(npoints: usize) -> CalibrationKit {
    CalibrationKit::s911t(Frequency::new(50.0, 250.0, npoints, FrequencyUnit::MHz))
}

/// Standards measured through a mildly imperfect network
fn measured(kit: &CalibrationKit) -> Array2<Complex64> {
    let model = kit.std_gamma().unwrap();
    let n = model.ncols();
    let mut sparams = Array2::zeros((3, n));
    for i in 0..n {
        let t = i as f64 / n as f64;
        sparams[[0, i]] = Complex64::from_polar(0.08, -2.0 * t);
        sparams[[1, i]] = Complex64::from_polar(0.92, -6.0 * t);
        sparams[[2, i]] = Complex64::from_polar(0.12, -2.5 * t);
    }
    let mut meas = Array2::zeros((3, n));
    for k in 0..3 {
        let row: Array1<Complex64> = model.row(k).to_owned();
        let observed = embed(&sparams, &row).unwrap();
        for i in 0..n {
            meas[[k, i]] = observed[i];
        }
    }
    meas
}

fn bench_kit_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("s911t_models");
    for npoints in [101, 1001, 10001].iter() {
        let freq = Frequency::new(50.0, 250.0, *npoints, FrequencyUnit::MHz);
        group.bench_with_input(BenchmarkId::from_parameter(npoints), npoints, |b, _| {
            b.iter(|| black_box(CalibrationKit::s911t(freq.clone()).std_gamma().unwrap()))
        });
    }
    group.finish();
}

fn bench_network_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("network_sparams");
    for npoints in [101, 1001, 10001].iter() {
        let kit = kit(*npoints);
        let model = kit.std_gamma().unwrap();
        let meas = measured(&kit);
        group.bench_with_input(BenchmarkId::from_parameter(npoints), npoints, |b, _| {
            b.iter(|| black_box(network_sparams(&model, &meas).unwrap()))
        });
    }
    group.finish();
}

fn bench_de_embed(c: &mut Criterion) {
    let mut group = c.benchmark_group("de_embed");
    for npoints in [101, 1001, 10001].iter() {
        let kit = kit(*npoints);
        let meas = measured(&kit);
        let sparams = kit.sparams(&meas).unwrap();
        let gamma: Array1<Complex64> = (0..*npoints)
            .map(|i| Complex64::from_polar(0.5, i as f64 * 0.01))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(npoints), npoints, |b, _| {
            b.iter(|| black_box(de_embed(&sparams, &gamma).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kit_models, bench_network_solve, bench_de_embed);
criterion_main!(benches);
