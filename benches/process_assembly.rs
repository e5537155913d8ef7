//! Benchmarks for process assembly
//!
//! Measures the cost of building complete ÄKTA setups and of evaluating an
//! event schedule on a time grid, the two operations repeated when a
//! parameter study generates many processes.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench --bench process_assembly
//!
//! # Only the schedule evaluation
//! cargo bench --bench process_assembly inlet_profile
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use chrom_process::akta;
use chrom_process::component::ComponentSystem;
use chrom_process::process::Process;

fn isocratic(system: &ComponentSystem) -> Process {
    let column = akta::adsorptive_column(system).unwrap();
    let flow_sheet = akta::akta_flow_sheet(system, Some(column)).unwrap();
    akta::isocratic_process(flow_sheet).unwrap()
}

/// Full assembly: column, flow sheet, schedule
fn bench_assembly(c: &mut Criterion) {
    let system = ComponentSystem::new(["Salt", "Monomer", "Aggregate"]);
    let mut group = c.benchmark_group("assembly");

    group.bench_function("adsorptive", |b| {
        b.iter(|| isocratic(black_box(&system)))
    });

    group.bench_function("size_exclusion", |b| {
        b.iter(|| {
            let column = akta::size_exclusion_column(black_box(&system)).unwrap();
            let flow_sheet = akta::akta_flow_sheet(&system, Some(column)).unwrap();
            akta::isocratic_process(flow_sheet).unwrap()
        })
    });

    group.finish();
}

/// Inlet concentration evaluated on grids of increasing resolution
fn bench_inlet_profile(c: &mut Criterion) {
    let system = ComponentSystem::new(["Salt", "Monomer", "Aggregate"]);
    let process = isocratic(&system);
    let mut group = c.benchmark_group("inlet_profile");

    for points in [100, 1_000, 10_000] {
        let dt = process.cycle_time() / points as f64;
        let times: Vec<f64> = (0..points).map(|i| i as f64 * dt).collect();

        group.bench_with_input(BenchmarkId::from_parameter(points), &times, |b, times| {
            b.iter(|| process.inlet_profile(black_box(times)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_assembly, bench_inlet_profile);
criterion_main!(benches);
