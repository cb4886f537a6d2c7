//! Benchmarks for running scenarios turn by turn.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use skirmish::core::config::SimulationConfig;
use skirmish::core::types::Point;
use skirmish::grid::{Grid, Topology};
use skirmish::scenario::Preset;
use skirmish::simulation::Simulation;
use skirmish::unit::Unit;

fn bench_presets(c: &mut Criterion) {
    for preset in Preset::ALL {
        c.bench_function(&format!("{}_50_turns", preset.key()), |b| {
            b.iter(|| {
                let mut scenario = preset.scenario();
                scenario.simulation.seed = Some(black_box(42));
                let mut sim = scenario.build().unwrap();
                black_box(sim.run(50))
            });
        });
    }
}

fn bench_crowded_torus(c: &mut Criterion) {
    // Dense mixed roster so every turn has combat and births
    c.bench_function("crowded_torus_100_turns", |b| {
        b.iter(|| {
            let grid = Grid::new(20, 20, Topology::Torus).unwrap();
            let mut units = Vec::new();
            let mut positions = Vec::new();
            for i in 0..80 {
                let name = format!("U{}", i);
                units.push(match i % 4 {
                    0 => Unit::elf(&name),
                    1 => Unit::orc(&name),
                    2 => Unit::forager(&name),
                    _ => Unit::hunter(&name),
                });
                positions.push(Point::new(i % 20, (i / 20) * 5));
            }
            let mut sim =
                Simulation::new(grid, units, positions, SimulationConfig::seeded(7)).unwrap();
            black_box(sim.run(100))
        });
    });
}

criterion_group!(benches, bench_presets, bench_crowded_torus);
criterion_main!(benches);
