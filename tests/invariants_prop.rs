//! Property-based tests for the turn engine.
//!
//! Random rosters on random grids must keep the grid and roster in step
//! and respect the combat and economy bounds, whatever the dice do.
//! Run with: cargo test --release invariants_prop

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use skirmish::core::config::SimulationConfig;
use skirmish::core::types::{Point, TimeOfDay};
use skirmish::grid::{Grid, Resource, TerrainType, Topology};
use skirmish::rules::constants::{MIN_POWER, STAT_MAX};
use skirmish::rules::power_breakdown;
use skirmish::simulation::{check_invariants, Simulation, TurnEvent};
use skirmish::unit::{normalize_name, Unit};

fn make_unit(kind: u8, n: usize) -> Unit {
    let name = format!("Unit{}", n);
    match kind % 7 {
        0 => Unit::elf(&name),
        1 => Unit::orc(&name),
        2 => Unit::animal(&name),
        3 => Unit::forager(&name),
        4 => Unit::bird(&name, n % 2 == 0),
        5 => Unit::hunter(&name),
        _ => Unit::panicker(&name),
    }
}

fn terrain(code: u8) -> TerrainType {
    match code % 5 {
        0 => TerrainType::Plain,
        1 => TerrainType::Forest,
        2 => TerrainType::Mountain,
        3 => TerrainType::River,
        _ => TerrainType::Swamp,
    }
}

/// Grid of the given size with scattered terrain and one unit per slot,
/// all at distinct cells
fn build(
    size: i32,
    torus: bool,
    seed: u64,
    kinds: &[u8],
    terrain_codes: &[u8],
) -> Simulation {
    let topology = if torus { Topology::Torus } else { Topology::Bounded };
    let mut grid = Grid::new(size, size, topology).unwrap();
    let points: Vec<Point> = grid.points().collect();
    for (p, code) in points.iter().zip(terrain_codes) {
        grid.set_terrain(*p, terrain(*code)).unwrap();
    }

    let step = (points.len() / kinds.len().max(1)).max(1);
    let positions: Vec<Point> = points.iter().step_by(step).take(kinds.len()).copied().collect();
    let units = kinds
        .iter()
        .take(positions.len())
        .enumerate()
        .map(|(n, kind)| make_unit(*kind, n))
        .collect();
    Simulation::new(grid, units, positions, SimulationConfig::seeded(seed)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every surviving unit stays on exactly the cell it claims
    #[test]
    fn prop_grid_and_roster_consistent(
        size in 5i32..10,
        torus in any::<bool>(),
        seed in any::<u64>(),
        kinds in prop::collection::vec(any::<u8>(), 1..12),
        terrain_codes in prop::collection::vec(any::<u8>(), 0..100),
        turns in 1u32..25,
    ) {
        let mut sim = build(size, torus, seed, &kinds, &terrain_codes);
        for _ in 0..turns {
            if sim.next_turn().is_err() {
                break;
            }
            prop_assert_eq!(check_invariants(sim.world()), vec![]);
        }
    }

    /// Turn summaries never report faults on well-formed worlds
    #[test]
    fn prop_no_faults(
        seed in any::<u64>(),
        kinds in prop::collection::vec(any::<u8>(), 1..10),
    ) {
        let mut sim = build(7, false, seed, &kinds, &[]);
        for summary in sim.run(20) {
            prop_assert!(summary.faults.is_empty(), "faults: {:?}", summary.faults);
        }
    }

    /// Combat power is never below the floor, whatever the setup
    #[test]
    fn prop_power_floor(
        kind in any::<u8>(),
        code in any::<u8>(),
        night in any::<bool>(),
    ) {
        let mut grid = Grid::new(5, 5, Topology::Bounded).unwrap();
        grid.set_terrain(Point::new(2, 2), terrain(code)).unwrap();
        let sim = Simulation::new(
            grid,
            vec![make_unit(kind, 0)],
            vec![Point::new(2, 2)],
            SimulationConfig::seeded(1),
        )
        .unwrap();
        let time = if night { TimeOfDay::Night } else { TimeOfDay::Day };
        let unit = sim.roster().iter().next().unwrap();
        let power = power_breakdown(sim.grid(), sim.roster(), unit, Point::new(2, 2), time);
        prop_assert!(power.total >= MIN_POWER);
    }

    /// Carrots are only moved around: what elves collect was dropped first
    #[test]
    fn prop_carrots_conserved(
        seed in any::<u64>(),
        foragers in 1usize..4,
        elves in 0usize..3,
    ) {
        let mut units = Vec::new();
        for n in 0..foragers {
            units.push(make_unit(3, n));
        }
        for n in 0..elves {
            units.push(make_unit(0, foragers + n));
        }
        let positions: Vec<Point> = (0..units.len() as i32).map(|i| Point::new(i * 2 % 8, i)).collect();
        let grid = Grid::new(8, 8, Topology::Torus).unwrap();
        let mut sim = Simulation::new(grid, units, positions, SimulationConfig::seeded(seed)).unwrap();

        // No orcs or hunters, so only births create carrots
        let mut supply: u64 = (foragers as u64) * 10;
        for _ in 0..15 {
            if sim.next_turn().is_err() {
                break;
            }
        }
        for entry in sim.history().entries() {
            if let TurnEvent::Birth { .. } = entry.event {
                supply += 5;
            }
        }
        let on_grid: u64 = sim
            .grid()
            .cells()
            .map(|(_, c)| c.resource(Resource::Carrots) as u64)
            .sum();
        let carried: u64 = sim.roster().iter().map(|u| u.carried() as u64).sum();
        prop_assert!(on_grid + carried <= supply);
    }

    /// Normalized names always fit the length bounds
    #[test]
    fn prop_name_bounds(raw in "\\PC{0,40}") {
        let name = normalize_name(&raw);
        let len = name.chars().count();
        prop_assert!((3..=25).contains(&len), "{:?} -> {:?}", raw, name);
    }

    /// Training never pushes stats past the cap
    #[test]
    fn prop_stats_capped(songs in 0usize..100, hunts in 0usize..100) {
        let mut elf = Unit::elf("Arwen");
        for _ in 0..songs {
            elf.sing();
        }
        let mut orc = Unit::orc("Bolg");
        for _ in 0..hunts {
            orc.hunt();
        }
        prop_assert!(elf.agility().unwrap() <= STAT_MAX);
        prop_assert!(orc.rage().unwrap() <= STAT_MAX);
    }
}
