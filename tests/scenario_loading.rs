//! Scenario loading tests
//!
//! Checks the shipped scenario files and the built-in presets.

use std::path::Path;

use skirmish::core::types::Point;
use skirmish::grid::TerrainType;
use skirmish::scenario::{Preset, Scenario, UnitTemplate};
use skirmish::unit::Species;
use skirmish::SimError;

#[test]
fn test_river_crossing_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/scenarios/river_crossing.toml");
    let scenario = Scenario::load(&path).unwrap();
    assert_eq!(scenario.name, "River Crossing");
    assert_eq!(scenario.units.len(), 7);
    assert_eq!(scenario.simulation.chances.raid_night, 0.8);
    // Unlisted chances keep their defaults
    assert_eq!(scenario.simulation.chances.dodge, 0.3);

    let sim = scenario.build().unwrap();
    assert_eq!(sim.grid().terrain(Point::new(5, 3)), Some(TerrainType::Swamp));
    assert_eq!(sim.grid().terrain(Point::new(4, 3)), Some(TerrainType::Swamp));
    assert_eq!(sim.grid().terrain(Point::new(5, 0)), Some(TerrainType::River));
    let orcs = sim
        .roster()
        .iter()
        .filter(|u| u.species() == Species::Orc)
        .count();
    assert_eq!(orcs, 2);
}

#[test]
fn test_missing_file_is_io_error() {
    let result = Scenario::load(Path::new("data/scenarios/does_not_exist.toml"));
    assert!(matches!(result, Err(SimError::IoError(_))));
}

#[test]
fn test_unit_off_grid_rejected() {
    let toml = r#"
        name = "Broken"

        [grid]
        width = 5
        height = 5

        [[units]]
        kind = "orc"
        name = "Lost"
        at = [7, 1]
    "#;
    let scenario = Scenario::from_toml_str(toml).unwrap();
    assert!(matches!(scenario.build(), Err(SimError::OutOfBounds(_))));
}

#[test]
fn test_tiny_grid_rejected() {
    let toml = r#"
        name = "Cramped"

        [grid]
        width = 4
        height = 9

        [[units]]
        kind = "elf"
        name = "Arwen"
        at = [0, 0]
    "#;
    let scenario = Scenario::from_toml_str(toml).unwrap();
    assert!(matches!(
        scenario.build(),
        Err(SimError::InvalidGridSize { .. })
    ));
}

#[test]
fn test_huge_grid_rejected() {
    let toml = r#"
        name = "Endless plain"

        [grid]
        width = 50000
        height = 50000

        [[units]]
        kind = "elf"
        name = "Arwen"
        at = [0, 0]
    "#;
    let scenario = Scenario::from_toml_str(toml).unwrap();
    assert!(matches!(
        scenario.build(),
        Err(SimError::GridTooLarge { .. })
    ));
}

#[test]
fn test_invalid_chance_rejected() {
    let toml = r#"
        name = "Loaded dice"

        [simulation.chances]
        dodge = 1.5

        [grid]
        width = 5
        height = 5

        [[units]]
        kind = "elf"
        name = "Arwen"
        at = [0, 0]
    "#;
    let scenario = Scenario::from_toml_str(toml).unwrap();
    assert!(matches!(scenario.build(), Err(SimError::InvalidConfig(_))));
}

#[test]
fn test_presets_round_trip_through_toml() {
    for preset in Preset::ALL {
        let scenario = preset.scenario();
        let text = toml::to_string(&scenario).unwrap();
        assert_eq!(Scenario::from_toml_str(&text).unwrap(), scenario);
    }
}

#[test]
fn test_wild_lands_roster() {
    let scenario = Preset::WildLands.scenario();
    let templates: Vec<UnitTemplate> = scenario.units.iter().map(|u| u.kind).collect();
    assert_eq!(
        templates,
        vec![
            UnitTemplate::Elf,
            UnitTemplate::Orc,
            UnitTemplate::Animal,
            UnitTemplate::Animal,
            UnitTemplate::Hunter,
            UnitTemplate::Bird,
        ]
    );
    let sim = scenario.build().unwrap();
    let eagle = sim.roster().iter().find(|u| u.name == "Eagle").unwrap();
    assert!(eagle.is_hunter());
    assert!(eagle.capabilities.is_flyer());
}
