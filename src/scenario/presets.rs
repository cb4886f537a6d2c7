//! Built-in scenarios

use crate::core::config::SimulationConfig;
use crate::grid::{TerrainType, Topology};
use crate::scenario::loader::{GridSpec, Scenario, TerrainPaint, UnitSpec, UnitTemplate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    BattleArena,
    WildLands,
    EffectsDemo,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::BattleArena, Preset::WildLands, Preset::EffectsDemo];

    /// Accepts the snake_case name or the 1-based number
    pub fn from_name(name: &str) -> Option<Preset> {
        match name.trim().to_ascii_lowercase().as_str() {
            "1" | "battle_arena" => Some(Preset::BattleArena),
            "2" | "wild_lands" => Some(Preset::WildLands),
            "3" | "effects_demo" => Some(Preset::EffectsDemo),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Preset::BattleArena => "battle_arena",
            Preset::WildLands => "wild_lands",
            Preset::EffectsDemo => "effects_demo",
        }
    }

    pub fn scenario(self) -> Scenario {
        match self {
            Preset::BattleArena => battle_arena(),
            Preset::WildLands => wild_lands(),
            Preset::EffectsDemo => effects_demo(),
        }
    }
}

fn paint(terrain: TerrainType, at: Vec<(i32, i32)>) -> TerrainPaint {
    TerrainPaint { terrain, at }
}

fn grid(width: i32, height: i32, paint: Vec<TerrainPaint>) -> GridSpec {
    GridSpec {
        width,
        height,
        topology: Topology::Bounded,
        rows: Vec::new(),
        paint,
    }
}

/// Two elves against three orcs on a small field
fn battle_arena() -> Scenario {
    Scenario {
        name: "Battle Arena".to_string(),
        turns: 40,
        script: None,
        simulation: SimulationConfig::default(),
        grid: grid(
            10,
            8,
            vec![
                paint(TerrainType::Forest, vec![(4, 3), (5, 3), (4, 4)]),
                paint(TerrainType::Mountain, vec![(2, 5)]),
                paint(TerrainType::River, vec![(7, 2), (7, 3)]),
            ],
        ),
        units: vec![
            UnitSpec::new(UnitTemplate::Elf, "Legolas", (1, 1)),
            UnitSpec::new(UnitTemplate::Elf, "Elandor", (2, 3)),
            UnitSpec::new(UnitTemplate::Orc, "Gorbag", (8, 6)),
            UnitSpec::new(UnitTemplate::Orc, "Ugluk", (7, 5)),
            UnitSpec::new(UnitTemplate::Orc, "Shagrat", (6, 4)),
        ],
    }
}

/// Every kind of creature around a river that splits the map
fn wild_lands() -> Scenario {
    let forest = (3..=5).flat_map(|x| (2..=4).map(move |y| (x, y))).collect();
    let river = (0..8).map(|y| (8, y)).collect();
    Scenario {
        name: "Wild Lands".to_string(),
        turns: 60,
        script: None,
        simulation: SimulationConfig::default(),
        grid: grid(
            12,
            8,
            vec![
                paint(TerrainType::Forest, forest),
                paint(TerrainType::River, river),
                paint(TerrainType::Mountain, vec![(1, 6), (2, 6), (2, 7)]),
                paint(TerrainType::Swamp, vec![(10, 5), (10, 6), (11, 5)]),
            ],
        ),
        units: vec![
            UnitSpec::new(UnitTemplate::Elf, "Arwen", (1, 2)),
            UnitSpec::new(UnitTemplate::Orc, "Bolg", (10, 2)),
            UnitSpec::new(UnitTemplate::Animal, "Wolf", (4, 5)),
            UnitSpec::new(UnitTemplate::Animal, "Bear", (6, 1)),
            UnitSpec::new(UnitTemplate::Hunter, "Eagle", (0, 0)),
            UnitSpec::new(UnitTemplate::Bird, "Raven", (11, 7)),
        ],
    }
}

/// Close quarters showing swoops, raids and panic
fn effects_demo() -> Scenario {
    let river = (0..10).map(|y| (5, y)).collect();
    let forest = (0..10).map(|x| (x, 5)).collect();
    Scenario {
        name: "Advanced Effects Demo".to_string(),
        turns: 30,
        script: None,
        simulation: SimulationConfig::default(),
        grid: grid(
            10,
            10,
            vec![
                paint(TerrainType::River, river),
                paint(TerrainType::Forest, forest),
            ],
        ),
        units: vec![
            UnitSpec::new(UnitTemplate::Hunter, "Fast Eagle", (1, 1)),
            UnitSpec::new(UnitTemplate::Forager, "Quick Rabbit", (2, 1)),
            UnitSpec::new(UnitTemplate::Orc, "Raid Orc", (4, 4)),
            UnitSpec::new(UnitTemplate::Elf, "Rich Elf", (3, 4)).carrying(5),
            UnitSpec::new(UnitTemplate::Panicker, "Scared Ostrich", (3, 3)),
        ],
    }
}
