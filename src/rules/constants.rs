//! Rule-table constants - all fixed combat and economy numbers in one place
//!
//! Modifiers are ADDITIVE. Probabilities live in `SimulationConfig`.

use crate::core::types::TimeOfDay;
use crate::grid::terrain::TerrainType;
use crate::unit::Species;

// Grid
pub const MIN_GRID_SIZE: i32 = 5;
pub const MAX_GRID_CELLS: usize = 1 << 20;

// Names
pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 25;

// Stats
pub const STAT_MAX: u8 = 10;
pub const AGILITY_EVERY: u32 = 3;
pub const RAGE_EVERY: u32 = 2;

// Base combat power
pub const ORC_BASE_POWER: i32 = 7;
pub const ELF_BASE_POWER: i32 = 6;
pub const ANIMAL_BASE_POWER: i32 = 4;
pub const BIRD_BASE_POWER: i32 = 3;
pub const MIN_POWER: i32 = 1;

// Terrain modifiers
pub const FOREST_ELF_BONUS: i32 = 3;
pub const FOREST_OTHERS_PENALTY: i32 = -1;
pub const MOUNTAIN_BONUS: i32 = 1;
pub const SWAMP_PENALTY: i32 = -1;

// Time-of-day modifiers
pub const ORC_NIGHT_BONUS: i32 = 3;
pub const ELF_DAY_BONUS: i32 = 2;
pub const ELF_NIGHT_PENALTY: i32 = -1;

// Pack bonus per orc on a cardinal neighbour
pub const ORC_PACK_BONUS: i32 = 1;

// Outcome thresholds
pub const DECISIVE_MARGIN: i32 = 3;

// Ranges (Chebyshev)
pub const RANGED_DISTANCE: i32 = 2;
pub const PANIC_RADIUS: i32 = 2;
pub const SWOOP_RADIUS: i32 = 2;

// Economy
pub const ANIMAL_START_CARRIED: u32 = 10;
pub const OFFSPRING_CARRIED: u32 = 5;
pub const REPRODUCTION_THRESHOLD: u32 = 10;
pub const PANIC_DUST: u32 = 3;
pub const PANIC_SPRINT_STEPS: usize = 2;
pub const OFFSPRING_PREFIX: &str = "Baby";

pub fn base_power(species: Species) -> i32 {
    match species {
        Species::Orc => ORC_BASE_POWER,
        Species::Elf => ELF_BASE_POWER,
        Species::Animal => ANIMAL_BASE_POWER,
        Species::Bird => BIRD_BASE_POWER,
    }
}

pub fn terrain_modifier(species: Species, terrain: TerrainType) -> i32 {
    match terrain {
        TerrainType::Forest if species == Species::Elf => FOREST_ELF_BONUS,
        TerrainType::Forest => FOREST_OTHERS_PENALTY,
        TerrainType::Mountain => MOUNTAIN_BONUS,
        TerrainType::Swamp => SWAMP_PENALTY,
        TerrainType::Plain | TerrainType::River => 0,
    }
}

pub fn time_modifier(species: Species, time: TimeOfDay) -> i32 {
    match (species, time) {
        (Species::Orc, TimeOfDay::Night) => ORC_NIGHT_BONUS,
        (Species::Elf, TimeOfDay::Day) => ELF_DAY_BONUS,
        (Species::Elf, TimeOfDay::Night) => ELF_NIGHT_PENALTY,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_power_ordering() {
        assert!(base_power(Species::Orc) > base_power(Species::Elf));
        assert!(base_power(Species::Elf) > base_power(Species::Animal));
        assert!(base_power(Species::Animal) > base_power(Species::Bird));
    }

    #[test]
    fn test_elves_own_the_forest() {
        assert_eq!(terrain_modifier(Species::Elf, TerrainType::Forest), 3);
        assert_eq!(terrain_modifier(Species::Orc, TerrainType::Forest), -1);
        assert_eq!(terrain_modifier(Species::Bird, TerrainType::Mountain), 1);
    }

    #[test]
    fn test_time_modifiers() {
        assert_eq!(time_modifier(Species::Orc, TimeOfDay::Night), 3);
        assert_eq!(time_modifier(Species::Orc, TimeOfDay::Day), 0);
        assert_eq!(time_modifier(Species::Elf, TimeOfDay::Day), 2);
        assert_eq!(time_modifier(Species::Elf, TimeOfDay::Night), -1);
        assert_eq!(time_modifier(Species::Animal, TimeOfDay::Night), 0);
    }

    #[test]
    fn test_offspring_poorer_than_parents() {
        assert!(OFFSPRING_CARRIED < ANIMAL_START_CARRIED);
    }
}
