//! Species tags and their per-species attribute payloads

use serde::{Deserialize, Serialize};

use crate::rules::constants::STAT_MAX;

/// Species tag. Units of the same species never fight each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Elf,
    Orc,
    Animal,
    Bird,
}

impl Species {
    pub fn name(self) -> &'static str {
        match self {
            Species::Elf => "Elf",
            Species::Orc => "Orc",
            Species::Animal => "Animal",
            Species::Bird => "Bird",
        }
    }
}

/// Species-specific attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnitKind {
    Elf {
        carried: u32,
        agility: u8,
        songs: u32,
    },
    Orc {
        rage: u8,
        hunts: u32,
    },
    Animal {
        carried: u32,
        forager: bool,
        turns_since_spawn: u32,
    },
    Bird {
        can_fly: bool,
        hunter: bool,
        panicker: bool,
    },
}

impl UnitKind {
    pub fn species(&self) -> Species {
        match self {
            UnitKind::Elf { .. } => Species::Elf,
            UnitKind::Orc { .. } => Species::Orc,
            UnitKind::Animal { .. } => Species::Animal,
            UnitKind::Bird { .. } => Species::Bird,
        }
    }
}

/// Bump a bounded stat every `every`-th call of its action
pub(crate) fn train(stat: &mut u8, counter: &mut u32, every: u32) -> u8 {
    *counter += 1;
    if *counter % every == 0 && *stat < STAT_MAX {
        *stat += 1;
    }
    *stat
}
