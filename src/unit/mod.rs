//! Units: identity, position and species payload
//!
//! A unit is a species tag with a capability bitset. Rules dispatch on
//! `species()` and `capabilities`, never on names.

pub mod roster;
pub mod species;

pub use roster::Roster;
pub use species::{Species, UnitKind};

use serde::{Deserialize, Serialize};

use crate::core::types::{Capabilities, Point, UnitId};
use crate::rules::constants::{
    AGILITY_EVERY, ANIMAL_START_CARRIED, NAME_MAX_LEN, NAME_MIN_LEN, RAGE_EVERY, STAT_MAX,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub symbol: char,
    pub capabilities: Capabilities,
    pub kind: UnitKind,
    position: Option<Point>,
    bound: bool,
}

impl Unit {
    fn build(name: &str, symbol: char, capabilities: Capabilities, kind: UnitKind) -> Self {
        Self {
            id: UnitId(u32::MAX),
            name: normalize_name(name),
            symbol,
            capabilities,
            kind,
            position: None,
            bound: false,
        }
    }

    pub fn elf(name: &str) -> Self {
        Self::build(
            name,
            'E',
            Capabilities::GROUND,
            UnitKind::Elf { carried: 0, agility: 0, songs: 0 },
        )
    }

    pub fn orc(name: &str) -> Self {
        Self::build(name, 'O', Capabilities::GROUND, UnitKind::Orc { rage: 0, hunts: 0 })
    }

    /// Wildlife that neither forages nor hunts
    pub fn animal(name: &str) -> Self {
        Self::build(
            name,
            'A',
            Capabilities::GROUND,
            UnitKind::Animal {
                carried: ANIMAL_START_CARRIED,
                forager: false,
                turns_since_spawn: 0,
            },
        )
    }

    pub fn forager(name: &str) -> Self {
        Self::build(
            name,
            'R',
            Capabilities::GROUND,
            UnitKind::Animal {
                carried: ANIMAL_START_CARRIED,
                forager: true,
                turns_since_spawn: 0,
            },
        )
    }

    pub fn bird(name: &str, can_fly: bool) -> Self {
        let caps = if can_fly { Capabilities::FLYER } else { Capabilities::GROUND };
        Self::build(
            name,
            'B',
            caps,
            UnitKind::Bird { can_fly, hunter: false, panicker: false },
        )
    }

    /// Flying bird that swoops on foragers
    pub fn hunter(name: &str) -> Self {
        Self::build(
            name,
            'H',
            Capabilities::FLYER,
            UnitKind::Bird { can_fly: true, hunter: true, panicker: false },
        )
    }

    /// Flightless bird that bolts when orcs come close
    pub fn panicker(name: &str) -> Self {
        Self::build(
            name,
            'P',
            Capabilities::GROUND,
            UnitKind::Bird { can_fly: false, hunter: false, panicker: true },
        )
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Starting carrots for elves and animals. Ignored for other species.
    pub fn with_carried(mut self, amount: u32) -> Self {
        self.set_carried(amount);
        self
    }

    pub fn with_agility(mut self, value: u8) -> Self {
        if let UnitKind::Elf { agility, .. } = &mut self.kind {
            *agility = value.min(STAT_MAX);
        }
        self
    }

    pub fn with_rage(mut self, value: u8) -> Self {
        if let UnitKind::Orc { rage, .. } = &mut self.kind {
            *rage = value.min(STAT_MAX);
        }
        self
    }

    pub fn species(&self) -> Species {
        self.kind.species()
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Whether the unit has ever been placed on a grid
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub(crate) fn bind(&mut self, at: Point) {
        self.position = Some(at);
        self.bound = true;
    }

    pub(crate) fn set_position(&mut self, at: Option<Point>) {
        self.position = at;
    }

    pub fn is_forager(&self) -> bool {
        matches!(self.kind, UnitKind::Animal { forager: true, .. })
    }

    pub fn is_hunter(&self) -> bool {
        matches!(self.kind, UnitKind::Bird { hunter: true, .. })
    }

    pub fn is_panicker(&self) -> bool {
        matches!(self.kind, UnitKind::Bird { panicker: true, .. })
    }

    pub fn carried(&self) -> u32 {
        match self.kind {
            UnitKind::Elf { carried, .. } | UnitKind::Animal { carried, .. } => carried,
            _ => 0,
        }
    }

    pub fn set_carried(&mut self, amount: u32) {
        if let UnitKind::Elf { carried, .. } | UnitKind::Animal { carried, .. } = &mut self.kind {
            *carried = amount;
        }
    }

    /// Remove up to `amount` carrots, returns how many were removed
    pub fn take_carried(&mut self, amount: u32) -> u32 {
        let current = self.carried();
        let taken = amount.min(current);
        self.set_carried(current - taken);
        taken
    }

    pub fn agility(&self) -> Option<u8> {
        match self.kind {
            UnitKind::Elf { agility, .. } => Some(agility),
            _ => None,
        }
    }

    pub fn rage(&self) -> Option<u8> {
        match self.kind {
            UnitKind::Orc { rage, .. } => Some(rage),
            _ => None,
        }
    }

    /// Elf song. Every third song raises agility, capped at the stat max.
    pub fn sing(&mut self) -> Option<u8> {
        match &mut self.kind {
            UnitKind::Elf { agility, songs, .. } => {
                Some(species::train(agility, songs, AGILITY_EVERY))
            }
            _ => None,
        }
    }

    /// Orc hunt. Every second hunt raises rage, capped at the stat max.
    pub fn hunt(&mut self) -> Option<u8> {
        match &mut self.kind {
            UnitKind::Orc { rage, hunts } => Some(species::train(rage, hunts, RAGE_EVERY)),
            _ => None,
        }
    }
}

/// Trim, pad short names with `#`, cut long ones with a trailing `#`,
/// and capitalise the first letter.
pub fn normalize_name(raw: &str) -> String {
    let mut chars: Vec<char> = raw.trim().chars().collect();
    if chars.len() > NAME_MAX_LEN {
        chars.truncate(NAME_MAX_LEN - 1);
        chars.push('#');
    }
    while chars.len() < NAME_MIN_LEN {
        chars.push('#');
    }
    if let Some(first) = chars.first_mut() {
        *first = first.to_uppercase().next().unwrap_or(*first);
    }
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  legolas "), "Legolas");
        assert_eq!(normalize_name("o"), "O##");
        assert_eq!(normalize_name(""), "###");

        let long = normalize_name(&"a".repeat(40));
        assert_eq!(long.chars().count(), NAME_MAX_LEN);
        assert!(long.starts_with('A'));
        assert!(long.ends_with('#'));
    }

    #[test]
    fn test_constructors_set_traits() {
        assert!(Unit::forager("Rabbit").is_forager());
        assert!(!Unit::animal("Wolf").is_forager());
        assert!(Unit::hunter("Eagle").capabilities.is_flyer());

        let ostrich = Unit::panicker("Ostrich");
        assert!(ostrich.is_panicker());
        assert!(!ostrich.capabilities.is_flyer());
        assert_eq!(Unit::forager("Rabbit").carried(), ANIMAL_START_CARRIED);
        assert_eq!(Unit::elf("Arwen").carried(), 0);
    }

    #[test]
    fn test_stats_clamped() {
        assert_eq!(Unit::elf("Arwen").with_agility(42).agility(), Some(STAT_MAX));
        assert_eq!(Unit::orc("Bolg").with_rage(11).rage(), Some(STAT_MAX));
        assert_eq!(Unit::orc("Bolg").agility(), None);
    }

    #[test]
    fn test_sing_and_hunt_growth() {
        let mut elf = Unit::elf("Arwen");
        elf.sing();
        elf.sing();
        assert_eq!(elf.sing(), Some(1));

        let mut orc = Unit::orc("Bolg");
        orc.hunt();
        assert_eq!(orc.hunt(), Some(1));
        assert_eq!(elf.hunt(), None);
    }

    #[test]
    fn test_take_carried_clamps() {
        let mut elf = Unit::elf("Arwen").with_carried(3);
        assert_eq!(elf.take_carried(5), 3);
        assert_eq!(elf.carried(), 0);
    }

    #[test]
    fn test_carried_ignored_for_orcs() {
        let orc = Unit::orc("Bolg").with_carried(5);
        assert_eq!(orc.carried(), 0);
    }
}
