//! Terrain types and the terrain-entry rule table

use serde::{Deserialize, Serialize};

use crate::core::types::Capabilities;

/// Terrain of a single cell. Fixed once the simulation owns the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TerrainType {
    #[default]
    Plain,
    Forest,
    Mountain,
    River,
    Swamp,
}

/// What happens when a unit tries to step onto a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainEntry {
    CanEnter,
    /// Moves, but the terrain is heavy going
    Slowed,
    Blocked,
    Death,
}

impl TerrainEntry {
    pub fn allows_move(self) -> bool {
        matches!(self, TerrainEntry::CanEnter | TerrainEntry::Slowed)
    }
}

impl TerrainType {
    /// Map character used by scenario files
    pub fn from_char(c: char) -> Option<TerrainType> {
        match c {
            '.' => Some(TerrainType::Plain),
            'F' | 'f' => Some(TerrainType::Forest),
            '^' => Some(TerrainType::Mountain),
            '~' => Some(TerrainType::River),
            '%' => Some(TerrainType::Swamp),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            TerrainType::Plain => '.',
            TerrainType::Forest => 'F',
            TerrainType::Mountain => '^',
            TerrainType::River => '~',
            TerrainType::Swamp => '%',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TerrainType::Plain => "Plain",
            TerrainType::Forest => "Forest",
            TerrainType::Mountain => "Mountain",
            TerrainType::River => "River",
            TerrainType::Swamp => "Swamp",
        }
    }

    /// Entry result for a unit with `caps`.
    ///
    /// Checked flyer, then swimmer, then ground. `in_dust` is whether the
    /// cell the unit is leaving carries dust; it only slows non-flyers onto
    /// open ground. A unit with no locomotion is always blocked.
    pub fn entry_for(self, caps: Capabilities, in_dust: bool) -> TerrainEntry {
        if caps.is_flyer() {
            return TerrainEntry::CanEnter;
        }
        let open_ground = if in_dust {
            TerrainEntry::Slowed
        } else {
            TerrainEntry::CanEnter
        };
        if caps.is_swimmer() {
            return match self {
                TerrainType::River | TerrainType::Mountain | TerrainType::Swamp => {
                    TerrainEntry::Slowed
                }
                TerrainType::Plain | TerrainType::Forest => open_ground,
            };
        }
        if caps.is_ground() {
            return match self {
                TerrainType::River => TerrainEntry::Death,
                TerrainType::Mountain | TerrainType::Swamp => TerrainEntry::Slowed,
                TerrainType::Plain | TerrainType::Forest => open_ground,
            };
        }
        TerrainEntry::Blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_river_drowns_ground_units() {
        assert_eq!(
            TerrainType::River.entry_for(Capabilities::GROUND, false),
            TerrainEntry::Death
        );
        assert_eq!(
            TerrainType::River.entry_for(Capabilities::SWIMMER, false),
            TerrainEntry::Slowed
        );
        assert_eq!(
            TerrainType::River.entry_for(Capabilities::FLYER, false),
            TerrainEntry::CanEnter
        );
    }

    #[test]
    fn test_rough_terrain_slows_walkers() {
        for terrain in [TerrainType::Mountain, TerrainType::Swamp] {
            assert_eq!(terrain.entry_for(Capabilities::GROUND, false), TerrainEntry::Slowed);
            assert_eq!(terrain.entry_for(Capabilities::FLYER, false), TerrainEntry::CanEnter);
        }
    }

    #[test]
    fn test_dust_slows_only_non_flyers() {
        assert_eq!(
            TerrainType::Plain.entry_for(Capabilities::GROUND, true),
            TerrainEntry::Slowed
        );
        assert_eq!(
            TerrainType::Forest.entry_for(Capabilities::FLYER, true),
            TerrainEntry::CanEnter
        );
        assert!(TerrainType::Plain.entry_for(Capabilities::GROUND, true).allows_move());
    }

    #[test]
    fn test_no_locomotion_is_blocked() {
        assert_eq!(
            TerrainType::Plain.entry_for(Capabilities::empty(), false),
            TerrainEntry::Blocked
        );
    }

    #[test]
    fn test_char_round_trip() {
        for t in [
            TerrainType::Plain,
            TerrainType::Forest,
            TerrainType::Mountain,
            TerrainType::River,
            TerrainType::Swamp,
        ] {
            assert_eq!(TerrainType::from_char(t.to_char()), Some(t));
        }
        assert_eq!(TerrainType::from_char('?'), None);
    }
}
