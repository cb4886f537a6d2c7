//! Per-turn map snapshots for replaying a run

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::simulation::world::World;

/// Symbol drawn for a cell holding more than one unit
pub const CROWD_SYMBOL: char = '*';

/// The map as it stood at the end of one turn.
///
/// Rows run from the highest `y` down, so `rows[0]` is the top of the map.
/// Each cell shows its single occupant's symbol, `*` for a crowd, or the
/// terrain character when empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapFrame {
    pub turn: u32,
    pub rows: Vec<String>,
}

impl MapFrame {
    pub fn capture(world: &World) -> Self {
        let grid = &world.grid;
        let rows = (0..grid.height())
            .rev()
            .map(|y| {
                (0..grid.width())
                    .filter_map(|x| grid.at(x, y).ok())
                    .map(|cell| match cell.occupants() {
                        [] => cell.terrain.to_char(),
                        [id] => world.roster.get(*id).map_or('?', |u| u.symbol),
                        _ => CROWD_SYMBOL,
                    })
                    .collect()
            })
            .collect();
        Self {
            turn: world.turn,
            rows,
        }
    }
}

impl fmt::Display for MapFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
