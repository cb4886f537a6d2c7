//! Grid/roster consistency checks
//!
//! These should never fire. A violation means a rule moved or removed a
//! unit without keeping the grid and roster in step.

use std::fmt;

use ahash::AHashMap;

use crate::core::types::{Point, UnitId};
use crate::simulation::world::World;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Roster unit with no position
    Unplaced { unit: UnitId },
    /// Unit's position names a cell that does not list it
    PositionMismatch { unit: UnitId, position: Point },
    /// Unit listed on more than one cell, or twice on one
    Duplicate { unit: UnitId, listings: usize },
    /// Cell lists a unit the roster no longer has
    Orphan { unit: UnitId, at: Point },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::Unplaced { unit } => write!(f, "unit {} has no position", unit),
            InvariantViolation::PositionMismatch { unit, position } => {
                write!(f, "unit {} claims {} but is not listed there", unit, position)
            }
            InvariantViolation::Duplicate { unit, listings } => {
                write!(f, "unit {} listed {} times", unit, listings)
            }
            InvariantViolation::Orphan { unit, at } => {
                write!(f, "cell {} lists removed unit {}", at, unit)
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Check every unit and every cell.
///
/// Returns an empty list when the world is consistent.
#[must_use]
pub fn check_invariants(world: &World) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut listings: AHashMap<UnitId, usize> = AHashMap::new();

    for (at, cell) in world.grid.cells() {
        for id in cell.occupants() {
            *listings.entry(*id).or_insert(0) += 1;
            if !world.roster.contains(*id) {
                violations.push(InvariantViolation::Orphan { unit: *id, at });
            }
        }
    }

    for unit in world.roster.iter() {
        match unit.position() {
            None => violations.push(InvariantViolation::Unplaced { unit: unit.id }),
            Some(position) if !world.grid.occupants(position).contains(&unit.id) => {
                violations.push(InvariantViolation::PositionMismatch {
                    unit: unit.id,
                    position,
                });
            }
            Some(_) => {}
        }
        let count = listings.get(&unit.id).copied().unwrap_or(0);
        if count > 1 {
            violations.push(InvariantViolation::Duplicate {
                unit: unit.id,
                listings: count,
            });
        }
    }

    violations
}
