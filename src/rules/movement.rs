//! Movement and AI: panic sprints, hunter seeking, terrain entry

use crate::core::error::Result;
use crate::core::types::{Direction, Point, UnitId};
use crate::grid::{Resource, TerrainEntry};
use crate::rules::constants::{PANIC_DUST, PANIC_RADIUS, PANIC_SPRINT_STEPS};
use crate::rules::economy;
use crate::simulation::events::{HistoryLog, TurnEvent, UnitRef};
use crate::simulation::world::World;
use crate::unit::Species;

/// Where a unit's direction comes from this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Let the unit's own heuristics decide
    Auto,
    Hold,
    Go(Direction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Stayed,
    Moved { from: Point, to: Point },
    Blocked,
    Drowned { at: Point },
    Panicked { from: Point, to: Point },
}

/// Any orc on foot within panic radius
pub fn hostile_near(world: &World, at: Point) -> bool {
    world.roster.iter().any(|u| {
        u.species() == Species::Orc
            && u.capabilities.is_ground()
            && u.position().is_some_and(|p| p.distance(at) <= PANIC_RADIUS)
    })
}

/// Hunter heads for the nearest forager; everyone else wanders
pub fn choose_direction(world: &mut World, id: UnitId, from: Point) -> Direction {
    let seeking = world.roster.get(id).is_some_and(|u| u.is_hunter());
    if seeking {
        let target = world
            .roster
            .iter()
            .filter(|u| u.id != id && u.is_forager())
            .filter_map(|u| u.position())
            .min_by_key(|p| p.distance(from));
        if let Some(dir) = target.and_then(|p| Direction::toward(from, p)) {
            return dir;
        }
    }
    Direction::random(&mut world.rng)
}

/// Two-step sprint in a random direction, leaving dust behind.
///
/// Fails without side effects when either step hits a wall or the landing
/// cell would block or kill the unit.
fn panic_sprint(world: &mut World, history: &mut HistoryLog, id: UnitId, from: Point) -> Result<Option<Point>> {
    let dir = Direction::random(&mut world.rng);
    let mut to = from;
    for _ in 0..PANIC_SPRINT_STEPS {
        match world.grid.step(to, dir) {
            Some(next) => to = next,
            None => return Ok(None),
        }
    }

    let caps = world.unit(id)?.capabilities;
    let in_dust = world.grid.resource(from, Resource::Dust) > 0;
    let terrain = world.grid.terrain(to).unwrap_or_default();
    if !terrain.entry_for(caps, in_dust).allows_move() {
        return Ok(None);
    }

    world.relocate(id, to)?;
    world.grid.add_resource(from, Resource::Dust, PANIC_DUST)?;
    let unit = world.unit_ref(id)?;
    history.push(world.turn, TurnEvent::Panicked { unit, from, to });
    Ok(Some(to))
}

/// Run one unit's movement for the turn, including post-move economy
pub fn act(world: &mut World, history: &mut HistoryLog, id: UnitId, intent: Intent) -> Result<MoveResult> {
    let Some(unit) = world.roster.get(id) else {
        return Ok(MoveResult::Stayed);
    };
    let Some(from) = unit.position() else {
        return Ok(MoveResult::Stayed);
    };

    if unit.is_panicker() && hostile_near(world, from) {
        if let Some(to) = panic_sprint(world, history, id, from)? {
            return Ok(MoveResult::Panicked { from, to });
        }
    }

    let dir = match intent {
        Intent::Hold => return Ok(MoveResult::Stayed),
        Intent::Go(dir) => dir,
        Intent::Auto => choose_direction(world, id, from),
    };
    let Some(to) = world.grid.step(from, dir) else {
        return Ok(MoveResult::Blocked);
    };

    let caps = world.unit(id)?.capabilities;
    let in_dust = world.grid.resource(from, Resource::Dust) > 0;
    let terrain = world.grid.terrain(to).unwrap_or_default();

    match terrain.entry_for(caps, in_dust) {
        TerrainEntry::CanEnter | TerrainEntry::Slowed => {
            world.relocate(id, to)?;
            tracing::trace!(unit = %id, %from, %to, "moved");
            economy::after_move(world, history, id, from, to)?;
            Ok(MoveResult::Moved { from, to })
        }
        TerrainEntry::Blocked => Ok(MoveResult::Blocked),
        TerrainEntry::Death => {
            let unit = world.kill(id)?;
            tracing::debug!(unit = %unit.name, at = %to, "drowned");
            history.push(
                world.turn,
                TurnEvent::Drowned {
                    unit: UnitRef::of(&unit),
                    at: to,
                },
            );
            Ok(MoveResult::Drowned { at: to })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ChanceTable, SimulationConfig};
    use crate::grid::{Grid, TerrainType, Topology};
    use crate::unit::Unit;

    fn world() -> World {
        let grid = Grid::new(7, 7, Topology::Bounded).unwrap();
        World::new(grid, SimulationConfig::seeded(11).with_chances(ChanceTable::never())).unwrap()
    }

    #[test]
    fn test_scripted_step() {
        let mut world = world();
        let orc = world.spawn_at(Unit::orc("Bolg"), Point::new(3, 3)).unwrap();
        let mut history = HistoryLog::new();

        let result = act(&mut world, &mut history, orc, Intent::Go(Direction::Right)).unwrap();
        assert_eq!(
            result,
            MoveResult::Moved { from: Point::new(3, 3), to: Point::new(4, 3) }
        );
        assert_eq!(world.grid.resource(Point::new(4, 3), Resource::Footprints), 1);
    }

    #[test]
    fn test_wall_blocks() {
        let mut world = world();
        let elf = world.spawn_at(Unit::elf("Arwen"), Point::new(0, 0)).unwrap();
        let mut history = HistoryLog::new();
        let result = act(&mut world, &mut history, elf, Intent::Go(Direction::Left)).unwrap();
        assert_eq!(result, MoveResult::Blocked);
        assert_eq!(world.unit(elf).unwrap().position(), Some(Point::new(0, 0)));
    }

    #[test]
    fn test_hold_stays() {
        let mut world = world();
        let elf = world.spawn_at(Unit::elf("Arwen"), Point::new(2, 2)).unwrap();
        let mut history = HistoryLog::new();
        assert_eq!(
            act(&mut world, &mut history, elf, Intent::Hold).unwrap(),
            MoveResult::Stayed
        );
    }

    #[test]
    fn test_flyer_crosses_river() {
        let mut world = world();
        world.grid.set_terrain(Point::new(3, 4), TerrainType::River).unwrap();
        let raven = world.spawn_at(Unit::bird("Raven", true), Point::new(3, 3)).unwrap();
        let mut history = HistoryLog::new();
        let result = act(&mut world, &mut history, raven, Intent::Go(Direction::Up)).unwrap();
        assert!(matches!(result, MoveResult::Moved { .. }));
    }

    #[test]
    fn test_hunter_seeks_forager() {
        let mut world = world();
        let eagle = world.spawn_at(Unit::hunter("Eagle"), Point::new(1, 1)).unwrap();
        world.spawn_at(Unit::forager("Rabbit"), Point::new(5, 2)).unwrap();
        assert_eq!(choose_direction(&mut world, eagle, Point::new(1, 1)), Direction::Right);
    }

    #[test]
    fn test_panicker_bolts_from_orc() {
        let mut world = world();
        let ostrich = world.spawn_at(Unit::panicker("Ostrich"), Point::new(3, 3)).unwrap();
        world.spawn_at(Unit::orc("Raider"), Point::new(4, 4)).unwrap();
        let mut history = HistoryLog::new();

        let result = act(&mut world, &mut history, ostrich, Intent::Hold).unwrap();
        // All four sprints from the centre of a 7x7 plain are open
        assert_eq!(
            result,
            MoveResult::Panicked {
                from: Point::new(3, 3),
                to: world.unit(ostrich).unwrap().position().unwrap(),
            }
        );
        assert_eq!(world.grid.resource(Point::new(3, 3), Resource::Dust), 3);
    }

    #[test]
    fn test_panicker_calm_without_orcs() {
        let mut world = world();
        let ostrich = world.spawn_at(Unit::panicker("Ostrich"), Point::new(3, 3)).unwrap();
        world.spawn_at(Unit::elf("Arwen"), Point::new(4, 4)).unwrap();
        world.spawn_at(Unit::orc("Distant"), Point::new(6, 6)).unwrap();
        let mut history = HistoryLog::new();
        assert_eq!(
            act(&mut world, &mut history, ostrich, Intent::Hold).unwrap(),
            MoveResult::Stayed
        );
    }

    #[test]
    fn test_blocked_sprint_falls_back_to_intent() {
        let mut world = world();
        // Every two-step landing around the centre is deep water
        for p in [Point::new(3, 5), Point::new(5, 3), Point::new(3, 1), Point::new(1, 3)] {
            world.grid.set_terrain(p, TerrainType::River).unwrap();
        }
        let ostrich = world.spawn_at(Unit::panicker("Ostrich"), Point::new(3, 3)).unwrap();
        world.spawn_at(Unit::orc("Raider"), Point::new(4, 4)).unwrap();
        let mut history = HistoryLog::new();

        let result = act(&mut world, &mut history, ostrich, Intent::Go(Direction::Right)).unwrap();
        assert_eq!(
            result,
            MoveResult::Moved { from: Point::new(3, 3), to: Point::new(4, 3) }
        );
        assert_eq!(world.grid.resource(Point::new(3, 3), Resource::Dust), 0);
        assert!(!history
            .entries()
            .iter()
            .any(|e| matches!(e.event, TurnEvent::Panicked { .. })));
    }

    #[test]
    fn test_sprint_into_wall_falls_back_to_hold() {
        let mut world = world();
        // Cornered: every sprint either hits a wall or lands in the river
        for p in [Point::new(0, 2), Point::new(2, 0)] {
            world.grid.set_terrain(p, TerrainType::River).unwrap();
        }
        let ostrich = world.spawn_at(Unit::panicker("Ostrich"), Point::new(0, 0)).unwrap();
        world.spawn_at(Unit::orc("Raider"), Point::new(1, 1)).unwrap();
        let mut history = HistoryLog::new();

        assert_eq!(
            act(&mut world, &mut history, ostrich, Intent::Hold).unwrap(),
            MoveResult::Stayed
        );
        assert_eq!(world.unit(ostrich).unwrap().position(), Some(Point::new(0, 0)));
    }
}
