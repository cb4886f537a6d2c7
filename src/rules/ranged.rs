//! Elf ranged attacks

use rand::Rng;

use crate::core::error::Result;
use crate::core::types::{Point, UnitId};
use crate::rules::constants::RANGED_DISTANCE;
use crate::simulation::events::{HistoryLog, TurnEvent, UnitRef};
use crate::simulation::world::World;
use crate::unit::Species;

/// First non-elf unit, in roster order, at exactly ranged distance
pub fn find_target(world: &World, from: Point) -> Option<UnitId> {
    world
        .roster
        .iter()
        .find(|u| {
            u.species() != Species::Elf
                && u.position().is_some_and(|p| p.distance(from) == RANGED_DISTANCE)
        })
        .map(|u| u.id)
}

/// One shot for one elf. Non-elves and elves without a target do nothing.
pub fn fire(world: &mut World, history: &mut HistoryLog, shooter: UnitId) -> Result<()> {
    let Some(unit) = world.roster.get(shooter) else {
        return Ok(());
    };
    if unit.species() != Species::Elf {
        return Ok(());
    }
    let Some(from) = unit.position() else {
        return Ok(());
    };
    let shooter_ref = UnitRef::of(unit);

    let Some(target) = find_target(world, from) else {
        return Ok(());
    };

    let hit = world.rng.gen_bool(world.config.chances.ranged_hit);
    let target_ref = if hit {
        UnitRef::of(&world.kill(target)?)
    } else {
        world.unit_ref(target)?
    };
    tracing::trace!(shooter = %shooter_ref, target = %target_ref, hit, "ranged attack");
    history.push(
        world.turn,
        TurnEvent::Shot {
            shooter: shooter_ref,
            target: target_ref,
            hit,
        },
    );
    Ok(())
}
