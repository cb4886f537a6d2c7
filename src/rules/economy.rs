//! Resource economy: carrot drops and pickups, swoops, raids, reproduction
//!
//! Everything here except reproduction runs right after a unit has changed
//! cell.

use rand::Rng;

use crate::core::error::Result;
use crate::core::types::{Point, UnitId};
use crate::grid::Resource;
use crate::rules::constants::{
    OFFSPRING_CARRIED, OFFSPRING_PREFIX, REPRODUCTION_THRESHOLD, SWOOP_RADIUS,
};
use crate::simulation::events::{HistoryLog, TurnEvent, UnitRef};
use crate::simulation::world::World;
use crate::unit::{Species, Unit, UnitKind};

/// Apply the arrival and departure effects of a completed move
pub fn after_move(
    world: &mut World,
    history: &mut HistoryLog,
    id: UnitId,
    from: Point,
    to: Point,
) -> Result<()> {
    let Some(unit) = world.roster.get(id) else {
        return Ok(());
    };
    let (species, forager, hunter) = (unit.species(), unit.is_forager(), unit.is_hunter());
    match species {
        Species::Animal if forager => drop_carrot(world, id, from),
        Species::Elf => collect_carrots(world, history, id, to),
        Species::Bird if hunter => swoop(world, history, id).map(|_| ()),
        Species::Orc => {
            world.grid.add_resource(to, Resource::Footprints, 1)?;
            raid(world, history, id, to).map(|_| ())
        }
        _ => Ok(()),
    }
}

/// Forager leaves one carrot on the cell it just vacated
pub fn drop_carrot(world: &mut World, id: UnitId, vacated: Point) -> Result<()> {
    let unit = world.unit_mut(id)?;
    if unit.carried() == 0 {
        return Ok(());
    }
    unit.take_carried(1);
    world.grid.add_resource(vacated, Resource::Carrots, 1)?;
    tracing::trace!(unit = %id, at = %vacated, "carrot dropped");
    Ok(())
}

/// Elf gathers every carrot on its cell
pub fn collect_carrots(
    world: &mut World,
    history: &mut HistoryLog,
    id: UnitId,
    at: Point,
) -> Result<()> {
    let amount = world.grid.take_all_resource(at, Resource::Carrots)?;
    if amount == 0 {
        return Ok(());
    }
    let unit = world.unit_mut(id)?;
    let total = unit.carried().saturating_add(amount);
    unit.set_carried(total);
    unit.sing();
    let unit_ref = UnitRef::of(unit);
    history.push(
        world.turn,
        TurnEvent::CarrotsCollected {
            unit: unit_ref,
            amount,
            at,
        },
    );
    Ok(())
}

/// Nearest forager within swoop range, ties going to roster order
pub fn nearest_prey(world: &World, hunter: UnitId, from: Point, radius: i32) -> Option<UnitId> {
    world
        .roster
        .iter()
        .filter(|u| u.id != hunter && u.is_forager())
        .filter_map(|u| u.position().map(|p| (u.id, p.distance(from))))
        .filter(|(_, d)| *d <= radius)
        .min_by_key(|(_, d)| *d)
        .map(|(id, _)| id)
}

/// Hunter takes the nearest forager in range and drops a feather
pub fn swoop(world: &mut World, history: &mut HistoryLog, hunter: UnitId) -> Result<Option<UnitId>> {
    let unit = world.unit(hunter)?;
    let Some(at) = unit.position() else {
        return Ok(None);
    };
    let hunter_ref = UnitRef::of(unit);
    let Some(prey) = nearest_prey(world, hunter, at, SWOOP_RADIUS) else {
        return Ok(None);
    };

    let prey_unit = world.kill(prey)?;
    world.grid.add_resource(at, Resource::Feathers, 1)?;
    history.push(
        world.turn,
        TurnEvent::Swooped {
            hunter: hunter_ref,
            prey: UnitRef::of(&prey_unit),
            at,
        },
    );
    Ok(Some(prey))
}

/// Orc robs the first adjacent elf that carries anything.
///
/// Returns how many carrots were stolen.
pub fn raid(world: &mut World, history: &mut HistoryLog, raider: UnitId, at: Point) -> Result<u32> {
    let victim = world
        .roster
        .iter()
        .find(|u| {
            u.species() == Species::Elf
                && u.carried() > 0
                && u.position().is_some_and(|p| p.is_adjacent(at))
        })
        .map(|u| u.id);
    let Some(victim) = victim else {
        return Ok(0);
    };

    let chances = &world.config.chances;
    let chance = if world.time_of_day.is_night() {
        chances.raid_night
    } else {
        chances.raid_day
    };
    if !world.rng.gen_bool(chance) {
        return Ok(0);
    }

    let carried = world.unit(victim)?.carried();
    let stolen = world.rng.gen_range(1..=carried / 2 + 1).min(carried);
    let victim_unit = world.unit_mut(victim)?;
    victim_unit.take_carried(stolen);
    let victim_ref = UnitRef::of(victim_unit);

    let orc = world.unit_mut(raider)?;
    orc.hunt();
    let raider_ref = UnitRef::of(orc);

    history.push(
        world.turn,
        TurnEvent::Raided {
            raider: raider_ref,
            victim: victim_ref,
            stolen,
        },
    );
    Ok(stolen)
}

/// Count a forager's turn and spawn an offspring at the threshold.
///
/// The counter resets at the threshold even when no free neighbour exists;
/// the spawn is then skipped, not retried.
pub fn reproduce(world: &mut World, history: &mut HistoryLog, parent: UnitId) -> Result<Option<UnitId>> {
    let Some(unit) = world.roster.get_mut(parent) else {
        return Ok(None);
    };
    let UnitKind::Animal {
        forager: true,
        turns_since_spawn,
        ..
    } = &mut unit.kind
    else {
        return Ok(None);
    };
    *turns_since_spawn += 1;
    if *turns_since_spawn < REPRODUCTION_THRESHOLD {
        return Ok(None);
    }
    *turns_since_spawn = 0;

    let Some(at) = unit.position() else {
        return Ok(None);
    };
    let parent_ref = UnitRef::of(unit);
    let Some(spot) = world.random_free_neighbour(at) else {
        tracing::trace!(parent = %parent_ref, "no room to reproduce");
        return Ok(None);
    };

    let child = Unit::forager(&format!("{}{}", OFFSPRING_PREFIX, parent_ref.name))
        .with_carried(OFFSPRING_CARRIED);
    let child_id = world.spawn_at(child, spot)?;
    let child_ref = world.unit_ref(child_id)?;
    history.push(
        world.turn,
        TurnEvent::Birth {
            parent: parent_ref,
            child: child_ref,
            at: spot,
        },
    );
    Ok(Some(child_id))
}
