//! Melee combat resolution
//!
//! Runs once per crowded cell after all movement. Every unordered pair of
//! different species still on the cell gets one encounter:
//!
//! 1. Foragers may dodge the encounter outright
//! 2. Powers are computed from base, terrain, time of day and pack
//! 3. The stronger side attacks; ties go to the first unit compared
//! 4. A decisive margin kills, otherwise one side may flee or a small roll
//!    decides
//! 5. Panickers may kick a surviving opponent away

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::ChanceTable;
use crate::core::error::{Result, SimError};
use crate::core::types::{Direction, Point, TimeOfDay, UnitId};
use crate::grid::{Grid, TerrainType};
use crate::rules::constants::{
    base_power, terrain_modifier, time_modifier, DECISIVE_MARGIN, MIN_POWER, ORC_PACK_BONUS,
};
use crate::simulation::events::{HistoryLog, TurnEvent, UnitRef};
use crate::simulation::world::World;
use crate::unit::{Roster, Species, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatOutcome {
    AttackerWins,
    DefenderWins,
    AttackerFlees,
    DefenderFlees,
}

impl fmt::Display for CombatOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CombatOutcome::AttackerWins => "attacker wins",
            CombatOutcome::DefenderWins => "defender wins",
            CombatOutcome::AttackerFlees => "attacker flees",
            CombatOutcome::DefenderFlees => "defender flees",
        };
        write!(f, "{}", s)
    }
}

/// Combat power split into its additive parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerBreakdown {
    pub base: i32,
    pub terrain: i32,
    pub time: i32,
    pub pack: i32,
    /// Sum of the parts, floored at `MIN_POWER`
    pub total: i32,
}

impl fmt::Display for PowerBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = base {} terrain {:+} time {:+} pack {:+}",
            self.total, self.base, self.terrain, self.time, self.pack
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub at: Point,
    pub attacker: UnitRef,
    pub defender: UnitRef,
    pub attacker_power: PowerBreakdown,
    pub defender_power: PowerBreakdown,
    pub outcome: CombatOutcome,
    pub terrain: TerrainType,
    pub time: TimeOfDay,
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) vs {} ({}): {} [{}, {}]",
            self.attacker,
            self.attacker_power,
            self.defender,
            self.defender_power,
            self.outcome,
            self.terrain.name(),
            self.time,
        )
    }
}

/// Orcs standing on the four cardinal neighbours of `at`
pub fn pack_size(grid: &Grid, roster: &Roster, at: Point) -> i32 {
    Direction::ALL
        .iter()
        .filter_map(|dir| grid.step(at, *dir))
        .map(|n| {
            grid.occupants(n)
                .iter()
                .filter(|id| roster.get(**id).is_some_and(|u| u.species() == Species::Orc))
                .count() as i32
        })
        .sum()
}

pub fn power_breakdown(
    grid: &Grid,
    roster: &Roster,
    unit: &Unit,
    at: Point,
    time: TimeOfDay,
) -> PowerBreakdown {
    let species = unit.species();
    let base = base_power(species);
    let terrain = terrain_modifier(species, grid.terrain(at).unwrap_or_default());
    let time = time_modifier(species, time);
    let pack = if species == Species::Orc {
        pack_size(grid, roster, at) * ORC_PACK_BONUS
    } else {
        0
    };
    PowerBreakdown {
        base,
        terrain,
        time,
        pack,
        total: (base + terrain + time + pack).max(MIN_POWER),
    }
}

/// Outcome for an attacker leading by `diff`
pub fn decide_outcome<R: Rng + ?Sized>(
    diff: i32,
    terrain: TerrainType,
    chances: &ChanceTable,
    rng: &mut R,
) -> CombatOutcome {
    if diff >= DECISIVE_MARGIN {
        return CombatOutcome::AttackerWins;
    }
    if diff <= -DECISIVE_MARGIN {
        return CombatOutcome::DefenderWins;
    }

    let escape = if terrain == TerrainType::Mountain {
        chances.escape_mountain
    } else {
        chances.escape
    };
    if rng.gen_bool(escape) {
        return if diff >= 0 {
            CombatOutcome::DefenderFlees
        } else {
            CombatOutcome::AttackerFlees
        };
    }

    let roll: i32 = rng.gen_range(-1..=1);
    if diff + roll >= 0 {
        CombatOutcome::AttackerWins
    } else {
        CombatOutcome::DefenderWins
    }
}

/// Shove a unit to a random empty, dry neighbour. Kills it when cornered.
pub fn push_back(
    world: &mut World,
    history: &mut HistoryLog,
    id: UnitId,
    from: Point,
) -> Result<Option<Point>> {
    if let Some(to) = world.random_free_neighbour(from) {
        world.relocate(id, to)?;
        return Ok(Some(to));
    }
    let unit = world.kill(id)?;
    history.push(
        world.turn,
        TurnEvent::Cornered {
            unit: UnitRef::of(&unit),
            at: from,
        },
    );
    Ok(None)
}

/// Outcome of resolving one cell
#[derive(Debug, Default)]
pub struct CellReport {
    /// Pairs that actually fought
    pub encounters: usize,
    /// Pairs abandoned on an error, with the first unit of the pair
    pub failures: Vec<(UnitId, SimError)>,
}

/// Resolve every eligible pair on one cell.
///
/// A failing pair is reported and skipped; the remaining pairs still run.
pub fn resolve_cell(world: &mut World, history: &mut HistoryLog, at: Point) -> CellReport {
    let occupants = world.grid.occupants(at).to_vec();
    let terrain = world.grid.terrain(at).unwrap_or_default();
    let mut report = CellReport::default();

    for i in 0..occupants.len() {
        for j in (i + 1)..occupants.len() {
            let (a, b) = (occupants[i], occupants[j]);
            if !world.is_listed(a, at) || !world.is_listed(b, at) {
                continue;
            }
            match encounter(world, history, a, b, at, terrain) {
                Ok(true) => report.encounters += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(%at, unit = %a, opponent = %b, error = %e, "encounter failed");
                    report.failures.push((a, e));
                }
            }
        }
    }
    report
}

/// One pairwise encounter. Returns whether a fight was resolved.
fn encounter(
    world: &mut World,
    history: &mut HistoryLog,
    a: UnitId,
    b: UnitId,
    at: Point,
    terrain: TerrainType,
) -> Result<bool> {
    let unit_a = world.unit(a)?;
    let unit_b = world.unit(b)?;
    if unit_a.species() == unit_b.species() {
        return Ok(false);
    }
    let (ref_a, ref_b) = (UnitRef::of(unit_a), UnitRef::of(unit_b));
    let (forager_a, forager_b) = (unit_a.is_forager(), unit_b.is_forager());
    let (kicker_a, kicker_b) = (unit_a.is_panicker(), unit_b.is_panicker());
    let power_a = power_breakdown(&world.grid, &world.roster, unit_a, at, world.time_of_day);
    let power_b = power_breakdown(&world.grid, &world.roster, unit_b, at, world.time_of_day);

    let dodge = world.config.chances.dodge;
    let dodged_a = forager_a && world.rng.gen_bool(dodge);
    let dodged_b = forager_b && world.rng.gen_bool(dodge);
    if dodged_a || dodged_b {
        let (unit, opponent) = if dodged_a {
            (ref_a, ref_b)
        } else {
            (ref_b, ref_a)
        };
        history.push(world.turn, TurnEvent::Dodged { unit, opponent, at });
        return Ok(false);
    }

    let (attacker, defender, attacker_power, defender_power) = if power_a.total >= power_b.total {
        (ref_a.clone(), ref_b.clone(), power_a, power_b)
    } else {
        (ref_b.clone(), ref_a.clone(), power_b, power_a)
    };
    let diff = attacker_power.total - defender_power.total;
    let outcome = decide_outcome(diff, terrain, &world.config.chances, &mut world.rng);

    let event = CombatEvent {
        at,
        attacker: attacker.clone(),
        defender: defender.clone(),
        attacker_power,
        defender_power,
        outcome,
        terrain,
        time: world.time_of_day,
    };
    tracing::debug!(%event, "combat");
    history.push(world.turn, TurnEvent::Combat(event));

    match outcome {
        CombatOutcome::AttackerWins => {
            world.kill(defender.id)?;
        }
        CombatOutcome::DefenderWins => {
            world.kill(attacker.id)?;
        }
        CombatOutcome::AttackerFlees => {
            push_back(world, history, attacker.id, at)?;
        }
        CombatOutcome::DefenderFlees => {
            push_back(world, history, defender.id, at)?;
        }
    }

    // A kick shoves the other combatant again, wherever the primary
    // outcome left it, as long as both are still alive.
    let kick = world.config.chances.kick;
    for (kicker, is_kicker, victim) in [(&ref_a, kicker_a, &ref_b), (&ref_b, kicker_b, &ref_a)] {
        if !is_kicker || !world.roster.contains(kicker.id) {
            continue;
        }
        let Some(victim_at) = world.roster.get(victim.id).and_then(|u| u.position()) else {
            continue;
        };
        if world.rng.gen_bool(kick) {
            history.push(
                world.turn,
                TurnEvent::Kicked {
                    kicker: kicker.clone(),
                    victim: victim.clone(),
                },
            );
            push_back(world, history, victim.id, victim_at)?;
        }
    }

    Ok(true)
}
