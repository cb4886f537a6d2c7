//! Turn engine
//!
//! Each call to [`Simulation::next_turn`] runs one full turn:
//!
//! 1. Advance the counter and toggle day/night on the period
//! 2. Elves fire at targets exactly two cells away
//! 3. Foragers count towards reproduction
//! 4. Every unit alive at turn start moves (scripted or autonomous)
//! 5. Combat on every crowded cell, row-major
//! 6. Purge roster entries whose cell no longer lists them
//!
//! A failing unit action is logged and recorded in the turn summary; it
//! never stops the other units.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{Direction, Point, TimeOfDay, UnitId};
use crate::grid::Grid;
use crate::rules::{combat, economy, movement, ranged, Intent};
use crate::simulation::events::{HistoryLog, TurnEvent};
use crate::simulation::invariants::check_invariants;
use crate::simulation::replay::MapFrame;
use crate::simulation::world::World;
use crate::unit::{Roster, Unit};

/// Pre-recorded moves, one entry per moving unit in roster order.
///
/// `u`/`r`/`d`/`l` move (case-insensitive); any other character holds
/// that unit in place for the slot. Whitespace is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveScript {
    moves: Vec<Intent>,
    cursor: usize,
}

impl MoveScript {
    pub fn parse(script: &str) -> Self {
        let moves = script
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Direction::from_char(c).map_or(Intent::Hold, Intent::Go))
            .collect();
        Self { moves, cursor: 0 }
    }

    pub fn next_intent(&mut self) -> Option<Intent> {
        let intent = self.moves.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(intent)
    }

    pub fn remaining(&self) -> usize {
        self.moves.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

/// What happened during one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnSummary {
    pub turn: u32,
    pub time_of_day: TimeOfDay,
    pub events: usize,
    pub combats: usize,
    pub births: usize,
    pub casualties: usize,
    pub survivors: usize,
    /// Unit actions abandoned because of an error
    pub faults: Vec<String>,
}

pub struct Simulation {
    world: World,
    history: HistoryLog,
    script: Option<MoveScript>,
    /// Map at turn 0 and after every completed turn
    replay: Vec<MapFrame>,
}

impl Simulation {
    /// Place `units[i]` at `positions[i]` and take ownership of the grid.
    ///
    /// Fails before anything is placed if the roster is empty, the counts
    /// differ or a position lies off the grid.
    pub fn new(
        grid: Grid,
        units: Vec<Unit>,
        positions: Vec<Point>,
        config: SimulationConfig,
    ) -> Result<Self> {
        if units.is_empty() {
            return Err(SimError::EmptyRoster);
        }
        if units.len() != positions.len() {
            return Err(SimError::PositionCountMismatch {
                units: units.len(),
                positions: positions.len(),
            });
        }
        if let Some(bad) = positions.iter().find(|p| !grid.is_valid(**p)) {
            return Err(SimError::OutOfBounds(*bad));
        }

        let mut world = World::new(grid, config)?;
        for (unit, at) in units.into_iter().zip(positions) {
            world.spawn_at(unit, at)?;
        }

        let mut history = HistoryLog::new();
        history.push(0, TurnEvent::SimulationStarted { units: world.roster.len() });
        info!(
            units = world.roster.len(),
            width = world.grid.width(),
            height = world.grid.height(),
            "simulation created"
        );

        let replay = vec![MapFrame::capture(&world)];
        Ok(Self {
            world,
            history,
            script: None,
            replay,
        })
    }

    /// Drive movement from a script instead of unit heuristics
    pub fn with_script(mut self, script: &str) -> Self {
        self.script = Some(MoveScript::parse(script));
        self
    }

    pub fn turn(&self) -> u32 {
        self.world.turn
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.world.time_of_day
    }

    pub fn roster(&self) -> &Roster {
        &self.world.roster
    }

    pub fn grid(&self) -> &Grid {
        &self.world.grid
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.world.config
    }

    /// Read-only view of the full state, for checks and rendering
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn replay(&self) -> &[MapFrame] {
        &self.replay
    }

    pub fn script(&self) -> Option<&MoveScript> {
        self.script.as_ref()
    }

    /// No units left, or a move script has run out
    pub fn is_finished(&self) -> bool {
        self.world.roster.is_empty() || self.script.as_ref().is_some_and(|s| s.is_exhausted())
    }

    /// Run one full turn
    pub fn next_turn(&mut self) -> Result<TurnSummary> {
        if self.is_finished() {
            return Err(SimError::SimulationFinished);
        }

        let Self {
            world,
            history,
            script,
            replay,
        } = self;
        let start = history.len();
        let mut faults = Vec::new();

        // Snapshot before anyone shoots or spawns
        let active = world.roster.ids();

        // 1. Day/night
        world.turn += 1;
        if world.turn % world.config.day_night_period == 0 {
            world.time_of_day = world.time_of_day.toggled();
            debug!(turn = world.turn, time = %world.time_of_day, "phase changed");
            history.push(world.turn, TurnEvent::PhaseChanged { time: world.time_of_day });
        }

        // 2. Ranged attacks
        for id in world.roster.ids() {
            if let Err(e) = ranged::fire(world, history, id) {
                record_fault(world, history, &mut faults, id, e);
            }
        }

        // 3. Reproduction, over foragers alive before any spawn
        let foragers: Vec<UnitId> = world
            .roster
            .iter()
            .filter(|u| u.is_forager())
            .map(|u| u.id)
            .collect();
        for id in foragers {
            if let Err(e) = economy::reproduce(world, history, id) {
                record_fault(world, history, &mut faults, id, e);
            }
        }

        // 4. Movement
        for id in active {
            if !world.roster.contains(id) {
                continue;
            }
            let intent = match script.as_mut() {
                Some(script) => script.next_intent().unwrap_or(Intent::Hold),
                None => Intent::Auto,
            };
            match movement::act(world, history, id, intent) {
                Ok(result) => tracing::trace!(unit = %id, ?result, "movement"),
                Err(e) => record_fault(world, history, &mut faults, id, e),
            }
        }

        // 5. Combat
        let crowded: Vec<Point> = world
            .grid
            .cells()
            .filter(|(_, cell)| cell.occupants().len() > 1)
            .map(|(p, _)| p)
            .collect();
        for at in crowded {
            let report = combat::resolve_cell(world, history, at);
            for (unit, e) in report.failures {
                record_fault(world, history, &mut faults, unit, e);
            }
        }

        // 6. Cleanup
        let stale: Vec<UnitId> = world
            .roster
            .iter()
            .filter(|u| u.position().map_or(true, |p| !world.grid.occupants(p).contains(&u.id)))
            .map(|u| u.id)
            .collect();
        if !stale.is_empty() {
            for id in &stale {
                world.roster.remove(*id);
            }
            warn!(count = stale.len(), "purged stale roster entries");
            history.push(world.turn, TurnEvent::Purged { units: stale });
        }

        if cfg!(debug_assertions) {
            for violation in check_invariants(world) {
                tracing::error!(turn = world.turn, %violation, "invariant violated");
            }
        }

        replay.push(MapFrame::capture(world));

        let new_entries = history.since(start);
        let summary = TurnSummary {
            turn: world.turn,
            time_of_day: world.time_of_day,
            events: new_entries.len(),
            combats: new_entries
                .iter()
                .filter(|e| matches!(e.event, TurnEvent::Combat(_)))
                .count(),
            births: new_entries
                .iter()
                .filter(|e| matches!(e.event, TurnEvent::Birth { .. }))
                .count(),
            casualties: new_entries.iter().map(|e| e.event.casualties()).sum(),
            survivors: world.roster.len(),
            faults,
        };
        debug!(
            turn = summary.turn,
            events = summary.events,
            survivors = summary.survivors,
            "turn complete"
        );
        Ok(summary)
    }

    /// Run up to `max_turns`, stopping early once finished.
    ///
    /// Returns the summaries of the turns actually run.
    pub fn run(&mut self, max_turns: u32) -> Vec<TurnSummary> {
        let mut summaries = Vec::new();
        for _ in 0..max_turns {
            match self.next_turn() {
                Ok(summary) => summaries.push(summary),
                Err(_) => break,
            }
        }
        summaries
    }
}

fn record_fault(
    world: &World,
    history: &mut HistoryLog,
    faults: &mut Vec<String>,
    unit: UnitId,
    error: SimError,
) {
    warn!(turn = world.turn, %unit, %error, "unit action failed");
    faults.push(format!("unit {}: {}", unit, error));
    history.push(
        world.turn,
        TurnEvent::ActionFailed {
            unit,
            reason: error.to_string(),
        },
    );
}
