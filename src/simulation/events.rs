//! Turn events and the append-only history log

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{Point, TimeOfDay, UnitId};
use crate::rules::combat::{CombatEvent, CombatOutcome};
use crate::unit::Unit;

/// Id and display name, captured when the event happened
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRef {
    pub id: UnitId,
    pub name: String,
}

impl UnitRef {
    pub fn of(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            name: unit.name.clone(),
        }
    }
}

impl fmt::Display for UnitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    SimulationStarted { units: usize },
    PhaseChanged { time: TimeOfDay },

    // Ranged and movement
    Shot { shooter: UnitRef, target: UnitRef, hit: bool },
    Panicked { unit: UnitRef, from: Point, to: Point },
    Drowned { unit: UnitRef, at: Point },

    // Economy
    Birth { parent: UnitRef, child: UnitRef, at: Point },
    CarrotsCollected { unit: UnitRef, amount: u32, at: Point },
    Swooped { hunter: UnitRef, prey: UnitRef, at: Point },
    Raided { raider: UnitRef, victim: UnitRef, stolen: u32 },

    // Combat
    Dodged { unit: UnitRef, opponent: UnitRef, at: Point },
    Combat(CombatEvent),
    Cornered { unit: UnitRef, at: Point },
    Kicked { kicker: UnitRef, victim: UnitRef },

    /// A unit's action hit a grid or roster error and was abandoned
    ActionFailed { unit: UnitId, reason: String },
    /// Units dropped from the roster by end-of-turn cleanup
    Purged { units: Vec<UnitId> },
}

impl TurnEvent {
    /// Units this event took out of the simulation
    pub fn casualties(&self) -> usize {
        match self {
            TurnEvent::Shot { hit: true, .. }
            | TurnEvent::Drowned { .. }
            | TurnEvent::Swooped { .. }
            | TurnEvent::Cornered { .. } => 1,
            TurnEvent::Combat(event) => match event.outcome {
                CombatOutcome::AttackerWins | CombatOutcome::DefenderWins => 1,
                CombatOutcome::AttackerFlees | CombatOutcome::DefenderFlees => 0,
            },
            TurnEvent::Purged { units } => units.len(),
            _ => 0,
        }
    }
}

impl fmt::Display for TurnEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnEvent::SimulationStarted { units } => {
                write!(f, "Simulation started with {} units", units)
            }
            TurnEvent::PhaseChanged { time: TimeOfDay::Night } => write!(f, "Night falls"),
            TurnEvent::PhaseChanged { time: TimeOfDay::Day } => write!(f, "Day breaks"),
            TurnEvent::Shot { shooter, target, hit: true } => {
                write!(f, "{} shoots {} down", shooter, target)
            }
            TurnEvent::Shot { shooter, target, hit: false } => {
                write!(f, "{} shoots at {} and misses", shooter, target)
            }
            TurnEvent::Panicked { unit, from, to } => {
                write!(f, "{} panics and bolts from {} to {}", unit, from, to)
            }
            TurnEvent::Drowned { unit, at } => write!(f, "{} drowned at {}", unit, at),
            TurnEvent::Birth { parent, child, at } => {
                write!(f, "{} gave birth to {} at {}", parent, child, at)
            }
            TurnEvent::CarrotsCollected { unit, amount, at } => {
                write!(f, "{} collected {} carrots at {}", unit, amount, at)
            }
            TurnEvent::Swooped { hunter, prey, at } => {
                write!(f, "{} swooped on {} from {}", hunter, prey, at)
            }
            TurnEvent::Raided { raider, victim, stolen } => {
                write!(f, "{} raided {} for {} carrots", raider, victim, stolen)
            }
            TurnEvent::Dodged { unit, opponent, at } => {
                write!(f, "{} dodged {} at {}", unit, opponent, at)
            }
            TurnEvent::Combat(event) => write!(f, "{}", event),
            TurnEvent::Cornered { unit, at } => {
                write!(f, "{} was cornered at {} and fell", unit, at)
            }
            TurnEvent::Kicked { kicker, victim } => write!(f, "{} kicked {} away", kicker, victim),
            TurnEvent::ActionFailed { unit, reason } => {
                write!(f, "Action of unit {} failed: {}", unit, reason)
            }
            TurnEvent::Purged { units } => write!(f, "{} stale units purged", units.len()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub turn: u32,
    pub event: TurnEvent,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}: {}", self.turn, self.event)
    }
}

/// The complete history log. Entries are only ever appended.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: u32, event: TurnEvent) {
        self.entries.push(HistoryEntry { turn, event });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entries appended at or after position `start`
    pub fn since(&self, start: usize) -> &[HistoryEntry] {
        self.entries.get(start..).unwrap_or(&[])
    }

    pub fn entries_for_turn(&self, turn: u32) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().filter(move |e| e.turn == turn)
    }

    /// Combat events only
    pub fn combats(&self) -> impl Iterator<Item = &CombatEvent> {
        self.entries.iter().filter_map(|e| match &e.event {
            TurnEvent::Combat(event) => Some(event),
            _ => None,
        })
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
