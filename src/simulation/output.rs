//! Simulation output and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::types::{Point, TimeOfDay, UnitId};
use crate::simulation::engine::Simulation;
use crate::simulation::events::{HistoryLog, TurnEvent};
use crate::simulation::replay::MapFrame;
use crate::unit::Species;

/// Complete simulation output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub scenario: String,
    pub survivors: Vec<SurvivorSnapshot>,
    pub history: HistoryLog,
    /// Map after each turn, starting with the initial layout
    pub replay: Vec<MapFrame>,
    pub statistics: SimulationStats,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SurvivorSnapshot {
    pub id: UnitId,
    pub name: String,
    pub species: Species,
    pub position: Option<Point>,
    pub carried: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationStats {
    pub turns_simulated: u32,
    pub final_phase: TimeOfDay,
    pub simulation_time_ms: u64,
    pub total_events: u32,
    pub combats: u32,
    pub births: u32,
    pub casualties: u32,
    pub faults: u32,
    pub units_spawned: u32,
}

impl SimulationOutput {
    pub fn new(scenario: &str, sim: &Simulation, elapsed: Duration) -> Self {
        let history = sim.history().clone();
        let count = |pred: fn(&TurnEvent) -> bool| {
            history.entries().iter().filter(|e| pred(&e.event)).count() as u32
        };

        let statistics = SimulationStats {
            turns_simulated: sim.turn(),
            final_phase: sim.time_of_day(),
            simulation_time_ms: elapsed.as_millis() as u64,
            total_events: history.len() as u32,
            combats: count(|e| matches!(e, TurnEvent::Combat(_))),
            births: count(|e| matches!(e, TurnEvent::Birth { .. })),
            casualties: history
                .entries()
                .iter()
                .map(|e| e.event.casualties() as u32)
                .sum(),
            faults: count(|e| matches!(e, TurnEvent::ActionFailed { .. })),
            units_spawned: sim.roster().issued(),
        };

        let survivors = sim
            .roster()
            .iter()
            .map(|u| SurvivorSnapshot {
                id: u.id,
                name: u.name.clone(),
                species: u.species(),
                position: u.position(),
                carried: u.carried(),
            })
            .collect();

        Self {
            scenario: scenario.to_string(),
            survivors,
            history,
            replay: sim.replay().to_vec(),
            statistics,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} turns in {}ms, ending at {}\n{} events, {} combats, {} births, {} casualties, {} survivors",
            self.scenario,
            self.statistics.turns_simulated,
            self.statistics.simulation_time_ms,
            self.statistics.final_phase,
            self.statistics.total_events,
            self.statistics.combats,
            self.statistics.births,
            self.statistics.casualties,
            self.survivors.len(),
        )
    }
}
