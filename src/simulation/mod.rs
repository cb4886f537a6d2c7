//! Simulation state, history and the turn engine

pub mod engine;
pub mod events;
pub mod invariants;
pub mod output;
pub mod replay;
pub mod world;

pub use engine::{MoveScript, Simulation, TurnSummary};
pub use events::{HistoryEntry, HistoryLog, TurnEvent, UnitRef};
pub use invariants::{check_invariants, InvariantViolation};
pub use output::SimulationOutput;
pub use replay::MapFrame;
pub use world::World;
