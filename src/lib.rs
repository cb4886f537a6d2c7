//! Skirmish - turn-based grid simulation of elves, orcs and wildlife

pub mod core;
pub mod grid;
pub mod rules;
pub mod scenario;
pub mod simulation;
pub mod unit;

pub use crate::core::error::{Result, SimError};
pub use crate::simulation::{Simulation, TurnSummary};
