//! Turn rules, one module per concern
//!
//! Each rule is a free function over the shared `World` and the history
//! log, acting for a single unit or cell so the engine can isolate
//! failures.

pub mod combat;
pub mod constants;
pub mod economy;
pub mod movement;
pub mod ranged;

pub use combat::{
    power_breakdown, resolve_cell, CellReport, CombatEvent, CombatOutcome, PowerBreakdown,
};
pub use movement::{Intent, MoveResult};
