pub mod config;
pub mod error;
pub mod types;

pub use config::{ChanceTable, SimulationConfig};
pub use error::{Result, SimError};
pub use types::{Capabilities, Direction, Point, TimeOfDay, UnitId};
