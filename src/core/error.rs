use thiserror::Error;

use crate::core::types::{Point, UnitId};

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Grid must be at least {min}x{min}, got {width}x{height}")]
    InvalidGridSize { width: i32, height: i32, min: i32 },

    #[error("Grid of {width}x{height} exceeds the limit of {max} cells")]
    GridTooLarge { width: i32, height: i32, max: usize },

    #[error("Position out of bounds: {0}")]
    OutOfBounds(Point),

    #[error("Unit already placed on a grid: {0}")]
    AlreadyPlaced(String),

    #[error("Got {units} units but {positions} positions")]
    PositionCountMismatch { units: usize, positions: usize },

    #[error("Simulation needs at least one unit")]
    EmptyRoster,

    #[error("Unit not found: {0}")]
    UnitNotFound(UnitId),

    #[error("Unit {unit} is not at {at}")]
    NotAtPosition { unit: UnitId, at: Point },

    #[error("Simulation finished: no units or moves remain")]
    SimulationFinished,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
