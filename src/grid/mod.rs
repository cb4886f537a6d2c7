//! Terrain grid: cells, occupants and resource counters

pub mod map;
pub mod resources;
pub mod terrain;

pub use map::{Cell, Grid, Topology};
pub use resources::{Resource, ResourcePile};
pub use terrain::{TerrainEntry, TerrainType};
