//! Scenario setup: TOML files and built-in presets

pub mod loader;
pub mod presets;

pub use loader::{GridSpec, Scenario, TerrainPaint, UnitSpec, UnitTemplate};
pub use presets::Preset;
