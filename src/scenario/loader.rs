//! Load scenarios from TOML

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::Point;
use crate::grid::{Grid, TerrainType, Topology};
use crate::simulation::Simulation;
use crate::unit::Unit;

fn default_turns() -> u32 {
    50
}

/// A complete scenario: grid, roster and run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default = "default_turns")]
    pub turns: u32,
    /// Optional move script, see `MoveScript`
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub simulation: SimulationConfig,
    pub grid: GridSpec,
    #[serde(default)]
    pub units: Vec<UnitSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub topology: Topology,
    /// Terrain rows, row `i` is `y = i`. Missing rows stay plain.
    #[serde(default)]
    pub rows: Vec<String>,
    /// Individual cells painted after the rows
    #[serde(default)]
    pub paint: Vec<TerrainPaint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainPaint {
    pub terrain: TerrainType,
    pub at: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitTemplate {
    Elf,
    Orc,
    Animal,
    Forager,
    Bird,
    Hunter,
    Panicker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub kind: UnitTemplate,
    pub name: String,
    pub at: (i32, i32),
    #[serde(default)]
    pub carried: Option<u32>,
    #[serde(default)]
    pub agility: Option<u8>,
    #[serde(default)]
    pub rage: Option<u8>,
    #[serde(default)]
    pub symbol: Option<char>,
    /// Plain birds only; defaults to flying
    #[serde(default)]
    pub flying: Option<bool>,
}

impl UnitSpec {
    pub fn new(kind: UnitTemplate, name: &str, at: (i32, i32)) -> Self {
        Self {
            kind,
            name: name.to_string(),
            at,
            carried: None,
            agility: None,
            rage: None,
            symbol: None,
            flying: None,
        }
    }

    pub fn carrying(mut self, amount: u32) -> Self {
        self.carried = Some(amount);
        self
    }

    pub fn to_unit(&self) -> Unit {
        let name = self.name.as_str();
        let mut unit = match self.kind {
            UnitTemplate::Elf => Unit::elf(name),
            UnitTemplate::Orc => Unit::orc(name),
            UnitTemplate::Animal => Unit::animal(name),
            UnitTemplate::Forager => Unit::forager(name),
            UnitTemplate::Bird => Unit::bird(name, self.flying.unwrap_or(true)),
            UnitTemplate::Hunter => Unit::hunter(name),
            UnitTemplate::Panicker => Unit::panicker(name),
        };
        if let Some(carried) = self.carried {
            unit = unit.with_carried(carried);
        }
        if let Some(agility) = self.agility {
            unit = unit.with_agility(agility);
        }
        if let Some(rage) = self.rage {
            unit = unit.with_rage(rage);
        }
        if let Some(symbol) = self.symbol {
            unit = unit.with_symbol(symbol);
        }
        unit
    }
}

impl GridSpec {
    pub fn build(&self) -> Result<Grid> {
        let mut grid = Grid::new(self.width, self.height, self.topology)?;

        if self.rows.len() > self.height as usize {
            return Err(SimError::Scenario(format!(
                "{} terrain rows for a grid of height {}",
                self.rows.len(),
                self.height
            )));
        }
        for (y, row) in self.rows.iter().enumerate() {
            if row.chars().count() != self.width as usize {
                return Err(SimError::Scenario(format!(
                    "terrain row {} has {} cells, expected {}",
                    y,
                    row.chars().count(),
                    self.width
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let terrain = TerrainType::from_char(c).ok_or_else(|| {
                    SimError::Scenario(format!("unknown terrain '{}' in row {}", c, y))
                })?;
                grid.set_terrain(Point::new(x as i32, y as i32), terrain)?;
            }
        }

        for paint in &self.paint {
            for &(x, y) in &paint.at {
                grid.set_terrain(Point::new(x, y), paint.terrain)?;
            }
        }
        Ok(grid)
    }
}

impl Scenario {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Build a ready-to-run simulation
    pub fn build(&self) -> Result<Simulation> {
        let grid = self.grid.build()?;
        let units = self.units.iter().map(UnitSpec::to_unit).collect();
        let positions = self
            .units
            .iter()
            .map(|u| Point::new(u.at.0, u.at.1))
            .collect();
        let sim = Simulation::new(grid, units, positions, self.simulation.clone())?;
        Ok(match &self.script {
            Some(script) => sim.with_script(script),
            None => sim,
        })
    }
}
