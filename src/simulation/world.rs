//! World - the single mutable state container for a simulation

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{Direction, Point, TimeOfDay, UnitId};
use crate::grid::{Grid, TerrainType};
use crate::simulation::events::UnitRef;
use crate::unit::{Roster, Unit};

/// Grid, roster and RNG, passed by `&mut` through every rule
pub struct World {
    pub grid: Grid,
    pub roster: Roster,
    /// Random number generator (deterministic when seeded)
    pub rng: ChaCha8Rng,
    pub config: SimulationConfig,
    /// Turns completed so far
    pub turn: u32,
    pub time_of_day: TimeOfDay,
}

impl World {
    pub fn new(grid: Grid, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            grid,
            roster: Roster::new(),
            rng,
            config,
            turn: 0,
            time_of_day: TimeOfDay::Day,
        })
    }

    /// Add a fresh unit to the roster and place it at `at`
    pub fn spawn_at(&mut self, unit: Unit, at: Point) -> Result<UnitId> {
        if unit.is_bound() {
            return Err(SimError::AlreadyPlaced(unit.name));
        }
        if !self.grid.is_valid(at) {
            return Err(SimError::OutOfBounds(at));
        }
        let id = self.roster.spawn(unit);
        let unit = self.roster.get_mut(id).ok_or(SimError::UnitNotFound(id))?;
        self.grid.place(unit, at)?;
        Ok(id)
    }

    pub fn unit(&self, id: UnitId) -> Result<&Unit> {
        self.roster.get(id).ok_or(SimError::UnitNotFound(id))
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Result<&mut Unit> {
        self.roster.get_mut(id).ok_or(SimError::UnitNotFound(id))
    }

    pub fn unit_ref(&self, id: UnitId) -> Result<UnitRef> {
        self.unit(id).map(UnitRef::of)
    }

    /// Living unit currently listed on the cell at `at`
    pub fn is_at(&self, id: UnitId, at: Point) -> bool {
        self.roster.get(id).is_some_and(|u| u.position() == Some(at))
            && self.grid.occupants(at).contains(&id)
    }

    /// Alive and listed on the cell at `at`, whatever its own position says
    pub fn is_listed(&self, id: UnitId, at: Point) -> bool {
        self.roster.contains(id) && self.grid.occupants(at).contains(&id)
    }

    /// Move a unit to `to`, returns where it came from
    pub fn relocate(&mut self, id: UnitId, to: Point) -> Result<Point> {
        let unit = self.roster.get_mut(id).ok_or(SimError::UnitNotFound(id))?;
        let from = unit.position().ok_or(SimError::UnitNotFound(id))?;
        self.grid.move_unit(unit, from, to)?;
        Ok(from)
    }

    /// Take a unit off the grid and out of the roster for good
    pub fn kill(&mut self, id: UnitId) -> Result<Unit> {
        let unit = self.roster.get_mut(id).ok_or(SimError::UnitNotFound(id))?;
        if let Some(at) = unit.position() {
            self.grid.remove(unit, at)?;
        }
        self.roster.remove(id).ok_or(SimError::UnitNotFound(id))
    }

    /// Random empty, dry cardinal neighbour of `at`
    pub fn random_free_neighbour(&mut self, at: Point) -> Option<Point> {
        Direction::shuffled(&mut self.rng)
            .into_iter()
            .filter_map(|dir| self.grid.step(at, dir))
            .find(|p| self.grid.is_empty_at(*p) && self.grid.terrain(*p) != Some(TerrainType::River))
    }
}
