//! Rectangular grid with per-cell terrain, occupants and resources
//!
//! Mutations only touch the addressed cell. Cascading effects (drops,
//! pickups, deaths) belong to the rules layer.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::{Direction, Point, UnitId};
use crate::grid::resources::{Resource, ResourcePile};
use crate::grid::terrain::TerrainType;
use crate::rules::constants::{MAX_GRID_CELLS, MIN_GRID_SIZE};
use crate::unit::Unit;

/// Edge behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Steps off the edge are blocked
    #[default]
    Bounded,
    /// Steps off the edge wrap to the opposite side
    Torus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    pub terrain: TerrainType,
    occupants: Vec<UnitId>,
    resources: ResourcePile,
}

impl Cell {
    pub fn occupants(&self) -> &[UnitId] {
        &self.occupants
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.occupants.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn resources(&self) -> &ResourcePile {
        &self.resources
    }

    pub fn resource(&self, resource: Resource) -> u32 {
        self.resources.get(resource)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    topology: Topology,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: i32, height: i32, topology: Topology) -> Result<Self> {
        if width < MIN_GRID_SIZE || height < MIN_GRID_SIZE {
            return Err(SimError::InvalidGridSize {
                width,
                height,
                min: MIN_GRID_SIZE,
            });
        }
        let size = (width as usize)
            .checked_mul(height as usize)
            .filter(|n| *n <= MAX_GRID_CELLS)
            .ok_or(SimError::GridTooLarge {
                width,
                height,
                max: MAX_GRID_CELLS,
            })?;
        let cells = vec![Cell::default(); size];
        Ok(Self {
            width,
            height,
            topology,
            cells,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn is_valid(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    fn index(&self, p: Point) -> Option<usize> {
        if self.is_valid(p) {
            Some((p.y * self.width + p.x) as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, p: Point) -> Result<&mut Cell> {
        let i = self.index(p).ok_or(SimError::OutOfBounds(p))?;
        Ok(&mut self.cells[i])
    }

    /// Cell at `(x, y)`
    pub fn at(&self, x: i32, y: i32) -> Result<&Cell> {
        let p = Point::new(x, y);
        self.cell(p).ok_or(SimError::OutOfBounds(p))
    }

    pub fn terrain(&self, p: Point) -> Option<TerrainType> {
        self.cell(p).map(|c| c.terrain)
    }

    /// Paint terrain. Scenario construction only.
    pub fn set_terrain(&mut self, p: Point, terrain: TerrainType) -> Result<()> {
        self.cell_mut(p)?.terrain = terrain;
        Ok(())
    }

    /// One step from `p`, wrapping on a torus. `None` when a bounded
    /// grid's wall is in the way.
    pub fn step(&self, p: Point, dir: Direction) -> Option<Point> {
        let next = p.offset(dir);
        match self.topology {
            Topology::Torus => Some(Point::new(
                next.x.rem_euclid(self.width),
                next.y.rem_euclid(self.height),
            )),
            Topology::Bounded => self.is_valid(next).then_some(next),
        }
    }

    pub fn occupants(&self, p: Point) -> &[UnitId] {
        self.cell(p).map(|c| c.occupants()).unwrap_or(&[])
    }

    pub fn is_empty_at(&self, p: Point) -> bool {
        self.occupants(p).is_empty()
    }

    /// Bind a fresh unit to `p`.
    ///
    /// Returns `Ok(false)` without touching anything when `p` is off the
    /// grid. A unit that was ever placed cannot be placed again.
    pub fn place(&mut self, unit: &mut Unit, p: Point) -> Result<bool> {
        if unit.is_bound() {
            return Err(SimError::AlreadyPlaced(unit.name.clone()));
        }
        let Some(i) = self.index(p) else {
            return Ok(false);
        };
        self.cells[i].occupants.push(unit.id);
        unit.bind(p);
        Ok(true)
    }

    /// Take a unit off the cell it sits on
    pub fn remove(&mut self, unit: &mut Unit, p: Point) -> Result<()> {
        let cell = self.cell_mut(p)?;
        let slot = cell
            .occupants
            .iter()
            .position(|id| *id == unit.id)
            .ok_or(SimError::NotAtPosition { unit: unit.id, at: p })?;
        cell.occupants.swap_remove(slot);
        unit.set_position(None);
        Ok(())
    }

    /// Relocate a unit. Both points and the current membership are checked
    /// before anything changes, so a failed move leaves the grid untouched.
    pub fn move_unit(&mut self, unit: &mut Unit, from: Point, to: Point) -> Result<()> {
        let from_i = self.index(from).ok_or(SimError::OutOfBounds(from))?;
        let to_i = self.index(to).ok_or(SimError::OutOfBounds(to))?;
        let slot = self.cells[from_i]
            .occupants
            .iter()
            .position(|id| *id == unit.id)
            .ok_or(SimError::NotAtPosition { unit: unit.id, at: from })?;

        self.cells[from_i].occupants.swap_remove(slot);
        self.cells[to_i].occupants.push(unit.id);
        unit.set_position(Some(to));
        Ok(())
    }

    pub fn resource(&self, p: Point, resource: Resource) -> u32 {
        self.cell(p).map(|c| c.resource(resource)).unwrap_or(0)
    }

    pub fn add_resource(&mut self, p: Point, resource: Resource, amount: u32) -> Result<u32> {
        Ok(self.cell_mut(p)?.resources.add(resource, amount))
    }

    pub fn set_resource(&mut self, p: Point, resource: Resource, amount: u32) -> Result<()> {
        self.cell_mut(p)?.resources.set(resource, amount);
        Ok(())
    }

    /// Remove up to `amount`, clamped at zero
    pub fn take_resource(&mut self, p: Point, resource: Resource, amount: u32) -> Result<u32> {
        Ok(self.cell_mut(p)?.resources.take(resource, amount))
    }

    pub fn take_all_resource(&mut self, p: Point, resource: Resource) -> Result<u32> {
        Ok(self.cell_mut(p)?.resources.take_all(resource))
    }

    /// Every point in row-major order (y outer, x inner)
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }

    pub fn cells(&self) -> impl Iterator<Item = (Point, &Cell)> + '_ {
        self.points().zip(self.cells.iter())
    }
}
