//! Active unit roster, iterated in insertion order

use ahash::AHashMap;

use crate::core::types::UnitId;
use crate::unit::Unit;

/// Owns every living unit. Ids are handed out once and never reused.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    units: AHashMap<UnitId, Unit>,
    order: Vec<UnitId>,
    next_id: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a unit and assign it a fresh id
    pub fn spawn(&mut self, mut unit: Unit) -> UnitId {
        let id = UnitId::new(self.next_id);
        self.next_id += 1;
        unit.id = id;
        self.units.insert(id, unit);
        self.order.push(id);
        id
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    pub fn remove(&mut self, id: UnitId) -> Option<Unit> {
        let unit = self.units.remove(&id)?;
        self.order.retain(|other| *other != id);
        Some(unit)
    }

    /// Snapshot of ids in roster order
    pub fn ids(&self) -> Vec<UnitId> {
        self.order.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.order.iter().filter_map(move |id| self.units.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids that have been handed out so far, dead or alive
    pub fn issued(&self) -> u32 {
        self.next_id
    }
}
