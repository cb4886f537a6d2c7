//! Per-cell resource counters

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Carrots,
    Feathers,
    Dust,
    Footprints,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Carrots,
        Resource::Feathers,
        Resource::Dust,
        Resource::Footprints,
    ];
}

/// Sparse resource counters. Zero counts are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcePile {
    counts: AHashMap<Resource, u32>,
}

impl ResourcePile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, resource: Resource) -> u32 {
        self.counts.get(&resource).copied().unwrap_or(0)
    }

    /// Add to a counter, returns the new total
    pub fn add(&mut self, resource: Resource, amount: u32) -> u32 {
        if amount == 0 {
            return self.get(resource);
        }
        let entry = self.counts.entry(resource).or_insert(0);
        *entry = entry.saturating_add(amount);
        *entry
    }

    pub fn set(&mut self, resource: Resource, amount: u32) {
        if amount == 0 {
            self.counts.remove(&resource);
        } else {
            self.counts.insert(resource, amount);
        }
    }

    /// Remove up to `amount`, returns how much was actually taken
    pub fn take(&mut self, resource: Resource, amount: u32) -> u32 {
        let current = self.get(resource);
        let taken = amount.min(current);
        self.set(resource, current - taken);
        taken
    }

    pub fn take_all(&mut self, resource: Resource) -> u32 {
        self.counts.remove(&resource).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
