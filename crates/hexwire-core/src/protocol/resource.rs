//! Resource tags used by trade, discard, and cheat payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The five tradeable resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Resource {
    Brick,
    Lumber,
    Ore,
    Grain,
    Wool,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Brick,
        Resource::Lumber,
        Resource::Ore,
        Resource::Grain,
        Resource::Wool,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Brick => "BRICK",
            Resource::Lumber => "LUMBER",
            Resource::Ore => "ORE",
            Resource::Grain => "GRAIN",
            Resource::Wool => "WOOL",
        }
    }
}

/// Resource counts keyed by tag, serialized as `{"BRICK": 1, ...}`.
///
/// Backed by a `BTreeMap` so encoded key order is deterministic. Zero counts
/// are never stored, including when decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Resource, u32>")]
pub struct ResourceMap(BTreeMap<Resource, u32>);

impl ResourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a zero count removes the entry.
    pub fn with(mut self, resource: Resource, count: u32) -> Self {
        self.set(resource, count);
        self
    }

    pub fn set(&mut self, resource: Resource, count: u32) {
        if count == 0 {
            self.0.remove(&resource);
        } else {
            self.0.insert(resource, count);
        }
    }

    pub fn get(&self, resource: Resource) -> u32 {
        self.0.get(&resource).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.values().map(|c| u64::from(*c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        self.0.iter().map(|(r, c)| (*r, *c))
    }
}

impl FromIterator<(Resource, u32)> for ResourceMap {
    fn from_iter<I: IntoIterator<Item = (Resource, u32)>>(iter: I) -> Self {
        let mut map = ResourceMap::new();
        for (resource, count) in iter {
            map.set(resource, count);
        }
        map
    }
}

impl From<BTreeMap<Resource, u32>> for ResourceMap {
    fn from(counts: BTreeMap<Resource, u32>) -> Self {
        counts.into_iter().collect()
    }
}
