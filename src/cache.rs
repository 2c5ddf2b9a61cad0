// src/cache.rs
//
// Process-lifetime memoization of normalized price tables. No eviction:
// the key space (region × tier × OS) is small and fixed, and tables are
// a few hundred rows.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::config::options::{HostOs, Tier};
use crate::data::PriceTable;
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub region: String,
    pub tier: Tier,
    pub os: HostOs,
}

#[derive(Default)]
pub struct PriceCache {
    map: HashMap<FetchKey, PriceTable>,
}

impl PriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &FetchKey) -> bool {
        self.map.contains_key(key)
    }

    pub fn get(&self, key: &FetchKey) -> Option<&PriceTable> {
        self.map.get(key)
    }

    /// Return the cached table for `key`, or run `fetch` once and keep its
    /// result. A failed fetch caches nothing.
    pub fn get_or_fetch(
        &mut self,
        key: FetchKey,
        fetch: impl FnOnce() -> Result<PriceTable>,
    ) -> Result<&PriceTable> {
        match self.map.entry(key) {
            Entry::Occupied(e) => {
                logd!(
                    "Cache: hit region={} tier={} os={}",
                    e.key().region,
                    e.key().tier.query_value(),
                    e.key().os.name()
                );
                Ok(e.into_mut())
            }
            Entry::Vacant(v) => {
                logd!(
                    "Cache: miss region={} tier={} os={}",
                    v.key().region,
                    v.key().tier.query_value(),
                    v.key().os.name()
                );
                Ok(v.insert(fetch()?))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
