// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-render key to value lookup.

use core::hash::Hash;

use hashbrown::HashMap;

/// Key to value map built from the aggregate rows of one render pass.
///
/// Rows are taken in order; a later row with a duplicate key overwrites the
/// earlier one. The map is rebuilt every pass and never assumed stable across
/// passes.
#[derive(Clone, Debug)]
pub struct AggregateMap<K> {
    values: HashMap<K, f64>,
}

impl<K> Default for AggregateMap<K> {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
        }
    }
}

impl<K> AggregateMap<K>
where
    K: Hash + Eq,
{
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `(key, value)` rows.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut map = Self::new();
        map.rebuild(rows);
        map
    }

    /// Clears the map and refills it from `rows`, keeping the allocation.
    pub fn rebuild<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        self.values.clear();
        for (key, value) in rows {
            self.values.insert(key, value);
        }
    }

    /// Value for `key`, if a row carried it.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no rows were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.values.iter().map(|(k, v)| (k, *v))
    }
}
