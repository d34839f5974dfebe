use crate::id::AssetId;
use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Externally seeded base values, the resolver's base-case oracle.
///
/// Assets without an entry read as 0; absence is a defined default, never
/// an error. Seeding happens outside the core (configuration loading, the
/// `data-loader` feature, tests); the resolver only reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueTable {
    values: HashMap<AssetId, u64>,
}

impl ValueTable {
    /// Create a new, empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or overwrite the base value for one asset.
    pub fn set(&mut self, asset: AssetId, value: u64) {
        self.values.insert(asset, value);
    }

    /// The base value for `asset`, or 0 if none was seeded.
    pub fn value(&self, asset: AssetId) -> u64 {
        self.values.get(&asset).copied().unwrap_or(0)
    }

    /// Whether `asset` has an explicitly seeded value. Distinguishes a
    /// seeded 0 from an absent entry.
    pub fn contains(&self, asset: AssetId) -> bool {
        self.values.contains_key(&asset)
    }

    /// Number of assets with an explicitly seeded value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate the seeded entries.
    pub fn iter(&self) -> impl Iterator<Item = (AssetId, u64)> + '_ {
        self.values.iter().map(|(&asset, &value)| (asset, value))
    }
}

impl Extend<(AssetId, u64)> for ValueTable {
    fn extend<I: IntoIterator<Item = (AssetId, u64)>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl FromIterator<(AssetId, u64)> for ValueTable {
    fn from_iter<I: IntoIterator<Item = (AssetId, u64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Host-owned holder for the one "active" value table of a running process.
///
/// The table is replaced wholesale (e.g. when base values are reloaded),
/// never edited in place: readers grab an `Arc` snapshot via [`current`]
/// and keep resolving against it even while a replacement is installed.
/// Writers must follow a single-writer discipline; the lock only makes the
/// swap itself safe. Nothing here is static; tests construct as many
/// independent tables and holders as they like.
///
/// [`current`]: ActiveValueTable::current
#[derive(Debug, Default)]
pub struct ActiveValueTable {
    inner: RwLock<Arc<ValueTable>>,
}

impl ActiveValueTable {
    /// Install `table` as the initial active table.
    pub fn new(table: ValueTable) -> Self {
        Self {
            inner: RwLock::new(Arc::new(table)),
        }
    }

    /// Snapshot of the currently active table.
    pub fn current(&self) -> Arc<ValueTable> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the active table, returning the previous one.
    pub fn replace(&self, table: ValueTable) -> Arc<ValueTable> {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::replace(&mut *guard, Arc::new(table))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
