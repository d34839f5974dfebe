//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::id::AssetId;
use crate::recipe::{Recipe, RecipeEntry};
use crate::store::RecipeStore;
use crate::value::ValueTable;

// ===========================================================================
// Asset constructors
// ===========================================================================

// Raw resources
pub fn iron_ore() -> AssetId {
    AssetId(0)
}
pub fn copper_ore() -> AssetId {
    AssetId(1)
}
pub fn coal() -> AssetId {
    AssetId(2)
}
pub fn stone() -> AssetId {
    AssetId(3)
}
pub fn wood() -> AssetId {
    AssetId(4)
}

// Tier 1: smelted/worked products
pub fn iron_ingot() -> AssetId {
    AssetId(10)
}
pub fn copper_ingot() -> AssetId {
    AssetId(11)
}
pub fn iron_gear() -> AssetId {
    AssetId(12)
}
pub fn copper_wire() -> AssetId {
    AssetId(13)
}
pub fn wood_plank() -> AssetId {
    AssetId(14)
}

// Tier 2: assembled products
pub fn motor() -> AssetId {
    AssetId(20)
}
pub fn circuit_board() -> AssetId {
    AssetId(21)
}

// Tier 3
pub fn computer() -> AssetId {
    AssetId(30)
}

// ===========================================================================
// Recipe constructors
// ===========================================================================

pub fn entry(asset: AssetId, quantity: u32) -> RecipeEntry {
    RecipeEntry::new(asset, quantity)
}

/// Build a recipe from (asset, quantity) pairs, panicking on invalid input.
pub fn recipe(inputs: Vec<(AssetId, u32)>, outputs: Vec<(AssetId, u32)>) -> Recipe {
    Recipe::new(
        inputs.into_iter().map(|(a, q)| entry(a, q)).collect(),
        outputs.into_iter().map(|(a, q)| entry(a, q)).collect(),
    )
    .expect("test recipe should be valid")
}

/// Seed a table from (asset, value) pairs.
pub fn seeded_table(seeds: &[(AssetId, u64)]) -> ValueTable {
    seeds.iter().copied().collect()
}

// ===========================================================================
// Graph builders (for benchmarks, stress tests, and proptests)
// ===========================================================================

/// Build a linear conversion chain of `length` recipes:
/// asset 0 -> asset 1 -> ... -> asset `length`, all 1:1.
pub fn build_chain(length: u32) -> RecipeStore {
    let mut store = RecipeStore::new();
    for i in 0..length {
        store.add_recipe(recipe(
            vec![(AssetId(i), 1)],
            vec![(AssetId(i + 1), 1)],
        ));
    }
    store
}

/// Build a binary reduction tree with `depth` levels: each asset at level
/// d+1 consumes two distinct assets from level d. One recipe per produced
/// asset; level 0 holds the leaves.
pub fn build_tree(depth: u32) -> RecipeStore {
    let mut store = RecipeStore::new();
    // Assets at level d occupy ids [level_base(d), level_base(d) + width(d)).
    // Leaves: 2^depth assets at level 0.
    let mut base = 0u32;
    for level in 0..depth {
        let width = 1u32 << (depth - level);
        let next_base = base + width;
        for i in 0..width / 2 {
            store.add_recipe(recipe(
                vec![(AssetId(base + 2 * i), 1), (AssetId(base + 2 * i + 1), 1)],
                vec![(AssetId(next_base + i), 1)],
            ));
        }
        base = next_base;
    }
    store
}

/// The Tier-0..3 fixture used by integration tests: ores and raw goods
/// feed smelting, parts, and assembly recipes up to a computer.
pub fn build_factory_recipes() -> RecipeStore {
    let mut store = RecipeStore::new();
    store.add_recipes(vec![
        // Tier 1
        recipe(vec![(iron_ore(), 2), (coal(), 1)], vec![(iron_ingot(), 1)]),
        recipe(vec![(copper_ore(), 2), (coal(), 1)], vec![(copper_ingot(), 1)]),
        recipe(vec![(iron_ingot(), 2)], vec![(iron_gear(), 1)]),
        recipe(vec![(copper_ingot(), 1)], vec![(copper_wire(), 2)]),
        recipe(vec![(wood(), 1)], vec![(wood_plank(), 4)]),
        // Tier 2
        recipe(
            vec![(iron_gear(), 2), (copper_wire(), 4)],
            vec![(motor(), 1)],
        ),
        recipe(
            vec![(copper_wire(), 8), (wood_plank(), 1)],
            vec![(circuit_board(), 1)],
        ),
        // Tier 3
        recipe(
            vec![(circuit_board(), 4), (motor(), 1)],
            vec![(computer(), 1)],
        ),
    ]);
    store
}

/// Base values for the factory fixture's raw resources.
pub fn factory_base_values() -> ValueTable {
    seeded_table(&[
        (iron_ore(), 16),
        (copper_ore(), 16),
        (coal(), 8),
        (stone(), 4),
        (wood(), 8),
    ])
}
