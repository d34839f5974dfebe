//! Property-based tests for the recipe store and the value resolver.
//!
//! Uses proptest to generate random recipe sets and mutation sequences,
//! then verify the index invariants and resolver guarantees hold.

use proptest::prelude::*;
use quanta_core::id::AssetId;
use quanta_core::recipe::{Recipe, RecipeEntry};
use quanta_core::resolver::{ResolverConfig, ValueResolver};
use quanta_core::store::RecipeStore;
use quanta_core::value::ValueTable;

// ===========================================================================
// Generators
// ===========================================================================

/// A small asset universe so generated recipes collide and share assets.
const ASSET_UNIVERSE: u32 = 12;

/// Generate a valid recipe: 1-3 distinct inputs, 1-2 distinct outputs,
/// sides disjoint, quantities 1-9.
fn arb_recipe() -> impl Strategy<Value = Recipe> {
    (
        proptest::sample::subsequence((0..ASSET_UNIVERSE).collect::<Vec<_>>(), 2..=5),
        proptest::collection::vec(1..10u32, 5),
        1..=3usize,
    )
        .prop_filter_map("needs at least one input and one output", |(assets, quantities, input_count)| {
            if assets.len() < input_count + 1 {
                return None;
            }
            let entries: Vec<RecipeEntry> = assets
                .iter()
                .zip(quantities.iter().cycle())
                .map(|(&asset, &quantity)| RecipeEntry::new(AssetId(asset), quantity))
                .collect();
            let (inputs, outputs) = entries.split_at(input_count);
            Recipe::new(inputs.to_vec(), outputs.to_vec()).ok()
        })
}

/// Mutation operations for exercising the store.
#[derive(Debug, Clone)]
enum MutOp {
    Add(Recipe),
    Remove(usize),
    RemoveNeverAdded(Recipe),
}

fn arb_mutation_sequence(max_ops: usize) -> impl Strategy<Value = Vec<MutOp>> {
    proptest::collection::vec(
        prop_oneof![
            4 => arb_recipe().prop_map(MutOp::Add),
            2 => (0..64usize).prop_map(MutOp::Remove),
            1 => arb_recipe().prop_map(MutOp::RemoveNeverAdded),
        ],
        1..=max_ops,
    )
}

/// Apply a mutation sequence, tracking which recipes should be stored.
fn apply_ops(store: &mut RecipeStore, ops: Vec<MutOp>) -> Vec<Recipe> {
    let mut live: Vec<Recipe> = Vec::new();
    for op in ops {
        match op {
            MutOp::Add(recipe) => {
                store.add_recipe(recipe.clone());
                if !live.contains(&recipe) {
                    live.push(recipe);
                }
            }
            MutOp::Remove(idx) => {
                if !live.is_empty() {
                    let recipe = live.remove(idx % live.len());
                    store.remove_recipe(&recipe);
                }
            }
            MutOp::RemoveNeverAdded(recipe) => {
                // Usually absent; occasionally equal to a live recipe,
                // in which case the model must drop it too.
                store.remove_recipe(&recipe);
                live.retain(|r| *r != recipe);
            }
        }
    }
    live
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Index exactness: after any mutation sequence, the per-asset indexes
    /// agree exactly with a scan over the stored recipe set.
    #[test]
    fn indexes_match_recipe_set(ops in arb_mutation_sequence(40)) {
        let mut store = RecipeStore::new();
        let live = apply_ops(&mut store, ops);

        prop_assert_eq!(store.recipe_count(), live.len());

        for asset in (0..ASSET_UNIVERSE).map(AssetId) {
            let mut by_input = store.recipes_for_input(asset);
            let mut expected_inputs: Vec<Recipe> = live
                .iter()
                .filter(|r| r.has_input(asset))
                .cloned()
                .collect();
            by_input.sort_by_key(|r| format!("{r:?}"));
            expected_inputs.sort_by_key(|r| format!("{r:?}"));
            prop_assert_eq!(by_input, expected_inputs);

            let mut by_output = store.recipes_for_output(asset);
            let mut expected_outputs: Vec<Recipe> = live
                .iter()
                .filter(|r| r.has_output(asset))
                .cloned()
                .collect();
            by_output.sort_by_key(|r| format!("{r:?}"));
            expected_outputs.sort_by_key(|r| format!("{r:?}"));
            prop_assert_eq!(by_output, expected_outputs);
        }
    }

    /// Adding a recipe twice never changes the count a second time.
    #[test]
    fn double_add_is_idempotent(recipes in proptest::collection::vec(arb_recipe(), 1..10)) {
        let mut store = RecipeStore::new();
        for recipe in &recipes {
            store.add_recipe(recipe.clone());
        }
        let count = store.recipe_count();
        for recipe in &recipes {
            store.add_recipe(recipe.clone());
        }
        prop_assert_eq!(store.recipe_count(), count);
    }

    /// Removing every live recipe leaves no index entries behind.
    #[test]
    fn full_removal_empties_indexes(ops in arb_mutation_sequence(30)) {
        let mut store = RecipeStore::new();
        let live = apply_ops(&mut store, ops);

        for recipe in &live {
            prop_assert!(store.remove_recipe(recipe));
        }

        prop_assert_eq!(store.recipe_count(), 0);
        for asset in (0..ASSET_UNIVERSE).map(AssetId) {
            prop_assert!(store.recipes_for_input(asset).is_empty());
            prop_assert!(store.recipes_for_output(asset).is_empty());
        }
    }

    /// Snapshot isolation: clearing returned snapshots changes nothing.
    #[test]
    fn snapshots_are_copies(recipes in proptest::collection::vec(arb_recipe(), 1..8)) {
        let mut store = RecipeStore::new();
        store.add_recipes(recipes);
        let count = store.recipe_count();

        store.all_recipes().clear();
        for asset in (0..ASSET_UNIVERSE).map(AssetId) {
            store.recipes_for_input(asset).clear();
        }

        prop_assert_eq!(store.recipe_count(), count);
    }

    /// Resolver determinism: resolving an unchanged store and table twice
    /// yields identical results.
    #[test]
    fn resolver_is_deterministic(
        ops in arb_mutation_sequence(30),
        seeds in proptest::collection::vec((0..ASSET_UNIVERSE, 0..1000u64), 0..6),
    ) {
        let mut store = RecipeStore::new();
        apply_ops(&mut store, ops);
        let table: ValueTable = seeds
            .into_iter()
            .map(|(asset, value)| (AssetId(asset), value))
            .collect();

        let resolver = ValueResolver::default();
        let first = resolver.resolve(&store, &table);
        let second = resolver.resolve(&store, &table);
        prop_assert_eq!(first, second);
    }

    /// Resolver termination and output sanity on arbitrary graphs: the
    /// round cap is respected, every seeded asset keeps its value, and
    /// unresolved assets read as 0.
    #[test]
    fn resolver_terminates_within_cap(
        ops in arb_mutation_sequence(30),
        seeds in proptest::collection::vec((0..ASSET_UNIVERSE, 0..1000u64), 0..6),
    ) {
        let mut store = RecipeStore::new();
        apply_ops(&mut store, ops);
        let table: ValueTable = seeds
            .into_iter()
            .map(|(asset, value)| (AssetId(asset), value))
            .collect();

        let config = ResolverConfig { max_rounds: 16 };
        let resolved = ValueResolver::new(config).resolve(&store, &table);

        prop_assert!(resolved.rounds() <= config.max_rounds);
        for (asset, value) in table.iter() {
            prop_assert_eq!(resolved.value(asset), value);
        }
        for asset in resolved.unresolved() {
            prop_assert_eq!(resolved.value(asset), 0);
            prop_assert!(!resolved.is_settled(asset));
        }
    }
}
