use crate::id::AssetId;
use crate::recipe::Recipe;
use crate::store::RecipeStore;
use crate::value::ValueTable;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;

/// Tuning knobs for value resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolverConfig {
    /// Upper bound on propagation rounds. The only safeguard against
    /// graphs that keep improving values indefinitely; well-formed graphs
    /// converge long before it.
    pub max_rounds: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { max_rounds: 64 }
    }
}

/// Derives an effective value for every asset reachable through the recipe
/// graph, starting from the seeded entries of a [`ValueTable`].
///
/// Resolution is a fixed-point iteration. Each round walks the store in
/// its stable iteration order; any recipe whose inputs all carry values
/// proposes a per-unit value for its outputs:
///
/// ```text
/// per_unit = sum(value[input] * input.quantity) / sum(output.quantity)
/// ```
///
/// Seeded values are final. An output seen for the first time settles at
/// the candidate; an output already derived keeps the minimum of its
/// current value and the candidate, so the cheapest known production path
/// wins and equal candidates leave the earlier recipe's result in place.
/// Rounds stop once one passes without settling a new asset or lowering a
/// derived one, or at [`ResolverConfig::max_rounds`].
///
/// Resolution never fails; cycles with no seeded entry point simply leave
/// their members in the unresolved set of the returned [`ResolvedValues`].
#[derive(Debug, Clone, Default)]
pub struct ValueResolver {
    config: ResolverConfig,
}

impl ValueResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Run resolution over `store`, seeded from `table`.
    pub fn resolve(&self, store: &RecipeStore, table: &ValueTable) -> ResolvedValues {
        let mut values: HashMap<AssetId, u64> = table.iter().collect();
        let seeded: HashSet<AssetId> = values.keys().copied().collect();

        let mut rounds = 0;
        while rounds < self.config.max_rounds {
            rounds += 1;
            let mut progressed = false;

            for (_, recipe) in store.iter() {
                let Some(input_total) = input_value_total(recipe, &values) else {
                    // At least one input still carries no value.
                    continue;
                };
                let per_unit = clamp(input_total / u128::from(recipe.output_quantity_total()));

                for output in recipe.outputs() {
                    if seeded.contains(&output.asset) {
                        continue;
                    }
                    match values.entry(output.asset) {
                        Entry::Vacant(slot) => {
                            slot.insert(per_unit);
                            progressed = true;
                        }
                        Entry::Occupied(mut slot) => {
                            if per_unit < *slot.get() {
                                slot.insert(per_unit);
                                progressed = true;
                            }
                        }
                    }
                }
            }

            if !progressed {
                break;
            }
        }

        let mut unresolved = HashSet::new();
        for (_, recipe) in store.iter() {
            for entry in recipe.inputs().iter().chain(recipe.outputs()) {
                if !values.contains_key(&entry.asset) {
                    unresolved.insert(entry.asset);
                }
            }
        }

        ResolvedValues {
            values,
            unresolved,
            rounds,
        }
    }
}

/// Total input cost of one execution of `recipe`, or `None` if any input
/// asset has no value yet.
fn input_value_total(recipe: &Recipe, values: &HashMap<AssetId, u64>) -> Option<u128> {
    recipe.inputs().iter().try_fold(0u128, |total, entry| {
        let value = values.get(&entry.asset)?;
        Some(total + u128::from(*value) * u128::from(entry.quantity))
    })
}

fn clamp(wide: u128) -> u64 {
    u64::try_from(wide).unwrap_or(u64::MAX)
}

/// The outcome of a resolution run: a read-only value lookup plus
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedValues {
    values: HashMap<AssetId, u64>,
    unresolved: HashSet<AssetId>,
    rounds: u32,
}

impl ResolvedValues {
    /// The resolved value for `asset`; 0 for assets that never settled,
    /// matching the table's default for unknown assets.
    pub fn value(&self, asset: AssetId) -> u64 {
        self.values.get(&asset).copied().unwrap_or(0)
    }

    /// Whether `asset` settled (seeded or derived).
    pub fn is_settled(&self, asset: AssetId) -> bool {
        self.values.contains_key(&asset)
    }

    /// Number of settled assets.
    pub fn settled_count(&self) -> usize {
        self.values.len()
    }

    /// Assets referenced by the recipe graph that no propagation path
    /// reached. They read as value 0.
    pub fn unresolved(&self) -> impl Iterator<Item = AssetId> + '_ {
        self.unresolved.iter().copied()
    }

    pub fn is_unresolved(&self, asset: AssetId) -> bool {
        self.unresolved.contains(&asset)
    }

    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }

    /// Propagation rounds executed, including the final no-progress round.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }
}

// ===========================================================================
// Tests
// ===========================================================================
