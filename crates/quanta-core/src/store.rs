use crate::id::{AssetId, RecipeKey};
use crate::recipe::Recipe;
use slotmap::SlotMap;
use std::collections::{HashMap, HashSet};

/// The recipe graph store: the full set of known recipes plus two derived
/// indexes for looking recipes up by the assets they consume or produce.
///
/// Recipes are deduplicated by structural equality (set semantics), so
/// adding an already-stored recipe is a no-op. Each recipe is stored once
/// in the slot map; the indexes hold keys, never copies, which keeps them
/// exactly derivable from the recipe set after every mutation. Query
/// methods clone recipes out, so nothing a caller does to a returned
/// `Recipe` (or to the `Recipe` it passed in) can corrupt stored state.
///
/// The store itself is not thread-safe; embedders that query from multiple
/// threads must finish the load phase first or serialize access externally.
#[derive(Debug, Clone, Default)]
pub struct RecipeStore {
    recipes: SlotMap<RecipeKey, Recipe>,
    input_index: HashMap<AssetId, HashSet<RecipeKey>>,
    output_index: HashMap<AssetId, HashSet<RecipeKey>>,
}

impl RecipeStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recipe. If a structurally equal recipe is already stored this
    /// is a no-op returning the existing key.
    pub fn add_recipe(&mut self, recipe: Recipe) -> RecipeKey {
        if let Some(existing) = self.find_key(&recipe) {
            return existing;
        }

        let key = self.recipes.insert(recipe);
        let recipe = &self.recipes[key];
        for entry in recipe.inputs() {
            self.input_index.entry(entry.asset).or_default().insert(key);
        }
        for entry in recipe.outputs() {
            self.output_index.entry(entry.asset).or_default().insert(key);
        }
        key
    }

    /// Add every recipe in `recipes`, in order.
    pub fn add_recipes<I>(&mut self, recipes: I)
    where
        I: IntoIterator<Item = Recipe>,
    {
        for recipe in recipes {
            self.add_recipe(recipe);
        }
    }

    /// Remove a recipe by structural equality. Returns whether anything was
    /// removed; removing an absent recipe is a no-op.
    pub fn remove_recipe(&mut self, recipe: &Recipe) -> bool {
        let Some(key) = self.find_key(recipe) else {
            return false;
        };

        let removed = self.recipes.remove(key).expect("key came from find_key");
        for entry in removed.inputs() {
            purge(&mut self.input_index, entry.asset, key);
        }
        for entry in removed.outputs() {
            purge(&mut self.output_index, entry.asset, key);
        }
        true
    }

    /// Whether a structurally equal recipe is stored.
    pub fn contains(&self, recipe: &Recipe) -> bool {
        self.find_key(recipe).is_some()
    }

    /// Look up a stored recipe by key.
    pub fn get(&self, key: RecipeKey) -> Option<&Recipe> {
        self.recipes.get(key)
    }

    /// Snapshot of every stored recipe. Mutating the result has no effect
    /// on the store.
    pub fn all_recipes(&self) -> Vec<Recipe> {
        self.recipes.values().cloned().collect()
    }

    /// Number of distinct stored recipes.
    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Snapshot of the recipes consuming `asset`. Empty for assets no
    /// recipe consumes.
    pub fn recipes_for_input(&self, asset: AssetId) -> Vec<Recipe> {
        self.snapshot_bucket(self.input_index.get(&asset))
    }

    /// Snapshot of the recipes producing `asset`. Empty for assets no
    /// recipe produces.
    pub fn recipes_for_output(&self, asset: AssetId) -> Vec<Recipe> {
        self.snapshot_bucket(self.output_index.get(&asset))
    }

    /// Iterate stored recipes in slot order. The order is stable for a
    /// given mutation history, which is what makes resolution over the
    /// store deterministic.
    pub fn iter(&self) -> impl Iterator<Item = (RecipeKey, &Recipe)> {
        self.recipes.iter()
    }

    /// Find the key of a structurally equal stored recipe.
    ///
    /// Every stored recipe is indexed under each of its input assets, so
    /// scanning the bucket of the first input is exhaustive.
    fn find_key(&self, recipe: &Recipe) -> Option<RecipeKey> {
        let first_input = recipe.inputs().first()?.asset;
        let bucket = self.input_index.get(&first_input)?;
        bucket
            .iter()
            .copied()
            .find(|&key| self.recipes[key] == *recipe)
    }

    fn snapshot_bucket(&self, bucket: Option<&HashSet<RecipeKey>>) -> Vec<Recipe> {
        bucket
            .map(|keys| keys.iter().map(|&key| self.recipes[key].clone()).collect())
            .unwrap_or_default()
    }
}

/// Remove `key` from the bucket under `asset`, pruning the bucket if it
/// becomes empty so long-running sessions don't accumulate dead entries.
fn purge(index: &mut HashMap<AssetId, HashSet<RecipeKey>>, asset: AssetId, key: RecipeKey) {
    if let Some(bucket) = index.get_mut(&asset) {
        bucket.remove(&key);
        if bucket.is_empty() {
            index.remove(&asset);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
