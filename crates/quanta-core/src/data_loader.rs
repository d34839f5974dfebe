//! Data-driven seeding from JSON.
//!
//! Feature-gated behind `data-loader`. Assets are declared by name with an
//! optional base value; recipes reference assets by name. Names resolve to
//! sequentially assigned [`AssetId`]s, and every recipe goes through
//! [`Recipe::new`], so a data file cannot smuggle an invalid recipe past
//! the structural checks.

use crate::id::AssetId;
use crate::recipe::{Recipe, RecipeEntry, RecipeError};
use crate::store::RecipeStore;
use crate::value::ValueTable;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while loading a valuation data file.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("unknown asset reference: {0}")]
    UnknownAssetRef(String),
    #[error("invalid recipe {name:?}: {source}")]
    Recipe {
        name: String,
        source: RecipeError,
    },
}

// ---------------------------------------------------------------------------
// JSON data structures
// ---------------------------------------------------------------------------

/// Top-level valuation document.
#[derive(Debug, serde::Deserialize)]
pub struct ValuationData {
    #[serde(default)]
    pub assets: Vec<AssetData>,
    #[serde(default)]
    pub recipes: Vec<RecipeData>,
}

/// JSON representation of an asset declaration.
#[derive(Debug, serde::Deserialize)]
pub struct AssetData {
    pub name: String,
    /// Seeded base value. Absent means the asset's value is derived.
    #[serde(default)]
    pub value: Option<u64>,
}

/// JSON representation of a recipe.
#[derive(Debug, serde::Deserialize)]
pub struct RecipeData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<RecipeEntryData>,
    #[serde(default)]
    pub outputs: Vec<RecipeEntryData>,
}

/// JSON representation of a recipe input/output entry.
#[derive(Debug, serde::Deserialize)]
pub struct RecipeEntryData {
    pub asset: String, // references an asset by name
    pub quantity: u32,
}

// ---------------------------------------------------------------------------
// Loading functions
// ---------------------------------------------------------------------------

/// Everything a valuation data file describes, resolved and validated.
#[derive(Debug)]
pub struct LoadedValuation {
    /// Name -> id mapping for every declared asset.
    pub assets: HashMap<String, AssetId>,
    pub store: RecipeStore,
    pub table: ValueTable,
}

/// Load a valuation document from a JSON string.
pub fn load_valuation_json(json: &str) -> Result<LoadedValuation, DataLoadError> {
    let data: ValuationData = serde_json::from_str(json)?;
    build_valuation(data)
}

/// Load a valuation document from JSON bytes.
pub fn load_valuation_json_bytes(bytes: &[u8]) -> Result<LoadedValuation, DataLoadError> {
    let data: ValuationData = serde_json::from_slice(bytes)?;
    build_valuation(data)
}

fn build_valuation(data: ValuationData) -> Result<LoadedValuation, DataLoadError> {
    let mut assets: HashMap<String, AssetId> = HashMap::new();
    let mut table = ValueTable::new();

    // Phase 1: declare all assets, seeding base values where given.
    for asset in &data.assets {
        let next = AssetId(assets.len() as u32);
        let id = *assets.entry(asset.name.clone()).or_insert(next);
        if let Some(value) = asset.value {
            table.set(id, value);
        }
    }

    // Phase 2: build recipes, resolving asset refs by name.
    let mut store = RecipeStore::new();
    for recipe in &data.recipes {
        let inputs = resolve_entries(&recipe.inputs, &assets)?;
        let outputs = resolve_entries(&recipe.outputs, &assets)?;
        let recipe = Recipe::new(inputs, outputs).map_err(|source| DataLoadError::Recipe {
            name: recipe.name.clone(),
            source,
        })?;
        store.add_recipe(recipe);
    }

    Ok(LoadedValuation {
        assets,
        store,
        table,
    })
}

fn resolve_entries(
    entries: &[RecipeEntryData],
    assets: &HashMap<String, AssetId>,
) -> Result<Vec<RecipeEntry>, DataLoadError> {
    entries
        .iter()
        .map(|entry| {
            let id = assets
                .get(&entry.asset)
                .copied()
                .ok_or_else(|| DataLoadError::UnknownAssetRef(entry.asset.clone()))?;
            Ok(RecipeEntry::new(id, entry.quantity))
        })
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
