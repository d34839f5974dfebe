use crate::id::AssetId;
use serde::{Serialize, Deserialize};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors rejected at recipe construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeError {
    #[error("recipe has no inputs")]
    EmptyInputs,
    #[error("recipe has no outputs")]
    EmptyOutputs,
    #[error("zero quantity for asset {0:?}")]
    ZeroQuantity(AssetId),
    #[error("asset {0:?} listed twice on the same side")]
    DuplicateAsset(AssetId),
    #[error("asset {0:?} appears as both input and output")]
    InputOutputOverlap(AssetId),
}

// ---------------------------------------------------------------------------
// Recipe data
// ---------------------------------------------------------------------------

/// One input or output line of a recipe: an asset and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub asset: AssetId,
    /// Always >= 1; enforced by [`Recipe::new`].
    pub quantity: u32,
}

impl RecipeEntry {
    pub fn new(asset: AssetId, quantity: u32) -> Self {
        Self { asset, quantity }
    }
}

/// An immutable conversion rule: a set of inputs consumed to produce a set
/// of outputs.
///
/// Constructed only through [`Recipe::new`], which validates the structural
/// invariants (non-empty sides, positive quantities, no duplicate asset
/// within a side, disjoint sides) and sorts both sides by asset id. The
/// sorted form makes the derived `PartialEq`/`Hash` behave as set equality:
/// two recipes built from the same entries in any order compare equal, which
/// is what gives [`RecipeStore`](crate::store::RecipeStore) its
/// deduplication semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Recipe {
    inputs: Vec<RecipeEntry>,
    outputs: Vec<RecipeEntry>,
}

impl Recipe {
    /// Validate and build a recipe.
    ///
    /// # Errors
    ///
    /// Returns a [`RecipeError`] if either side is empty, any quantity is
    /// zero, an asset is listed twice on one side, or an asset appears on
    /// both sides.
    pub fn new(
        inputs: Vec<RecipeEntry>,
        outputs: Vec<RecipeEntry>,
    ) -> Result<Self, RecipeError> {
        if inputs.is_empty() {
            return Err(RecipeError::EmptyInputs);
        }
        if outputs.is_empty() {
            return Err(RecipeError::EmptyOutputs);
        }

        let mut inputs = inputs;
        let mut outputs = outputs;
        canonicalize_side(&mut inputs)?;
        canonicalize_side(&mut outputs)?;

        // Both sides are sorted, so overlap is a linear merge check.
        let mut i = 0;
        let mut o = 0;
        while i < inputs.len() && o < outputs.len() {
            match inputs[i].asset.cmp(&outputs[o].asset) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => o += 1,
                std::cmp::Ordering::Equal => {
                    return Err(RecipeError::InputOutputOverlap(inputs[i].asset));
                }
            }
        }

        Ok(Self { inputs, outputs })
    }

    /// Input entries, sorted by asset id.
    pub fn inputs(&self) -> &[RecipeEntry] {
        &self.inputs
    }

    /// Output entries, sorted by asset id.
    pub fn outputs(&self) -> &[RecipeEntry] {
        &self.outputs
    }

    /// Whether `asset` is consumed by this recipe.
    pub fn has_input(&self, asset: AssetId) -> bool {
        self.inputs.binary_search_by_key(&asset, |e| e.asset).is_ok()
    }

    /// Whether `asset` is produced by this recipe.
    pub fn has_output(&self, asset: AssetId) -> bool {
        self.outputs.binary_search_by_key(&asset, |e| e.asset).is_ok()
    }

    /// Total quantity produced across all outputs. At least 1.
    pub fn output_quantity_total(&self) -> u64 {
        self.outputs.iter().map(|e| u64::from(e.quantity)).sum()
    }
}

/// Sort one side by asset id and reject zero quantities and duplicates.
fn canonicalize_side(entries: &mut [RecipeEntry]) -> Result<(), RecipeError> {
    for entry in entries.iter() {
        if entry.quantity == 0 {
            return Err(RecipeError::ZeroQuantity(entry.asset));
        }
    }
    entries.sort_by_key(|e| e.asset);
    for pair in entries.windows(2) {
        if pair[0].asset == pair[1].asset {
            return Err(RecipeError::DuplicateAsset(pair[0].asset));
        }
    }
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================
