use serde::{Serialize, Deserialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies a stored recipe inside a [`RecipeStore`](crate::store::RecipeStore).
    ///
    /// Keys are only meaningful for the store that issued them.
    pub struct RecipeKey;
}

/// Identifies a valued asset (an item, a fluid, ...). Cheap to copy and compare.
///
/// Asset identity is supplied by the embedding host; the core never registers
/// or interprets assets, it only keys maps and sets by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u32);
