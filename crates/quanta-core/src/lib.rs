//! Quanta Core -- derived asset valuation over a crafting recipe graph.
//!
//! This crate computes a scalar "Quanta" value for every asset (item,
//! fluid, ...) an embedding game exposes, starting from a small table of
//! seeded base values and propagating along crafting/processing recipes.
//!
//! # Pipeline
//!
//! 1. **Seed** -- the host loads base values into a [`value::ValueTable`]
//!    (by hand, or from JSON via the `data-loader` feature).
//! 2. **Register** -- discovered recipes are validated by
//!    [`recipe::Recipe::new`] and bulk-added to a [`store::RecipeStore`],
//!    which maintains input-side and output-side indexes over them.
//! 3. **Resolve** -- [`resolver::ValueResolver`] runs the propagation to a
//!    fixed point and returns a read-only [`resolver::ResolvedValues`]
//!    lookup plus the set of assets no value could be derived for.
//!
//! The load phase is expected to finish before resolution and queries
//! begin; nothing here locks internally. See [`value::ActiveValueTable`]
//! for the wholesale-swap lifecycle of the process-wide table.
//!
//! # Key Types
//!
//! - [`id::AssetId`] -- opaque asset identity supplied by the host.
//! - [`recipe::Recipe`] -- an immutable, validated conversion rule.
//! - [`store::RecipeStore`] -- deduplicated recipe set with bidirectional
//!   asset indexes.
//! - [`value::ValueTable`] -- seeded base values (0 for unknown assets).
//! - [`resolver::ValueResolver`] -- fixed-point value propagation with a
//!   configurable round cap.

pub mod id;
pub mod recipe;
pub mod store;
pub mod value;
pub mod resolver;

#[cfg(feature = "data-loader")]
pub mod data_loader;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
