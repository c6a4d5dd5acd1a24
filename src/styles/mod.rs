//! Style deduplication and variant hierarchy.
//!
//! Extractors submit property bags to a [`StyleStore`] and embed the returned
//! [`StyleId`]s in their reports. The store guarantees:
//! - bags that differ only in object key order share one id (exact key);
//! - visually equivalent bags share one id (semantic key, see [`canonical`]);
//! - near-duplicates are linked under the first earlier style that is at least
//!   80% similar, forming a forest of variants;
//! - every [`StyleCategory`] gets a generated Flutter snippet, once, at creation.
//!
//! # Example
//!
//! ```
//! use fsl_lib::styles::{PaddingProps, StyleInput, StyleStore};
//!
//! let mut store = StyleStore::new();
//! let a = store.add(&StyleInput::Padding(PaddingProps::uniform(8.0))).unwrap();
//! let b = store.add(&StyleInput::Padding(PaddingProps::uniform(8.0))).unwrap();
//! assert_eq!(a, b);
//! assert_eq!(store.get_style(&a).unwrap().usage_count, 2);
//! assert_eq!(store.get_style(&a).unwrap().generated_code, "EdgeInsets.all(8)");
//! ```

pub mod canonical;
mod category;
pub mod codegen;
pub mod maintenance;
pub mod props;
pub mod similarity;
mod store;

#[cfg(test)]
mod tests;

pub use category::{StyleCategory, StyleId};
pub use maintenance::{AutoMaintenance, OptimizationReport, DEFAULT_OPTIMIZE_THRESHOLD};
pub use props::{
    CornerRadii, CornerRadius, DecorationProps, Fill, LayoutProps, Offset, PaddingProps, Shadow,
    StyleInput, TextProps,
};
pub use store::{
    Definition, HierarchyEntry, StyleStore, DEFAULT_SIMILAR_THRESHOLD,
    PARENT_SIMILARITY_THRESHOLD,
};
