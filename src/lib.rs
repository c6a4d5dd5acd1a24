//! Figma Style Library (FSL)
//!
//! Deduplicates the visual styles of a design into a compact library of
//! canonical definitions, links near-duplicates into variant hierarchies, and
//! emits a Flutter snippet for every definition.
//!
//! # Module Overview
//!
//! - [`styles`] - The style store: fingerprints, similarity, code emission, optimization
//! - [`figma`] - Figma API integration and node-tree style extraction
//! - [`resource`] - Input parsing (Figma URLs, saved node JSON)
//! - [`config`] - Configuration file support
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```
//! use fsl_lib::figma::{extract_styles, parse_document};
//! use fsl_lib::StyleStore;
//!
//! # fn example() -> fsl_lib::Result<()> {
//! let json = r#"{"id": "1:2", "type": "TEXT", "style": {"fontFamily": "Inter", "fontSize": 16}}"#;
//! let mut store = StyleStore::new();
//! for root in parse_document(json)? {
//!     extract_styles(&mut store, &root)?;
//! }
//! assert_eq!(store.len(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod error;
pub mod figma;
pub mod output;
pub mod resource;
pub mod styles;

pub use config::Config;
pub use error::{ErrorCategory, ErrorPayload, FslError, Result};
pub use figma::{extract_styles, parse_document, FigmaClient, FigmaError, NodeStyles};
pub use output::{
    AutoOptimizationSummary, ErrorOutput, FslOutput, LibraryOutput, ResourceDescriptor,
    SimilarStyles, FSL_OUTPUT_VERSION,
};
pub use resource::{parse_resource, FigmaInfo, ParsedResource, ResourceKind};
pub use styles::{
    Definition, OptimizationReport, StyleCategory, StyleId, StyleInput, StyleStore,
};
