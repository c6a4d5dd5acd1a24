use crate::error::ErrorPayload;
use crate::figma::NodeStyles;
use crate::resource::ResourceKind;
use crate::styles::{AutoMaintenance, Definition, HierarchyEntry, OptimizationReport, StyleId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Schema version for output payloads.
pub const FSL_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum FslOutput {
    Analyze(LibraryOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub kind: ResourceKind,
    pub value: String,
}

/// Full dump of a style library after analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryOutput {
    pub version: String,
    pub input: ResourceDescriptor,
    pub styles: Vec<Definition>,
    pub hierarchy: IndexMap<StyleId, HierarchyEntry>,
    pub nodes: Vec<NodeStyles>,
    pub report: OptimizationReport,
    pub auto_optimizations: AutoOptimizationSummary,
    pub similar_threshold: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub similar: Vec<SimilarStyles>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoOptimizationSummary {
    pub enabled: bool,
    pub threshold: usize,
    pub runs: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_report: Option<OptimizationReport>,
}

impl From<&AutoMaintenance> for AutoOptimizationSummary {
    fn from(maintenance: &AutoMaintenance) -> Self {
        Self {
            enabled: maintenance.enabled,
            threshold: maintenance.threshold,
            runs: maintenance.runs(),
            last_report: maintenance.last_report().cloned(),
        }
    }
}

/// Styles that are near, but not exact, matches of `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarStyles {
    pub id: StyleId,
    pub similar: Vec<StyleId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}
