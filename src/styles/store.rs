//! The style registry: canonical definitions plus exact and semantic indices.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

use super::canonical::{exact_key, normalize, semantic_key};
use super::codegen;
use super::maintenance::{self, AutoMaintenance, OptimizationReport};
use super::props::StyleInput;
use super::similarity::{find_potential_parent, similarity};
use super::{StyleCategory, StyleId};
use crate::Result;

/// Minimum similarity for a new style to be linked under an existing one.
pub const PARENT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Default threshold for [`StyleStore::find_similar_styles`].
pub const DEFAULT_SIMILAR_THRESHOLD: f64 = 0.8;

/// One canonical style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub id: StyleId,
    pub category: StyleCategory,
    /// The bag as first submitted, before normalization.
    pub properties: Value,
    pub generated_code: String,
    pub exact_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_key: Option<String>,
    pub usage_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<StyleId>,
    #[serde(default)]
    pub child_ids: Vec<StyleId>,
    /// `1 - similarity` to the parent; set only alongside `parent_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
}

/// Parent/child view of one definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<StyleId>,
    pub child_ids: Vec<StyleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
}

/// Content-addressable style library.
///
/// Not synchronized: callers sharing one store across threads must wrap it in a
/// mutex, or give each session its own store.
#[derive(Debug, Clone, Default)]
pub struct StyleStore {
    definitions: IndexMap<StyleId, Definition>,
    exact_index: HashMap<String, StyleId>,
    semantic_index: HashMap<String, StyleId>,
    maintenance: AutoMaintenance,
    next_seq: u64,
}

impl StyleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a typed bag; the category comes from the variant.
    pub fn add(&mut self, input: &StyleInput) -> Result<StyleId> {
        match input {
            StyleInput::Decoration(p) => self.add_style(StyleCategory::Decoration, p),
            StyleInput::Text(p) => self.add_style(StyleCategory::Text, p),
            StyleInput::Padding(p) => self.add_style(StyleCategory::Padding, p),
            StyleInput::Layout(p) => self.add_style(StyleCategory::Layout, p),
        }
    }

    /// Submit any serializable bag and get back its canonical id.
    ///
    /// Fails only when `properties` cannot be represented as JSON.
    pub fn add_style<P>(&mut self, category: StyleCategory, properties: &P) -> Result<StyleId>
    where
        P: Serialize + ?Sized,
    {
        let value = serde_json::to_value(properties)?;
        Ok(self.add_value(category, value))
    }

    /// Submit an already-built JSON bag.
    pub fn add_value(&mut self, category: StyleCategory, properties: Value) -> StyleId {
        let exact = exact_key(category, &properties);
        if let Some(id) = self.exact_index.get(&exact).cloned() {
            self.record_hit(&id, "exact");
            return id;
        }

        let semantic = semantic_key(category, &properties);
        if let Some(id) = semantic
            .as_ref()
            .and_then(|key| self.semantic_index.get(key))
            .cloned()
        {
            self.record_hit(&id, "semantic");
            return id;
        }

        self.next_seq += 1;
        let id = StyleId::new(category, self.next_seq);

        let parent = find_potential_parent(
            &properties,
            self.definitions.iter().map(|(id, d)| (id, &d.properties)),
            PARENT_SIMILARITY_THRESHOLD,
        )
        .map(|(parent_id, score)| (parent_id.clone(), 1.0 - score));

        if let Some((parent_id, _)) = &parent {
            if let Some(parent_def) = self.definitions.get_mut(parent_id) {
                parent_def.child_ids.push(id.clone());
            }
        }

        let generated_code = codegen::generate(category, &normalize(category, &properties));
        let (parent_id, variance) = match parent {
            Some((p, v)) => (Some(p), Some(v)),
            None => (None, None),
        };
        debug!(
            id = %id,
            parent = ?parent_id.as_ref().map(StyleId::as_str),
            "created style"
        );

        self.exact_index.insert(exact.clone(), id.clone());
        if let Some(key) = &semantic {
            self.semantic_index.insert(key.clone(), id.clone());
        }
        self.definitions.insert(
            id.clone(),
            Definition {
                id: id.clone(),
                category,
                properties,
                generated_code,
                exact_key: exact,
                semantic_key: semantic,
                usage_count: 1,
                parent_id,
                child_ids: Vec::new(),
                variance,
            },
        );

        self.maybe_auto_optimize();
        id
    }

    fn record_hit(&mut self, id: &StyleId, index: &str) {
        if let Some(def) = self.definitions.get_mut(id) {
            def.usage_count += 1;
            debug!(id = %id, index, usage = def.usage_count, "style hit");
        }
    }

    fn maybe_auto_optimize(&mut self) {
        if !self.maintenance.due(self.definitions.len()) {
            return;
        }
        let report = self.optimize_library();
        self.maintenance.record_run(self.definitions.len(), report);
    }

    /// Pure lookup; unknown ids yield `None`.
    pub fn get_style(&self, id: &StyleId) -> Option<&Definition> {
        self.definitions.get(id)
    }

    /// All definitions in creation order.
    pub fn all_styles(&self) -> impl ExactSizeIterator<Item = &Definition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Ids whose similarity to `properties` lies in `[threshold, 1.0)`.
    pub fn find_similar_styles<P>(&self, properties: &P, threshold: f64) -> Result<Vec<StyleId>>
    where
        P: Serialize + ?Sized,
    {
        let value = serde_json::to_value(properties)?;
        Ok(self.find_similar_values(&value, threshold))
    }

    pub fn find_similar_values(&self, properties: &Value, threshold: f64) -> Vec<StyleId> {
        self.definitions
            .values()
            .filter(|def| {
                let score = similarity(properties, &def.properties);
                score >= threshold && score < 1.0
            })
            .map(|def| def.id.clone())
            .collect()
    }

    pub fn style_hierarchy(&self) -> IndexMap<StyleId, HierarchyEntry> {
        self.definitions
            .iter()
            .map(|(id, def)| {
                (
                    id.clone(),
                    HierarchyEntry {
                        parent_id: def.parent_id.clone(),
                        child_ids: def.child_ids.clone(),
                        variance: def.variance,
                    },
                )
            })
            .collect()
    }

    /// Parent hops from `id` to its root, if `id` exists.
    pub fn depth(&self, id: &StyleId) -> Option<usize> {
        self.definitions
            .get(id)
            .map(|def| maintenance::depth_of(&self.definitions, def))
    }

    /// Merge defensive duplicates and report on the hierarchy. Idempotent.
    pub fn optimize_library(&mut self) -> OptimizationReport {
        let report = maintenance::optimize(
            &mut self.definitions,
            &mut self.exact_index,
            &mut self.semantic_index,
        );
        info!(
            total = report.total_styles,
            duplicates_removed = report.duplicates_removed,
            variants = report.variants_created,
            depth = report.hierarchy_depth,
            "optimized style library"
        );
        report
    }

    /// Drop every definition and both indices. Ids are not reissued afterwards.
    pub fn reset(&mut self) {
        self.definitions.clear();
        self.exact_index.clear();
        self.semantic_index.clear();
        self.maintenance.reset();
        debug!("style library reset");
    }

    pub fn set_auto_optimization(&mut self, enabled: bool, threshold: usize) {
        self.maintenance.enabled = enabled;
        self.maintenance.threshold = threshold;
    }

    pub fn auto_maintenance(&self) -> &AutoMaintenance {
        &self.maintenance
    }
}
