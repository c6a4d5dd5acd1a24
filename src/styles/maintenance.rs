//! Threshold-triggered library maintenance.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::similarity::variance;
use super::{Definition, StyleId};

/// New styles between automatic optimize passes.
pub const DEFAULT_OPTIMIZE_THRESHOLD: usize = 20;

/// Result of one optimize pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationReport {
    pub total_styles: usize,
    pub duplicates_removed: usize,
    pub variants_created: usize,
    pub hierarchy_depth: usize,
    pub memory_reduction: String,
}

/// Decides when the store should optimize itself.
#[derive(Debug, Clone)]
pub struct AutoMaintenance {
    pub enabled: bool,
    pub threshold: usize,
    checkpoint: usize,
    runs: usize,
    last_report: Option<OptimizationReport>,
}

impl Default for AutoMaintenance {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: DEFAULT_OPTIMIZE_THRESHOLD,
            checkpoint: 0,
            runs: 0,
            last_report: None,
        }
    }
}

impl AutoMaintenance {
    /// Registry size recorded at the last automatic pass.
    pub fn checkpoint(&self) -> usize {
        self.checkpoint
    }

    /// Number of automatic passes since construction or the last reset.
    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn last_report(&self) -> Option<&OptimizationReport> {
        self.last_report.as_ref()
    }

    /// Whether a pass is due after a new style brought the registry to `size`.
    pub fn due(&self, size: usize) -> bool {
        self.enabled && size.saturating_sub(self.checkpoint) >= self.threshold
    }

    pub fn record_run(&mut self, size: usize, report: OptimizationReport) {
        self.checkpoint = size;
        self.runs += 1;
        self.last_report = Some(report);
    }

    pub fn reset(&mut self) {
        self.checkpoint = 0;
        self.runs = 0;
        self.last_report = None;
    }
}

/// Merge duplicate exact keys, repair references, and measure the hierarchy.
///
/// Duplicates keep the earliest definition and fold usage counts into it. Parent
/// links to a removed duplicate move to its keeper, and every `child_ids` list is
/// rebuilt from the parent links so no child id dangles.
pub(super) fn optimize(
    definitions: &mut IndexMap<StyleId, Definition>,
    exact_index: &mut HashMap<String, StyleId>,
    semantic_index: &mut HashMap<String, StyleId>,
) -> OptimizationReport {
    let before = definitions.len();

    let mut keepers: HashMap<String, StyleId> = HashMap::new();
    let mut merged: Vec<(StyleId, StyleId)> = Vec::new();
    for (id, def) in definitions.iter() {
        match keepers.get(&def.exact_key) {
            Some(keeper) => merged.push((id.clone(), keeper.clone())),
            None => {
                keepers.insert(def.exact_key.clone(), id.clone());
            }
        }
    }

    let mut redirects: HashMap<StyleId, StyleId> = HashMap::new();
    for (duplicate, keeper) in &merged {
        let Some(removed) = definitions.shift_remove(duplicate) else {
            continue;
        };
        if let Some(kept) = definitions.get_mut(keeper) {
            kept.usage_count += removed.usage_count;
        }
        exact_index.insert(removed.exact_key.clone(), keeper.clone());
        if let Some(semantic) = &removed.semantic_key {
            if semantic_index.get(semantic) == Some(duplicate) {
                semantic_index.remove(semantic);
            }
        }
        redirects.insert(duplicate.clone(), keeper.clone());
    }

    repair_links(definitions, &redirects);

    let registry: &IndexMap<StyleId, Definition> = definitions;
    let variants_created = registry.values().map(|d| d.child_ids.len()).sum();
    let hierarchy_depth = registry
        .values()
        .map(|d| depth_of(registry, d))
        .max()
        .unwrap_or(0);
    let after = registry.len();

    OptimizationReport {
        total_styles: after,
        duplicates_removed: merged.len(),
        variants_created,
        hierarchy_depth,
        memory_reduction: memory_reduction(before, after),
    }
}

fn repair_links(
    definitions: &mut IndexMap<StyleId, Definition>,
    redirects: &HashMap<StyleId, StyleId>,
) {
    if !redirects.is_empty() {
        let snapshot: HashMap<StyleId, serde_json::Value> = definitions
            .iter()
            .map(|(id, d)| (id.clone(), d.properties.clone()))
            .collect();

        for (id, def) in definitions.iter_mut() {
            let Some(parent) = def.parent_id.as_ref().and_then(|p| redirects.get(p)) else {
                continue;
            };
            if parent == id {
                def.parent_id = None;
                def.variance = None;
                continue;
            }
            def.variance = snapshot
                .get(parent)
                .map(|parent_props| variance(&def.properties, parent_props));
            def.parent_id = Some(parent.clone());
        }
    }

    let mut children: HashMap<StyleId, Vec<StyleId>> = HashMap::new();
    for (id, def) in definitions.iter() {
        if let Some(parent) = &def.parent_id {
            children.entry(parent.clone()).or_default().push(id.clone());
        }
    }
    for (id, def) in definitions.iter_mut() {
        def.child_ids = children.remove(id).unwrap_or_default();
    }
}

/// Parent hops to a root; a missing parent ends the walk.
pub(super) fn depth_of(definitions: &IndexMap<StyleId, Definition>, def: &Definition) -> usize {
    let mut depth = 0;
    let mut current = def;
    while let Some(parent) = current.parent_id.as_ref().and_then(|p| definitions.get(p)) {
        depth += 1;
        if depth > definitions.len() {
            break;
        }
        current = parent;
    }
    depth
}

fn memory_reduction(before: usize, after: usize) -> String {
    if before == 0 {
        return "0%".to_string();
    }
    let pct = (before - after) as f64 / before as f64 * 100.0;
    format!("{:.1}%", pct)
}
