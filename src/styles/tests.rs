use super::*;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashSet};

fn padding_bag(top: f64, right: f64, bottom: f64, left: f64) -> Value {
    json!({"top": top, "right": right, "bottom": bottom, "left": left})
}

fn assert_forest(store: &StyleStore) {
    for def in store.all_styles() {
        let mut seen = HashSet::new();
        let mut current = def;
        seen.insert(current.id.clone());
        while let Some(parent) = current.parent_id.as_ref().and_then(|p| store.get_style(p)) {
            assert!(
                seen.insert(parent.id.clone()),
                "cycle through {} starting at {}",
                parent.id,
                def.id
            );
            current = parent;
        }
    }
}

#[test]
fn repeated_submission_returns_same_id_and_counts_usage() {
    let mut store = StyleStore::new();
    let props = json!({"fontFamily": "Inter", "fontSize": 14});
    let ids: Vec<StyleId> = (0..5)
        .map(|_| store.add_value(StyleCategory::Text, props.clone()))
        .collect();

    assert!(ids.iter().all(|id| id == &ids[0]));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get_style(&ids[0]).unwrap().usage_count, 5);
}

#[test]
fn key_order_does_not_change_identity() {
    let mut store = StyleStore::new();
    let a: Value = serde_json::from_str(r#"{"a": 1, "b": 2}"#).unwrap();
    let b: Value = serde_json::from_str(r#"{"b": 2, "a": 1}"#).unwrap();

    let first = store.add_value(StyleCategory::Layout, a);
    let second = store.add_value(StyleCategory::Layout, b);
    assert_eq!(first, second);
}

#[test]
fn scenario_uniform_padding_is_deduplicated() {
    let mut store = StyleStore::new();
    let first = store.add_value(StyleCategory::Padding, padding_bag(8.0, 8.0, 8.0, 8.0));
    let second = store.add_value(StyleCategory::Padding, padding_bag(8.0, 8.0, 8.0, 8.0));

    assert_eq!(first, second);
    assert_eq!(store.get_style(&first).unwrap().usage_count, 2);
    assert_eq!(
        store.get_style(&first).unwrap().generated_code,
        "EdgeInsets.all(8)"
    );
}

#[test]
fn scenario_short_black_matches_long_black() {
    let mut store = StyleStore::new();
    let short = store.add_value(StyleCategory::Decoration, json!({"fills": [{"hex": "#000"}]}));
    let long = store.add_value(
        StyleCategory::Decoration,
        json!({"fills": [{"hex": "#000000"}]}),
    );

    assert_eq!(short, long);
    let def = store.get_style(&short).unwrap();
    assert_eq!(def.usage_count, 2);
    assert_eq!(def.properties, json!({"fills": [{"hex": "#000"}]}));
}

#[test]
fn scenario_mixed_case_hex_stays_distinct() {
    let mut store = StyleStore::new();
    let upper = store.add_value(
        StyleCategory::Decoration,
        json!({"fills": [{"hex": "#FF0000"}]}),
    );
    let lower = store.add_value(
        StyleCategory::Decoration,
        json!({"fills": [{"hex": "#ff0000"}]}),
    );

    assert_ne!(upper, lower);
    assert_eq!(store.len(), 2);
}

#[test]
fn semantic_hit_covers_collapsed_corner_radius() {
    let mut store = StyleStore::new();
    let scalar = store.add_value(
        StyleCategory::Decoration,
        json!({"fills": [{"hex": "#fafafa"}], "cornerRadius": 12}),
    );
    let corners = store.add_value(
        StyleCategory::Decoration,
        json!({
            "fills": [{"hex": "#fafafa"}],
            "cornerRadius": {"topLeft": 12, "topRight": 12, "bottomRight": 12, "bottomLeft": 12}
        }),
    );
    assert_eq!(scalar, corners);
}

#[test]
fn same_bag_in_different_categories_gets_different_ids() {
    let mut store = StyleStore::new();
    let bag = json!({"layoutMode": "VERTICAL"});
    let layout = store.add_value(StyleCategory::Layout, bag.clone());
    let text = store.add_value(StyleCategory::Text, bag);
    assert_ne!(layout, text);
    assert!(layout.as_str().starts_with("layout"));
    assert!(text.as_str().starts_with("text"));
}

#[test]
fn text_bags_without_salient_fields_do_not_collapse() {
    let mut store = StyleStore::new();
    let inter = store.add_value(StyleCategory::Text, json!({"fontFamily": "Inter"}));
    let roboto = store.add_value(StyleCategory::Text, json!({"fontFamily": "Roboto"}));
    assert_ne!(inter, roboto);
}

#[test]
fn near_duplicate_links_to_first_similar_parent() {
    let mut store = StyleStore::new();
    let base = json!({"fontFamily": "Inter", "fontSize": 16, "fontWeight": 400, "lineHeight": 24, "letterSpacing": 0});
    let parent = store.add_value(StyleCategory::Text, base);
    let child = store.add_value(
        StyleCategory::Text,
        json!({"fontFamily": "Inter", "fontSize": 16, "fontWeight": 700, "lineHeight": 24, "letterSpacing": 0}),
    );

    let child_def = store.get_style(&child).unwrap();
    assert_eq!(child_def.parent_id.as_ref(), Some(&parent));
    let variance = child_def.variance.expect("variance set with parent");
    assert!((variance - 0.2).abs() < 1e-9, "got {variance}");
    assert_eq!(store.get_style(&parent).unwrap().child_ids, vec![child.clone()]);

    let hierarchy = store.style_hierarchy();
    assert_eq!(hierarchy[&child].parent_id.as_ref(), Some(&parent));
    assert!(hierarchy[&parent].parent_id.is_none());
    assert!(hierarchy[&parent].variance.is_none());
}

#[test]
fn earlier_parent_wins_over_better_later_one() {
    let bag = |overrides: &[(&str, i64)]| {
        let mut map = serde_json::Map::new();
        for k in 1..=10 {
            map.insert(format!("k{k}"), json!(0));
        }
        for (key, value) in overrides {
            map.insert(key.to_string(), json!(value));
        }
        Value::Object(map)
    };

    let mut store = StyleStore::new();
    let first = store.add_value(StyleCategory::Layout, bag(&[]));
    let second = store.add_value(StyleCategory::Layout, bag(&[("k10", 1)]));
    let probe = store.add_value(StyleCategory::Layout, bag(&[("k9", 1), ("k10", 1)]));

    assert_eq!(
        store.get_style(&second).unwrap().parent_id.as_ref(),
        Some(&first)
    );
    // 0.8 to `first` vs 0.9 to `second`: the earlier definition still wins.
    let probe_def = store.get_style(&probe).unwrap();
    assert_eq!(probe_def.parent_id.as_ref(), Some(&first));
    assert!((probe_def.variance.unwrap() - 0.2).abs() < 1e-9);
}

#[test]
fn hierarchy_stays_a_forest() {
    let mut store = StyleStore::new();
    store.set_auto_optimization(true, 4);
    for size in [12.0, 12.0, 13.0, 14.0, 16.0, 16.0, 18.0] {
        for weight in [400.0, 600.0, 700.0] {
            store.add_value(
                StyleCategory::Text,
                json!({"fontFamily": "Inter", "fontSize": size, "fontWeight": weight, "lineHeight": 20, "letterSpacing": 0}),
            );
        }
    }
    assert_forest(&store);
    for def in store.all_styles() {
        assert_eq!(def.parent_id.is_some(), def.variance.is_some());
        assert!(store.depth(&def.id).unwrap() < store.len());
    }
}

#[test]
fn find_similar_excludes_exact_matches() {
    let mut store = StyleStore::new();
    let exact = store.add_value(StyleCategory::Layout, json!({"a": 1, "b": 2, "c": 3, "d": 4, "e": 5}));
    let near = store.add_value(StyleCategory::Layout, json!({"a": 1, "b": 2, "c": 3, "d": 4, "e": 6}));
    let far = store.add_value(StyleCategory::Layout, json!({"z": 1}));

    let similar = store
        .find_similar_styles(&json!({"a": 1, "b": 2, "c": 3, "d": 4, "e": 5}), 0.8)
        .unwrap();
    assert_eq!(similar, vec![near]);
    assert!(!similar.contains(&exact));
    assert!(!similar.contains(&far));

    let loose = store
        .find_similar_styles(&json!({"a": 1, "b": 2, "c": 3, "d": 4, "e": 5}), 0.0)
        .unwrap();
    assert_eq!(loose.len(), 2);
}

#[test]
fn find_similar_is_pure() {
    let mut store = StyleStore::new();
    let id = store.add_value(StyleCategory::Layout, json!({"a": 1}));
    store.find_similar_values(&json!({"a": 1}), 0.5);
    assert_eq!(store.get_style(&id).unwrap().usage_count, 1);
}

#[test]
fn unknown_ids_are_absent() {
    let store = StyleStore::new();
    assert!(store.get_style(&StyleId::from("decorationStyle99")).is_none());
    assert!(store.depth(&StyleId::from("missing")).is_none());
    assert!(store.style_hierarchy().is_empty());
}

#[test]
fn reset_clears_state_and_never_reuses_ids() {
    let mut store = StyleStore::new();
    let bag = json!({"fills": [{"hex": "#123456"}]});
    let before = store.add_value(StyleCategory::Decoration, bag.clone());
    store.add_value(StyleCategory::Text, json!({"fontSize": 12}));

    store.reset();
    assert_eq!(store.all_styles().len(), 0);
    assert!(store.get_style(&before).is_none());

    let after = store.add_value(StyleCategory::Decoration, bag);
    assert_ne!(before, after);
    assert_eq!(store.get_style(&after).unwrap().usage_count, 1);
}

#[test]
fn auto_optimization_runs_once_after_threshold_new_styles() {
    let mut store = StyleStore::new();
    store.set_auto_optimization(true, 3);

    store.add_value(StyleCategory::Text, json!({"fontFamily": "A"}));
    store.add_value(StyleCategory::Text, json!({"fontFamily": "A"}));
    store.add_value(StyleCategory::Text, json!({"fontFamily": "B"}));
    assert_eq!(store.auto_maintenance().runs(), 0, "hits must not count");

    store.add_value(StyleCategory::Text, json!({"fontFamily": "C"}));
    assert_eq!(store.auto_maintenance().runs(), 1);
    assert_eq!(store.auto_maintenance().checkpoint(), 3);
    assert_eq!(
        store.auto_maintenance().last_report().map(|r| r.total_styles),
        Some(3)
    );

    store.add_value(StyleCategory::Text, json!({"fontFamily": "D"}));
    store.add_value(StyleCategory::Text, json!({"fontFamily": "E"}));
    assert_eq!(store.auto_maintenance().runs(), 1);
    store.add_value(StyleCategory::Text, json!({"fontFamily": "F"}));
    assert_eq!(store.auto_maintenance().runs(), 2);
    assert_eq!(store.auto_maintenance().checkpoint(), 6);
}

#[test]
fn auto_optimization_can_be_disabled() {
    let mut store = StyleStore::new();
    store.set_auto_optimization(false, 1);
    for n in 0..5 {
        store.add_value(StyleCategory::Layout, json!({ "itemSpacing": n }));
    }
    assert_eq!(store.auto_maintenance().runs(), 0);
}

#[test]
fn reset_restarts_auto_optimization_checkpoint() {
    let mut store = StyleStore::new();
    store.set_auto_optimization(true, 2);
    store.add_value(StyleCategory::Layout, json!({"gap": 1}));
    store.add_value(StyleCategory::Layout, json!({"gap": 2}));
    assert_eq!(store.auto_maintenance().checkpoint(), 2);

    store.reset();
    assert_eq!(store.auto_maintenance().checkpoint(), 0);
    store.add_value(StyleCategory::Layout, json!({"gap": 1}));
    assert_eq!(store.auto_maintenance().runs(), 0);
    store.add_value(StyleCategory::Layout, json!({"gap": 3}));
    assert_eq!(store.auto_maintenance().runs(), 1);
}

#[test]
fn optimize_reports_hierarchy_of_clean_library() {
    let mut store = StyleStore::new();
    store.set_auto_optimization(false, 20);
    let root = store.add_value(StyleCategory::Layout, json!({"a": 1, "b": 2, "c": 3, "d": 4, "e": 5}));
    let child = store.add_value(StyleCategory::Layout, json!({"a": 1, "b": 2, "c": 3, "d": 4, "e": 6}));
    store.add_value(StyleCategory::Layout, json!({"a": 1, "b": 2, "c": 3, "d": 7, "e": 6}));
    store.add_value(StyleCategory::Layout, json!({"unrelated": true}));

    let report = store.optimize_library();
    assert_eq!(report.total_styles, 4);
    assert_eq!(report.duplicates_removed, 0);
    assert_eq!(report.memory_reduction, "0.0%");
    assert!(report.variants_created >= 2);
    assert!(report.hierarchy_depth >= 1);
    assert!(store.get_style(&root).unwrap().child_ids.contains(&child));

    assert_eq!(store.optimize_library(), report);
}

#[test]
fn typed_inputs_match_untyped_bags() {
    let mut store = StyleStore::new();
    let typed = store
        .add(&StyleInput::Padding(PaddingProps::uniform(8.0)))
        .unwrap();
    let untyped = store.add_value(
        StyleCategory::Padding,
        json!({"top": 8, "right": 8, "bottom": 8, "left": 8}),
    );
    assert_eq!(typed, untyped);

    let decoration = store
        .add(&StyleInput::Decoration(DecorationProps {
            fills: vec![Fill::solid("#fff")],
            ..Default::default()
        }))
        .unwrap();
    let expanded = store.add_value(
        StyleCategory::Decoration,
        json!({"fills": [{"hex": "#ffffff"}]}),
    );
    assert_eq!(decoration, expanded);
}

#[test]
fn unserializable_bags_surface_a_serialization_error() {
    let mut store = StyleStore::new();
    let mut bag: BTreeMap<(u8, u8), u8> = BTreeMap::new();
    bag.insert((1, 2), 3);

    let err = store.add_style(StyleCategory::Layout, &bag).unwrap_err();
    assert!(matches!(err, crate::FslError::Serialization(_)), "got {err:?}");
    assert!(store.is_empty());
}

#[test]
fn generated_code_is_fixed_at_creation() {
    let mut store = StyleStore::new();
    let id = store.add_value(
        StyleCategory::Text,
        json!({"fontFamily": "Inter", "fontSize": 16, "fontWeight": 500}),
    );
    let code = store.get_style(&id).unwrap().generated_code.clone();
    store.add_value(
        StyleCategory::Text,
        json!({"fontWeight": 500, "fontSize": 16, "fontFamily": "Inter"}),
    );
    assert_eq!(store.get_style(&id).unwrap().generated_code, code);
    assert_eq!(
        code,
        "TextStyle(fontFamily: 'Inter', fontSize: 16, fontWeight: FontWeight.w500)"
    );
}
