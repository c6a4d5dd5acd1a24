//! Structural serialization and visual normalization of property bags.
//!
//! Two fingerprints are derived from every bag:
//! - the *exact* key hashes the whole bag with object keys sorted recursively
//!   (array order is kept), so key insertion order never matters;
//! - the *semantic* key hashes a reduced, visually normalized subset (first fill,
//!   corner radius, padding, drop shadows) and catches bags that render the same
//!   but are spelled differently.
//!
//! Color normalization is deliberately narrow: only the literal short forms `#000`
//! and `#fff` are expanded (and tagged `black`/`white`). `#FF0000` and `#ff0000`
//! keep distinct fingerprints.

use serde_json::{Map, Number, Value};
use sha2::{Digest, Sha256};
use std::fmt::Write as FmtWrite;

use super::StyleCategory;

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];
const CORNERS: [&str; 4] = ["topLeft", "topRight", "bottomRight", "bottomLeft"];
const DROP_SHADOW: &str = "DROP_SHADOW";

/// Serialize a value with object keys sorted at every depth.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_number(n, out),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
    }
}

/// Integral floats render without a fractional part so `8` and `8.0` agree.
fn write_number(n: &Number, out: &mut String) {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
                write!(out, "{}", f as i64).ok();
                return;
            }
        }
    }
    write!(out, "{}", n).ok();
}

fn write_string(s: &str, out: &mut String) {
    // serde_json escaping of a plain string never fails.
    match serde_json::to_string(s) {
        Ok(escaped) => out.push_str(&escaped),
        Err(_) => out.push_str("\"\""),
    }
}

fn fingerprint(category: StyleCategory, canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(category.as_str().as_bytes());
    hasher.update(b"\n");
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Fingerprint invariant only to object key order.
pub fn exact_key(category: StyleCategory, properties: &Value) -> String {
    fingerprint(category, &canonical_json(properties))
}

/// Fingerprint over the normalized salient subset, if the bag has one.
pub fn semantic_key(category: StyleCategory, properties: &Value) -> Option<String> {
    let normalized = normalize(category, properties);
    semantic_subset(category, &normalized)
        .map(|subset| fingerprint(category, &canonical_json(&subset)))
}

/// Apply visual normalization: short black/white hex expansion, uniform padding
/// collapse to `{uniform: n}`, and uniform per-corner radius collapse to a scalar.
pub fn normalize(category: StyleCategory, properties: &Value) -> Value {
    let mut value = normalize_colors(properties);
    if let Value::Object(map) = &mut value {
        if let Some(padding) = map.get_mut("padding") {
            collapse_padding(padding);
        }
        if let Some(radius) = map.get_mut("cornerRadius") {
            collapse_radius(radius);
        }
    }
    if category == StyleCategory::Padding {
        collapse_padding(&mut value);
    }
    value
}

fn normalize_colors(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(normalize_hex(s)),
        Value::Array(items) => Value::Array(items.iter().map(normalize_colors).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), normalize_colors(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Expand the literal `#000`/`#fff` short forms; everything else is untouched.
pub fn normalize_hex(hex: &str) -> String {
    match hex {
        "#000" => "#000000".to_string(),
        "#fff" => "#ffffff".to_string(),
        other => other.to_string(),
    }
}

/// Named tag for the two colors the normalizer recognizes.
pub fn color_name(normalized_hex: &str) -> Option<&'static str> {
    match normalized_hex {
        "#000000" => Some("black"),
        "#ffffff" => Some("white"),
        _ => None,
    }
}

fn uniform_number<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    let first = map.get(keys[0])?;
    let first_f = first.as_f64()?;
    for key in &keys[1..] {
        if map.get(*key)?.as_f64()? != first_f {
            return None;
        }
    }
    Some(first)
}

fn collapse_padding(value: &mut Value) {
    let collapsed = match value {
        Value::Object(map) => uniform_number(map, &SIDES).cloned(),
        _ => None,
    };
    if let Some(n) = collapsed {
        let mut uniform = Map::new();
        uniform.insert("uniform".to_string(), n);
        *value = Value::Object(uniform);
    }
}

fn collapse_radius(value: &mut Value) {
    let collapsed = match value {
        Value::Object(map) => uniform_number(map, &CORNERS).cloned(),
        _ => None,
    };
    if let Some(n) = collapsed {
        *value = n;
    }
}

/// Reduce a normalized bag to the fields that decide how it looks.
///
/// Fields absent from the input are omitted, not defaulted. Returns `None` when
/// nothing salient remains.
pub fn semantic_subset(category: StyleCategory, normalized: &Value) -> Option<Value> {
    let map = normalized.as_object()?;
    let mut subset = Map::new();

    if let Some(hex) = first_fill_hex(map) {
        let mut fill = Map::new();
        if let Some(name) = color_name(&hex) {
            fill.insert("name".to_string(), Value::String(name.to_string()));
        }
        fill.insert("hex".to_string(), Value::String(hex));
        subset.insert("fill".to_string(), Value::Object(fill));
    }

    if let Some(radius) = map.get("cornerRadius") {
        subset.insert("borderRadius".to_string(), radius.clone());
    }

    if let Some(padding) = map.get("padding") {
        subset.insert("padding".to_string(), padding.clone());
    } else if category == StyleCategory::Padding && map.contains_key("uniform") {
        subset.insert("padding".to_string(), normalized.clone());
    } else if category == StyleCategory::Padding && SIDES.iter().any(|s| map.contains_key(*s)) {
        let sides: Map<String, Value> = SIDES
            .iter()
            .filter_map(|s| map.get(*s).map(|v| (s.to_string(), v.clone())))
            .collect();
        subset.insert("padding".to_string(), Value::Object(sides));
    }

    let shadows = drop_shadows(map);
    if !shadows.is_empty() {
        subset.insert("hasShadow".to_string(), Value::Bool(true));
        subset.insert("shadowCount".to_string(), Value::from(shadows.len()));
        subset.insert("shadows".to_string(), Value::Array(shadows));
    }

    if subset.is_empty() {
        None
    } else {
        Some(Value::Object(subset))
    }
}

fn first_fill_hex(map: &Map<String, Value>) -> Option<String> {
    let first = map.get("fills")?.as_array()?.first()?;
    let hex = match first {
        Value::String(s) => s.as_str(),
        Value::Object(fill) => fill
            .get("hex")
            .or_else(|| fill.get("color"))
            .and_then(Value::as_str)?,
        _ => return None,
    };
    Some(hex.to_string())
}

fn drop_shadows(map: &Map<String, Value>) -> Vec<Value> {
    let Some(effects) = map.get("effects").and_then(Value::as_array) else {
        return Vec::new();
    };
    effects
        .iter()
        .filter_map(Value::as_object)
        .filter(|e| e.get("type").and_then(Value::as_str) == Some(DROP_SHADOW))
        .map(|e| {
            let mut triple = Map::new();
            triple.insert(
                "color".to_string(),
                e.get("color").cloned().unwrap_or(Value::Null),
            );
            triple.insert(
                "blur".to_string(),
                e.get("radius")
                    .or_else(|| e.get("blur"))
                    .cloned()
                    .unwrap_or(Value::Null),
            );
            triple.insert(
                "offset".to_string(),
                e.get("offset").cloned().unwrap_or(Value::Null),
            );
            Value::Object(triple)
        })
        .collect()
}
