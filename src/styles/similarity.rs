//! Pairwise similarity between property bags.

use serde_json::Value;

use super::StyleId;

/// Absolute tolerance under which two numbers count as equal.
pub const NUMBER_TOLERANCE: f64 = 0.01;

/// Fraction of keys, over the union of both bags, whose values match.
///
/// Keys present on one side only count as mismatches. Two empty objects are
/// identical (1.0). Non-object bags score 1.0 or 0.0 depending on whether the
/// values match as a whole.
pub fn similarity(a: &Value, b: &Value) -> f64 {
    let (Some(a_map), Some(b_map)) = (a.as_object(), b.as_object()) else {
        return if values_similar(a, b) { 1.0 } else { 0.0 };
    };

    let mut union = 0usize;
    let mut matches = 0usize;
    for (key, a_value) in a_map {
        union += 1;
        if let Some(b_value) = b_map.get(key) {
            if values_similar(a_value, b_value) {
                matches += 1;
            }
        }
    }
    union += b_map.keys().filter(|k| !a_map.contains_key(*k)).count();

    if union == 0 {
        return 1.0;
    }
    matches as f64 / union as f64
}

/// `1 - similarity(a, b)`.
pub fn variance(a: &Value, b: &Value) -> f64 {
    1.0 - similarity(a, b)
}

/// First candidate, in iteration order, whose similarity lands in `[threshold, 1.0)`.
///
/// This is a first-match search: of two equally good parents the earlier one wins.
pub fn find_potential_parent<'a, I>(
    properties: &Value,
    candidates: I,
    threshold: f64,
) -> Option<(&'a StyleId, f64)>
where
    I: IntoIterator<Item = (&'a StyleId, &'a Value)>,
{
    candidates.into_iter().find_map(|(id, candidate)| {
        let score = similarity(properties, candidate);
        (score >= threshold && score < 1.0).then_some((id, score))
    })
}

/// Recursive value comparison: arrays positionally, objects by identical key
/// sets, numbers within [`NUMBER_TOLERANCE`].
pub fn values_similar(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => (x - y).abs() <= NUMBER_TOLERANCE,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_similar(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, xv)| ym.get(k).is_some_and(|yv| values_similar(xv, yv)))
        }
        _ => a == b,
    }
}
