//! Flutter snippet generation for canonical styles.
//!
//! Output is a pure function of the category and the normalized properties, so
//! regenerating the same input is byte-identical.

use palette::Srgb;
use serde_json::{Map, Value};
use std::fmt::Write as FmtWrite;
use std::str::FromStr;

use super::StyleCategory;

/// Discrete weight ladder used for text styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeightStep {
    Normal,
    Medium,
    Semibold,
    Bold,
}

impl FontWeightStep {
    const LADDER: [(f64, FontWeightStep); 4] = [
        (400.0, FontWeightStep::Normal),
        (500.0, FontWeightStep::Medium),
        (600.0, FontWeightStep::Semibold),
        (700.0, FontWeightStep::Bold),
    ];

    /// Closest rung; ties resolve to the lighter weight.
    pub fn nearest(weight: f64) -> Self {
        let mut best = Self::LADDER[0];
        for rung in &Self::LADDER[1..] {
            if (rung.0 - weight).abs() < (best.0 - weight).abs() {
                best = *rung;
            }
        }
        best.1
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(Self::nearest),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "normal" | "regular" => Some(FontWeightStep::Normal),
                "medium" => Some(FontWeightStep::Medium),
                "semibold" | "semi bold" | "demibold" => Some(FontWeightStep::Semibold),
                "bold" => Some(FontWeightStep::Bold),
                other => other.parse::<f64>().ok().map(Self::nearest),
            },
            _ => None,
        }
    }

    pub fn dart(&self) -> &'static str {
        match self {
            FontWeightStep::Normal => "FontWeight.normal",
            FontWeightStep::Medium => "FontWeight.w500",
            FontWeightStep::Semibold => "FontWeight.w600",
            FontWeightStep::Bold => "FontWeight.bold",
        }
    }
}

/// Generate the snippet for one canonical style.
pub fn generate(category: StyleCategory, normalized: &Value) -> String {
    let empty = Map::new();
    let map = normalized.as_object().unwrap_or(&empty);
    match category {
        StyleCategory::Decoration => decoration(map),
        StyleCategory::Text => text(map),
        StyleCategory::Padding => padding(map.get("padding").and_then(Value::as_object).unwrap_or(map)),
        StyleCategory::Layout => "// layout: see layout analysis".to_string(),
    }
}

fn decoration(map: &Map<String, Value>) -> String {
    let mut fields = Vec::new();

    if let Some(fill) = map
        .get("fills")
        .and_then(Value::as_array)
        .and_then(|fills| fills.first())
    {
        if let Some(color) = paint_color(fill) {
            fields.push(format!("color: {color}"));
        }
    }

    if let Some(radius) = map.get("cornerRadius").and_then(border_radius) {
        fields.push(format!("borderRadius: {radius}"));
    }

    if let Some(stroke) = map
        .get("strokes")
        .and_then(Value::as_array)
        .and_then(|strokes| strokes.first())
        .and_then(paint_color)
    {
        let width = map
            .get("strokeWeight")
            .and_then(Value::as_f64)
            .unwrap_or(1.0);
        fields.push(format!(
            "border: Border.all(color: {stroke}, width: {})",
            fmt_num(width)
        ));
    }

    let shadows: Vec<String> = map
        .get("effects")
        .and_then(Value::as_array)
        .map(|effects| effects.iter().filter_map(box_shadow).collect())
        .unwrap_or_default();
    if !shadows.is_empty() {
        let mut list = String::from("boxShadow: [\n");
        for shadow in shadows {
            writeln!(list, "    {shadow},").ok();
        }
        list.push_str("  ]");
        fields.push(list);
    }

    if fields.is_empty() {
        return "BoxDecoration()".to_string();
    }
    let mut out = String::from("BoxDecoration(\n");
    for field in fields {
        writeln!(out, "  {field},").ok();
    }
    out.push(')');
    out
}

fn border_radius(value: &Value) -> Option<String> {
    if let Some(n) = value.as_f64() {
        return Some(format!("BorderRadius.circular({})", fmt_num(n)));
    }
    let corners = value.as_object()?;
    let corner = |key: &str| corners.get(key).and_then(Value::as_f64).unwrap_or(0.0);
    Some(format!(
        "BorderRadius.only(topLeft: Radius.circular({}), topRight: Radius.circular({}), bottomRight: Radius.circular({}), bottomLeft: Radius.circular({}))",
        fmt_num(corner("topLeft")),
        fmt_num(corner("topRight")),
        fmt_num(corner("bottomRight")),
        fmt_num(corner("bottomLeft")),
    ))
}

fn box_shadow(effect: &Value) -> Option<String> {
    let effect = effect.as_object()?;
    if effect.get("type").and_then(Value::as_str) != Some("DROP_SHADOW") {
        return None;
    }
    let color = effect
        .get("color")
        .and_then(|c| color_literal(c, effect.get("opacity").and_then(Value::as_f64)))
        .unwrap_or_else(|| "Color(0x40000000)".to_string());
    let offset = effect.get("offset").and_then(Value::as_object);
    let axis = |key: &str| {
        offset
            .and_then(|o| o.get(key))
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    };
    let blur = effect
        .get("radius")
        .or_else(|| effect.get("blur"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    let mut shadow = format!(
        "BoxShadow(color: {color}, offset: Offset({}, {}), blurRadius: {}",
        fmt_num(axis("x")),
        fmt_num(axis("y")),
        fmt_num(blur)
    );
    if let Some(spread) = effect.get("spread").and_then(Value::as_f64) {
        write!(shadow, ", spreadRadius: {}", fmt_num(spread)).ok();
    }
    shadow.push(')');
    Some(shadow)
}

fn paint_color(paint: &Value) -> Option<String> {
    match paint {
        Value::String(_) => color_literal(paint, None),
        Value::Object(fill) => {
            let opacity = fill.get("opacity").and_then(Value::as_f64);
            fill.get("hex")
                .or_else(|| fill.get("color"))
                .and_then(|c| color_literal(c, opacity))
        }
        _ => None,
    }
}

/// `Color(0xAARRGGBB)` from a hex string or a Figma `{r, g, b, a}` object.
fn color_literal(color: &Value, opacity: Option<f64>) -> Option<String> {
    let (rgb, alpha): (Srgb<u8>, f64) = match color {
        Value::String(hex) => (Srgb::from_str(hex).ok()?, 1.0),
        Value::Object(c) => {
            let channel = |key: &str| c.get(key).and_then(Value::as_f64).unwrap_or(0.0) as f32;
            let rgb = Srgb::new(channel("r"), channel("g"), channel("b")).into_format::<u8>();
            (rgb, c.get("a").and_then(Value::as_f64).unwrap_or(1.0))
        }
        _ => return None,
    };
    let alpha = (alpha * opacity.unwrap_or(1.0)).clamp(0.0, 1.0);
    let a = (alpha * 255.0).round() as u8;
    Some(format!(
        "Color(0x{:02X}{:02X}{:02X}{:02X})",
        a, rgb.red, rgb.green, rgb.blue
    ))
}

fn text(map: &Map<String, Value>) -> String {
    let mut fields = Vec::new();
    if let Some(family) = map.get("fontFamily").and_then(Value::as_str) {
        fields.push(format!("fontFamily: '{}'", family.replace('\'', "\\'")));
    }
    if let Some(size) = map.get("fontSize").and_then(Value::as_f64) {
        fields.push(format!("fontSize: {}", fmt_num(size)));
    }
    if let Some(weight) = map.get("fontWeight").and_then(FontWeightStep::from_value) {
        fields.push(format!("fontWeight: {}", weight.dart()));
    }
    format!("TextStyle({})", fields.join(", "))
}

fn padding(map: &Map<String, Value>) -> String {
    if let Some(n) = map.get("uniform").and_then(Value::as_f64) {
        return format!("EdgeInsets.all({})", fmt_num(n));
    }
    let sides: Vec<String> = ["top", "right", "bottom", "left"]
        .iter()
        .filter_map(|side| {
            map.get(*side)
                .and_then(Value::as_f64)
                .map(|v| format!("{side}: {}", fmt_num(v)))
        })
        .collect();
    if sides.is_empty() {
        return "EdgeInsets.zero".to_string();
    }
    format!("EdgeInsets.only({})", sides.join(", "))
}

fn fmt_num(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
