//! Typed property bags for each style category.
//!
//! Every struct serializes to the camelCase bag layout the store fingerprints
//! (`fills`, `cornerRadius`, `effects`, `fontFamily`, ...). Absent optional fields
//! are omitted rather than defaulted, so "missing" and "present but zero" stay
//! distinguishable in both fingerprints.

use serde::{Deserialize, Serialize};

use super::StyleCategory;

/// Tagged union of the property bags accepted by [`super::StyleStore::add`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "properties", rename_all = "lowercase")]
pub enum StyleInput {
    Decoration(DecorationProps),
    Text(TextProps),
    Padding(PaddingProps),
    Layout(LayoutProps),
}

impl StyleInput {
    pub fn category(&self) -> StyleCategory {
        match self {
            StyleInput::Decoration(_) => StyleCategory::Decoration,
            StyleInput::Text(_) => StyleCategory::Text,
            StyleInput::Padding(_) => StyleCategory::Padding,
            StyleInput::Layout(_) => StyleCategory::Layout,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationProps {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Fill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<CornerRadius>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Shadow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Fill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<f64>,
}

impl DecorationProps {
    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
            && self.corner_radius.is_none()
            && self.effects.is_empty()
            && self.strokes.is_empty()
    }
}

/// A solid paint, e.g. `{"hex": "#1e88e5", "opacity": 0.5}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Fill {
    pub fn solid(hex: impl Into<String>) -> Self {
        Self {
            hex: hex.into(),
            opacity: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CornerRadius {
    Uniform(f64),
    Corners(CornerRadii),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

/// A drop shadow effect. `radius` is the blur radius, following Figma naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    #[serde(rename = "type")]
    pub effect_type: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    pub offset: Offset,
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
}

impl Shadow {
    pub fn drop(color: impl Into<String>, x: f64, y: f64, radius: f64) -> Self {
        Self {
            effect_type: "DROP_SHADOW".to_string(),
            color: color.into(),
            opacity: None,
            offset: Offset { x, y },
            radius,
            spread: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PaddingProps {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl PaddingProps {
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProps {
    pub layout_mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_axis_align_items: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_axis_align_items: Option<String>,
}
