//! Figma API response types for parsing JSON from the Figma REST API.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response from the nodes endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct FigmaNodesResponse {
    #[serde(default)]
    pub name: Option<String>,
    pub nodes: HashMap<String, FigmaNodeWrapper>,
}

/// Wrapper containing the document for a node.
#[derive(Debug, Deserialize, Serialize)]
pub struct FigmaNodeWrapper {
    pub document: FigmaNodeData,
}

/// Raw Figma node data from the API, limited to the style-bearing fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaNodeData {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub children: Vec<FigmaNodeData>,
    pub characters: Option<String>,
    pub style: Option<FigmaTypeStyle>,
    #[serde(default)]
    pub fills: Vec<FigmaPaintData>,
    #[serde(default)]
    pub strokes: Vec<FigmaPaintData>,
    pub stroke_weight: Option<f64>,
    pub corner_radius: Option<f64>,
    pub rectangle_corner_radii: Option<[f64; 4]>,
    #[serde(default)]
    pub effects: Vec<FigmaEffect>,
    pub layout_mode: Option<String>,
    pub item_spacing: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub padding_left: Option<f64>,
    pub primary_axis_align_items: Option<String>,
    pub counter_axis_align_items: Option<String>,
}

/// Typography style from Figma.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaTypeStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub line_height_px: Option<f64>,
    pub letter_spacing: Option<f64>,
}

/// Paint/fill data from Figma.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaPaintData {
    #[serde(rename = "type")]
    pub paint_type: String,
    pub color: Option<FigmaColor>,
    pub opacity: Option<f64>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// Shadow or blur effect from Figma.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaEffect {
    #[serde(rename = "type")]
    pub effect_type: String,
    pub color: Option<FigmaColor>,
    pub offset: Option<FigmaVector>,
    #[serde(default)]
    pub radius: f64,
    pub spread: Option<f64>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct FigmaVector {
    pub x: f64,
    pub y: f64,
}

/// RGBA color from Figma (0.0-1.0 range).
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct FigmaColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

impl FigmaColor {
    /// Convert to hex color string (e.g., "#ff7f00").
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            (self.r * 255.0) as u8,
            (self.g * 255.0) as u8,
            (self.b * 255.0) as u8
        )
    }
}

fn default_visible() -> bool {
    true
}

fn default_alpha() -> f64 {
    1.0
}
