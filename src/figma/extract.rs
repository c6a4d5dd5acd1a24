//! Turn a Figma node tree into style ids.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::api_types::{FigmaColor, FigmaEffect, FigmaNodeData, FigmaPaintData};
use crate::styles::{
    CornerRadii, CornerRadius, DecorationProps, Fill, LayoutProps, Offset, PaddingProps, Shadow,
    StyleId, StyleInput, StyleStore, TextProps,
};
use crate::Result;

/// Style ids produced by one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyles {
    pub node_id: String,
    pub name: String,
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoration: Option<StyleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<StyleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<StyleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<StyleId>,
}

impl NodeStyles {
    fn is_empty(&self) -> bool {
        self.decoration.is_none()
            && self.text.is_none()
            && self.padding.is_none()
            && self.layout.is_none()
    }
}

/// Walk `root` depth-first (parents before children) and submit every bag it
/// yields to `store`. Nodes that produce no bag are left out of the result.
pub fn extract_styles(store: &mut StyleStore, root: &FigmaNodeData) -> Result<Vec<NodeStyles>> {
    let mut acc = Vec::new();
    collect(store, root, &mut acc)?;
    Ok(acc)
}

fn collect(store: &mut StyleStore, node: &FigmaNodeData, acc: &mut Vec<NodeStyles>) -> Result<()> {
    let mut styles = NodeStyles {
        node_id: node.id.clone(),
        name: node.name.clone(),
        node_type: node.node_type.clone(),
        decoration: None,
        text: None,
        padding: None,
        layout: None,
    };

    for input in node_inputs(node) {
        let id = store.add(&input)?;
        match input {
            StyleInput::Decoration(_) => styles.decoration = Some(id),
            StyleInput::Text(_) => styles.text = Some(id),
            StyleInput::Padding(_) => styles.padding = Some(id),
            StyleInput::Layout(_) => styles.layout = Some(id),
        }
    }

    if !styles.is_empty() {
        debug!(node = %node.id, name = %node.name, "extracted node styles");
        acc.push(styles);
    }

    for child in &node.children {
        collect(store, child, acc)?;
    }
    Ok(())
}

/// Every bag a single node contributes, in submission order.
pub fn node_inputs(node: &FigmaNodeData) -> Vec<StyleInput> {
    let mut inputs = Vec::new();

    let decoration = decoration_props(node);
    if !decoration.is_empty() {
        inputs.push(StyleInput::Decoration(decoration));
    }
    if let Some(text) = text_props(node) {
        inputs.push(StyleInput::Text(text));
    }
    if let Some(padding) = padding_props(node) {
        inputs.push(StyleInput::Padding(padding));
    }
    if let Some(layout) = layout_props(node) {
        inputs.push(StyleInput::Layout(layout));
    }
    inputs
}

fn is_auto_layout(node: &FigmaNodeData) -> bool {
    matches!(node.layout_mode.as_deref(), Some(mode) if mode != "NONE")
}

pub fn decoration_props(node: &FigmaNodeData) -> DecorationProps {
    let fills: Vec<Fill> = node.fills.iter().filter_map(solid_fill).collect();
    let strokes: Vec<Fill> = node.strokes.iter().filter_map(solid_fill).collect();
    let stroke_weight = if strokes.is_empty() {
        None
    } else {
        node.stroke_weight
    };

    DecorationProps {
        fills,
        corner_radius: corner_radius(node),
        effects: node.effects.iter().filter_map(drop_shadow).collect(),
        strokes,
        stroke_weight,
    }
}

fn solid_fill(paint: &FigmaPaintData) -> Option<Fill> {
    if !paint.visible || !paint.paint_type.eq_ignore_ascii_case("solid") {
        return None;
    }
    let color = paint.color?;
    let opacity = paint.opacity.unwrap_or(1.0) * color.a;
    Some(Fill {
        hex: color.to_hex(),
        opacity: translucent(opacity),
    })
}

fn corner_radius(node: &FigmaNodeData) -> Option<CornerRadius> {
    if let Some([top_left, top_right, bottom_right, bottom_left]) = node.rectangle_corner_radii {
        if top_left == top_right && top_right == bottom_right && bottom_right == bottom_left {
            return (top_left > 0.0).then_some(CornerRadius::Uniform(top_left));
        }
        return Some(CornerRadius::Corners(CornerRadii {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }));
    }
    node.corner_radius
        .filter(|r| *r > 0.0)
        .map(CornerRadius::Uniform)
}

fn drop_shadow(effect: &FigmaEffect) -> Option<Shadow> {
    if !effect.visible || effect.effect_type != "DROP_SHADOW" {
        return None;
    }
    let color = effect.color.unwrap_or(FigmaColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    });
    let offset = effect.offset.map_or(Offset { x: 0.0, y: 0.0 }, |o| Offset {
        x: o.x,
        y: o.y,
    });
    Some(Shadow {
        effect_type: effect.effect_type.clone(),
        color: color.to_hex(),
        opacity: translucent(color.a),
        offset,
        radius: effect.radius,
        spread: effect.spread.filter(|s| *s != 0.0),
    })
}

fn translucent(opacity: f64) -> Option<f64> {
    (opacity < 1.0).then_some(opacity)
}

pub fn text_props(node: &FigmaNodeData) -> Option<TextProps> {
    if node.node_type != "TEXT" {
        return None;
    }
    let style = node.style.as_ref()?;
    let props = TextProps {
        font_family: style.font_family.clone(),
        font_size: style.font_size,
        font_weight: style.font_weight,
        line_height: style.line_height_px,
        letter_spacing: style.letter_spacing.filter(|s| *s != 0.0),
    };
    if props == TextProps::default() {
        None
    } else {
        Some(props)
    }
}

pub fn padding_props(node: &FigmaNodeData) -> Option<PaddingProps> {
    if !is_auto_layout(node) {
        return None;
    }
    let padding = PaddingProps {
        top: node.padding_top.unwrap_or(0.0),
        right: node.padding_right.unwrap_or(0.0),
        bottom: node.padding_bottom.unwrap_or(0.0),
        left: node.padding_left.unwrap_or(0.0),
    };
    if padding == PaddingProps::default() {
        None
    } else {
        Some(padding)
    }
}

pub fn layout_props(node: &FigmaNodeData) -> Option<LayoutProps> {
    if !is_auto_layout(node) {
        return None;
    }
    Some(LayoutProps {
        layout_mode: node.layout_mode.clone()?,
        item_spacing: node.item_spacing,
        primary_axis_align_items: node.primary_axis_align_items.clone(),
        counter_axis_align_items: node.counter_axis_align_items.clone(),
    })
}
