//! Figma integration: read node documents and extract their styles.
//!
//! This module provides:
//! - [`FigmaClient`] - HTTP client for the Figma REST API
//! - [`extract_styles`] - Walk a node tree and submit its bags to a store
//! - [`parse_document`] - Accept saved API responses or bare nodes
//! - API types for parsing Figma JSON responses

pub mod api_types;
pub mod client;
pub mod extract;


pub use client::{map_figma_error, FigmaAuth, FigmaClient, FigmaError};
pub use extract::{extract_styles, NodeStyles};

pub use api_types::{
    FigmaColor, FigmaEffect, FigmaNodeData, FigmaNodeWrapper, FigmaNodesResponse, FigmaPaintData,
    FigmaTypeStyle,
};

use crate::{FslError, Result};
use serde::Deserialize;
use std::time::Duration;

/// JSON shapes accepted for a local document.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentShape {
    Nodes(FigmaNodesResponse),
    File { document: FigmaNodeData },
    Node(FigmaNodeData),
}

/// Parse the root nodes out of a saved Figma response.
///
/// Accepts a `/files/:key/nodes` response, a `/files/:key` response, or a bare
/// node object. Roots from a nodes response are ordered by node id.
pub fn parse_document(json: &str) -> Result<Vec<FigmaNodeData>> {
    let shape: DocumentShape = serde_json::from_str(json)?;
    Ok(match shape {
        DocumentShape::Nodes(response) => roots_of(response),
        DocumentShape::File { document } => vec![document],
        DocumentShape::Node(node) => vec![node],
    })
}

fn roots_of(response: FigmaNodesResponse) -> Vec<FigmaNodeData> {
    let mut entries: Vec<_> = response.nodes.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries.into_iter().map(|(_, w)| w.document).collect()
}

/// Fetch one node (and its subtree) from the Figma API.
pub async fn fetch_node(file_key: &str, node_id: &str, timeout: Duration) -> Result<FigmaNodeData> {
    if file_key.trim().is_empty() {
        return Err(FslError::Config("Figma file key is required".to_string()));
    }
    if node_id.trim().is_empty() {
        return Err(FslError::Config(
            "Figma node-id is required; add ?node-id=... to the URL".to_string(),
        ));
    }

    let auth = FigmaAuth::from_env().ok_or_else(|| map_figma_error(FigmaError::MissingToken))?;
    let client = FigmaClient::new(auth, timeout).map_err(map_figma_error)?;

    let mut response = client
        .get_file_nodes(file_key, &[node_id])
        .await
        .map_err(map_figma_error)?;

    response
        .nodes
        .remove(node_id)
        .map(|wrapper| wrapper.document)
        .ok_or_else(|| map_figma_error(FigmaError::NodeNotFound(node_id.to_string())))
}
