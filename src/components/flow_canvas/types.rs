use std::collections::HashSet;

use super::error::FlowError;

/// Top-left corner of a node, in graph units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Distance from the left edge of the graph.
	pub x: f64,
	/// Distance from the top edge of the graph.
	pub y: f64,
}

impl Position {
	/// Position of a top-left corner at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A labelled box drawn at a fixed position.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowNode {
	/// Unique id, reported back on click.
	pub id: String,
	/// Text centred in the box.
	pub label: String,
	/// Top-left corner of the box.
	pub position: Position,
	/// Fill color as a CSS color string.
	pub color: String,
}

/// A directed connector from `source` to `target`, both node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowEdge {
	/// Unique id.
	pub id: String,
	/// Id of the node the edge leaves.
	pub source: String,
	/// Id of the node the arrowhead points at.
	pub target: String,
	/// Text drawn at the curve midpoint; empty draws none.
	pub label: String,
	/// Stroke color as a CSS color string.
	pub color: String,
	/// Draw a flowing dashed stroke.
	pub animated: bool,
}

/// The full graph handed to a [`FlowCanvas`](super::FlowCanvas).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowData {
	/// Nodes in drawing order; later nodes sit on top.
	pub nodes: Vec<FlowNode>,
	/// Edges, drawn beneath the nodes.
	pub edges: Vec<FlowEdge>,
}

impl FlowData {
	/// Checks id uniqueness and that every edge endpoint names a node.
	pub fn validate(&self) -> Result<(), FlowError> {
		let mut node_ids = HashSet::new();
		for node in &self.nodes {
			if !node_ids.insert(node.id.as_str()) {
				return Err(FlowError::DuplicateNode(node.id.clone()));
			}
		}

		let mut edge_ids = HashSet::new();
		for edge in &self.edges {
			if !edge_ids.insert(edge.id.as_str()) {
				return Err(FlowError::DuplicateEdge(edge.id.clone()));
			}
			for endpoint in [&edge.source, &edge.target] {
				if !node_ids.contains(endpoint.as_str()) {
					return Err(FlowError::DanglingEdge {
						edge: edge.id.clone(),
						endpoint: endpoint.clone(),
					});
				}
			}
		}
		Ok(())
	}
}
