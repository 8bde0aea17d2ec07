use std::collections::HashMap;

use log::{debug, warn};

use super::types::FlowData;

pub const NODE_WIDTH: f64 = 150.0;
pub const NODE_HEIGHT: f64 = 40.0;

/// Bend applied to edges whose target sits above their source.
const CURVATURE: f64 = 0.25;

/// Viewport limits and interaction tuning for a [`FlowCanvas`](super::FlowCanvas).
#[derive(Clone, Debug, PartialEq)]
pub struct FlowConfig {
	/// Smallest zoom factor reachable by wheel, buttons or `fit_view`.
	pub min_zoom: f64,
	/// Largest zoom factor reachable by wheel, buttons or `fit_view`.
	pub max_zoom: f64,
	/// Fraction of the node bounds left free on each side by `fit_view`.
	pub fit_padding: f64,
	/// Distance between background dots, in graph units.
	pub grid_gap: f64,
	/// Pointer travel, in pixels, after which a press stops counting as a click.
	pub click_tolerance: f64,
	/// Multiplier applied by one wheel notch or zoom button press.
	pub zoom_step: f64,
}

impl Default for FlowConfig {
	fn default() -> Self {
		Self {
			min_zoom: 0.5,
			max_zoom: 2.0,
			fit_padding: 0.1,
			grid_gap: 20.0,
			click_tolerance: 4.0,
			zoom_step: 1.2,
		}
	}
}

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: String,
	pub x: f64,
	pub y: f64,
}

impl NodeInfo {
	pub fn contains(&self, gx: f64, gy: f64) -> bool {
		gx >= self.x && gx <= self.x + NODE_WIDTH && gy >= self.y && gy <= self.y + NODE_HEIGHT
	}

	/// Bottom-centre handle where outgoing edges leave.
	pub fn source_handle(&self) -> (f64, f64) {
		(self.x + NODE_WIDTH / 2.0, self.y + NODE_HEIGHT)
	}

	/// Top-centre handle where incoming edges arrive.
	pub fn target_handle(&self) -> (f64, f64) {
		(self.x + NODE_WIDTH / 2.0, self.y)
	}
}

#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub source: usize,
	pub target: usize,
	pub label: String,
	pub color: String,
	pub animated: bool,
}

/// Cubic bezier from a source handle down into a target handle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeCurve {
	pub start: (f64, f64),
	pub c1: (f64, f64),
	pub c2: (f64, f64),
	pub end: (f64, f64),
}

impl EdgeCurve {
	pub fn between(start: (f64, f64), end: (f64, f64)) -> Self {
		let offset = control_offset(end.1 - start.1);
		Self {
			start,
			c1: (start.0, start.1 + offset),
			c2: (end.0, end.1 - offset),
			end,
		}
	}

	pub fn point_at(&self, t: f64) -> (f64, f64) {
		let u = 1.0 - t;
		let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
		(
			a * self.start.0 + b * self.c1.0 + c * self.c2.0 + d * self.end.0,
			a * self.start.1 + b * self.c1.1 + c * self.c2.1 + d * self.end.1,
		)
	}

	/// Unit tangent at the target end, used to orient the arrowhead.
	pub fn end_direction(&self) -> (f64, f64) {
		let (dx, dy) = (self.end.0 - self.c2.0, self.end.1 - self.c2.1);
		let len = (dx * dx + dy * dy).sqrt();
		if len < 0.001 { (0.0, 1.0) } else { (dx / len, dy / len) }
	}
}

fn control_offset(distance: f64) -> f64 {
	if distance >= 0.0 {
		0.5 * distance
	} else {
		CURVATURE * 25.0 * (-distance).sqrt()
	}
}

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

/// A pointer press that may still turn out to be a node click.
#[derive(Clone, Debug, Default)]
pub struct PressState {
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

pub struct FlowState {
	pub nodes: Vec<NodeInfo>,
	pub edges: Vec<EdgeInfo>,
	pub transform: ViewTransform,
	pub press: PressState,
	pub pan: PanState,
	pub hover: Option<usize>,
	pub selected: Option<usize>,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	pub config: FlowConfig,
}

impl FlowState {
	pub fn new(data: &FlowData, width: f64, height: f64, config: FlowConfig) -> Self {
		if let Err(err) = data.validate() {
			warn!("flow data is inconsistent: {err}");
		}

		let mut id_to_idx = HashMap::new();
		let mut nodes = Vec::with_capacity(data.nodes.len());
		for node in &data.nodes {
			id_to_idx.entry(node.id.as_str()).or_insert(nodes.len());
			nodes.push(NodeInfo {
				id: node.id.clone(),
				label: node.label.clone(),
				color: node.color.clone(),
				x: node.position.x,
				y: node.position.y,
			});
		}

		let mut edges = Vec::with_capacity(data.edges.len());
		for edge in &data.edges {
			match (id_to_idx.get(edge.source.as_str()), id_to_idx.get(edge.target.as_str())) {
				(Some(&source), Some(&target)) => edges.push(EdgeInfo {
					source,
					target,
					label: edge.label.clone(),
					color: edge.color.clone(),
					animated: edge.animated,
				}),
				_ => warn!("skipping edge `{}`: unknown endpoint", edge.id),
			}
		}

		Self {
			nodes,
			edges,
			transform: ViewTransform::default(),
			press: PressState::default(),
			pan: PanState::default(),
			hover: None,
			selected: None,
			width,
			height,
			flow_time: 0.0,
			config,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under a screen point. Later nodes are drawn above earlier ones.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.nodes.iter().rposition(|node| node.contains(gx, gy))
	}

	pub fn edge_curve(&self, edge: &EdgeInfo) -> EdgeCurve {
		EdgeCurve::between(
			self.nodes[edge.source].source_handle(),
			self.nodes[edge.target].target_handle(),
		)
	}

	/// Bounding box of all nodes as `(min_x, min_y, max_x, max_y)`.
	pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
		self.nodes.iter().fold(None, |acc, node| {
			let (x0, y0, x1, y1) = (node.x, node.y, node.x + NODE_WIDTH, node.y + NODE_HEIGHT);
			Some(match acc {
				None => (x0, y0, x1, y1),
				Some((ax0, ay0, ax1, ay1)) => (ax0.min(x0), ay0.min(y0), ax1.max(x1), ay1.max(y1)),
			})
		})
	}

	pub fn fit_view(&mut self) {
		let Some((min_x, min_y, max_x, max_y)) = self.bounds() else {
			self.transform = ViewTransform::default();
			return;
		};
		let (bw, bh) = (max_x - min_x, max_y - min_y);
		let padded = 1.0 + 2.0 * self.config.fit_padding;
		let k = (self.width / (bw * padded))
			.min(self.height / (bh * padded))
			.clamp(self.config.min_zoom, self.config.max_zoom);

		self.transform = ViewTransform {
			x: self.width / 2.0 - (min_x + bw / 2.0) * k,
			y: self.height / 2.0 - (min_y + bh / 2.0) * k,
			k,
		};
		debug!("fit view at zoom {k:.3}");
	}

	/// Zooms by `factor` keeping the graph point under `(x, y)` fixed on screen.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(self.config.min_zoom, self.config.max_zoom);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn zoom_center(&mut self, factor: f64) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, factor);
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		self.press = PressState {
			node_idx: self.node_at_position(x, y),
			start_x: x,
			start_y: y,
		};
		self.pan = PanState {
			active: true,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.pan.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
			return;
		}

		if self.press.node_idx.is_some() {
			let (dx, dy) = (x - self.press.start_x, y - self.press.start_y);
			if (dx * dx + dy * dy).sqrt() <= self.config.click_tolerance {
				return;
			}
			self.press.node_idx = None;
		}
		self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
		self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
	}

	/// Ends the gesture, returning the clicked node id if the press never became a pan.
	pub fn pointer_up(&mut self) -> Option<String> {
		self.pan.active = false;
		self.press
			.node_idx
			.take()
			.map(|idx| self.nodes[idx].id.clone())
	}

	pub fn pointer_leave(&mut self) {
		self.press = PressState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	pub fn is_panning(&self) -> bool {
		self.pan.active && self.press.node_idx.is_none()
	}

	/// CSS cursor for the current gesture.
	pub fn cursor(&self) -> &'static str {
		if self.is_panning() {
			"grabbing"
		} else if self.hover.is_some() {
			"pointer"
		} else {
			"grab"
		}
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		self.hover = node;
	}

	pub fn set_selected(&mut self, id: Option<&str>) {
		self.selected = id.and_then(|id| self.nodes.iter().position(|node| node.id == id));
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;
	use crate::components::flow_canvas::types::{FlowEdge, FlowNode, Position};

	fn node(id: &str, x: f64, y: f64) -> FlowNode {
		FlowNode {
			id: id.into(),
			label: id.into(),
			position: Position::new(x, y),
			color: "#60a5fa".into(),
		}
	}

	fn edge(source: &str, target: &str) -> FlowEdge {
		FlowEdge {
			id: format!("{source}-{target}"),
			source: source.into(),
			target: target.into(),
			label: "to".into(),
			color: "#f87171".into(),
			animated: true,
		}
	}

	fn sample_state() -> FlowState {
		let data = FlowData {
			nodes: vec![node("a", 0.0, 0.0), node("b", 200.0, 100.0)],
			edges: vec![edge("a", "b")],
		};
		let mut state = FlowState::new(&data, 800.0, 600.0, FlowConfig::default());
		state.fit_view();
		state
	}

	fn graph_to_screen(state: &FlowState, gx: f64, gy: f64) -> (f64, f64) {
		(
			gx * state.transform.k + state.transform.x,
			gy * state.transform.k + state.transform.y,
		)
	}

	fn node_center(state: &FlowState, idx: usize) -> (f64, f64) {
		let node = &state.nodes[idx];
		graph_to_screen(&state, node.x + NODE_WIDTH / 2.0, node.y + NODE_HEIGHT / 2.0)
	}

	#[test]
	fn dangling_edges_are_skipped() {
		let data = FlowData {
			nodes: vec![node("a", 0.0, 0.0)],
			edges: vec![edge("a", "missing")],
		};
		let state = FlowState::new(&data, 800.0, 600.0, FlowConfig::default());
		assert_eq!(state.nodes.len(), 1);
		assert!(state.edges.is_empty());
	}

	#[test]
	fn fit_view_keeps_every_node_on_screen() {
		let state = sample_state();
		let (cx, cy) = graph_to_screen(&state, 175.0, 70.0);
		assert!((cx - 400.0).abs() < 1e-9);
		assert!((cy - 300.0).abs() < 1e-9);

		for node in &state.nodes {
			let (x0, y0) = graph_to_screen(&state, node.x, node.y);
			let (x1, y1) = graph_to_screen(&state, node.x + NODE_WIDTH, node.y + NODE_HEIGHT);
			assert!(x0 >= 0.0 && y0 >= 0.0 && x1 <= 800.0 && y1 <= 600.0);
		}
	}

	#[test]
	fn fit_view_on_empty_graph_resets_transform() {
		let mut state = FlowState::new(&FlowData::default(), 800.0, 600.0, FlowConfig::default());
		state.transform.k = 1.7;
		state.fit_view();
		assert_eq!(state.transform.k, 1.0);
		assert_eq!((state.transform.x, state.transform.y), (0.0, 0.0));
	}

	#[rstest]
	#[case(100.0, 2.0)]
	#[case(0.001, 0.5)]
	fn zoom_is_clamped(#[case] factor: f64, #[case] expected: f64) {
		let mut state = sample_state();
		state.zoom_center(factor);
		assert_eq!(state.transform.k, expected);
	}

	#[test]
	fn zoom_keeps_cursor_point_fixed() {
		let mut state = sample_state();
		state.transform.k = 1.0;
		let before = state.screen_to_graph(120.0, 80.0);
		state.zoom_at(120.0, 80.0, 1.2);
		let after = state.screen_to_graph(120.0, 80.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn hit_test_finds_node_under_pointer() {
		let state = sample_state();
		let (x, y) = node_center(&state, 1);
		assert_eq!(state.node_at_position(x, y), Some(1));
		assert_eq!(state.node_at_position(5.0, 5.0), None);
	}

	#[test]
	fn press_and_release_on_node_is_a_click() {
		let mut state = sample_state();
		let (x, y) = node_center(&state, 1);
		state.pointer_down(x, y);
		state.pointer_move(x + 2.0, y + 1.0);
		assert_eq!(state.pointer_up().as_deref(), Some("b"));
		assert!(!state.pan.active);
	}

	#[test]
	fn dragging_from_node_pans_instead_of_clicking() {
		let mut state = sample_state();
		let start_x = state.transform.x;
		let (x, y) = node_center(&state, 0);
		state.pointer_down(x, y);
		state.pointer_move(x + 50.0, y);
		assert!(state.is_panning());
		assert_eq!(state.pointer_up(), None);
		assert!((state.transform.x - (start_x + 50.0)).abs() < 1e-9);
	}

	#[test]
	fn background_press_is_not_a_click() {
		let mut state = sample_state();
		state.pointer_down(5.0, 5.0);
		assert_eq!(state.pointer_up(), None);
	}

	#[test]
	fn hover_tracks_pointer_when_idle() {
		let mut state = sample_state();
		let (x, y) = node_center(&state, 0);
		state.pointer_move(x, y);
		assert_eq!(state.hover, Some(0));
		state.pointer_leave();
		assert_eq!(state.hover, None);
	}

	#[test]
	fn cursor_follows_gesture() {
		let mut state = sample_state();
		assert_eq!(state.cursor(), "grab");

		let (x, y) = node_center(&state, 0);
		state.pointer_move(x, y);
		assert_eq!(state.cursor(), "pointer");

		state.pointer_down(x, y);
		state.pointer_move(x + 50.0, y);
		assert_eq!(state.cursor(), "grabbing");

		state.pointer_up();
		state.pointer_leave();
		assert_eq!(state.cursor(), "grab");
	}

	#[test]
	fn selection_resolves_by_id() {
		let mut state = sample_state();
		state.set_selected(Some("b"));
		assert_eq!(state.selected, Some(1));
		state.set_selected(Some("unknown"));
		assert_eq!(state.selected, None);
		state.set_selected(None);
		assert_eq!(state.selected, None);
	}

	#[test]
	fn downward_edge_bends_halfway() {
		let curve = EdgeCurve::between((0.0, 0.0), (0.0, 100.0));
		assert_eq!(curve.c1, (0.0, 50.0));
		assert_eq!(curve.c2, (0.0, 50.0));
		assert_eq!(curve.point_at(0.5), (0.0, 50.0));
		assert_eq!(curve.end_direction(), (0.0, 1.0));
	}

	#[test]
	fn upward_edge_still_enters_target_from_above() {
		let curve = EdgeCurve::between((0.0, 100.0), (0.0, 0.0));
		assert_eq!(curve.c1, (0.0, 162.5));
		assert_eq!(curve.c2, (0.0, -62.5));
		assert_eq!(curve.end_direction(), (0.0, 1.0));
	}

	#[test]
	fn edges_connect_bottom_of_source_to_top_of_target() {
		let state = sample_state();
		let curve = state.edge_curve(&state.edges[0]);
		assert_eq!(curve.start, (75.0, 40.0));
		assert_eq!(curve.end, (275.0, 100.0));
	}
}
