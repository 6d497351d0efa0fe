use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::scale;
use crate::graph::{ForceGraphData, ForceNode};

/// Minimum pick distance in world space; small nodes stay grabbable.
pub const HIT_RADIUS: f64 = 12.0;

/// Tunables for the simulation and labels.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasSettings {
	/// Node repulsion.
	pub force_charge: f32,
	/// Link spring stiffness.
	pub force_spring: f32,
	/// Cap on the force applied to a node per step.
	pub force_max: f32,
	/// Velocity scale.
	pub node_speed: f32,
	/// Velocity decay per step.
	pub damping_factor: f32,
	/// Radius of the ring nodes start on.
	pub initial_spread: f64,
	/// Draw node names next to every node, not only highlighted ones.
	pub show_labels: bool,
}

impl Default for CanvasSettings {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			initial_spread: 100.0,
			show_labels: true,
		}
	}
}

impl CanvasSettings {
	fn simulation(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub node: ForceNode,
	pub color: String,
	pub radius: f64,
}

impl NodeInfo {
	pub fn caption(&self) -> Option<&str> {
		self.node.name.as_deref()
	}
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	pub show_labels: bool,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(data: &ForceGraphData, settings: &CanvasSettings, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(settings.simulation());
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();
		let count = data.nodes.len().max(1) as f64;

		for (i, node) in data.nodes.iter().enumerate() {
			let score = node.score_f64();
			let angle = (i as f64) * 2.0 * PI / count;
			let (x, y) = (
				(width / 2.0 + settings.initial_spread * angle.cos()) as f32,
				(height / 2.0 + settings.initial_spread * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					node: node.clone(),
					color: scale::score_color(score).into(),
					radius: scale::node_radius(score),
				},
			});
			// Later duplicates win, same as a renderer keyed by id.
			if !node.id.is_null() {
				id_to_idx.insert(node.id.key(), idx);
			}
		}

		let mut dangling = 0usize;
		for link in &data.links {
			match (
				id_to_idx.get(&link.source.key()),
				id_to_idx.get(&link.target.key()),
			) {
				(Some(&src), Some(&tgt)) => {
					graph.add_edge(src, tgt, EdgeData::default());
					edges.push((src, tgt));
				}
				_ => dangling += 1,
			}
		}
		if dangling > 0 {
			debug!("skipped {dangling} links with unknown endpoints");
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
			show_labels: settings.show_labels,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius.max(HIT_RADIUS) {
				found = Some(node.index());
			}
		});
		found
	}

	/// Renderer node under the hover cursor, if any.
	pub fn hovered_node(&self) -> Option<ForceNode> {
		let idx = self.hover.node?;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.node.clone());
			}
		});
		found
	}

	/// Returns true when the hovered node changed.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) -> bool {
		if self.hover.node == node {
			return false;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the old highlight around so it can fade out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
		true
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::graph::convert_value;

	fn sample() -> ForceGraphData {
		convert_value(&json!({
			"nodes": [
				{"id": "root", "label": "Root", "score": 1},
				{"id": "a", "parent": "root", "score": 0.2},
				{"id": "b", "parent": "a"},
				{"id": "c", "parent": "ghost"}
			]
		}))
		.unwrap()
	}

	#[test]
	fn dangling_links_are_not_simulated() {
		let state = ForceGraphState::new(&sample(), &CanvasSettings::default(), 800.0, 600.0);
		assert_eq!(state.edges.len(), 2);
	}

	#[test]
	fn float_and_integer_ids_link_up() {
		let data = convert_value(&json!({"nodes": [{"id": 1}, {"id": 2, "parent": 1.0}]})).unwrap();
		let state = ForceGraphState::new(&data, &CanvasSettings::default(), 800.0, 600.0);
		assert_eq!(state.edges.len(), 1);
	}

	#[test]
	fn nodes_carry_score_styling() {
		let state = ForceGraphState::new(&sample(), &CanvasSettings::default(), 800.0, 600.0);
		let mut radii = Vec::new();
		state.graph.visit_nodes(|node| {
			radii.push((node.data.user_data.node.id.to_string(), node.data.user_data.radius));
		});
		radii.sort_by(|a, b| a.0.cmp(&b.0));
		assert_eq!(radii[0], ("a".to_string(), scale::node_radius(Some(0.2))));
		assert_eq!(radii[1], ("b".to_string(), scale::BASE_RADIUS));
		assert_eq!(radii[3], ("root".to_string(), scale::MAX_RADIUS));
	}

	#[test]
	fn hover_tracks_neighbors() {
		let mut state = ForceGraphState::new(&sample(), &CanvasSettings::default(), 800.0, 600.0);
		let (root_idx, a_idx) = (state.edges[0].0, state.edges[0].1);

		assert!(state.set_hover(Some(a_idx)));
		assert!(!state.set_hover(Some(a_idx)));
		assert!(state.is_highlighted(root_idx));
		assert_eq!(state.hovered_node().map(|n| n.id.to_string()), Some("a".to_string()));

		assert!(state.set_hover(None));
		assert_eq!(state.hovered_node(), None);
		assert!(state.has_active_highlight());
	}

	#[test]
	fn empty_graph_builds() {
		let state = ForceGraphState::new(&ForceGraphData::default(), &CanvasSettings::default(), 10.0, 10.0);
		assert!(state.edges.is_empty());
		assert_eq!(state.node_at_position(5.0, 5.0), None);
	}
}
