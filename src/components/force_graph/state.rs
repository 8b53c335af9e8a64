use std::collections::HashMap;

use super::legend::Legend;
use super::scale::score_color;
use super::simulation::Simulation;
use super::types::{GraphData, GraphNode};

pub const NODE_RADIUS: f64 = 8.0;
pub const HOVER_RADIUS: f64 = 10.0;
pub const MARKER_RADIUS: f64 = 1.5;

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub node: GraphNode,
	pub color: String,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node_idx: Option<usize>,
	/// Last pointer position over the hovered node.
	pub x: f64,
	pub y: f64,
}

pub struct ForceGraphState {
	pub simulation: Simulation,
	pub nodes: Vec<NodeInfo>,
	pub drag: DragState,
	pub hover: HoverState,
	pub legend: Legend,
	pub width: f64,
	pub height: f64,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let nodes = data
			.nodes
			.iter()
			.map(|node| NodeInfo {
				color: score_color(node.score).to_string(),
				node: node.clone(),
			})
			.collect::<Vec<_>>();

		let id_to_idx: HashMap<_, _> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id, i))
			.collect();
		let mut edges = Vec::with_capacity(data.links.len());
		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (id_to_idx.get(&link.source), id_to_idx.get(&link.target)) {
				edges.push((src, tgt));
			} else {
				log::warn!("skipping link {} -> {}: unknown factor", link.source, link.target);
			}
		}

		log::debug!("graph loaded: {} nodes, {} links", nodes.len(), edges.len());

		Self {
			simulation: Simulation::new(nodes.len(), &edges, width, height),
			nodes,
			drag: DragState::default(),
			hover: HoverState::default(),
			legend: Legend::new(width),
			width,
			height,
		}
	}

	/// Replace everything drawn so far with a fresh dataset.
	pub fn load(&mut self, data: &GraphData) {
		*self = Self::new(data, self.width, self.height);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.simulation.resize(width, height);
		self.legend = Legend::new(width);
	}

	pub fn node_at_position(&self, x: f64, y: f64) -> Option<usize> {
		let mut found = None;
		for (idx, node) in self.simulation.nodes.iter().enumerate() {
			let (dx, dy) = (node.x - x, node.y - y);
			// later nodes are drawn on top
			if (dx * dx + dy * dy).sqrt() <= self.radius(idx) {
				found = Some(idx);
			}
		}
		found
	}

	pub fn radius(&self, idx: usize) -> f64 {
		if self.hover.node_idx == Some(idx) {
			HOVER_RADIUS
		} else {
			NODE_RADIUS
		}
	}

	pub fn set_hover(&mut self, node: Option<usize>, x: f64, y: f64) {
		self.hover = HoverState { node_idx: node, x, y };
	}

	pub fn clear_hover(&mut self) {
		self.hover = HoverState::default();
	}

	/// Start dragging whatever node lies under `(x, y)`.
	pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
		let Some(idx) = self.node_at_position(x, y) else {
			return false;
		};
		self.simulation.begin_drag(idx);
		self.drag.node_idx = Some(idx);
		true
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.drag.node_idx {
			self.simulation.drag_to(idx, x, y);
			self.hover.x = x;
			self.hover.y = y;
		}
	}

	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx.take() {
			self.simulation.end_drag(idx);
		}
	}

	pub fn is_dragging(&self, idx: usize) -> bool {
		self.drag.node_idx == Some(idx)
	}

	pub fn tick(&mut self) {
		self.simulation.tick();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::FactorNode;
	use crate::components::force_graph::types::GraphLink;

	fn sample() -> GraphData {
		GraphData::from_factors(&[
			FactorNode {
				id: 1,
				title: "A".into(),
				score: Some(0.8),
				affects_to: vec![2],
			},
			FactorNode {
				id: 2,
				title: "B".into(),
				score: None,
				affects_to: vec![],
			},
		])
	}

	#[test]
	fn builds_one_layout_node_per_factor() {
		let state = ForceGraphState::new(&sample(), 800.0, 600.0);
		assert_eq!(state.simulation.nodes.len(), 2);
		assert_eq!(state.simulation.link_count(), 1);
		assert_eq!(state.nodes[1].color, "rgb(128, 128, 128)");
	}

	#[test]
	fn unknown_link_targets_are_skipped() {
		let mut data = sample();
		data.links.push(GraphLink { source: 1, target: 99 });
		let state = ForceGraphState::new(&data, 800.0, 600.0);
		assert_eq!(state.simulation.link_count(), 1);
	}

	#[test]
	fn empty_dataset_is_harmless() {
		let mut state = ForceGraphState::new(&GraphData::default(), 800.0, 600.0);
		state.tick();
		assert_eq!(state.node_at_position(400.0, 300.0), None);
		assert!(!state.begin_drag(400.0, 300.0));
	}

	#[test]
	fn drag_cycle_leaves_no_pin() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0);
		let (x, y) = (state.simulation.nodes[0].x, state.simulation.nodes[0].y);
		assert!(state.begin_drag(x, y));
		assert!(state.is_dragging(0));
		state.drag_to(100.0, 100.0);
		state.tick();
		assert_eq!(state.simulation.nodes[0].x, 100.0);

		state.end_drag();
		assert!(!state.is_dragging(0));
		assert!(state.simulation.nodes.iter().all(|n| !n.is_pinned()));
	}

	#[test]
	fn reload_replaces_prior_state() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0);
		state.set_hover(Some(1), 10.0, 10.0);
		let legend = state.legend.clone();
		state.load(&GraphData::default());
		assert!(state.nodes.is_empty());
		assert_eq!(state.hover.node_idx, None);
		assert_eq!(state.legend, legend);
	}

	#[test]
	fn resize_moves_the_legend() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0);
		state.resize(400.0, 300.0);
		assert_eq!(state.width, 400.0);
		assert_eq!(state.legend, Legend::new(400.0));
	}

	#[test]
	fn pointer_leave_hides_tooltip_and_releases_drag() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0);
		let (x, y) = (state.simulation.nodes[1].x, state.simulation.nodes[1].y);
		state.set_hover(state.node_at_position(x, y), x, y);
		assert_eq!(state.hover.node_idx, Some(1));
		assert!(state.begin_drag(x, y));

		state.end_drag();
		state.clear_hover();
		assert_eq!(state.hover.node_idx, None);
		assert!(!state.is_dragging(1));
		assert!(!state.simulation.nodes[1].is_pinned());
	}
}
