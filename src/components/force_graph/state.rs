use std::collections::HashMap;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::model::{GraphModel, SPACE_SIZE};
use crate::rng::Lcg;

/// Palette the node and link colors are drawn from. Colors are re-rolled
/// every time a model is uploaded to the canvas, not kept per node.
pub const PALETTE: [&str; 3] = ["#88C6FF", "#FF99D2", "#2748A4"];

pub const NODE_RADIUS: f64 = 10.0;
pub const HIT_RADIUS: f64 = 14.0;

/// Link width when `influence_value` is absent, zero or non-finite.
pub const FALLBACK_LINK_WIDTH: f64 = 0.1;

#[derive(Clone, Debug, Default)]
pub struct NodeStyle {
	pub label: String,
	pub color: &'static str,
}

#[derive(Clone, Debug)]
pub struct LinkStyle {
	pub width: f64,
	pub color: &'static str,
}

/// Width of a drawn link: the influence value when it carries one, else the
/// fixed fallback.
pub fn link_width(influence: Option<f64>) -> f64 {
	match influence {
		Some(v) if v.is_finite() && v != 0.0 => v,
		_ => FALLBACK_LINK_WIDTH,
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

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeStyle, LinkStyle>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hovered: Option<DefaultNodeIdx>,
	pub focused: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
}

impl ForceGraphState {
	/// Builds the simulation from a model. Node positions come from the
	/// model's layout hints (the sample square re-centered on the origin);
	/// colors are rolled fresh from the palette on every call. Links whose
	/// endpoints are not in the node set are skipped here.
	pub fn new(model: &GraphModel, width: f64, height: f64, seed: u64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut rng = Lcg::new(seed);
		let mut id_to_idx = HashMap::new();

		for node in &model.nodes {
			let idx = graph.add_node(NodeData {
				x: (node.x - SPACE_SIZE / 2.0) as f32,
				y: (node.y - SPACE_SIZE / 2.0) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeStyle {
					label: node.id.clone(),
					color: PALETTE[rng.pick(PALETTE.len())],
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &model.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: LinkStyle {
							width: link_width(link.influence_value),
							color: PALETTE[rng.pick(PALETTE.len())],
						},
					},
				);
			}
		}

		Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			focused: None,
			width,
			height,
			animation_running: true,
			id_to_idx,
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
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Focus instruction from the presenter. Unknown ids are ignored.
	pub fn focus(&mut self, id: &str) {
		if let Some(&idx) = self.id_to_idx.get(id) {
			self.focused = Some(idx);
		}
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hovered == Some(idx)
	}

	pub fn is_focused(&self, idx: DefaultNodeIdx) -> bool {
		self.focused == Some(idx)
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
