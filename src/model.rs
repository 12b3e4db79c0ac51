//! Graph data shared by the CSV ingestor, the presenter and the canvas.

/// Side length of the square the initial node positions are sampled from.
pub const SPACE_SIZE: f64 = 1024.0;

/// One agent, keyed by its `agent_id` from the input table.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentNode {
	pub id: String,
	/// Private belief from the row that introduced the node. `None` when the
	/// field was absent or unparseable.
	pub belief: Option<f64>,
	pub public_belief: Option<f64>,
	pub is_speaking: bool,
	/// Layout hint only, sampled over `[0, SPACE_SIZE)` at creation.
	pub x: f64,
	pub y: f64,
}

/// Directed influence relationship between two agent ids. Endpoints are not
/// checked against the node set; the canvas skips links it cannot resolve.
#[derive(Clone, Debug, PartialEq)]
pub struct InfluenceLink {
	pub source: String,
	pub target: String,
	pub influence_value: Option<f64>,
}

/// The currently loaded graph: nodes in first-seen order (unique by id),
/// links in row encounter order (duplicates preserved).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphModel {
	pub nodes: Vec<AgentNode>,
	pub links: Vec<InfluenceLink>,
}
