//! CSV ingestor: turns an uploaded table into a [`GraphModel`].
//!
//! The expected columns (by header name) are `agent_id`, `belief`,
//! `public_belief`, `is_speaking`, `source_id`, `target_id` and
//! `influence_value`. Parsing is deliberately permissive: missing columns and
//! malformed field values degrade to absent values instead of failing the
//! load. Only a structural decoder failure is an error.

use std::collections::HashSet;

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use crate::model::{AgentNode, GraphModel, InfluenceLink, SPACE_SIZE};
use crate::rng::Lcg;

/// Structural failure from the CSV decoder. Bad field values never raise
/// this; they degrade per-field instead.
#[derive(Debug, Error)]
pub enum ParseError {
	#[error("csv decode failed: {0}")]
	Csv(#[from] csv::Error),
}

/// Positions of the consumed columns in the header row. A column that is not
/// in the header stays `None` and every lookup through it yields nothing.
#[derive(Debug, Default)]
struct Columns {
	agent_id: Option<usize>,
	belief: Option<usize>,
	public_belief: Option<usize>,
	is_speaking: Option<usize>,
	source_id: Option<usize>,
	target_id: Option<usize>,
	influence_value: Option<usize>,
}

impl Columns {
	fn from_header(header: &StringRecord) -> Self {
		let find = |name: &str| header.iter().position(|h| h == name);
		Self {
			agent_id: find("agent_id"),
			belief: find("belief"),
			public_belief: find("public_belief"),
			is_speaking: find("is_speaking"),
			source_id: find("source_id"),
			target_id: find("target_id"),
			influence_value: find("influence_value"),
		}
	}
}

/// Empty or malformed text is an absent value, never an error.
fn parse_float(field: Option<&str>) -> Option<f64> {
	field.and_then(|s| s.trim().parse::<f64>().ok())
}

/// Parse CSV bytes into a graph. `seed` drives the layout-hint positions so
/// the transformation itself stays a pure function of its inputs.
///
/// Nodes are registered on the first row carrying a given `agent_id`; later
/// rows with the same id do not overwrite it. A link is appended for every
/// row whose `source_id` and `target_id` are both non-empty, whether or not
/// those ids name registered nodes.
pub fn parse_graph(bytes: &[u8], seed: u64) -> Result<GraphModel, ParseError> {
	let mut reader = ReaderBuilder::new().flexible(true).from_reader(bytes);
	let columns = Columns::from_header(reader.headers()?);

	let mut rng = Lcg::new(seed);
	let mut graph = GraphModel::default();
	let mut seen: HashSet<String> = HashSet::new();

	for record in reader.records() {
		let record = record?;
		let field = |col: Option<usize>| col.and_then(|i| record.get(i));

		if let Some(id) = field(columns.agent_id) {
			if seen.insert(id.to_string()) {
				graph.nodes.push(AgentNode {
					id: id.to_string(),
					belief: parse_float(field(columns.belief)),
					public_belief: parse_float(field(columns.public_belief)),
					is_speaking: field(columns.is_speaking) == Some("True"),
					x: rng.next_f64() * SPACE_SIZE,
					y: rng.next_f64() * SPACE_SIZE,
				});
			}
		}

		if let (Some(source), Some(target)) = (field(columns.source_id), field(columns.target_id)) {
			if !source.is_empty() && !target.is_empty() {
				graph.links.push(InfluenceLink {
					source: source.to_string(),
					target: target.to_string(),
					influence_value: parse_float(field(columns.influence_value)),
				});
			}
		}
	}

	Ok(graph)
}

#[cfg(test)]
mod tests {
	use super::*;

	const HEADER: &str =
		"agent_id,belief,public_belief,is_speaking,source_id,target_id,influence_value";

	fn parse(input: &str) -> GraphModel {
		parse_graph(input.as_bytes(), 1).unwrap()
	}

	#[test]
	fn header_only_yields_empty_graph() {
		let graph = parse(HEADER);
		assert!(graph.nodes.is_empty());
		assert!(graph.links.is_empty());
	}

	#[test]
	fn empty_input_yields_empty_graph() {
		let graph = parse("");
		assert!(graph.nodes.is_empty());
		assert!(graph.links.is_empty());
	}

	#[test]
	fn row_registers_node_and_link() {
		let graph = parse(&format!(
			"{HEADER}\nA,0.5,0.4,True,A,B,0.3\nB,0.8,,,,,"
		));
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.nodes[0].id, "A");
		assert_eq!(graph.nodes[0].belief, Some(0.5));
		assert_eq!(graph.nodes[1].id, "B");
		assert_eq!(graph.nodes[1].belief, Some(0.8));
		assert_eq!(graph.links.len(), 1);
		assert_eq!(graph.links[0].source, "A");
		assert_eq!(graph.links[0].target, "B");
		assert_eq!(graph.links[0].influence_value, Some(0.3));
	}

	#[test]
	fn duplicate_agent_id_keeps_first_occurrence() {
		let graph = parse(&format!("{HEADER}\nA,0.1,,,,,\nA,0.9,,True,,,"));
		assert_eq!(graph.nodes.len(), 1);
		assert_eq!(graph.nodes[0].belief, Some(0.1));
		assert!(!graph.nodes[0].is_speaking);
	}

	#[test]
	fn link_requires_both_endpoints() {
		let graph = parse(&format!("{HEADER}\nA,,,,A,,0.5\nB,,,,,B,0.5"));
		assert!(graph.links.is_empty());
	}

	#[test]
	fn links_to_unregistered_ids_are_kept() {
		let graph = parse(&format!("{HEADER}\nA,,,,X,Y,"));
		assert_eq!(graph.nodes.len(), 1);
		assert_eq!(graph.links.len(), 1);
		assert_eq!(graph.links[0].source, "X");
		assert_eq!(graph.links[0].target, "Y");
	}

	#[test]
	fn link_order_follows_row_order_with_duplicates() {
		let graph = parse(&format!(
			"{HEADER}\nA,,,,A,B,1\nA,,,,B,A,2\nA,,,,A,B,3"
		));
		let pairs: Vec<(&str, &str)> = graph
			.links
			.iter()
			.map(|l| (l.source.as_str(), l.target.as_str()))
			.collect();
		assert_eq!(pairs, vec![("A", "B"), ("B", "A"), ("A", "B")]);
		assert_eq!(graph.links[2].influence_value, Some(3.0));
	}

	#[test]
	fn is_speaking_matches_exact_true_only() {
		let graph = parse(&format!("{HEADER}\nA,,,True,,,\nB,,,true,,,\nC,,,,,,"));
		assert!(graph.nodes[0].is_speaking);
		assert!(!graph.nodes[1].is_speaking);
		assert!(!graph.nodes[2].is_speaking);
	}

	#[test]
	fn malformed_numbers_degrade_to_absent() {
		let graph = parse(&format!("{HEADER}\nA,abc,xyz,,A,B,bogus"));
		assert_eq!(graph.nodes.len(), 1);
		assert_eq!(graph.nodes[0].belief, None);
		assert_eq!(graph.nodes[0].public_belief, None);
		assert_eq!(graph.links[0].influence_value, None);
	}

	#[test]
	fn missing_columns_degrade_to_absent() {
		let graph = parse("agent_id\nA\nB");
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.nodes[0].belief, None);
		assert!(graph.links.is_empty());
	}

	#[test]
	fn extra_columns_are_ignored() {
		let graph = parse("agent_id,mood,belief\nA,grumpy,0.7");
		assert_eq!(graph.nodes.len(), 1);
		assert_eq!(graph.nodes[0].belief, Some(0.7));
	}

	#[test]
	fn short_rows_are_tolerated() {
		let graph = parse(&format!("{HEADER}\nA,0.5"));
		assert_eq!(graph.nodes.len(), 1);
		assert_eq!(graph.nodes[0].belief, Some(0.5));
		assert!(graph.links.is_empty());
	}

	#[test]
	fn positions_fall_inside_space_bounds() {
		let graph = parse(&format!("{HEADER}\nA,,,,,,\nB,,,,,,\nC,,,,,,"));
		for node in &graph.nodes {
			assert!((0.0..SPACE_SIZE).contains(&node.x));
			assert!((0.0..SPACE_SIZE).contains(&node.y));
		}
	}

	#[test]
	fn structural_decode_failure_is_an_error() {
		let mut bytes = format!("{HEADER}\n").into_bytes();
		bytes.extend_from_slice(b"A,\xff\xfe,,,,,\n");
		let err = parse_graph(&bytes, 1).unwrap_err();
		assert!(matches!(err, ParseError::Csv(_)));
	}
}
