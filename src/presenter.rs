//! Holds the currently displayed graph and the load lifecycle around it.

use crate::ingest::ParseError;
use crate::model::GraphModel;

/// Focus target issued once when the canvas first becomes interactive.
// TODO: fixed id carried over from the original app; derive a sensible
// default from the loaded graph instead.
pub const DEFAULT_FOCUS_ID: &str = "Node1";

/// What a finished load did to the held graph.
#[derive(Debug)]
pub enum LoadOutcome {
	/// The held graph was replaced wholesale.
	Applied,
	/// A newer load started after this one; its result was dropped.
	Stale,
	/// The ingestor failed; the held graph is untouched.
	Failed(ParseError),
}

/// Single owner of the current [`GraphModel`]. Starts empty; replaced only
/// wholesale by a successful load. The generation token makes overlapping
/// loads safe: when two files are picked in quick succession, only the most
/// recently started load may land.
#[derive(Clone, Debug, Default)]
pub struct GraphPresenter {
	model: GraphModel,
	generation: u64,
	focused_once: bool,
}

impl GraphPresenter {
	/// The graph currently on display.
	pub fn model(&self) -> &GraphModel {
		&self.model
	}

	/// Marks the start of a load and returns its token.
	pub fn begin_load(&mut self) -> u64 {
		self.generation += 1;
		self.generation
	}

	/// Delivers the result of the load identified by `token`.
	pub fn complete_load(
		&mut self,
		token: u64,
		result: Result<GraphModel, ParseError>,
	) -> LoadOutcome {
		if token != self.generation {
			return LoadOutcome::Stale;
		}
		match result {
			Ok(model) => {
				self.model = model;
				LoadOutcome::Applied
			}
			Err(err) => LoadOutcome::Failed(err),
		}
	}

	/// One-shot: yields the startup focus target the first time the canvas
	/// reports ready, and nothing afterwards.
	pub fn initial_focus(&mut self) -> Option<&'static str> {
		if self.focused_once {
			return None;
		}
		self.focused_once = true;
		Some(DEFAULT_FOCUS_ID)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ingest::parse_graph;

	fn sample_graph() -> GraphModel {
		parse_graph(b"agent_id,source_id,target_id\nA,A,B\nB,,", 1).unwrap()
	}

	#[test]
	fn starts_empty() {
		let presenter = GraphPresenter::default();
		assert!(presenter.model().nodes.is_empty());
		assert!(presenter.model().links.is_empty());
	}

	#[test]
	fn successful_load_replaces_model() {
		let mut presenter = GraphPresenter::default();
		let token = presenter.begin_load();
		let outcome = presenter.complete_load(token, Ok(sample_graph()));
		assert!(matches!(outcome, LoadOutcome::Applied));
		assert_eq!(presenter.model().nodes.len(), 2);
	}

	#[test]
	fn failed_load_keeps_previous_model() {
		let mut presenter = GraphPresenter::default();
		let token = presenter.begin_load();
		presenter.complete_load(token, Ok(sample_graph()));
		let before = presenter.model().clone();

		let token = presenter.begin_load();
		let err = parse_graph(b"agent_id\n\xff\xfe", 1).unwrap_err();
		let outcome = presenter.complete_load(token, Err(err));
		assert!(matches!(outcome, LoadOutcome::Failed(_)));
		assert_eq!(presenter.model(), &before);
	}

	#[test]
	fn stale_load_is_dropped() {
		let mut presenter = GraphPresenter::default();
		let first = presenter.begin_load();
		let second = presenter.begin_load();

		let outcome = presenter.complete_load(first, Ok(sample_graph()));
		assert!(matches!(outcome, LoadOutcome::Stale));
		assert!(presenter.model().nodes.is_empty());

		let outcome = presenter.complete_load(second, Ok(sample_graph()));
		assert!(matches!(outcome, LoadOutcome::Applied));
	}

	#[test]
	fn initial_focus_fires_once() {
		let mut presenter = GraphPresenter::default();
		assert_eq!(presenter.initial_focus(), Some(DEFAULT_FOCUS_ID));
		assert_eq!(presenter.initial_focus(), None);
		assert_eq!(presenter.initial_focus(), None);
	}
}
