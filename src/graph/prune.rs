use std::collections::HashSet;

use log::trace;

use super::types::ThoughtGraph;

/// Score below which non-root nodes are dropped by default.
pub const DEFAULT_MIN_SCORE: f64 = 0.5;

/// Drop low-scoring nodes, keeping every root.
///
/// A node missing a score counts as `0.0`. Survivors whose parent was
/// dropped are detached and become roots. The input is not modified.
pub fn prune_low_score(graph: &ThoughtGraph, min_score: f64) -> ThoughtGraph {
	let mut keep: Vec<_> = graph
		.nodes()
		.iter()
		.filter(|n| n.score_f64().unwrap_or(0.0) >= min_score || n.is_root())
		.cloned()
		.collect();

	let kept_ids: HashSet<String> = keep.iter().map(|n| n.id.key()).collect();
	for node in &mut keep {
		let orphaned = node
			.parent
			.as_ref()
			.is_some_and(|p| p.is_truthy() && !kept_ids.contains(&p.key()));
		if orphaned {
			trace!("detaching {} from pruned parent", node.id);
			node.parent = None;
		}
	}

	trace!("pruned {} of {} nodes", graph.nodes().len() - keep.len(), graph.nodes().len());
	ThoughtGraph::new(keep)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{NodeId, ThoughtNode};

	fn ids(graph: &ThoughtGraph) -> Vec<String> {
		graph.nodes().iter().map(|n| n.id.to_string()).collect()
	}

	#[test]
	fn roots_survive_any_threshold() {
		let graph = ThoughtGraph::new(vec![ThoughtNode::new("root").with_score(0.0)]);
		assert_eq!(ids(&prune_low_score(&graph, 1.0)), ["root"]);
	}

	#[test]
	fn low_scores_are_dropped() {
		let graph = ThoughtGraph::new(vec![
			ThoughtNode::new("root"),
			ThoughtNode::new("good").with_parent("root").with_score(0.8),
			ThoughtNode::new("bad").with_parent("root").with_score(0.1),
			ThoughtNode::new("unscored").with_parent("root"),
			ThoughtNode::new("edge").with_parent("root").with_score(DEFAULT_MIN_SCORE),
		]);
		assert_eq!(ids(&prune_low_score(&graph, DEFAULT_MIN_SCORE)), ["root", "good", "edge"]);
	}

	#[test]
	fn orphans_are_detached() {
		let graph = ThoughtGraph::new(vec![
			ThoughtNode::new("root"),
			ThoughtNode::new("weak").with_parent("root").with_score(0.2),
			ThoughtNode::new("strong").with_parent("weak").with_score(0.9),
		]);
		let pruned = prune_low_score(&graph, DEFAULT_MIN_SCORE);
		assert_eq!(ids(&pruned), ["root", "strong"]);
		assert!(pruned.nodes()[1].is_root());
		assert_eq!(graph.nodes()[2].parent, Some("weak".into()));
	}

	#[test]
	fn numeric_parents_match_by_value() {
		let graph = ThoughtGraph::new(vec![
			ThoughtNode::new(1i64),
			ThoughtNode::new(2i64)
				.with_parent(NodeId::new(serde_json::json!(1.0)))
				.with_score(0.9),
		]);
		let pruned = prune_low_score(&graph, DEFAULT_MIN_SCORE);
		assert_eq!(pruned.nodes()[1].parent, Some(NodeId::from(1i64)));
	}

	#[test]
	fn empty_graph_prunes_to_empty() {
		assert!(prune_low_score(&ThoughtGraph::default(), DEFAULT_MIN_SCORE).nodes().is_empty());
	}
}
