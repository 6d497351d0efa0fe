use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};

use super::types::{ThoughtGraph, ThoughtNode};

/// Labels longer than this many characters are cut and suffixed with `...`.
pub const LABEL_MAX_CHARS: usize = 80;

static NEXT_THOUGHT: AtomicU64 = AtomicU64::new(1);

fn next_thought_id() -> String {
	format!("thought-{}", NEXT_THOUGHT.fetch_add(1, Ordering::Relaxed))
}

/// One reasoning step in a graph of thoughts.
#[derive(Clone, Debug, PartialEq)]
pub struct Thought {
	/// Full text of the step.
	pub content: String,
	/// Step this one was derived from.
	pub parent_id: Option<String>,
	/// Identifier, unique within the process.
	pub node_id: String,
	/// Evaluation score.
	pub score: f64,
	/// Free-form annotations; not exported.
	pub meta: Map<String, Value>,
}

impl Thought {
	/// A root thought.
	pub fn new(content: impl Into<String>) -> Self {
		Self {
			content: content.into(),
			parent_id: None,
			node_id: next_thought_id(),
			score: 0.0,
			meta: Map::new(),
		}
	}

	/// A thought derived from `parent`.
	pub fn child(parent: &Thought, content: impl Into<String>) -> Self {
		Self {
			parent_id: Some(parent.node_id.clone()),
			..Self::new(content)
		}
	}

	/// Set the score.
	pub fn with_score(mut self, score: f64) -> Self {
		self.score = score;
		self
	}
}

/// Short label for a thought: the first [`LABEL_MAX_CHARS`] characters.
pub fn label_for(content: &str) -> String {
	match content.char_indices().nth(LABEL_MAX_CHARS) {
		Some((cut, _)) => format!("{}...", &content[..cut]),
		None => content.to_owned(),
	}
}

/// Export thoughts as a graph document, one node per thought, in order.
pub fn export_thoughts(thoughts: &[Thought]) -> ThoughtGraph {
	let nodes = thoughts
		.iter()
		.map(|t| {
			let node = ThoughtNode::new(t.node_id.as_str())
				.with_label(label_for(&t.content))
				.with_score(t.score)
				.with_content(t.content.as_str());
			match &t.parent_id {
				Some(parent) => node.with_parent(parent.as_str()),
				None => node,
			}
		})
		.collect();
	ThoughtGraph::new(nodes)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_labels_are_untouched() {
		assert_eq!(label_for("plan the route"), "plan the route");
		let exact = "x".repeat(LABEL_MAX_CHARS);
		assert_eq!(label_for(&exact), exact);
	}

	#[test]
	fn long_labels_are_cut_on_characters() {
		let long = "é".repeat(LABEL_MAX_CHARS + 5);
		let label = label_for(&long);
		assert!(label.ends_with("..."));
		assert_eq!(label.chars().count(), LABEL_MAX_CHARS + 3);
	}

	#[test]
	fn ids_are_unique() {
		let a = Thought::new("a");
		let b = Thought::new("b");
		assert_ne!(a.node_id, b.node_id);
	}

	#[test]
	fn export_keeps_order_and_parents() {
		let root = Thought::new("root question").with_score(0.9);
		let child = Thought::child(&root, "first idea").with_score(0.3);
		let graph = export_thoughts(&[root.clone(), child.clone()]);
		let nodes = graph.nodes();

		assert_eq!(nodes.len(), 2);
		assert_eq!(nodes[0].id.to_string(), root.node_id);
		assert!(nodes[0].is_root());
		assert_eq!(nodes[1].parent.as_ref().map(ToString::to_string), Some(root.node_id));
		assert_eq!(nodes[1].label.as_deref(), Some("first idea"));
		assert_eq!(nodes[1].score_f64(), Some(0.3));
		assert_eq!(nodes[1].content, Some(Value::from("first idea")));
	}

	#[test]
	fn exported_graph_converts() {
		let root = Thought::new("root");
		let kids = [Thought::child(&root, "a"), Thought::child(&root, "b")];
		let mut all = vec![root];
		all.extend(kids);
		let out = crate::graph::convert(Some(&export_thoughts(&all)));
		assert_eq!(out.nodes.len(), 3);
		assert_eq!(out.links.len(), 2);
	}
}
