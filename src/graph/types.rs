use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::id::NodeId;

/// A graph of thoughts as exported by the reasoning side.
///
/// Every field is optional on the wire; a missing or `null` `nodes` is read
/// as an empty graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ThoughtGraph {
	/// Nodes in export order.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub nodes: Option<Vec<ThoughtNode>>,
}

impl ThoughtGraph {
	/// Build a graph from a list of nodes.
	pub fn new(nodes: Vec<ThoughtNode>) -> Self {
		Self { nodes: Some(nodes) }
	}

	/// Nodes, or an empty slice when the document carries none.
	pub fn nodes(&self) -> &[ThoughtNode] {
		self.nodes.as_deref().unwrap_or_default()
	}
}

/// A single node of a [`ThoughtGraph`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ThoughtNode {
	/// Node identifier. A missing id is held as `null` and not written back.
	#[serde(default, skip_serializing_if = "NodeId::is_null")]
	pub id: NodeId,
	/// Parent identifier; absent for roots.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent: Option<NodeId>,
	/// Short display text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Score as written by the producer, integer or float.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub score: Option<Number>,
	/// Arbitrary payload.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub content: Option<Value>,
}

impl ThoughtNode {
	/// A bare node with only an identifier.
	pub fn new(id: impl Into<NodeId>) -> Self {
		Self {
			id: id.into(),
			..Self::default()
		}
	}

	/// Set the parent identifier.
	pub fn with_parent(mut self, parent: impl Into<NodeId>) -> Self {
		self.parent = Some(parent.into());
		self
	}

	/// Set the display label.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Set the score. Non-finite scores are dropped.
	pub fn with_score(mut self, score: f64) -> Self {
		self.score = Number::from_f64(score);
		self
	}

	/// Set the payload.
	pub fn with_content(mut self, content: impl Into<Value>) -> Self {
		self.content = Some(content.into());
		self
	}

	/// Score as a float, if present.
	pub fn score_f64(&self) -> Option<f64> {
		self.score.as_ref().and_then(Number::as_f64)
	}

	/// True when the node has no parent reference at all.
	pub fn is_root(&self) -> bool {
		self.parent.as_ref().is_none_or(|p| p.as_value().is_null())
	}
}

/// The `{nodes, links}` document a force-directed renderer consumes.
///
/// Field names on the wire are fixed: renderers look for exactly `nodes`,
/// `links`, `id`, `name`, `score`, `content`, `source` and `target`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceGraphData {
	/// One entry per input node, same order.
	pub nodes: Vec<ForceNode>,
	/// One parent→child edge per node with a truthy parent, same order.
	pub links: Vec<ForceLink>,
}

/// Renderer-facing node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceNode {
	/// Copied from the input `id`; absent when the input had none.
	#[serde(default, skip_serializing_if = "NodeId::is_null")]
	pub id: NodeId,
	/// Copied from the input `label`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Copied from the input `score`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub score: Option<Number>,
	/// Copied from the input `content`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub content: Option<Value>,
}

impl ForceNode {
	/// Score as a float, if present.
	pub fn score_f64(&self) -> Option<f64> {
		self.score.as_ref().and_then(Number::as_f64)
	}
}

impl From<&ThoughtNode> for ForceNode {
	fn from(node: &ThoughtNode) -> Self {
		Self {
			id: node.id.clone(),
			name: node.label.clone(),
			score: node.score.clone(),
			content: node.content.clone(),
		}
	}
}

/// Directed edge from a parent to its child.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForceLink {
	/// Parent identifier.
	#[serde(default, skip_serializing_if = "NodeId::is_null")]
	pub source: NodeId,
	/// Child identifier; absent when the child had no id.
	#[serde(default, skip_serializing_if = "NodeId::is_null")]
	pub target: NodeId,
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn null_fields_read_as_absent() {
		let node: ThoughtNode =
			serde_json::from_value(json!({"id": "a", "parent": null, "label": null, "content": null}))
				.unwrap();
		assert_eq!(node.parent, None);
		assert_eq!(node.label, None);
		assert_eq!(node.content, None);
		assert!(node.is_root());
	}

	#[test]
	fn missing_id_stays_missing() {
		let node: ThoughtNode = serde_json::from_value(json!({"label": "orphan"})).unwrap();
		assert!(node.id.is_null());
		assert_eq!(serde_json::to_value(&node).unwrap(), json!({"label": "orphan"}));
	}

	#[test]
	fn absent_fields_are_not_serialized() {
		let node = ForceNode {
			id: "a".into(),
			..ForceNode::default()
		};
		assert_eq!(serde_json::to_value(&node).unwrap(), json!({"id": "a"}));
	}

	#[test]
	fn integer_scores_stay_integers() {
		let node: ThoughtNode = serde_json::from_value(json!({"id": "a", "score": 1})).unwrap();
		assert_eq!(serde_json::to_value(ForceNode::from(&node)).unwrap()["score"], json!(1));
		assert_eq!(node.score_f64(), Some(1.0));
	}

	#[test]
	fn null_nodes_is_an_empty_graph() {
		let graph: ThoughtGraph = serde_json::from_value(json!({"nodes": null})).unwrap();
		assert!(graph.nodes().is_empty());
	}
}
