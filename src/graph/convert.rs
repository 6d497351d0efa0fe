use log::debug;
use serde::Deserialize;
use serde_json::Value;

use super::error::GraphError;
use super::types::{ForceGraphData, ForceLink, ForceNode, ThoughtGraph};

/// Convert a thought graph into the `{nodes, links}` shape.
///
/// A missing graph, or one without `nodes`, yields an empty result. Every
/// input node becomes one output node in the same order, and every node
/// with a truthy `parent` yields one `parent → id` link. Link endpoints are
/// not checked against the node list.
pub fn convert(input: Option<&ThoughtGraph>) -> ForceGraphData {
	let nodes_in = input.map(ThoughtGraph::nodes).unwrap_or_default();

	let nodes: Vec<ForceNode> = nodes_in.iter().map(ForceNode::from).collect();

	// A parent of `0` or `""` is falsy and produces no link, even when
	// another node really uses that id.
	let links: Vec<ForceLink> = nodes_in
		.iter()
		.filter_map(|node| {
			let parent = node.parent.as_ref().filter(|p| p.is_truthy())?;
			Some(ForceLink {
				source: parent.clone(),
				target: node.id.clone(),
			})
		})
		.collect();

	debug!("converted graph: {} nodes, {} links", nodes.len(), links.len());
	ForceGraphData { nodes, links }
}

/// Convert an untyped JSON document.
///
/// `null` is an empty graph and objects are read as a [`ThoughtGraph`].
/// Anything else is rejected with [`GraphError::TypeMismatch`].
pub fn convert_value(input: &Value) -> Result<ForceGraphData, GraphError> {
	match input {
		Value::Null => Ok(convert(None)),
		Value::Object(_) => {
			let graph = ThoughtGraph::deserialize(input)?;
			Ok(convert(Some(&graph)))
		}
		other => Err(GraphError::TypeMismatch {
			expected: "object or null",
			found: kind_of(other),
		}),
	}
}

/// Parse JSON text and convert it, see [`convert_value`].
pub fn convert_str(json: &str) -> Result<ForceGraphData, GraphError> {
	let value: Value = serde_json::from_str(json)?;
	convert_value(&value)
}

fn kind_of(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
