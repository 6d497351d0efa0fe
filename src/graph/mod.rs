//! Thought graph documents and their conversion into force-graph input.

mod convert;
mod error;
mod export;
mod id;
mod prune;
mod types;

pub use convert::{convert, convert_str, convert_value};
pub use error::GraphError;
pub use export::{LABEL_MAX_CHARS, Thought, export_thoughts, label_for};
pub use id::NodeId;
pub use prune::{DEFAULT_MIN_SCORE, prune_low_score};
pub use types::{ForceGraphData, ForceLink, ForceNode, ThoughtGraph, ThoughtNode};
