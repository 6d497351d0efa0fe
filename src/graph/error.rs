use thiserror::Error;

/// Errors raised when a graph document arrives as untyped JSON.
#[derive(Debug, Error)]
pub enum GraphError {
	/// The document is not an object (or `null`).
	#[error("type mismatch: expected {expected}, found {found}")]
	TypeMismatch {
		/// Shape the adapter accepts.
		expected: &'static str,
		/// Shape that was supplied.
		found: &'static str,
	},

	/// The JSON text or one of its fields has the wrong shape.
	#[error("malformed graph document: {0}")]
	Malformed(#[from] serde_json::Error),
}
