use thiserror::Error;

/// Integrity violations in a [`FlowData`](super::FlowData) graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
	/// Two nodes share an id.
	#[error("duplicate node id `{0}`")]
	DuplicateNode(String),

	/// Two edges share an id.
	#[error("duplicate edge id `{0}`")]
	DuplicateEdge(String),

	/// An edge names a node that does not exist.
	#[error("edge `{edge}` references unknown node `{endpoint}`")]
	DanglingEdge {
		/// Id of the offending edge.
		edge: String,
		/// The missing node id.
		endpoint: String,
	},
}
