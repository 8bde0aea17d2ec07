//! React rendering pipeline content: the steps, the transitions between
//! them and the panel selection.

pub mod selection;
pub mod steps;

pub use selection::Selection;
pub use steps::{Step, StepDescription, TRANSITIONS, Transition, description};

use crate::components::flow_canvas::{FlowData, FlowEdge, FlowNode};

/// Builds the drawable graph for the pipeline.
pub fn flow_data() -> FlowData {
	let nodes = Step::ALL
		.iter()
		.map(|step| FlowNode {
			id: step.id().to_string(),
			label: step.label().to_string(),
			position: step.position(),
			color: step.color().to_string(),
		})
		.collect();

	let edges = TRANSITIONS
		.iter()
		.map(|transition| FlowEdge {
			id: transition.id(),
			source: transition.source.id().to_string(),
			target: transition.target.id().to_string(),
			label: transition.label.to_string(),
			color: transition.color.to_string(),
			animated: transition.animated,
		})
		.collect();

	FlowData { nodes, edges }
}
