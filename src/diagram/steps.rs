//! The pipeline stages and the connectors between them.

use crate::components::flow_canvas::Position;

/// Text shown in the detail panel for one pipeline stage.
#[derive(Debug, PartialEq, Eq)]
pub struct StepDescription {
	/// Panel heading.
	pub title: &'static str,
	/// Bullet points, in display order.
	pub content: &'static [&'static str],
}

/// One stage of React's rendering pipeline, drawn as a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
	/// A React component rendering elements.
	Component,
	/// Component-local state.
	State,
	/// Inputs passed down from the parent.
	Props,
	/// The in-memory element tree.
	VirtualDom,
	/// Diffing the previous and next trees.
	Reconciliation,
	/// The browser's document.
	Dom,
}

impl Step {
	/// Every step, in drawing order.
	pub const ALL: [Step; 6] = [
		Step::Component,
		Step::State,
		Step::Props,
		Step::VirtualDom,
		Step::Reconciliation,
		Step::Dom,
	];

	/// Node id used by the canvas and the description lookup.
	pub fn id(self) -> &'static str {
		match self {
			Step::Component => "component",
			Step::State => "state",
			Step::Props => "props",
			Step::VirtualDom => "vdom",
			Step::Reconciliation => "reconciliation",
			Step::Dom => "dom",
		}
	}

	/// Inverse of [`Step::id`].
	pub fn from_id(id: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|step| step.id() == id)
	}

	/// Text drawn inside the node.
	pub fn label(self) -> &'static str {
		match self {
			Step::Component => "React Component",
			Step::State => "State",
			Step::Props => "Props",
			Step::VirtualDom => "Virtual DOM",
			Step::Reconciliation => "Reconciliation",
			Step::Dom => "DOM",
		}
	}

	/// Top-left corner of the node in graph units.
	pub fn position(self) -> Position {
		match self {
			Step::Component => Position::new(250.0, 0.0),
			Step::State => Position::new(100.0, 100.0),
			Step::Props => Position::new(400.0, 100.0),
			Step::VirtualDom => Position::new(250.0, 200.0),
			Step::Reconciliation => Position::new(250.0, 300.0),
			Step::Dom => Position::new(250.0, 400.0),
		}
	}

	/// Node fill color.
	pub fn color(self) -> &'static str {
		match self {
			Step::Component => "#60a5fa",
			Step::State => "#f87171",
			Step::Props => "#4ade80",
			Step::VirtualDom => "#fbbf24",
			Step::Reconciliation => "#a78bfa",
			Step::Dom => "#ec4899",
		}
	}

	/// Panel text for this step.
	pub fn description(self) -> &'static StepDescription {
		match self {
			Step::Component => &COMPONENT,
			Step::State => &STATE,
			Step::Props => &PROPS,
			Step::VirtualDom => &VIRTUAL_DOM,
			Step::Reconciliation => &RECONCILIATION,
			Step::Dom => &DOM,
		}
	}
}

/// Looks up the panel text for a node id; unknown ids have none.
pub fn description(id: &str) -> Option<&'static StepDescription> {
	Step::from_id(id).map(Step::description)
}

static COMPONENT: StepDescription = StepDescription {
	title: "React Component",
	content: &[
		"Can receive props as input",
		"Maintains its own state",
		"Returns React elements for rendering",
		"Can be reused across different parts of the application",
	],
};

static STATE: StepDescription = StepDescription {
	title: "State Management",
	content: &[
		"Managed through hooks like useState and useReducer",
		"State changes trigger re-rendering",
		"Updates are asynchronous and can be batched for performance",
		"Persists between renders",
	],
};

static PROPS: StepDescription = StepDescription {
	title: "Props (Properties)",
	content: &[
		"Data passed from parent to child components",
		"Read-only (immutable)",
		"Can include data and callbacks",
		"Props changes trigger re-rendering",
	],
};

static VIRTUAL_DOM: StepDescription = StepDescription {
	title: "Virtual DOM",
	content: &[
		"Lightweight in-memory representation of the real DOM",
		"Enables fast comparison operations",
		"Maintains a snapshot of the desired UI",
		"Syncs with the real DOM when necessary",
	],
};

static RECONCILIATION: StepDescription = StepDescription {
	title: "Reconciliation Process",
	content: &[
		"Compares Virtual DOMs (current and previous)",
		"Identifies minimal necessary changes",
		"Uses heuristics for optimization",
		"Determines efficient DOM updates",
	],
};

static DOM: StepDescription = StepDescription {
	title: "Real DOM",
	content: &[
		"Represents the current UI in the browser",
		"Updated efficiently by React",
		"Reflects final state after reconciliation",
		"Direct manipulation is avoided by React",
	],
};

/// A directed connector between two steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
	/// Step the connector leaves.
	pub source: Step,
	/// Step the arrowhead points at.
	pub target: Step,
	/// What causes the transition.
	pub label: &'static str,
	/// Stroke color.
	pub color: &'static str,
	/// Draw as a flowing dashed line.
	pub animated: bool,
}

impl Transition {
	const fn new(source: Step, target: Step, label: &'static str, color: &'static str) -> Self {
		Self {
			source,
			target,
			label,
			color,
			animated: true,
		}
	}

	/// Edge id, `<source>-<target>`.
	pub fn id(&self) -> String {
		format!("{}-{}", self.source.id(), self.target.id())
	}
}

/// Every connector in the diagram.
pub const TRANSITIONS: [Transition; 5] = [
	Transition::new(Step::State, Step::Component, "Trigger Re-render", "#f87171"),
	Transition::new(Step::Props, Step::Component, "Parent Updates", "#4ade80"),
	Transition::new(Step::Component, Step::VirtualDom, "Render", "#60a5fa"),
	Transition::new(Step::VirtualDom, Step::Reconciliation, "Diff", "#fbbf24"),
	Transition::new(Step::Reconciliation, Step::Dom, "Update DOM", "#a78bfa"),
];
