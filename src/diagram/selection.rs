//! Detail panel selection state.

use log::debug;

use super::steps::{StepDescription, description};

/// Which node, if any, the detail panel is showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection(Option<String>);

impl Selection {
	/// Shows the panel for `id`, replacing any previous selection.
	pub fn select(&mut self, id: impl Into<String>) {
		let id = id.into();
		debug!("selected `{id}`");
		self.0 = Some(id);
	}

	/// Hides the panel.
	pub fn clear(&mut self) {
		if let Some(id) = self.0.take() {
			debug!("cleared selection `{id}`");
		}
	}

	/// Id of the selected node.
	pub fn current(&self) -> Option<&str> {
		self.0.as_deref()
	}

	/// The panel is visible whenever something is selected.
	pub fn is_open(&self) -> bool {
		self.0.is_some()
	}

	/// Panel text for the selection; `None` when nothing or an unknown id is selected.
	pub fn description(&self) -> Option<&'static StepDescription> {
		self.current().and_then(description)
	}
}
