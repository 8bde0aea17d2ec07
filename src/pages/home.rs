use leptos::prelude::*;

use crate::components::drawer::Drawer;
use crate::components::flow_canvas::FlowCanvas;
use crate::diagram::{self, Selection, StepDescription};

/// Title and bullet list for one pipeline step.
#[component]
fn StepDetails(description: &'static StepDescription) -> impl IntoView {
	view! {
		<h2 class="step-details__title">{description.title}</h2>
		<ul class="step-details__list">
			{description
				.content
				.iter()
				.map(|item| view! { <li class="step-details__item">{*item}</li> })
				.collect_view()}
		</ul>
	}
}

/// Detail panel bound to the diagram selection; closing it clears the selection.
#[component]
pub fn StepPanel(
	/// Selection shared with the canvas.
	selection: RwSignal<Selection>,
) -> impl IntoView {
	let on_close = Callback::new(move |_: ()| selection.update(Selection::clear));
	let open = Signal::derive(move || selection.with(Selection::is_open));

	view! {
		<Drawer open=open on_close=on_close>
			{move || selection.with(Selection::description).map(|description| view! { <StepDetails description=description /> })}
		</Drawer>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let selection = RwSignal::new(Selection::default());
	let graph_data = Signal::derive(diagram::flow_data);

	let on_node_click = Callback::new(move |id: String| selection.update(|s| s.select(id)));
	let selected = Signal::derive(move || selection.with(|s| s.current().map(str::to_owned)));

	view! {
		<div class="page">
			<div class="page__container">
				<header class="page__header">
					<h1 class="page__title">"React: How it works"</h1>
					<p class="page__subtitle">
						"An interactive visualization of React's internal workings, from component rendering to DOM updates."
					</p>
				</header>

				<div class="diagram-frame">
					<FlowCanvas data=graph_data on_node_click=on_node_click selected=selected />
				</div>
			</div>

			<StepPanel selection=selection />
		</div>
	}
}
