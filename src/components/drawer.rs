//! Controlled slide-in side panel.
//!
//! The drawer never owns its visibility: the caller passes `open` and is told
//! about dismiss intents through `on_close`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use leptos::ev;
use leptos::prelude::*;

/// Length of the exit transition; the panel leaves the DOM once it ends.
pub const EXIT_TRANSITION: Duration = Duration::from_millis(300);

static NEXT_TITLE_ID: AtomicUsize = AtomicUsize::new(0);

/// Slide-in panel anchored to the right edge, above a dimming overlay.
///
/// Dismissal through the close button, an overlay click or the Escape key
/// invokes `on_close`; hiding the panel is up to the caller setting `open`
/// back to `false`.
#[component]
pub fn Drawer(
	/// Whether the panel is shown.
	#[prop(into)]
	open: Signal<bool>,
	/// Invoked on every dismiss intent.
	#[prop(into)]
	on_close: Callback<()>,
	/// Heading next to the close button.
	#[prop(into, default = "Details".to_string())]
	title: String,
	/// Panel body, rebuilt each time the panel opens.
	children: ChildrenFn,
) -> impl IntoView {
	let handle = window_event_listener(ev::keydown, move |ev| {
		if ev.key() == "Escape" && open.get_untracked() {
			on_close.run(());
		}
	});
	on_cleanup(move || handle.remove());

	// Unique per instance so several drawers can share a page.
	let title_id = format!("drawer-title-{}", NEXT_TITLE_ID.fetch_add(1, Ordering::Relaxed));
	let title = StoredValue::new(title);
	let title_id = StoredValue::new(title_id);
	let children = StoredValue::new(children);

	view! {
		<AnimatedShow
			when=open
			show_class="drawer drawer--open"
			hide_class="drawer drawer--closed"
			hide_delay=EXIT_TRANSITION
		>
			<div class="drawer__overlay" on:click=move |_| on_close.run(()) />
			<div
				class="drawer__panel"
				role="dialog"
				aria-modal="true"
				aria-labelledby=title_id.get_value()
			>
				<div class="drawer__header">
					<h2 id=title_id.get_value() class="drawer__title">
						{title.get_value()}
					</h2>
					<button class="drawer__close" aria-label="Close" on:click=move |_| on_close.run(())>
						"×"
					</button>
				</div>
				{children.with_value(|children| children())}
			</div>
		</AnimatedShow>
	}
}
