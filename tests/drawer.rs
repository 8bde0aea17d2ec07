//! Browser tests for the controlled drawer. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use react_internals_diagram::components::drawer::{Drawer, EXIT_TRANSITION};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn mount_drawer(open: bool, closes: Arc<AtomicUsize>) -> (HtmlElement, RwSignal<bool>) {
	let document = web_sys::window().unwrap().document().unwrap();
	let parent: HtmlElement = document.create_element("div").unwrap().unchecked_into();
	document.body().unwrap().append_child(&parent).unwrap();

	let open = RwSignal::new(open);
	leptos::mount::mount_to(parent.clone(), move || {
		let on_close = Callback::new(move |_: ()| {
			closes.fetch_add(1, Ordering::SeqCst);
		});
		view! {
			<Drawer open=open on_close=on_close>
				<p class="body">"Managed through hooks"</p>
			</Drawer>
		}
	})
	.forget();
	(parent, open)
}

fn find(parent: &HtmlElement, selector: &str) -> Option<Element> {
	parent.query_selector(selector).unwrap()
}

fn click(parent: &HtmlElement, selector: &str) {
	find(parent, selector)
		.unwrap()
		.dyn_into::<HtmlElement>()
		.unwrap()
		.click();
}

fn press_escape() {
	let init = KeyboardEventInit::new();
	init.set_key("Escape");
	let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
	web_sys::window().unwrap().dispatch_event(&event).unwrap();
}

fn exit_delay_ms() -> u32 {
	EXIT_TRANSITION.as_millis() as u32 + 100
}

#[wasm_bindgen_test]
fn closed_drawer_renders_nothing() {
	let (parent, _) = mount_drawer(false, Arc::default());
	assert!(find(&parent, ".drawer__panel").is_none());
	assert!(find(&parent, ".body").is_none());
}

#[wasm_bindgen_test]
fn open_drawer_shows_title_and_children() {
	let (parent, _) = mount_drawer(true, Arc::default());
	let title = find(&parent, ".drawer__title").unwrap();
	assert_eq!(title.text_content().as_deref(), Some("Details"));
	let body = find(&parent, ".body").unwrap();
	assert_eq!(body.text_content().as_deref(), Some("Managed through hooks"));
}

#[wasm_bindgen_test]
fn close_button_signals_intent_without_hiding() {
	let closes = Arc::new(AtomicUsize::new(0));
	let (parent, _) = mount_drawer(true, closes.clone());
	click(&parent, ".drawer__close");
	assert_eq!(closes.load(Ordering::SeqCst), 1);
	assert!(find(&parent, ".drawer__panel").is_some());
}

#[wasm_bindgen_test]
fn overlay_click_signals_intent() {
	let closes = Arc::new(AtomicUsize::new(0));
	let (parent, _) = mount_drawer(true, closes.clone());
	click(&parent, ".drawer__overlay");
	assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[wasm_bindgen_test]
fn escape_signals_intent_only_while_open() {
	let open_closes = Arc::new(AtomicUsize::new(0));
	let closed_closes = Arc::new(AtomicUsize::new(0));
	let (open_parent, _) = mount_drawer(true, open_closes.clone());
	mount_drawer(false, closed_closes.clone());

	press_escape();

	assert_eq!(open_closes.load(Ordering::SeqCst), 1);
	assert_eq!(closed_closes.load(Ordering::SeqCst), 0);
	assert!(find(&open_parent, ".drawer__panel").is_some());
}

#[wasm_bindgen_test]
async fn panel_leaves_the_dom_after_exit_transition() {
	let (parent, open) = mount_drawer(true, Arc::default());

	open.set(false);
	TimeoutFuture::new(20).await;
	assert!(find(&parent, ".drawer--closed .drawer__panel").is_some());

	TimeoutFuture::new(exit_delay_ms()).await;
	assert!(find(&parent, ".drawer__panel").is_none());
	assert!(find(&parent, ".body").is_none());

	open.set(true);
	TimeoutFuture::new(20).await;
	assert!(find(&parent, ".drawer--open .drawer__panel").is_some());
	assert!(find(&parent, ".body").is_some());
}

#[wasm_bindgen_test]
fn each_drawer_labels_its_own_title() {
	let (first, _) = mount_drawer(true, Arc::default());
	let (second, _) = mount_drawer(true, Arc::default());

	let title_id = |parent: &HtmlElement| find(parent, ".drawer__title").unwrap().id();
	let labelled_by = |parent: &HtmlElement| {
		find(parent, ".drawer__panel")
			.unwrap()
			.get_attribute("aria-labelledby")
			.unwrap()
	};

	assert_ne!(title_id(&first), title_id(&second));
	assert_eq!(labelled_by(&first), title_id(&first));
	assert_eq!(labelled_by(&second), title_id(&second));
}
