use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::{FlowConfig, FlowState};
use super::types::FlowData;

const FRAME_SECONDS: f64 = 0.016;

type SharedState = Rc<RefCell<Option<FlowState>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn measure(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn update_cursor(canvas_ref: NodeRef<leptos::html::Canvas>, state: &FlowState) {
	let Some(canvas) = canvas_ref.get() else {
		return;
	};
	let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", state.cursor());
}

/// Canvas surface drawing positioned nodes and labelled, optionally animated
/// edges, with a dot grid, wheel zoom, drag-to-pan and zoom controls.
#[component]
pub fn FlowCanvas(
	/// Nodes and edges to draw.
	#[prop(into)]
	data: Signal<FlowData>,
	/// Called with the node id when a press on a node ends without panning.
	#[prop(optional, into)]
	on_node_click: Option<Callback<String>>,
	/// Id of the node drawn with a selection outline.
	#[prop(optional, into)]
	selected: MaybeProp<String>,
	/// Zoom limits and interaction tuning.
	#[prop(optional)]
	config: FlowConfig,
	/// Fit all nodes into view once the canvas is sized.
	#[prop(default = true)]
	fit_view: bool,
	/// Fixed width in pixels; defaults to the parent's width.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed height in pixels; defaults to the parent's height.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());
	let zoom_step = config.zoom_step;

	Effect::new(move |_| {
		let data = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			warn!("no window available, flow canvas not initialised");
			return;
		};

		let (w, h) = measure(&canvas, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let mut flow = FlowState::new(&data, w, h, config.clone());
		if fit_view {
			flow.fit_view();
		}
		flow.set_selected(selected.get_untracked().as_deref());
		info!(
			"flow canvas initialised with {} nodes and {} edges",
			flow.nodes.len(),
			flow.edges.len()
		);
		*state_init.borrow_mut() = Some(flow);

		// Data changes only swap the state; the frame loop is installed once.
		if animate_init.borrow().is_some() {
			return;
		}

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("2d canvas context unavailable");
			return;
		};

		let (state_anim, animate_inner, canvas_anim) =
			(state_init.clone(), animate_init.clone(), canvas.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !canvas_anim.is_connected() {
				debug!("flow canvas detached, stopping frame loop");
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(FRAME_SECONDS);
				render::render(s, &ctx);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Owned by the component so unmounting detaches it from the window.
	let state_resize = state.clone();
	let resize_handle = window_event_listener(ev::resize, move |_| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (nw, nh) = measure(&canvas, width, height);
		canvas.set_width(nw as u32);
		canvas.set_height(nh as u32);
		if let Some(ref mut s) = *state_resize.borrow_mut() {
			s.resize(nw, nh);
		}
	});
	on_cleanup(move || resize_handle.remove());

	let state_sel = state.clone();
	Effect::new(move |_| {
		let id = selected.get();
		if let Some(ref mut s) = *state_sel.borrow_mut() {
			s.set_selected(id.as_deref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
			update_cursor(canvas_ref, s);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
			update_cursor(canvas_ref, s);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = state_mu.borrow_mut().as_mut().and_then(|s| {
			let clicked = s.pointer_up();
			update_cursor(canvas_ref, s);
			clicked
		});
		// Borrow released above; the callback may touch signals that re-enter the canvas.
		if let (Some(id), Some(cb)) = (clicked, on_node_click) {
			debug!("node `{id}` clicked");
			cb.run(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
			update_cursor(canvas_ref, s);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 1.0 / zoom_step } else { zoom_step };
			s.zoom_at(x, y, factor);
		}
	};

	let state_zi = state.clone();
	let on_zoom_in = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_zi.borrow_mut() {
			s.zoom_center(zoom_step);
		}
	};

	let state_zo = state.clone();
	let on_zoom_out = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_zo.borrow_mut() {
			s.zoom_center(1.0 / zoom_step);
		}
	};

	let state_fit = state.clone();
	let on_fit = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_fit.borrow_mut() {
			s.fit_view();
		}
	};

	view! {
		<div class="flow-canvas">
			<canvas
				node_ref=canvas_ref
				class="flow-canvas__surface"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="flow-controls">
				<button class="flow-controls__button" title="zoom in" aria-label="zoom in" on:click=on_zoom_in>
					"+"
				</button>
				<button class="flow-controls__button" title="zoom out" aria-label="zoom out" on:click=on_zoom_out>
					"−"
				</button>
				<button class="flow-controls__button" title="fit view" aria-label="fit view" on:click=on_fit>
					"⤢"
				</button>
			</div>
		</div>
	}
}
