use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{FlowState, NODE_HEIGHT, NODE_WIDTH};

const EDGE_WIDTH: f64 = 1.5;
const ARROW_SIZE: f64 = 10.0;
const DASH: f64 = 5.0;
const NODE_RADIUS: f64 = 3.0;
const BORDER_COLOR: &str = "#1a192b";
const GRID_COLOR: &str = "#91919a";

pub fn render(state: &FlowState, ctx: &CanvasRenderingContext2d) {
	draw_background(state, ctx);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_background(state: &FlowState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, state.height);
	let _ = gradient.add_color_stop(0.0, "rgba(239, 246, 255, 0.5)");
	let _ = gradient.add_color_stop(1.0, "rgba(239, 246, 255, 0)");
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let k = state.transform.k;
	let gap = state.config.grid_gap * k;
	if gap < 2.0 {
		return;
	}
	let radius = (0.5 * k).max(0.5);
	ctx.set_fill_style_str(GRID_COLOR);
	let mut x = state.transform.x.rem_euclid(gap);
	while x < state.width {
		let mut y = state.transform.y.rem_euclid(gap);
		while y < state.height {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.fill();
			y += gap;
		}
		x += gap;
	}
}

fn draw_edges(state: &FlowState, ctx: &CanvasRenderingContext2d) {
	let dash_offset = -(state.flow_time * 20.0) % (2.0 * DASH);

	for edge in &state.edges {
		let curve = state.edge_curve(edge);
		let (ux, uy) = curve.end_direction();
		let (tip_x, tip_y) = curve.end;
		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);

		ctx.set_stroke_style_str(&edge.color);
		ctx.set_line_width(EDGE_WIDTH);
		if edge.animated {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(DASH),
				&JsValue::from_f64(DASH),
			));
			ctx.set_line_dash_offset(dash_offset);
		}
		ctx.begin_path();
		ctx.move_to(curve.start.0, curve.start.1);
		ctx.bezier_curve_to(curve.c1.0, curve.c1.1, curve.c2.0, curve.c2.1, back_x, back_y);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.set_fill_style_str(&edge.color);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if !edge.label.is_empty() {
			let (lx, ly) = curve.point_at(0.5);
			draw_edge_label(ctx, &edge.label, lx, ly);
		}
	}
}

fn draw_edge_label(ctx: &CanvasRenderingContext2d, label: &str, x: f64, y: f64) {
	ctx.set_font("10px sans-serif");
	let width = ctx
		.measure_text(label)
		.map(|m| m.width())
		.unwrap_or(label.len() as f64 * 5.5);
	let (pad_x, height) = (4.0, 16.0);

	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(x - width / 2.0 - pad_x, y - height / 2.0, width + 2.0 * pad_x, height);
	ctx.set_fill_style_str("#222222");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(label, x, y);
}

fn draw_nodes(state: &FlowState, ctx: &CanvasRenderingContext2d) {
	for (idx, node) in state.nodes.iter().enumerate() {
		let (x, y) = (node.x, node.y);

		if state.hover == Some(idx) {
			ctx.set_shadow_color("rgba(0, 0, 0, 0.25)");
			ctx.set_shadow_blur(8.0);
			ctx.set_shadow_offset_y(2.0);
		}
		rounded_rect(ctx, x, y, NODE_WIDTH, NODE_HEIGHT, NODE_RADIUS);
		ctx.set_fill_style_str(&node.color);
		ctx.fill();
		ctx.set_shadow_color("transparent");
		ctx.set_shadow_blur(0.0);
		ctx.set_shadow_offset_y(0.0);

		ctx.set_stroke_style_str(BORDER_COLOR);
		ctx.set_line_width(1.0);
		ctx.stroke();

		if state.selected == Some(idx) {
			rounded_rect(ctx, x - 3.0, y - 3.0, NODE_WIDTH + 6.0, NODE_HEIGHT + 6.0, NODE_RADIUS + 2.0);
			ctx.set_stroke_style_str("rgba(26, 25, 43, 0.6)");
			ctx.set_line_width(2.0);
			ctx.stroke();
		}

		ctx.set_fill_style_str("white");
		ctx.set_font("12px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&node.label, x + NODE_WIDTH / 2.0, y + NODE_HEIGHT / 2.0);
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	ctx.line_to(x + w - r, y);
	ctx.quadratic_curve_to(x + w, y, x + w, y + r);
	ctx.line_to(x + w, y + h - r);
	ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
	ctx.line_to(x + r, y + h);
	ctx.quadratic_curve_to(x, y + h, x, y + h - r);
	ctx.line_to(x, y + r);
	ctx.quadratic_curve_to(x, y, x + r, y);
	ctx.close_path();
}
