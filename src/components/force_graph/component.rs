use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::ForceGraphState;
use super::types::GraphData;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn schedule_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
	web_sys::window()?
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.ok()
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Size the canvas to the explicit dimensions, else to its parent.
fn fit_canvas(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	let w = width.unwrap_or_else(|| parent.as_ref().map(|p| p.client_width() as f64).unwrap_or(800.0));
	let h = height.unwrap_or_else(|| parent.as_ref().map(|p| p.client_height() as f64).unwrap_or(600.0));
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	(w, h)
}

#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let running = Arc::new(AtomicBool::new(true));
	let frame_id = Arc::new(AtomicI32::new(0));

	{
		let (running, frame_id) = (running.clone(), frame_id.clone());
		on_cleanup(move || {
			running.store(false, Ordering::Relaxed);
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(frame_id.load(Ordering::Relaxed));
			}
		});
	}

	let (state_init, animate_init) = (state.clone(), animate.clone());
	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		if let Some(ref mut s) = *state_init.borrow_mut() {
			s.load(&graph);
			return;
		}

		let (w, h) = fit_canvas(&canvas, width, height);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("canvas has no 2d context");
			return;
		};
		*state_init.borrow_mut() = Some(ForceGraphState::new(&graph, w, h));

		let state_anim = state_init.clone();
		let animate_inner: Weak<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::downgrade(&animate_init);
		let (running, frame_id_anim) = (running.clone(), frame_id.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !running.load(Ordering::Relaxed) {
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick();
				render::render(s, &ctx);
			}
			if let Some(cb) = animate_inner.upgrade() {
				if let Some(ref cb) = *cb.borrow() {
					if let Some(id) = schedule_frame(cb) {
						frame_id_anim.store(id, Ordering::Relaxed);
					}
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			if let Some(id) = schedule_frame(cb) {
				frame_id.store(id, Ordering::Relaxed);
			}
		}
	});

	if width.is_none() || height.is_none() {
		let state_rs = state.clone();
		let handle = window_event_listener(leptos::ev::resize, move |_| {
			let Some(canvas) = canvas_ref.get_untracked() else {
				return;
			};
			let canvas: HtmlCanvasElement = canvas.into();
			let (w, h) = fit_canvas(&canvas, width, height);
			if let Some(ref mut s) = *state_rs.borrow_mut() {
				s.resize(w, h);
			}
		});
		on_cleanup(move || handle.remove());
	}

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.begin_drag(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.node_idx.is_some() {
				s.drag_to(x, y);
			} else {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered, x, y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.end_drag();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.end_drag();
			s.clear_hover();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: grab;"
		/>
	}
}
