use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::legend_entries;
use super::state::ForceGraphState;
use super::types::{GraphData, GraphOptions};
use crate::error::{Error, Result};
use crate::relay::{GraphRelays, Subscription};

type SharedState = Rc<RefCell<Option<ForceGraphState>>>;

fn window() -> Result<Window> {
	web_sys::window().ok_or_else(|| Error::Canvas("no window".into()))
}

/// Canvas size for `view`, or the parent element's size when fitting.
fn measure(canvas: &HtmlCanvasElement, view: Option<(f64, f64)>) -> (f64, f64) {
	view.unwrap_or_else(|| {
		canvas
			.parent_element()
			.map(|p| (p.client_width() as f64, p.client_height() as f64))
			.filter(|&(w, h)| w > 0.0 && h > 0.0)
			.unwrap_or((800.0, 600.0))
	})
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.map_err(|e| Error::Canvas(format!("{e:?}")))?
		.ok_or_else(|| Error::Canvas("2d context unsupported".into()))?
		.dyn_into()
		.map_err(|_| Error::Canvas("unexpected context type".into()))
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Applies auto-zoom/auto-center after the graph changed.
fn auto_fit(s: &mut ForceGraphState) {
	if s.options.auto_zoom {
		s.zoom_to_fit();
	} else if s.options.auto_center {
		s.center();
	}
}

/// Browser callbacks owned by one canvas: the animation-frame loop and the
/// window resize listener.
#[derive(Clone, Default)]
struct Handles {
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	frame: Rc<Cell<Option<i32>>>,
	resize: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl Handles {
	/// Runs `on_frame` once per animation frame until [`Handles::teardown`].
	fn run_frames(&self, window: &Window, mut on_frame: impl FnMut() + 'static) -> Result<()> {
		let (animate, frame) = (self.animate.clone(), self.frame.clone());
		*self.animate.borrow_mut() = Some(Closure::new(move || {
			on_frame();
			let next = match (&*animate.borrow(), web_sys::window()) {
				(Some(cb), Some(win)) => win.request_animation_frame(cb.as_ref().unchecked_ref()).ok(),
				_ => None,
			};
			frame.set(next);
		}));
		if let Some(ref cb) = *self.animate.borrow() {
			let id = window
				.request_animation_frame(cb.as_ref().unchecked_ref())
				.map_err(|e| Error::Canvas(format!("{e:?}")))?;
			self.frame.set(Some(id));
		}
		Ok(())
	}

	fn listen_resize(&self, window: &Window, on_resize: impl FnMut() + 'static) -> Result<()> {
		*self.resize.borrow_mut() = Some(Closure::new(on_resize));
		if let Some(ref cb) = *self.resize.borrow() {
			window
				.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
				.map_err(|e| Error::Canvas(format!("{e:?}")))?;
		}
		Ok(())
	}

	/// Cancels the pending frame and removes the resize listener. Dropping
	/// the frame closure also releases the handle it holds on itself.
	fn teardown(&self) {
		let window = web_sys::window();
		if let (Some(id), Some(win)) = (self.frame.take(), &window) {
			let _ = win.cancel_animation_frame(id);
		}
		let resize = self.resize.borrow_mut().take();
		if let (Some(cb), Some(win)) = (&resize, &window) {
			let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		drop(resize);
		let animate = self.animate.borrow_mut().take();
		drop(animate);
		debug!("graph canvas torn down");
	}
}

fn setup(
	canvas: HtmlCanvasElement,
	data: &GraphData,
	options: GraphOptions,
	state: SharedState,
	handles: &Handles,
	current_options: Signal<GraphOptions>,
) -> Result<()> {
	let window = window()?;
	let (w, h) = measure(&canvas, options.view);
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let ctx = context_2d(&canvas)?;
	let mut initial = ForceGraphState::new(data, options, w, h);
	auto_fit(&mut initial);
	*state.borrow_mut() = Some(initial);

	let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
	handles.listen_resize(&window, move || {
		let view = current_options.with_untracked(|o| o.view);
		if view.is_some() {
			return;
		}
		let (nw, nh) = measure(&canvas_resize, None);
		canvas_resize.set_width(nw as u32);
		canvas_resize.set_height(nh as u32);
		if let Some(ref mut s) = *state_resize.borrow_mut() {
			s.resize(nw, nh);
		}
	})?;

	handles.run_frames(&window, move || {
		if let Some(ref mut s) = *state.borrow_mut() {
			if s.animation_running {
				s.tick(0.016);
			}
			render::render(s, &ctx);
		}
	})
}

/// Canvas graph widget.
///
/// Renders `data` with the layout, curve, palette and theme in `options`,
/// and reacts to the `update`, `zoom_to_fit` and `center` relays. Clicking a
/// node reports its id through `on_select`; clicking a legend entry reports
/// its label through `on_legend_click`.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] options: Signal<GraphOptions>,
	#[prop(optional)] relays: Option<GraphRelays>,
	#[prop(optional)] on_select: Option<Callback<String>>,
	#[prop(optional)] on_legend_click: Option<Callback<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let handles = Handles::default();
	let (state_init, handles_init) = (state.clone(), handles.clone());

	let stored_handles = StoredValue::new_local(handles);
	on_cleanup(move || {
		stored_handles.try_with_value(Handles::teardown);
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let result = setup(
			canvas.into(),
			&data.get_untracked(),
			options.get_untracked(),
			state_init.clone(),
			&handles_init,
			options,
		);
		if let Err(err) = result {
			error!("graph canvas setup failed: {err}");
		}
	});

	let state_data = state.clone();
	Effect::new(move |_| {
		let changed = data.with(|d| match *state_data.borrow_mut() {
			Some(ref mut s) => s.sync(d),
			None => false,
		});
		if changed {
			if let Some(ref mut s) = *state_data.borrow_mut() {
				debug!("graph synced: {} nodes", s.node_count());
				auto_fit(s);
			}
		}
	});

	let state_opts = state.clone();
	Effect::new(move |_| {
		let opts = options.get();
		let view = opts.view;
		if let Some(ref mut s) = *state_opts.borrow_mut() {
			s.apply_options(opts);
			if let Some(canvas) = canvas_ref.get_untracked() {
				let canvas: HtmlCanvasElement = canvas.into();
				let (w, h) = measure(&canvas, view);
				canvas.set_width(w as u32);
				canvas.set_height(h as u32);
				s.resize(w, h);
			}
		}
	});

	if let Some(relays) = relays {
		let (s_update, s_fit, s_center) = (state.clone(), state.clone(), state.clone());
		let subscriptions: Vec<Subscription> = vec![
			relays.update.subscribe(move || {
				if let Some(ref mut s) = *s_update.borrow_mut() {
					data.with_untracked(|d| s.sync(d));
					s.relayout();
					auto_fit(s);
				}
			}),
			relays.zoom_to_fit.subscribe(move || {
				if let Some(ref mut s) = *s_fit.borrow_mut() {
					s.zoom_to_fit();
				}
			}),
			relays.center.subscribe(move || {
				if let Some(ref mut s) = *s_center.borrow_mut() {
					s.center();
				}
			}),
		];
		// Dropped with this component's owner, which unsubscribes.
		let _ = StoredValue::new_local(subscriptions);
	}

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = match *state_mu.borrow_mut() {
			Some(ref mut s) => s.release(),
			None => None,
		};
		if let (Some(id), Some(cb)) = (clicked, on_select) {
			cb.run(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom(x, y, ev.delta_y());
		}
	};

	let legend = Memo::new(move |_| {
		let palette = options.with(|o| o.palette);
		data.with(|d| legend_entries(d, palette))
	});

	view! {
		<div class="force-graph">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<Show when=move || options.with(|o| o.show_legend)>
				<ul class="force-graph-legend">
					{move || {
						legend
							.get()
							.into_iter()
							.map(|(label, color)| {
								let clicked = label.clone();
								view! {
									<li on:click=move |_| {
										if let Some(cb) = on_legend_click {
											cb.run(clicked.clone());
										}
									}>
										<span class="swatch" style=format!("background: {color}")></span>
										{label}
									</li>
								}
							})
							.collect_view()
					}}
				</ul>
			</Show>
		</div>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
	use wasm_bindgen_test::*;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	#[wasm_bindgen_test]
	fn teardown_stops_the_frame_loop() {
		let win = window().unwrap();
		let handles = Handles::default();
		handles.run_frames(&win, || {}).unwrap();
		assert!(handles.animate.borrow().is_some());
		assert!(handles.frame.get().is_some());

		handles.teardown();
		assert!(handles.animate.borrow().is_none());
		assert!(handles.frame.get().is_none());
		assert_eq!(Rc::strong_count(&handles.animate), 1);
	}

	#[wasm_bindgen_test]
	fn teardown_removes_the_resize_listener() {
		let win = window().unwrap();
		let handles = Handles::default();
		let hits = Rc::new(Cell::new(0));
		let counted = hits.clone();
		handles
			.listen_resize(&win, move || counted.set(counted.get() + 1))
			.unwrap();
		handles.teardown();
		assert!(handles.resize.borrow().is_none());

		let event = web_sys::Event::new("resize").unwrap();
		win.dispatch_event(&event).unwrap();
		assert_eq!(hits.get(), 0);
	}
}
