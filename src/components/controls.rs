//! Side panel with the display, layout and live-update controls.

use leptos::prelude::*;

use crate::components::force_graph::{CURVE_NAMES, Orientation, Theme};
use crate::demo::SampleGraph;
use crate::display::{CHART_GROUPS, COLOR_SCHEMES, ChartOption, DisplayState};
use crate::relay::GraphRelays;

/// Side panel bound to the display settings and the sample graph. The
/// buttons fire `relays`.
#[component]
pub fn Controls(
	display: RwSignal<DisplayState>,
	sample: RwSignal<SampleGraph>,
	relays: GraphRelays,
) -> impl IntoView {
	let shows = move |option: ChartOption| {
		display.with(|d| d.chart.is_some_and(|c| c.has_option(option)))
	};

	let chart_options = CHART_GROUPS
		.iter()
		.map(|group| {
			let charts = group
				.charts
				.iter()
				.map(|chart| {
					let selector = chart.selector;
					view! {
						<option
							value=selector
							selected=move || display.with(|d| d.chart_type == selector)
						>
							{chart.name}
						</option>
					}
				})
				.collect_view();
			view! { <optgroup label={group.name}>{charts}</optgroup> }
		})
		.collect_view();

	let (update, zoom_to_fit, center) = (
		relays.update.clone(),
		relays.zoom_to_fit.clone(),
		relays.center.clone(),
	);

	view! {
		<aside class="graph-controls">
			<h3>"Chart Type"</h3>
			<select on:change=move |ev| display.update(|d| d.select_chart(&event_target_value(&ev)))>
				{chart_options}
			</select>

			<h3>"Theme"</h3>
			<select on:change=move |ev| display.update(|d| d.set_theme(&event_target_value(&ev)))>
				{Theme::ALL
					.into_iter()
					.map(|theme| {
						let name = theme.name();
						view! {
							<option value=name selected=move || display.with(|d| d.theme == theme)>
								{name}
							</option>
						}
					})
					.collect_view()}
			</select>

			<Show when=move || shows(ChartOption::ColorScheme)>
				<h3>"Color Scheme"</h3>
				<select on:change=move |ev| {
					display.update(|d| d.set_color_scheme(&event_target_value(&ev)))
				}>
					{COLOR_SCHEMES
						.iter()
						.filter(|s| s.selectable)
						.map(|scheme| {
							let name = scheme.name;
							view! {
								<option
									value=name
									selected=move || display.with(|d| d.selected_color_scheme == name)
								>
									{name}
								</option>
							}
						})
						.collect_view()}
				</select>
			</Show>

			<Show when=move || shows(ChartOption::Orientation)>
				<h3>"Orientation"</h3>
				<select on:change=move |ev| {
					display.update(|d| d.set_orientation(&event_target_value(&ev)))
				}>
					{Orientation::ALL
						.into_iter()
						.map(|o| {
							view! {
								<option
									value={o.code()}
									selected=move || display.with(|d| d.orientation == o)
								>
									{o.label()}
								</option>
							}
						})
						.collect_view()}
				</select>
			</Show>

			<Show when=move || shows(ChartOption::Curve)>
				<h3>"Line Interpolation"</h3>
				<select on:change=move |ev| {
					display.update(|d| d.set_interpolation_type(&event_target_value(&ev)))
				}>
					{CURVE_NAMES
						.into_iter()
						.map(|name| {
							view! {
								<option value=name selected=move || display.with(|d| d.curve_type == name)>
									{name}
								</option>
							}
						})
						.collect_view()}
				</select>
			</Show>

			<Show when=move || shows(ChartOption::ShowLegend)>
				<label>
					<input
						type="checkbox"
						prop:checked=move || display.with(|d| d.show_legend)
						on:change=move |ev| display.update(|d| d.toggle_show_legend(event_target_checked(&ev)))
					/>
					"Show Legend"
				</label>
			</Show>

			<Show when=move || shows(ChartOption::Zoom)>
				<h3>"Zoom"</h3>
				<label>
					<input
						type="checkbox"
						prop:checked=move || display.with(|d| d.enable_zoom)
						on:change=move |ev| display.update(|d| d.toggle_enable_zoom(event_target_checked(&ev)))
					/>
					"Enable Zoom"
				</label>
				<label>
					<input
						type="checkbox"
						prop:checked=move || display.with(|d| d.pan_on_zoom)
						on:change=move |ev| display.update(|d| d.toggle_pan_on_zoom(event_target_checked(&ev)))
					/>
					"Pan on Zoom"
				</label>
			</Show>

			<h3>"Dimensions"</h3>
			<label>
				<input
					type="checkbox"
					prop:checked=move || display.with(|d| d.fit_container)
					on:change=move |ev| {
						let fit = event_target_checked(&ev);
						display.update(|d| {
							let (zoom, center) = (d.auto_zoom, d.auto_center);
							d.toggle_fit_container(fit, zoom, center)
						})
					}
				/>
				"Fit Container"
			</label>
			<label>
				<input
					type="checkbox"
					prop:checked=move || display.with(|d| d.auto_zoom)
					on:change=move |ev| {
						let zoom = event_target_checked(&ev);
						display.update(|d| {
							let (fit, center) = (d.fit_container, d.auto_center);
							d.toggle_fit_container(fit, zoom, center)
						})
					}
				/>
				"Auto Zoom"
			</label>
			<label>
				<input
					type="checkbox"
					prop:checked=move || display.with(|d| d.auto_center)
					on:change=move |ev| {
						let center = event_target_checked(&ev);
						display.update(|d| {
							let (fit, zoom) = (d.fit_container, d.auto_zoom);
							d.toggle_fit_container(fit, zoom, center)
						})
					}
				/>
				"Auto Center"
			</label>
			<Show when=move || display.with(|d| !d.fit_container)>
				<label>
					"Width "
					<input
						type="number"
						prop:value=move || display.with(|d| d.width.to_string())
						on:change=move |ev| {
							if let Ok(w) = event_target_value(&ev).parse::<f64>() {
								display.update(|d| {
									let h = d.height;
									d.set_dimensions(w, h)
								});
							}
						}
					/>
				</label>
				<label>
					"Height "
					<input
						type="number"
						prop:value=move || display.with(|d| d.height.to_string())
						on:change=move |ev| {
							if let Ok(h) = event_target_value(&ev).parse::<f64>() {
								display.update(|d| {
									let w = d.width;
									d.set_dimensions(w, h)
								});
							}
						}
					/>
				</label>
			</Show>

			<Show when=move || shows(ChartOption::LiveUpdates)>
				<label>
					<input
						type="checkbox"
						prop:checked=move || sample.with(|s| s.is_live())
						on:change=move |ev| sample.update(|s| s.set_live(event_target_checked(&ev)))
					/>
					"Real-time Data"
				</label>
			</Show>

			<div class="graph-actions">
				<button on:click=move |_| update.notify()>"Update"</button>
				<button on:click=move |_| zoom_to_fit.notify()>"Zoom to Fit"</button>
				<button on:click=move |_| center.notify()>"Center"</button>
			</div>
		</aside>
	}
}
