use leptos::prelude::*;
use log::{debug, error, info};

use crate::components::controls::Controls;
use crate::components::force_graph::ForceGraphCanvas;
use crate::demo::{SampleGraph, TICK_INTERVAL, Ticker};
use crate::display::DisplayState;
use crate::relay::GraphRelays;

/// Graph page: control panel on the side, canvas filling the rest.
#[component]
pub fn Home() -> impl IntoView {
	let display = RwSignal::new(DisplayState::default());
	let sample = RwSignal::new(SampleGraph::default());
	let relays = GraphRelays::default();

	// Owned by this page; dropping it with the page clears the interval.
	let ticker = StoredValue::new_local(Ticker::new(TICK_INTERVAL));
	let live = Memo::new(move |_| sample.with(|s| s.is_live()));
	Effect::new(move |_| {
		let live = live.get();
		ticker.update_value(|t| {
			let result = t.follow(live, move || {
				sample.update(|s| {
					if let Some(growth) = s.tick(&mut rand::thread_rng()) {
						debug!("added node {} ({})", growth.node.id, growth.node.label);
					}
				});
			});
			if let Err(err) = result {
				error!("live updates unavailable: {err}");
			}
		});
	});

	let graph_data = Signal::derive(move || sample.with(|s| s.graph().clone()));
	let options = Signal::derive(move || display.with(|d| d.graph_options()));
	let on_select = Callback::new(move |id: String| info!("Item clicked {id}"));
	let on_legend_click = Callback::new(move |label: String| info!("Legend clicked {label}"));

	view! {
		<div class="graph-page" class:light=move || display.with(|d| d.theme.name() == "light")>
			<Controls display=display sample=sample relays=relays.clone() />
			<div class="graph-container">
				<ForceGraphCanvas
					data=graph_data
					options=options
					relays=relays
					on_select=on_select
					on_legend_click=on_legend_click
				/>
			</div>
		</div>
	}
}
