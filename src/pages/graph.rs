use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{LoadStatus, Mounted};
use crate::api::{AuthService, FactorNode};
use crate::components::export_toolbar::ExportToolbar;
use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::export::ExportDataset;

/// Factor graph with its export toolbar.
#[component]
pub fn GraphScreen() -> impl IntoView {
	let auth = expect_context::<AuthService>();
	let mounted = Mounted::track();
	let status = RwSignal::new(LoadStatus::Loading);
	let retrieve_error = RwSignal::new(false);
	let graph = RwSignal::new(GraphData::default());

	spawn_local(async move {
		let result = auth.get::<Vec<FactorNode>>("humanfactor").await;
		if !mounted.get() {
			return;
		}
		match result {
			Ok(factors) => {
				log::info!("loaded {} human factors", factors.len());
				graph.set(GraphData::from_factors(&factors));
			}
			Err(err) => {
				log::error!("failed to load human factors: {}", err);
				retrieve_error.set(true);
			}
		}
		status.set(LoadStatus::Loaded);
	});

	let loaded = move || status.get() == LoadStatus::Loaded && !retrieve_error.get();

	view! {
		<div class="container-full" style="position: relative;">
			<Show when=move || status.get() == LoadStatus::Loading>
				<div class="loading">"Loading..."</div>
			</Show>
			<Show when=move || retrieve_error.get()>
				<div class="error">
					<h3>"Retrieve error"</h3>
				</div>
			</Show>
			<Show when=move || loaded() && !graph.with(GraphData::has_measurements)>
				<h3>"Insufficient data"</h3>
			</Show>
			<Show when=loaded>
				<div class="graph-container">
					<ForceGraphCanvas data=graph />
				</div>
			</Show>
			<ExportToolbar dataset=ExportDataset::HumanFactors />
		</div>
	}
}
