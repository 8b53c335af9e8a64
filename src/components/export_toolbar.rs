use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::AuthService;
use crate::export::{self, ExportDataset, ExportFormat};

const FORMATS: [ExportFormat; 3] = [ExportFormat::Xlsx, ExportFormat::Csv, ExportFormat::Json];

/// Buttons downloading `dataset` in every supported format.
#[component]
pub fn ExportToolbar(dataset: ExportDataset) -> impl IntoView {
	let auth = expect_context::<AuthService>();

	let buttons = FORMATS
		.into_iter()
		.map(|format| {
			let auth = auth.clone();
			let on_click = move |_| {
				let auth = auth.clone();
				spawn_local(async move {
					if let Err(err) = export::download(&auth, dataset, format).await {
						export::alert_failure(&err);
					}
				});
			};
			view! {
				<button class="graph-btn" on:click=on_click>
					{format!("Export {}", format.as_str().to_uppercase())}
				</button>
			}
		})
		.collect_view();

	view! { <div class="graph-toolbar">{buttons}</div> }
}
