use std::cmp::Ordering;

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{LoadStatus, Mounted};
use crate::api::{Action, AuthService};
use crate::components::export_toolbar::ExportToolbar;
use crate::components::force_graph::format_percent;
use crate::export::ExportDataset;

/// Highest score first; ties keep server order.
pub fn sort_by_priority(actions: &mut [Action]) {
	actions.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

#[component]
fn ActionItem(action: Action) -> impl IntoView {
	let aria = format!("Score {} percent", (action.score * 100.0).round() as i64);
	view! {
		<div class="Action">
			<div class="Action-header">
				<span class="Action-title">{action.title}</span>
				<span class="Action-score" aria-label=aria>
					{format_percent(action.score)}
				</span>
			</div>
			<p class="Action-description">{action.description}</p>
		</div>
	}
}

/// Recommended actions ordered by priority.
#[component]
pub fn ActionsScreen() -> impl IntoView {
	let auth = expect_context::<AuthService>();
	let mounted = Mounted::track();
	let status = RwSignal::new(LoadStatus::Loading);
	let retrieve_error = RwSignal::new(false);
	let actions = RwSignal::new(Vec::<Action>::new());

	spawn_local(async move {
		let result = auth.get::<Option<Vec<Action>>>("teams/actions").await;
		if !mounted.get() {
			return;
		}
		match result {
			Ok(list) => {
				let mut list = list.unwrap_or_default();
				sort_by_priority(&mut list);
				log::info!("loaded {} recommended actions", list.len());
				actions.set(list);
			}
			Err(err) => {
				log::error!("failed to load actions: {}", err);
				retrieve_error.set(true);
			}
		}
		status.set(LoadStatus::Loaded);
	});

	let loading = || {
		view! {
			<div class="container-full">
				<div class="loading">"Loading..."</div>
			</div>
		}
	};

	view! {
		<Show when=move || status.get() == LoadStatus::Loaded fallback=loading>
			<div class="Actions page">
				<ExportToolbar dataset=ExportDataset::Recommendations />
				<Show when=move || retrieve_error.get()>
					<div class="error">
						<h3>"Retrieve error"</h3>
					</div>
				</Show>
				<Show when=move || !retrieve_error.get() && actions.with(Vec::is_empty)>
					<div class="error">
						<h3>"Incomplete team measurement"</h3>
						<p>
							"Your team does not have enough human factor measurements to provide any action recommendations. Keep answering daily questions and recommendations will start to appear."
						</p>
					</div>
				</Show>
				<Show when=move || !retrieve_error.get() && !actions.with(Vec::is_empty)>
					<div class="no-error">
						<h3 class="Actions-title">"Actions ordered by recommendation priority"</h3>
						<div class="Actions-list">
							{move || {
								actions
									.get()
									.into_iter()
									.map(|action| view! { <ActionItem action=action /> })
									.collect_view()
							}}
						</div>
					</div>
				</Show>
			</div>
		</Show>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn action(title: &str, score: f64) -> Action {
		Action {
			title: title.into(),
			description: String::new(),
			score,
		}
	}

	#[test]
	fn highest_score_first() {
		let mut list = vec![action("a", 0.2), action("b", 0.9), action("c", 0.5)];
		sort_by_priority(&mut list);
		let titles: Vec<&str> = list.iter().map(|a| a.title.as_str()).collect();
		assert_eq!(titles, vec!["b", "c", "a"]);
	}

	#[test]
	fn ties_keep_server_order() {
		let mut list = vec![action("first", 0.5), action("second", 0.5), action("top", 0.7)];
		sort_by_priority(&mut list);
		let titles: Vec<&str> = list.iter().map(|a| a.title.as_str()).collect();
		assert_eq!(titles, vec!["top", "first", "second"]);
	}
}
