use leptos::prelude::*;

/// 404 - Not Found
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="page">
			<h1>"Page not found"</h1>
			<a href="/">"Back to the human factor graph"</a>
		</div>
	}
}
