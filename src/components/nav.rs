use leptos::prelude::*;
use leptos_router::components::A;

/// Links between the dashboard screens.
#[component]
pub fn Nav() -> impl IntoView {
	view! {
		<nav class="nav">
			<A href="/">"Human factors"</A>
			<A href="/actions">"Actions"</A>
			<A href="/team">"Team"</A>
		</nav>
	}
}
