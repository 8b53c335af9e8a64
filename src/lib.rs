//! Human factors dashboard: Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod api;
mod components;
mod config;
mod error;
mod export;
mod pages;

pub use crate::api::AuthService;
pub use crate::config::AppConfig;

// Top-Level pages
use crate::components::nav::Nav;
use crate::pages::actions::ActionsScreen;
use crate::pages::graph::GraphScreen;
use crate::pages::not_found::NotFound;
use crate::pages::team::TeamScreen;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// The dashboard router: factor graph, actions and team screens plus a 404.
#[component]
pub fn App(config: AppConfig) -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	info!("API base URL: {}", config.api_base_url);
	provide_context(AuthService::new(config));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		<Title text="Human Factors" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Nav />
			<main>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=GraphScreen />
					<Route path=path!("/actions") view=ActionsScreen />
					<Route path=path!("/team") view=TeamScreen />
				</Routes>
			</main>
		</Router>
	}
}
