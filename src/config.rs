//! Application configuration injected at startup.

/// Base URL used when `HUMAN_FACTORS_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/";

/// Runtime configuration shared by every screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
	/// Absolute base URL of the REST API, always ending with `/`.
	pub api_base_url: String,
}

impl AppConfig {
	/// Build a configuration for the given API base URL.
	pub fn new(api_base_url: impl Into<String>) -> Self {
		let mut api_base_url = api_base_url.into().trim().to_string();
		if !api_base_url.ends_with('/') {
			api_base_url.push('/');
		}
		Self { api_base_url }
	}

	/// Read the API base URL baked in at compile time.
	pub fn from_build_env() -> Self {
		Self::new(option_env!("HUMAN_FACTORS_API_URL").unwrap_or(DEFAULT_API_URL))
	}

	/// Resolve a relative API path against the base URL.
	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.api_base_url, path.trim_start_matches('/'))
	}
}

impl Default for AppConfig {
	fn default() -> Self {
		Self::new(DEFAULT_API_URL)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_url_gets_trailing_slash() {
		let config = AppConfig::new("https://api.example.com");
		assert_eq!(config.api_base_url, "https://api.example.com/");
	}

	#[test]
	fn url_joins_without_double_slash() {
		let config = AppConfig::new("https://api.example.com/");
		assert_eq!(
			config.url("/humanfactor/export?format=xlsx"),
			"https://api.example.com/humanfactor/export?format=xlsx"
		);
		assert_eq!(config.url("teams"), "https://api.example.com/teams");
	}
}
