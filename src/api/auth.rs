//! Authenticated access to the REST API.
//!
//! Every request is resolved against [`AppConfig::api_base_url`] and carries
//! the stored bearer token when one is available.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};

/// `localStorage` key holding the bearer token written by the login flow.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Shared HTTP client for the dashboard API, provided as Leptos context.
#[derive(Clone, Debug)]
pub struct AuthService {
	config: AppConfig,
}

impl AuthService {
	/// Client for the API at `config.api_base_url`.
	pub fn new(config: AppConfig) -> Self {
		Self { config }
	}

	/// Configuration the client was built with.
	pub fn config(&self) -> &AppConfig {
		&self.config
	}

	/// Current bearer token, if the user is logged in.
	pub fn token(&self) -> Option<String> {
		web_sys::window()?
			.local_storage()
			.ok()??
			.get_item(TOKEN_STORAGE_KEY)
			.ok()?
			.filter(|t| !t.is_empty())
	}

	fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
		match self.token() {
			Some(token) => builder.header("Authorization", &bearer(&token)),
			None => builder,
		}
	}

	/// `GET` a JSON resource.
	pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
		let resp = self
			.authorize(Request::get(&self.config.url(path)))
			.header("Accept", "application/json")
			.send()
			.await?;
		Ok(check(resp).await?.json().await?)
	}

	/// `GET` a resource as raw text with the given `Accept` type.
	pub async fn get_text(&self, path: &str, accept: &str) -> ApiResult<String> {
		let resp = self
			.authorize(Request::get(&self.config.url(path)))
			.header("Accept", accept)
			.send()
			.await?;
		Ok(check(resp).await?.text().await?)
	}

	/// `POST` a plain-text body and decode the JSON answer.
	pub async fn post_text<T: DeserializeOwned>(&self, path: &str, body: &str) -> ApiResult<T> {
		let resp = self
			.authorize(Request::post(&self.config.url(path)))
			.header("Content-Type", "text/plain")
			.body(body.to_string())?
			.send()
			.await?;
		Ok(check(resp).await?.json().await?)
	}

	/// `PUT` a JSON body and decode the JSON answer.
	pub async fn put_json<B: Serialize, T: DeserializeOwned>(
		&self,
		path: &str,
		body: &B,
	) -> ApiResult<T> {
		let resp = self
			.authorize(Request::put(&self.config.url(path)))
			.json(body)?
			.send()
			.await?;
		Ok(check(resp).await?.json().await?)
	}

	/// `DELETE` a resource, ignoring the response body.
	pub async fn delete(&self, path: &str) -> ApiResult<()> {
		let resp = self
			.authorize(Request::delete(&self.config.url(path)))
			.header("Content-Type", "text/plain")
			.send()
			.await?;
		check(resp).await?;
		Ok(())
	}
}

pub(crate) fn bearer(token: &str) -> String {
	format!("Bearer {}", token)
}

pub(crate) async fn check(resp: Response) -> ApiResult<Response> {
	if resp.ok() {
		return Ok(resp);
	}
	let err = ApiError::Status {
		status: resp.status(),
		status_text: resp.status_text(),
	};
	log::error!("API request rejected: {}", err);
	Err(err)
}
