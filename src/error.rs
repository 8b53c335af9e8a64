//! Error types shared across the dashboard.

use thiserror::Error;

/// Failure talking to the REST API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
	/// The request never produced a response.
	#[error("request failed: {0}")]
	Transport(String),

	/// The server answered with a non-success status.
	#[error("HTTP {status}: {status_text}")]
	Status {
		/// Numeric HTTP status.
		status: u16,
		/// Reason phrase reported by the browser.
		status_text: String,
	},

	/// The response body did not match the expected shape.
	#[error("unexpected response body: {0}")]
	Decode(String),
}

impl From<gloo_net::Error> for ApiError {
	fn from(err: gloo_net::Error) -> Self {
		match err {
			gloo_net::Error::SerdeError(e) => Self::Decode(e.to_string()),
			other => Self::Transport(other.to_string()),
		}
	}
}

/// Failure while producing a file download.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
	/// Fetching the export body failed.
	#[error(transparent)]
	Api(#[from] ApiError),

	/// A browser API call (blob, object URL, anchor) failed.
	#[error("browser error: {0}")]
	Browser(String),
}

impl From<wasm_bindgen::JsValue> for ExportError {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		Self::Browser(format!("{:?}", value))
	}
}

/// Type alias for results of API calls.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
