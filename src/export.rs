//! Dataset exports downloaded as browser files.

use chrono::{Local, NaiveDateTime};
use gloo_net::http::Request;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::api::{AuthService, bearer, check};
use crate::error::{ApiError, ExportError};

/// MIME type of Office Open XML spreadsheets.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
	Csv,
	Json,
	Xlsx,
}

impl ExportFormat {
	/// Query value and file extension.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Csv => "csv",
			Self::Json => "json",
			Self::Xlsx => "xlsx",
		}
	}

	/// `Accept` header sent with the export request.
	pub fn accept(self) -> &'static str {
		match self {
			Self::Csv => "text/csv",
			Self::Json => "application/json",
			Self::Xlsx => XLSX_MIME,
		}
	}

	/// MIME type of the downloaded blob.
	pub fn blob_mime(self) -> &'static str {
		match self {
			Self::Csv => "text/csv;charset=utf-8",
			Self::Json => "application/json;charset=utf-8",
			Self::Xlsx => XLSX_MIME,
		}
	}

	fn timestamp_format(self) -> &'static str {
		match self {
			Self::Xlsx => "%Y-%m-%dT%H-%M-%S",
			Self::Csv | Self::Json => "%Y-%m-%d_%H-%M-%S",
		}
	}
}

/// Server-side dataset that can be exported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportDataset {
	HumanFactors,
	Recommendations,
}

impl ExportDataset {
	fn endpoint(self) -> &'static str {
		match self {
			Self::HumanFactors => "humanfactor/export",
			Self::Recommendations => "actions/export",
		}
	}

	/// File name prefix of downloads.
	pub fn prefix(self) -> &'static str {
		match self {
			Self::HumanFactors => "human-factors",
			Self::Recommendations => "recommendations",
		}
	}

	pub fn path(self, format: ExportFormat) -> String {
		format!("{}?format={}", self.endpoint(), format.as_str())
	}
}

/// `<prefix>_<timestamp>.<ext>`, with the timestamp layout depending on the format.
pub fn export_file_name(prefix: &str, format: ExportFormat, at: NaiveDateTime) -> String {
	format!(
		"{}_{}.{}",
		prefix,
		at.format(format.timestamp_format()),
		format.as_str()
	)
}

/// Re-indent JSON bodies with two spaces; anything unparsable is kept verbatim.
pub fn pretty_json(body: &str) -> String {
	serde_json::from_str::<serde_json::Value>(body)
		.and_then(|v| serde_json::to_string_pretty(&v))
		.unwrap_or_else(|_| body.to_string())
}

/// Fetch `dataset` in `format` and hand it to the browser as a download.
pub async fn download(
	auth: &AuthService,
	dataset: ExportDataset,
	format: ExportFormat,
) -> Result<(), ExportError> {
	let path = dataset.path(format);
	let bytes = match format {
		ExportFormat::Xlsx => fetch_spreadsheet(auth, &path).await?,
		ExportFormat::Json => pretty_json(&auth.get_text(&path, format.accept()).await?).into_bytes(),
		ExportFormat::Csv => auth.get_text(&path, format.accept()).await?.into_bytes(),
	};
	let file_name = export_file_name(dataset.prefix(), format, Local::now().naive_local());
	save_file(&bytes, format.blob_mime(), &file_name)?;
	log::info!("exported {} ({} bytes)", file_name, bytes.len());
	Ok(())
}

/// Spreadsheets are binary, so they skip the text-oriented [`AuthService`]
/// wrappers and go out as a direct request with a manual bearer header.
async fn fetch_spreadsheet(auth: &AuthService, path: &str) -> Result<Vec<u8>, ApiError> {
	let mut builder = Request::get(&auth.config().url(path)).header("Accept", XLSX_MIME);
	if let Some(token) = auth.token() {
		builder = builder.header("Authorization", &bearer(&token));
	}
	let resp = check(builder.send().await?).await?;
	Ok(resp.binary().await?)
}

/// Revokes the wrapped object URL when dropped.
struct ObjectUrl(String);

impl ObjectUrl {
	fn for_blob(blob: &Blob) -> Result<Self, ExportError> {
		Ok(Self(Url::create_object_url_with_blob(blob)?))
	}
}

impl Drop for ObjectUrl {
	fn drop(&mut self) {
		let _ = Url::revoke_object_url(&self.0);
	}
}

fn save_file(bytes: &[u8], mime: &str, file_name: &str) -> Result<(), ExportError> {
	let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
	let options = BlobPropertyBag::new();
	options.set_type(mime);
	let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
	let url = ObjectUrl::for_blob(&blob)?;

	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| ExportError::Browser("no document".into()))?;
	let link: HtmlAnchorElement = document
		.create_element("a")?
		.dyn_into()
		.map_err(|_| ExportError::Browser("download anchor is not an <a>".into()))?;
	link.set_href(&url.0);
	link.set_download(file_name);
	link.click();
	Ok(())
}

/// Blocking notification for failed exports.
pub fn alert_failure(err: &ExportError) {
	log::error!("Error downloading file: {}", err);
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message("Error downloading file");
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;
	use pretty_assertions::assert_eq;

	use super::*;

	fn at() -> NaiveDateTime {
		NaiveDate::from_ymd_opt(2024, 3, 7)
			.unwrap()
			.and_hms_opt(9, 4, 5)
			.unwrap()
	}

	#[test]
	fn text_exports_use_underscore_timestamp() {
		assert_eq!(
			export_file_name("human-factors", ExportFormat::Csv, at()),
			"human-factors_2024-03-07_09-04-05.csv"
		);
		assert_eq!(
			export_file_name("recommendations", ExportFormat::Json, at()),
			"recommendations_2024-03-07_09-04-05.json"
		);
	}

	#[test]
	fn spreadsheet_exports_use_t_separator() {
		assert_eq!(
			export_file_name(ExportDataset::HumanFactors.prefix(), ExportFormat::Xlsx, at()),
			"human-factors_2024-03-07T09-04-05.xlsx"
		);
	}

	#[test]
	fn dataset_paths_carry_format_query() {
		assert_eq!(
			ExportDataset::HumanFactors.path(ExportFormat::Csv),
			"humanfactor/export?format=csv"
		);
		assert_eq!(
			ExportDataset::Recommendations.path(ExportFormat::Xlsx),
			"actions/export?format=xlsx"
		);
	}

	#[test]
	fn mime_types() {
		assert_eq!(ExportFormat::Csv.accept(), "text/csv");
		assert_eq!(ExportFormat::Json.blob_mime(), "application/json;charset=utf-8");
		assert_eq!(ExportFormat::Xlsx.accept(), ExportFormat::Xlsx.blob_mime());
	}

	#[test]
	fn json_bodies_are_reindented() {
		assert_eq!(pretty_json(r#"[{"id":1}]"#), "[\n  {\n    \"id\": 1\n  }\n]");
		assert_eq!(pretty_json("id,title"), "id,title");
	}

	#[test]
	fn json_keys_keep_server_order() {
		let pretty = pretty_json(r#"[{"title":"Trust","score":0.5,"description":"x"}]"#);
		assert_eq!(
			pretty,
			"[\n  {\n    \"title\": \"Trust\",\n    \"score\": 0.5,\n    \"description\": \"x\"\n  }\n]"
		);
	}
}
