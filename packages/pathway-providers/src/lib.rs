pub mod columns;
pub mod file;
pub mod http;

mod error;

pub use error::{Error, Result};

use reqwest::header::{HeaderMap, HeaderName};
use serde_json::{Map, Value};

use pathway_config::Provider;
use pathway_domain::RawRow;

/// Fetches rows from whichever source `cfg.kind` names.
pub async fn fetch_rows(cfg: &Provider) -> Result<Vec<RawRow>> {
	match cfg.kind.as_str() {
		"file" => file::load_rows(cfg).await,
		"http" => http::fetch_rows(cfg).await,
		other => Err(Error::InvalidConfig { message: format!("Unknown provider kind {other:?}.") }),
	}
}

pub fn default_headers(default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}
