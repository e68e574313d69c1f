use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result, columns};
use pathway_config::Provider;
use pathway_domain::RawRow;

pub async fn fetch_rows(cfg: &Provider) -> Result<Vec<RawRow>> {
	let Some(url) = cfg.url.as_deref() else {
		return Err(Error::InvalidConfig {
			message: "provider.url is required for the http provider.".to_string(),
		});
	};
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let res = client.get(url).headers(crate::default_headers(&cfg.default_headers)?).send().await?;
	let payload: Value = res.error_for_status()?.json().await?;
	let rows = columns::rows_from_payload(&payload, &cfg.columns)?;

	tracing::debug!(%url, rows = rows.len(), "Fetched rows over HTTP.");

	Ok(rows)
}
