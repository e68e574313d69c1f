use std::time::Duration;

use serde_json::Value;

use crate::{Error, Result, columns};
use pathway_config::Provider;
use pathway_domain::RawRow;

pub async fn load_rows(cfg: &Provider) -> Result<Vec<RawRow>> {
	let Some(path) = cfg.path.as_ref() else {
		return Err(Error::InvalidConfig {
			message: "provider.path is required for the file provider.".to_string(),
		});
	};
	let read = tokio::fs::read_to_string(path);
	let raw = tokio::time::timeout(Duration::from_millis(cfg.timeout_ms), read)
		.await
		.map_err(|_| Error::ReadFile {
			path: path.clone(),
			source: std::io::Error::new(std::io::ErrorKind::TimedOut, "read timed out"),
		})?
		.map_err(|source| Error::ReadFile { path: path.clone(), source })?;
	let payload: Value = serde_json::from_str(&raw)?;
	let rows = columns::rows_from_payload(&payload, &cfg.columns)?;

	tracing::debug!(path = %path.display(), rows = rows.len(), "Loaded rows from file.");

	Ok(rows)
}
