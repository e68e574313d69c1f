use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
};

use pathway_config::{Columns, Provider};
use pathway_domain::Dataset;
use pathway_providers::{Error, columns};

fn write_temp_rows(payload: &str) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let path = env::temp_dir().join(format!("pathway_rows_test_{pid}_{ordinal}.json"));

	fs::write(&path, payload).expect("Failed to write test rows.");

	path
}

fn file_provider(path: PathBuf) -> Provider {
	let path = path.display().to_string();
	let raw = format!("kind = \"file\"\npath = {path:?}\ntimeout_ms = 2000\n");

	toml::from_str(&raw).expect("Failed to parse provider config.")
}

#[test]
fn values_payload_maps_to_rows() {
	let payload = serde_json::json!({
		"range": "Sheet1!A1:D4",
		"values": [
			["Category", "Grouping", "Demographic", "Description"],
			["Home & Garden", "Hardware Store", "Home Improvement", "DIY shoppers"],
			["Health & Fitness", "Gyms", "Fitness Enthusiasts"],
			["Pets"]
		]
	});
	let rows = columns::rows_from_payload(&payload, &Columns::default()).expect("parse failed");

	assert_eq!(rows.len(), 3);
	assert_eq!(rows[1].description, None);

	let dataset = Dataset::from_rows(rows);

	assert_eq!(dataset.len(), 2);
	assert_eq!(dataset.skipped(), 1);
}

#[test]
fn bare_array_payload_is_accepted() {
	let payload = serde_json::json!([
		["demographic", "grouping", "category"],
		["Acura", "In Market for Auto", "Automotive", "ignored"],
		[12, null, "Numbers"]
	]);
	let rows = columns::rows_from_payload(&payload, &Columns::default()).expect("parse failed");

	assert_eq!(rows[0].category.as_deref(), Some("Automotive"));
	assert_eq!(rows[0].description, None);
	assert_eq!(rows[1].demographic.as_deref(), Some("12"));
	assert_eq!(rows[1].grouping.as_deref(), Some(""));
}

#[test]
fn empty_payload_has_no_rows() {
	let payload = serde_json::json!({ "values": [] });
	let rows = columns::rows_from_payload(&payload, &Columns::default()).expect("parse failed");

	assert!(rows.is_empty());
}

#[test]
fn non_array_payload_is_rejected() {
	let payload = serde_json::json!({ "rows": 3 });
	let err =
		columns::rows_from_payload(&payload, &Columns::default()).expect_err("expected error");

	assert!(matches!(err, Error::InvalidResponse { .. }));
}

#[tokio::test]
async fn file_provider_reads_values_file() {
	let path = write_temp_rows(
		r#"{"values": [["Category","Grouping","Demographic"],["Travel","Frequent Flyers","Business Travelers"]]}"#,
	);
	let cfg = file_provider(path.clone());
	let result = pathway_providers::fetch_rows(&cfg).await;

	fs::remove_file(&path).expect("Failed to remove test rows.");

	let rows = result.expect("fetch failed");

	assert_eq!(rows.len(), 1);
	assert_eq!(rows[0].grouping.as_deref(), Some("Frequent Flyers"));
}

#[tokio::test]
async fn missing_file_is_a_read_error() {
	let cfg = file_provider(env::temp_dir().join("pathway_rows_missing_does_not_exist.json"));
	let err = pathway_providers::fetch_rows(&cfg).await.expect_err("expected error");

	assert!(matches!(err, Error::ReadFile { .. }));
}
