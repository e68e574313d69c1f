use std::fs;

use pathway_search::Args;

#[tokio::test]
async fn run_answers_queries_from_a_config_file() {
	let dir = std::env::temp_dir().join(format!("pathway-search-run-{}", std::process::id()));

	fs::create_dir_all(&dir).expect("Failed to create temp dir.");

	let data = dir.join("targeting.json");
	let config = dir.join("pathway.toml");

	fs::write(
		&data,
		r#"{"values": [["Category", "Grouping", "Demographic"], ["Interests", "Health & Fitness", "Runners"]]}"#,
	)
	.expect("Failed to write data file.");
	fs::write(
		&config,
		format!(
			"[service]\nlog_level = \"warn\"\n\n[provider]\nkind = \"file\"\npath = {:?}\n",
			data.display().to_string()
		),
	)
	.expect("Failed to write config file.");

	let args = Args { config, query: vec!["fitness".to_string()], explain: false };
	let result = pathway_search::run(args).await;

	fs::remove_dir_all(&dir).ok();

	result.expect("run failed");
}
