use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use pathway_service::PathwayService;

#[derive(Debug, Parser)]
#[command(
	version = pathway_cli::VERSION,
	rename_all = "kebab",
	styles = pathway_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Query to run. Repeat to run several against the same session memory. Reads one query per
	/// stdin line when omitted.
	#[arg(long, short = 'q', value_name = "TEXT")]
	pub query: Vec<String>,
	/// Print ranked matches with score breakdowns instead of paged results.
	#[arg(long)]
	pub explain: bool,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = pathway_config::load(&args.config)?;

	init_tracing(&config);

	tracing::info!(
		config = %args.config.display(),
		provider = %config.provider.kind,
		"Pathway search starting."
	);

	let service = PathwayService::new(config)?;

	if !args.query.is_empty() {
		for query in &args.query {
			run_query(&service, query, args.explain).await?;
		}

		return Ok(());
	}

	let mut lines = BufReader::new(tokio::io::stdin()).lines();

	while let Some(line) = lines.next_line().await? {
		let query = line.trim();

		if query.is_empty() {
			continue;
		}

		run_query(&service, query, args.explain).await?;
	}

	Ok(())
}

async fn run_query(service: &PathwayService, query: &str, explain: bool) -> color_eyre::Result<()> {
	if explain {
		let response = service.explain(query).await?;

		return print_json(&response);
	}

	let result = service.search(query).await;

	print_json(&result)
}

fn print_json<T>(value: &T) -> color_eyre::Result<()>
where
	T: Serialize,
{
	println!("{}", serde_json::to_string_pretty(value)?);

	Ok(())
}

fn init_tracing(config: &pathway_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
