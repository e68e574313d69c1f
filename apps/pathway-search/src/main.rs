use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = pathway_search::Args::parse();

	pathway_search::run(args).await
}
