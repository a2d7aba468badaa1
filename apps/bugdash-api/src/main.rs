use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = bugdash_api::Args::parse();
	bugdash_api::run(args).await
}
