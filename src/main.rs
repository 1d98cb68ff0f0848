use anyhow::Result;
use clap::Parser;
use mensal::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mensal=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    cli.run().await
}
