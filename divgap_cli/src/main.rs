mod commands;
mod output;
mod prompt;

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "divgap")]
#[command(about = "Measure how share prices gap around dividend ex-dates")]
struct Cli {
    #[command(flatten)]
    analyze: commands::analyze::AnalyzeArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("divgap=info".parse()?)
                .add_directive("moex_iss_api=warn".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::analyze::run(&cli.analyze).await
}
