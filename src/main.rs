use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use about_harvest::app::AppContext;
use about_harvest::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; a worker's stdout carries its result
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let load_context = || AppContext::new(cli.config.as_deref());

    match cli.command {
        Commands::Run {
            input,
            output,
            report,
            overrides,
        } => {
            let mut ctx = load_context()?;
            overrides.apply(&mut ctx.config.run);
            commands::run_pipeline(&ctx, &input, &output, &report).await?;
        }
        Commands::Classify { input, output } => {
            let ctx = load_context()?;
            commands::classify(&ctx, &input, output.as_deref())?;
        }
        Commands::Analyze { input, export } => {
            commands::analyze(&input, export.as_deref())?;
        }
        Commands::ScrapeUrl { url, id, overrides } => {
            let mut ctx = load_context()?;
            overrides.apply(&mut ctx.config.run);
            commands::scrape_url(&ctx, &id, &url).await?;
        }
        // Workers get their configuration with the request
        Commands::Worker => {
            commands::worker().await?;
        }
    }

    Ok(())
}
