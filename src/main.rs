use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gazette::app::AppContext;
use gazette::cli::{commands, Cli, Commands};
use gazette::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(config)?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Headlines {
            category,
            country,
            page,
        } => {
            commands::headlines(&ctx, category, country, page).await?;
        }
        Commands::Search { query, page } => {
            commands::search(&ctx, &query, page).await?;
        }
        Commands::Tui => {
            gazette::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
