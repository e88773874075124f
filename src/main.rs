use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use srr::app::AppContext;
use srr::cli::{commands, Cli, Commands};
use srr::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(config, cli.data_dir)?;

    match cli.command {
        Commands::Add { topic } => {
            commands::add_topic(&ctx, &topic)?;
        }
        Commands::Remove { topic } => {
            commands::remove_topic(&ctx, &topic)?;
        }
        Commands::List => {
            commands::list_topics(&ctx)?;
        }
        Commands::Search { query, cursor } => {
            commands::search_subreddits(&ctx, &query, &cursor.into_options()).await?;
        }
        Commands::Posts { subreddit, cursor } => {
            commands::list_posts(&ctx, &subreddit, &cursor.into_options()).await?;
        }
        Commands::Feed => {
            commands::show_feed(&ctx).await?;
        }
        Commands::Tui => {
            srr::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
