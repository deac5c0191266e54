//! CLI entry point for mdblog

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mdblog")]
#[command(version)]
#[command(about = "A minimal file-based Markdown blog server", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long)]
    cwd: Option<PathBuf>,

    /// Port to listen on (overrides the PORT environment variable and blog.yml)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory containing Markdown posts (overrides blog.yml)
    #[arg(long)]
    posts_dir: Option<PathBuf>,

    /// Directory of static assets (overrides blog.yml)
    #[arg(long)]
    public_dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdblog=debug,tower_http=debug,info"
    } else {
        "mdblog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    let mut blog = mdblog::Blog::new(&base_dir)?;
    if let Some(dir) = cli.posts_dir {
        blog.posts_dir = base_dir.join(dir);
    }
    if let Some(dir) = cli.public_dir {
        blog.public_dir = base_dir.join(dir);
    }

    let port = blog.config.effective_port(cli.port);

    tracing::info!("Serving posts from {:?}", blog.posts_dir);
    mdblog::server::start(&blog, port).await?;

    Ok(())
}
