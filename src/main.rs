//! CLI entry point for postmd-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postmd_rs::content::{ContentKind, ContentStore};
use postmd_rs::Postmd;

#[derive(Parser)]
#[command(name = "postmd-rs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serves published HTML content items as Markdown documents", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the content server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// List loaded content
    List {
        /// Type of content to list (post, page)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postmd_rs=debug,info"
    } else {
        "postmd_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Server { port, ip, open } => {
            let app = Postmd::new(&base_dir)?;
            let store = app.store()?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            postmd_rs::server::start(app.config, store, &ip, port, open).await?;
        }

        Commands::List { r#type } => {
            let app = Postmd::new(&base_dir)?;
            list_content(&app, &r#type)?;
        }

        Commands::Version => {
            println!("postmd-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// List loaded content by type
fn list_content(app: &Postmd, content_type: &str) -> Result<()> {
    let store = app.store()?;

    match content_type {
        "post" | "posts" => {
            let posts = store.all(ContentKind::Post);
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}] ({})",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug,
                    post.status
                );
            }
        }
        "page" | "pages" => {
            let pages = store.all(ContentKind::Page);
            println!("Pages ({}):", pages.len());
            for page in pages {
                println!("  {} [{}] ({})", page.title, page.slug, page.status);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, page", content_type);
        }
    }

    Ok(())
}
