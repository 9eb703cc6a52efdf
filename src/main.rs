//! CLI entry point for starlog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "starlog")]
#[command(version)]
#[command(about = "A statically-generated blog front-end for headless CMS content", long_about = None)]
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
    /// Generate static files from the content API
    #[command(alias = "g")]
    Generate {
        /// Draft revision to generate from instead of published content
        #[arg(long)]
        preview_ref: Option<String>,
    },

    /// Serve the generated site, revalidating on the configured cadence
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Serve without periodic regeneration
        #[arg(long)]
        r#static: bool,
    },

    /// List posts known to the content API
    List {
        /// Draft revision to list instead of published content
        #[arg(long)]
        preview_ref: Option<String>,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "starlog=debug,info"
    } else {
        "starlog=info"
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
        Commands::Generate { preview_ref } => {
            let app = starlog::Starlog::new(&base_dir)?;
            tracing::info!("Generating static files...");
            app.generate(preview_ref.as_deref()).await?;
            println!("Generated successfully!");
        }

        Commands::Serve {
            port,
            ip,
            r#static,
        } => {
            let app = starlog::Starlog::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            app.generate(None).await?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            starlog::server::start(&app, &ip, port, !r#static).await?;
        }

        Commands::List { preview_ref } => {
            let app = starlog::Starlog::new(&base_dir)?;
            starlog::commands::list::run(&app, preview_ref.as_deref()).await?;
        }

        Commands::Clean => {
            let app = starlog::Starlog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("starlog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
