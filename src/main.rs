//! CLI entry point for vitalstrike-site

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitalstrike_site::changelog::PostStore;
use vitalstrike_site::pages::SitePages;
use vitalstrike_site::server::AppState;
use vitalstrike_site::{ChangelogSource, Site};

#[derive(Parser)]
#[command(name = "vitalstrike-site")]
#[command(author = "Stawa")]
#[command(version)]
#[command(about = "Documentation site and changelog blog for the VitalStrike plugin", long_about = None)]
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

/// Options selecting where changelog posts come from
#[derive(Args)]
struct SourceArgs {
    /// Read the changelog from a local file instead of fetching it
    #[arg(long, value_name = "FILE", conflicts_with = "offline")]
    changelog: Option<PathBuf>,

    /// Skip all network access (empty changelog, fallback version)
    #[arg(long)]
    offline: bool,
}

impl SourceArgs {
    fn source(&self) -> ChangelogSource {
        match (&self.changelog, self.offline) {
            (Some(path), _) => ChangelogSource::File(path.clone()),
            (None, true) => ChangelogSource::Offline,
            (None, false) => ChangelogSource::Remote,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate static files
    #[command(alias = "g")]
    Generate {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// List changelog entries
    List {
        /// Print posts as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Parse a local changelog file and print its entries
    Parse {
        /// Markdown file to parse
        file: PathBuf,

        /// Print posts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove the generated site
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "vitalstrike_site=debug,info"
    } else {
        "vitalstrike_site=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Generate { source } => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.generate(&source.source()).await?;
            println!("Generated successfully into {:?}", site.public_dir);
        }

        Commands::Server { port, ip, source } => {
            let site = Site::new(&base_dir)?;
            let source = source.source();

            // The store is populated exactly once, before serving
            let store = site.load_store(&source).await?;
            let latest_version = site.latest_version(&source).await?;
            let pages = SitePages::new(&site.config, &latest_version)?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            vitalstrike_site::server::start(AppState { store, pages }, &ip, port).await?;
        }

        Commands::List { json, source } => {
            let site = Site::new(&base_dir)?;
            let store = site.load_store(&source.source()).await?;
            vitalstrike_site::commands::list::run(&store, json)?;
        }

        Commands::Parse { file, json } => {
            let site = Site::new(&base_dir)?;
            let file = if file.is_absolute() {
                file
            } else {
                base_dir.join(file)
            };
            let store = PostStore::from_file(&file, &site.config.author)?;
            vitalstrike_site::commands::list::run(&store, json)?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("vitalstrike-site version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
