/// Spotify CLI - command-line access to the Web API
use clap::{Parser, Subcommand};
use spotify_cli::{App, CliConfig};
use spotify_core::SearchType;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spotify-cli")]
#[command(about = "Typed Spotify Web API client", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./spotify.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authorize in the browser and store the credential
    Login,
    /// Delete the stored credential
    Logout,
    /// Show whether a credential is stored and when it expires
    Status,
    /// Show the current user's profile
    Me,
    /// List followed artists
    Followed {
        /// Page size
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },
    /// Search the catalog
    Search {
        /// Search query
        query: String,
        /// Item type: album, artist, playlist, track, show, episode, audiobook
        #[arg(long = "type", default_value = "track")]
        kind: SearchType,
        /// Number of results
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "spotify_cli=info,spotify_auth=info,spotify_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;
    let app = App::new(&config)?;

    match cli.command {
        Commands::Login => app.login().await?,
        Commands::Logout => app.logout().await?,
        Commands::Status => app.status().await?,
        Commands::Me => app.me().await?,
        Commands::Followed { limit } => app.followed(limit).await?,
        Commands::Search { query, kind, limit } => app.search(&query, kind, limit).await?,
    }

    Ok(())
}
