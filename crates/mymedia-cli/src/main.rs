use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "mymedia")]
#[command(about = "MyMultimedia console - session management", long_about = None)]
struct Cli {
    /// Directory holding config.toml and token.toml (defaults to ~/.config/mymedia)
    #[arg(long, global = true, env = "MYMEDIA_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the session restored from the token store
    Status,
    /// Log in and persist the issued token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "MYMEDIA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored token
    Logout,
    /// Use an existing bearer token
    InstallToken { token: String },
    /// Check whether a console path would render or redirect
    Route { path: String },
    /// GET an API path (e.g. /categories) with the session's credentials
    Get { path: String },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,mymedia_application=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let app = commands::AppContext::bootstrap(cli.config_dir.as_deref()).await?;
    let output = commands::Output { json: cli.json };

    match cli.command {
        Commands::Status => commands::session::status(&app, output),
        Commands::Login { email, password } => {
            commands::session::login(&app, output, &email, &password).await
        }
        Commands::Logout => commands::session::logout(&app, output).await,
        Commands::InstallToken { token } => {
            commands::session::install_token(&app, output, &token).await
        }
        Commands::Route { path } => commands::route::check(&app, output, &path),
        Commands::Get { path } => commands::fetch::get(&app, output, &path).await,
    }
}
