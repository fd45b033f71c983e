//! Brushwise CLI — the main entry point.
//!
//! Commands:
//! - `serve`     — Start the HTTP shim the web front end talks to
//! - `ask`       — Resolve a single question
//! - `chat`      — Interactive assistant chat
//! - `critique`  — Practice feedback for an image URL
//! - `onboard`   — Write a default config
//! - `config`    — Show, locate or validate the config
//! - `status`    — Show system status

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "brushwise",
    about = "Brushwise — keyword-driven art learning assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask the assistant a single question
    Ask {
        /// Context tag, e.g. "Practice Studio" or "digital-illustration-basics"
        #[arg(short, long)]
        context: Option<String>,

        /// Wait as long as the gateway would before answering
        #[arg(long)]
        simulate_latency: bool,

        /// The question
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Chat with the assistant interactively
    Chat {
        /// Context tag for the whole session
        #[arg(short, long)]
        context: Option<String>,
    },

    /// Get practice feedback for an image URL
    Critique {
        /// Image URL or file name
        image_url: String,
    },

    /// Initialize configuration
    Onboard,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show system status
    Status,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Validate the config and the response catalog
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Ask {
            context,
            simulate_latency,
            query,
        } => commands::ask::run(context, simulate_latency, query.join(" ")).await?,
        Commands::Chat { context } => commands::chat::run(context).await?,
        Commands::Critique { image_url } => commands::critique::run(image_url).await?,
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Validate => commands::config_cmd::validate().await?,
        },
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
