mod ask_cmd;
mod catalog_cmd;
mod check_cmd;
mod terminal_output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

#[derive(Parser)]
#[command(name = "kupo")]
#[command(about = "Kupo: character and market lookups captured as images")]
#[command(version)]
struct Cli {
    /// Config file (default: $KUPO_CONFIG_DIR/config.yaml or ~/.kupo/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one chat message (e.g. `!charac Gaia Alice Smith`) and print the reply
    Ask {
        /// Chat user id the message comes from
        #[arg(short, long, default_value = "cli")]
        user: String,
        /// Message text; joined with spaces
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },
    /// Item catalog maintenance
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Load the config and print the validation report
    Check,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Scrape the market site's item index into the catalog file
    Build {
        /// Concurrent item page fetches
        #[arg(short, long)]
        workers: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| kupo_config::config_file_path(&kupo_config::config_dir()));

    let (config, report) = kupo_config::prepare(&config_path).await?;
    logging::init_logger(config.logging.dir.as_deref(), &config.logging.level);

    if let Commands::Check = cli.command {
        return check_cmd::run(&config_path, &report);
    }

    for warning in &report.warnings {
        terminal_output::note_warn(&warning.to_string());
    }
    if !report.is_valid() {
        for err in &report.errors {
            error!(path = %err.path, message = %err.message, "Config error");
            terminal_output::note_error(&err.to_string());
        }
        anyhow::bail!("config at {} is invalid; run `kupo check`", config_path.display());
    }

    match cli.command {
        Commands::Ask { user, message } => ask_cmd::run(&config, &user, &message.join(" ")).await,
        Commands::Catalog {
            action: CatalogAction::Build { workers },
        } => catalog_cmd::build(&config, workers).await,
        Commands::Check => Ok(()),
    }
}
