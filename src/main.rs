//! Redline CLI entry point.

use clap::Parser;

use redline::cli::{commands, Cli, Commands};
use redline::infrastructure::config::ConfigLoader;
use redline::infrastructure::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.config.as_ref() {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => redline::cli::handle_error(err, cli.json),
    };

    if let Err(err) = logging::init(&config.logging) {
        redline::cli::handle_error(err, cli.json);
    }

    let result = match cli.command {
        Commands::Init { force } => commands::init::execute(force, cli.json).await,
        Commands::Submit {
            query,
            user,
            suggestions,
            sections,
        } => commands::submit::execute(query, user, suggestions, sections, &config, cli.json).await,
        Commands::Pending { batch } => commands::review::pending(batch, &config, cli.json).await,
        Commands::Approve { batch_id, ids } => {
            commands::review::approve(batch_id, ids, &config, cli.json).await
        }
        Commands::Reject { batch_id, ids } => {
            commands::review::reject(batch_id, ids, &config, cli.json).await
        }
        Commands::Applied => commands::review::applied(&config, cli.json).await,
        Commands::Stats => commands::review::stats(&config, cli.json).await,
        Commands::Revert { suggestion_id } => {
            commands::revert::revert_one(suggestion_id, &config, cli.json).await
        }
        Commands::RevertAll => commands::revert::revert_all(&config, cli.json).await,
    };

    if let Err(err) = result {
        redline::cli::handle_error(err, cli.json);
    }
}
