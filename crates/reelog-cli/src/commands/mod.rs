use std::io::IsTerminal;
use std::time::Duration;

use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use review_catalog_config::{Config, CredentialStore, PathManager};
use review_catalog_core::{sample_reviews, ReviewRepository, ReviewStore};
use review_catalog_tmdb::TmdbClient;

use crate::output::{Output, OutputFormat};

pub mod add;
pub mod comment;
pub mod config;
pub mod edit;
pub mod like;
pub mod list;
pub mod prompts;
pub mod remove;
pub mod search;
pub mod show;
pub mod stats;

/// Open the on-disk catalog, creating and seeding it on first run.
pub fn open_catalog(output: &Output) -> Result<(Config, ReviewRepository)> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create data directories: {}", e))?;

    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;

    let repository = ReviewRepository::new(ReviewStore::new(path_manager.reviews_file()));
    tracing::debug!("review store at {}", repository.store().path().display());

    let seed = if config.catalog.seed_samples {
        sample_reviews()
    } else {
        Vec::new()
    };
    let seeded = repository.initialize(&seed)?;
    if seeded && !seed.is_empty() {
        output.info(&format!(
            "Started a new catalog with {} sample reviews. Remove them with 'reelog remove', or start clean via 'reelog config catalog --seed-samples false'.",
            seed.len()
        ));
    }

    Ok((config, repository))
}

/// Build a TMDB client from the config and the stored API key.
///
/// Returns None with a warning when the integration is disabled or the key
/// is missing, so callers can skip enrichment instead of failing.
pub fn tmdb_client(config: &Config, output: &Output) -> Option<TmdbClient> {
    let tmdb = match config.tmdb_enabled() {
        Some(tmdb) => tmdb,
        None => {
            output.warn("TMDB is not enabled. Run 'reelog config tmdb' to set it up.");
            return None;
        }
    };

    let path_manager = PathManager::default();
    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    if let Err(e) = credentials.load() {
        output.warn(&format!("Failed to load credentials: {}", e));
        return None;
    }

    match credentials.get_tmdb_api_key() {
        Some(key) if !key.is_empty() => Some(TmdbClient::new(
            key.clone(),
            tmdb.language.clone(),
            tmdb.country.clone(),
        )),
        _ => {
            output.warn("No TMDB API key stored. Run 'reelog config tmdb' to add one.");
            None
        }
    }
}

/// Spinner for TMDB round-trips, shown only when a human is watching.
pub fn fetch_spinner(output: &Output, msg: &str) -> Option<ProgressBar> {
    if output.format() != OutputFormat::Human
        || output.is_quiet()
        || !std::io::stderr().is_terminal()
    {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    Some(spinner)
}
