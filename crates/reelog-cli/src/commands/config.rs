use super::prompts;
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use review_catalog_config::{Config, CredentialStore, PathManager};
use review_catalog_models::MediaKind;
use review_catalog_tmdb::TmdbClient;
use serde_json::json;

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output).await,
        crate::ConfigCommands::Tmdb {
            api_key,
            language,
            country,
            disable,
        } => configure_tmdb(api_key, language, country, disable, output).await,
        crate::ConfigCommands::Catalog { seed_samples } => {
            configure_catalog(seed_samples, output).await
        }
    }
}

async fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if !config_file.exists() {
        output.warn(&format!(
            "Configuration file not found at: {}",
            config_file.display()
        ));
        output.info("Configuration will be created automatically when you run 'reelog config tmdb' or 'reelog config catalog'.");
        return Ok(());
    }

    let config = Config::load_from_file(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;

    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;
    let api_key = credentials.get_tmdb_api_key().cloned().unwrap_or_default();
    let api_key_display = if full {
        api_key.clone()
    } else {
        mask_string(&api_key)
    };

    match output.format() {
        crate::output::OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            // File locations
            let mut info_table = Table::new();
            info_table.set_header(vec![
                Cell::new("Config File").add_attribute(comfy_table::Attribute::Bold),
                Cell::new(config_file.display().to_string()),
            ]);
            info_table.add_row(vec![
                Cell::new("Review Store"),
                Cell::new(path_manager.reviews_file().display().to_string()),
            ]);
            info_table.load_preset(comfy_table::presets::UTF8_FULL);
            info_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", info_table);
            println!();

            // TMDB Configuration
            if let Some(tmdb) = &config.tmdb {
                let mut tmdb_table = Table::new();
                tmdb_table.set_header(vec![Cell::new("TMDB Configuration")
                    .fg(comfy_table::Color::Cyan)
                    .add_attribute(comfy_table::Attribute::Bold)]);
                tmdb_table.add_row(vec![
                    Cell::new("Enabled"),
                    Cell::new(if tmdb.enabled {
                        "✓".green().to_string()
                    } else {
                        "✗".red().to_string()
                    }),
                ]);
                tmdb_table.add_row(vec![Cell::new("API Key"), Cell::new(&api_key_display)]);
                tmdb_table.add_row(vec![Cell::new("Language"), Cell::new(&tmdb.language)]);
                tmdb_table.add_row(vec![Cell::new("Country"), Cell::new(&tmdb.country)]);
                tmdb_table.load_preset(comfy_table::presets::UTF8_FULL);
                tmdb_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
                println!("{}", tmdb_table);
                println!();
            } else {
                println!("{}", "TMDB: Not configured".bright_black());
                println!();
            }

            // Catalog Options
            let mut catalog_table = Table::new();
            catalog_table.set_header(vec![Cell::new("Catalog Options")
                .fg(comfy_table::Color::Cyan)
                .add_attribute(comfy_table::Attribute::Bold)]);
            catalog_table.add_row(vec![
                Cell::new("Seed Samples"),
                Cell::new(if config.catalog.seed_samples {
                    "✓".green().to_string()
                } else {
                    "✗".red().to_string()
                }),
            ]);
            catalog_table.load_preset(comfy_table::presets::UTF8_FULL);
            catalog_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", catalog_table);
            println!();
        }
        crate::output::OutputFormat::Json | crate::output::OutputFormat::JsonPretty => {
            let json_config = json!({
                "config_file": config_file.display().to_string(),
                "review_store": path_manager.reviews_file().display().to_string(),
                "tmdb": if let Some(tmdb) = &config.tmdb {
                    json!({
                        "enabled": tmdb.enabled,
                        "api_key": api_key_display,
                        "language": tmdb.language,
                        "country": tmdb.country,
                    })
                } else {
                    json!(null)
                },
                "catalog": {
                    "seed_samples": config.catalog.seed_samples,
                },
            });
            output.json(&json_config);
        }
    }

    Ok(())
}

async fn configure_tmdb(
    api_key_arg: Option<String>,
    language: Option<String>,
    country: Option<String>,
    disable: bool,
    output: &Output,
) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let config_file = path_manager.config_file();
    let mut config = Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;

    if disable {
        match config.tmdb.as_mut() {
            Some(tmdb) => {
                tmdb.enabled = false;
                config.save_to_file(&config_file).map_err(|e| {
                    color_eyre::eyre::eyre!(
                        "Failed to save config to {}: {}",
                        config_file.display(),
                        e
                    )
                })?;
                output.success("TMDB integration disabled. The stored API key was kept.");
            }
            None => output.info("TMDB was never configured; nothing to disable."),
        }
        return Ok(());
    }

    let mut tmdb = config.tmdb.take().unwrap_or_default();
    if let Some(language) = language {
        tmdb.language = language;
    }
    if let Some(country) = country {
        tmdb.country = country;
    }
    tmdb.enabled = true;

    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;

    let api_key = match api_key_arg {
        Some(key) => key,
        None => {
            print_section_header("TMDB API Setup", output);
            output.println("");
            print_instruction_list(
                &[
                    "Create a TMDB account at https://www.themoviedb.org/signup",
                    "Request an API key at https://www.themoviedb.org/settings/api",
                    "Paste the 'API Key' (v3 auth) value below",
                ],
                output,
            );
            output.println("");
            prompts::prompt_password("TMDB API key")?
        }
    };
    if api_key.trim().is_empty() {
        return Err(color_eyre::eyre::eyre!("An API key is required"));
    }
    let api_key = api_key.trim().to_string();

    // A quick search proves the key works before anything is written.
    let client = TmdbClient::new(api_key.clone(), tmdb.language.clone(), tmdb.country.clone());
    let spinner = super::fetch_spinner(output, "Checking the key against TMDB...");
    let check = client.search(MediaKind::Movie, "Arrival").await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    match check {
        Ok(_) => output.success("API key verified"),
        Err(e) => output.warn(&format!("Could not verify the key ({}); saving it anyway", e)),
    }

    config.tmdb = Some(tmdb);
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;
    config.save_to_file(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e)
    })?;

    credentials.set_tmdb_api_key(api_key);
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    if let Some(tmdb) = &config.tmdb {
        output.success(&format!(
            "TMDB configured: language {}, watch providers for {}",
            tmdb.language, tmdb.country
        ));
    }

    Ok(())
}

async fn configure_catalog(seed_samples: Option<bool>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let config_file = path_manager.config_file();
    let mut config = Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;

    let seed_samples = match seed_samples {
        Some(value) => value,
        None => {
            output.warn("Nothing to change. Pass --seed-samples true|false.");
            return Ok(());
        }
    };

    config.catalog.seed_samples = seed_samples;
    config.save_to_file(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e)
    })?;

    output.success(&format!(
        "Sample seeding {}",
        if seed_samples { "enabled" } else { "disabled" }
    ));
    if seed_samples {
        output.info("Samples are only written when the review store does not exist yet.");
    }

    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    if s.len() <= 4 {
        return "*".repeat(s.len());
    }
    format!("{}***{}", &s[..2], &s[s.len() - 2..])
}

// Formatting helpers

/// Print a formatted section header
fn print_section_header(title: &str, output: &Output) {
    output.println("");
    output.println(&format!("{}", title.bold().bright_cyan()));
    output.println(&format!("{}", "─".repeat(title.len()).bright_cyan()));
}

/// Print a numbered instruction list
fn print_instruction_list(items: &[&str], output: &Output) {
    for (idx, item) in items.iter().enumerate() {
        output.println(&format!("  {}. {}", idx + 1, item));
    }
}
