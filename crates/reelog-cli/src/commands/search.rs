use color_eyre::Result;
use comfy_table::{Cell, Table};
use review_catalog_config::{Config, PathManager};
use review_catalog_models::MediaKind;

use crate::output::{Output, OutputFormat};

pub async fn run_search(
    query: String,
    kind: MediaKind,
    limit: usize,
    output: &Output,
) -> Result<()> {
    // Search never touches the review store, so skip opening the catalog
    // and read just the config.
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;

    let client = super::tmdb_client(&config, output)
        .ok_or_else(|| color_eyre::eyre::eyre!("TMDB search needs a configured API key"))?;

    let spinner = super::fetch_spinner(output, &format!("Searching TMDB for '{}'...", query));
    let result = client.search(kind, &query).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let mut hits = result.map_err(|e| color_eyre::eyre::eyre!("TMDB search failed: {}", e))?;
    hits.truncate(limit);

    match output.format() {
        OutputFormat::Human => {
            if hits.is_empty() {
                output.info(&format!("No TMDB {} results for '{}'", kind, query));
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("TMDB ID").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Score").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Overview").add_attribute(comfy_table::Attribute::Bold),
            ]);
            for hit in &hits {
                table.add_row(vec![
                    Cell::new(hit.tmdb_id.to_string()),
                    Cell::new(&hit.title),
                    Cell::new(
                        hit.year
                            .map(|y| y.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                    Cell::new(
                        hit.vote_average
                            .map(|v| format!("{:.1}", v))
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                    Cell::new(
                        hit.overview
                            .as_deref()
                            .map(|o| truncate_overview(o, 60))
                            .unwrap_or_default(),
                    ),
                ]);
            }
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);
            output.println("Use an id with 'reelog add --tmdb-id <id> --enrich'.");
        }
        _ => output.json(&serde_json::to_value(&hits)?),
    }

    Ok(())
}

fn truncate_overview(overview: &str, max_chars: usize) -> String {
    if overview.chars().count() <= max_chars {
        return overview.to_string();
    }
    let cut: String = overview.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
