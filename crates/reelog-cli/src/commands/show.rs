use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use review_catalog_config::Config;
use review_catalog_models::Review;
use review_catalog_tmdb::TitleDetails;
use serde_json::json;

use crate::output::{Output, OutputFormat};

pub async fn run_show(id: String, details: bool, output: &Output) -> Result<()> {
    let (config, repository) = super::open_catalog(output)?;
    let review = repository.get_by_id(&id)?;

    let tmdb_details = if details {
        fetch_details(&review, &config, output).await
    } else {
        None
    };

    match output.format() {
        OutputFormat::Human => {
            print_review(&review);
            if let Some(tmdb) = &tmdb_details {
                print_details(tmdb);
            }
        }
        _ => {
            let mut value = serde_json::to_value(&review)?;
            if details {
                value = json!({
                    "review": value,
                    "tmdb": tmdb_details,
                });
            }
            output.json(&value);
        }
    }

    Ok(())
}

async fn fetch_details(review: &Review, config: &Config, output: &Output) -> Option<TitleDetails> {
    let tmdb_id = match review.tmdb_id {
        Some(tmdb_id) => tmdb_id,
        None => {
            output.warn(
                "This review has no TMDB id. Set one with 'reelog edit --tmdb-id', or look it up via 'reelog search'.",
            );
            return None;
        }
    };

    let client = super::tmdb_client(config, output)?;

    let spinner = super::fetch_spinner(
        output,
        &format!("Fetching TMDB details for '{}'...", review.title),
    );
    let result = client.details(review.kind, tmdb_id).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match result {
        Ok(details) => Some(details),
        Err(e) => {
            output.warn(&format!("TMDB fetch failed: {}", e));
            None
        }
    }
}

fn print_review(review: &Review) {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(format!("{} ({})", review.title, review.kind))
            .fg(comfy_table::Color::Cyan)
            .add_attribute(comfy_table::Attribute::Bold),
        Cell::new(&review.id),
    ]);
    table.add_row(vec![
        Cell::new("Rating"),
        Cell::new(format!("{:.1} / 5", review.rating)),
    ]);
    if let Some(year) = review.year {
        table.add_row(vec![Cell::new("Year"), Cell::new(year.to_string())]);
    }
    if let Some(director) = &review.director {
        table.add_row(vec![Cell::new("Director"), Cell::new(director)]);
    }
    if let Some(date_watched) = review.date_watched {
        table.add_row(vec![Cell::new("Watched"), Cell::new(date_watched.to_string())]);
    }
    if !review.tags.is_empty() {
        table.add_row(vec![Cell::new("Tags"), Cell::new(review.tags.join(", "))]);
    }
    if let Some(tmdb_id) = review.tmdb_id {
        table.add_row(vec![Cell::new("TMDB id"), Cell::new(tmdb_id.to_string())]);
    }
    if let Some(image_url) = &review.image_url {
        table.add_row(vec![Cell::new("Image"), Cell::new(image_url)]);
    }
    table.add_row(vec![Cell::new("Likes"), Cell::new(review.likes.to_string())]);
    table.add_row(vec![
        Cell::new("Added"),
        Cell::new(review.created_at.format("%Y-%m-%d %H:%M UTC").to_string()),
    ]);
    if let Some(updated_at) = review.updated_at {
        if updated_at != review.created_at {
            table.add_row(vec![
                Cell::new("Updated"),
                Cell::new(updated_at.format("%Y-%m-%d %H:%M UTC").to_string()),
            ]);
        }
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);
    println!();

    println!("{}", review.body);
    println!();

    if !review.comments.is_empty() {
        println!(
            "{}",
            format!("Comments ({})", review.comments.len()).bold()
        );
        for comment in &review.comments {
            println!(
                "  {} {} {}",
                comment.user_name.bold(),
                comment
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black(),
                format!("[{}]", comment.id).bright_black()
            );
            for line in comment.content.lines() {
                println!("    {}", line);
            }
        }
        println!();
    }
}

fn print_details(details: &TitleDetails) {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("TMDB Details")
            .fg(comfy_table::Color::Cyan)
            .add_attribute(comfy_table::Attribute::Bold),
        Cell::new(details.tmdb_id.to_string()),
    ]);
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        table.add_row(vec![Cell::new("Tagline"), Cell::new(tagline)]);
    }
    if !details.genres.is_empty() {
        table.add_row(vec![Cell::new("Genres"), Cell::new(details.genres.join(", "))]);
    }
    if let Some(runtime) = details.runtime_minutes {
        table.add_row(vec![
            Cell::new("Runtime"),
            Cell::new(format!("{} min", runtime)),
        ]);
    }
    if let Some(seasons) = details.seasons {
        let value = match details.episodes {
            Some(episodes) => format!("{} ({} episodes)", seasons, episodes),
            None => seasons.to_string(),
        };
        table.add_row(vec![Cell::new("Seasons"), Cell::new(value)]);
    }
    if let Some(vote_average) = details.vote_average {
        table.add_row(vec![
            Cell::new("TMDB score"),
            Cell::new(format!("{:.1} / 10", vote_average)),
        ]);
    }
    if !details.top_cast.is_empty() {
        table.add_row(vec![
            Cell::new("Cast"),
            Cell::new(details.top_cast.join(", ")),
        ]);
    }
    if let Some(trailer_url) = &details.trailer_url {
        table.add_row(vec![Cell::new("Trailer"), Cell::new(trailer_url)]);
    }
    if let Some(providers) = details.watch_providers.as_ref().filter(|p| !p.is_empty()) {
        if !providers.flatrate.is_empty() {
            table.add_row(vec![
                Cell::new(format!("Stream ({})", providers.country)),
                Cell::new(providers.flatrate.join(", ")),
            ]);
        }
        if !providers.rent.is_empty() {
            table.add_row(vec![
                Cell::new(format!("Rent ({})", providers.country)),
                Cell::new(providers.rent.join(", ")),
            ]);
        }
        if !providers.buy.is_empty() {
            table.add_row(vec![
                Cell::new(format!("Buy ({})", providers.country)),
                Cell::new(providers.buy.join(", ")),
            ]);
        }
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);
    println!();

    if let Some(overview) = details.overview.as_deref().filter(|o| !o.is_empty()) {
        println!("{}", overview);
        println!();
    }
}
