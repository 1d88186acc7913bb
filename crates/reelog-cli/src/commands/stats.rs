use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use review_catalog_core::{catalog_stats, rating_histogram, top_rated};
use review_catalog_models::{MediaKind, Review};
use serde_json::json;

use crate::output::{Output, OutputFormat};

const BAR_WIDTH: usize = 30;

pub async fn run_stats(output: &Output) -> Result<()> {
    let (_config, repository) = super::open_catalog(output)?;
    let reviews = repository.get_all();

    let stats = catalog_stats(&reviews);
    let histogram = rating_histogram(&reviews);

    let movies: Vec<Review> = reviews
        .iter()
        .filter(|r| r.kind == MediaKind::Movie)
        .cloned()
        .collect();
    let series: Vec<Review> = reviews
        .iter()
        .filter(|r| r.kind == MediaKind::Series)
        .cloned()
        .collect();
    let top_movies = top_rated(&movies, 5);
    let top_series = top_rated(&series, 5);

    match output.format() {
        OutputFormat::Human => {
            if reviews.is_empty() {
                output.info("The catalog is empty. Add a review with 'reelog add'.");
                return Ok(());
            }

            let mut summary = Table::new();
            summary.set_header(vec![Cell::new("Catalog")
                .fg(comfy_table::Color::Cyan)
                .add_attribute(comfy_table::Attribute::Bold)]);
            summary.add_row(vec![
                Cell::new("Reviews"),
                Cell::new(stats.total.to_string()),
            ]);
            summary.add_row(vec![
                Cell::new("Movies"),
                Cell::new(stats.movies.to_string()),
            ]);
            summary.add_row(vec![
                Cell::new("Series"),
                Cell::new(stats.series.to_string()),
            ]);
            summary.add_row(vec![
                Cell::new("Average rating"),
                Cell::new(format!("{:.2}", stats.avg_rating)),
            ]);
            summary.load_preset(comfy_table::presets::UTF8_FULL);
            summary.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", summary);
            println!();

            // Bars are scaled against the fullest bucket.
            let max_count = histogram.iter().copied().max().unwrap_or(0);
            println!("{}", "Ratings".bold());
            for stars in 1..=5usize {
                let count = histogram[stars - 1];
                let width = if max_count == 0 {
                    0
                } else {
                    count * BAR_WIDTH / max_count
                };
                println!(
                    "  {}★ {:>4}  {}",
                    stars,
                    count,
                    "█".repeat(width).yellow()
                );
            }
            println!();

            if !top_movies.is_empty() {
                println!("{}", top_table("Top Movies", &top_movies));
                println!();
            }
            if !top_series.is_empty() {
                println!("{}", top_table("Top Series", &top_series));
                println!();
            }
        }
        _ => output.json(&json!({
            "total": stats.total,
            "movies": stats.movies,
            "series": stats.series,
            "avg_rating": stats.avg_rating,
            "histogram": histogram,
            "top_movies": top_movies,
            "top_series": top_series,
        })),
    }

    Ok(())
}

fn top_table(title: &str, reviews: &[&Review]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![Cell::new(title)
        .fg(comfy_table::Color::Cyan)
        .add_attribute(comfy_table::Attribute::Bold)]);
    for review in reviews {
        table.add_row(vec![
            Cell::new(&review.title),
            Cell::new(
                review
                    .year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(format!("{:.1}", review.rating)),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}
