use clap::ValueEnum;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use review_catalog_core::top_rated;
use review_catalog_models::{MediaKind, Review};

use crate::output::{Output, OutputFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Most recently added first
    Newest,
    /// Most liked first
    Liked,
    /// Most commented first
    Commented,
    /// Highest rated first
    Rating,
}

pub async fn run_list(
    tag: Option<String>,
    kind: Option<MediaKind>,
    year: Option<u16>,
    min_rating: Option<f32>,
    max_rating: Option<f32>,
    sort: SortOrder,
    limit: Option<usize>,
    output: &Output,
) -> Result<()> {
    let (_config, repository) = super::open_catalog(output)?;

    let mut reviews = match sort {
        SortOrder::Newest => repository.most_recent(usize::MAX),
        SortOrder::Liked => repository.most_liked(usize::MAX),
        SortOrder::Commented => repository.most_commented(usize::MAX),
        SortOrder::Rating => {
            let all = repository.get_all();
            let len = all.len();
            top_rated(&all, len).into_iter().cloned().collect()
        }
    };

    if let Some(tag) = &tag {
        reviews.retain(|r| r.tags.iter().any(|t| t == tag));
    }
    if let Some(kind) = kind {
        reviews.retain(|r| r.kind == kind);
    }
    if let Some(year) = year {
        reviews.retain(|r| r.year == Some(year));
    }
    if min_rating.is_some() || max_rating.is_some() {
        let min = min_rating.unwrap_or(1.0);
        let max = max_rating.unwrap_or(5.0);
        reviews.retain(|r| r.rating >= min && r.rating <= max);
    }
    if let Some(limit) = limit {
        reviews.truncate(limit);
    }

    match output.format() {
        OutputFormat::Human => {
            if reviews.is_empty() {
                output.info("No reviews match. Add one with 'reelog add'.");
                return Ok(());
            }
            println!("{}", review_table(&reviews));
            output.println(&format!(
                "{} review{}",
                reviews.len(),
                if reviews.len() == 1 { "" } else { "s" }
            ));
        }
        _ => output.json(&serde_json::to_value(&reviews)?),
    }

    Ok(())
}

fn review_table(reviews: &[Review]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Kind").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Likes").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Comments").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Watched").add_attribute(comfy_table::Attribute::Bold),
    ]);

    for review in reviews {
        table.add_row(vec![
            Cell::new(&review.id),
            Cell::new(&review.title),
            Cell::new(review.kind.to_string()),
            Cell::new(
                review
                    .year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(format!("{:.1}", review.rating)),
            Cell::new(review.likes.to_string()),
            Cell::new(review.comments.len().to_string()),
            Cell::new(
                review
                    .date_watched
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}
