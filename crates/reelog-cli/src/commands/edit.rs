use chrono::NaiveDate;
use color_eyre::Result;
use review_catalog_models::{MediaKind, ReviewForm};

use crate::output::{Output, OutputFormat};

pub async fn run_edit(
    id: String,
    title: Option<String>,
    kind: Option<MediaKind>,
    rating: Option<f32>,
    body: Option<String>,
    director: Option<String>,
    year: Option<u16>,
    date_watched: Option<NaiveDate>,
    tags: Vec<String>,
    tmdb_id: Option<u64>,
    image_url: Option<String>,
    output: &Output,
) -> Result<()> {
    let (_config, repository) = super::open_catalog(output)?;
    let existing = repository.get_by_id(&id)?;

    let no_changes = title.is_none()
        && kind.is_none()
        && rating.is_none()
        && body.is_none()
        && director.is_none()
        && year.is_none()
        && date_watched.is_none()
        && tags.is_empty()
        && tmdb_id.is_none()
        && image_url.is_none();
    if no_changes {
        output.warn("Nothing to change. Pass at least one field flag, see 'reelog edit --help'.");
        return Ok(());
    }

    // Required fields fall back to the stored values; optional fields left
    // as None keep whatever the review already has.
    let form = ReviewForm {
        title: title.unwrap_or(existing.title),
        kind: kind.unwrap_or(existing.kind),
        rating: rating.unwrap_or(existing.rating),
        body: body.unwrap_or(existing.body),
        director,
        year,
        image_url,
        date_watched,
        tags: if tags.is_empty() { None } else { Some(tags) },
        tmdb_id,
    };

    let review = repository.update(&id, form)?;

    match output.format() {
        OutputFormat::Human => {
            output.success(&format!("Updated review for '{}'", review.title));
        }
        _ => output.json(&serde_json::to_value(&review)?),
    }

    Ok(())
}
