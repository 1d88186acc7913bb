use chrono::NaiveDate;
use color_eyre::Result;
use review_catalog_models::{MediaKind, ReviewForm};
use review_catalog_tmdb::{SearchHit, TitleDetails, TmdbClient};

use super::prompts;
use crate::output::{Output, OutputFormat};

pub async fn run_add(
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
    enrich: bool,
    output: &Output,
) -> Result<()> {
    let (config, repository) = super::open_catalog(output)?;

    let title = match title {
        Some(title) => title,
        None => prompts::prompt_string("Title", None)?,
    };
    let kind = match kind {
        Some(kind) => kind,
        None => prompts::prompt_media_kind()?,
    };
    let rating = match rating {
        Some(rating) => rating,
        None => prompts::prompt_rating(output)?,
    };
    let body = match body {
        Some(body) => body,
        None => prompts::prompt_string("Review", None)?,
    };

    let mut form = ReviewForm {
        title,
        kind,
        rating,
        body,
        director,
        year,
        image_url,
        date_watched,
        tags: if tags.is_empty() { None } else { Some(tags) },
        tmdb_id,
    };

    if enrich {
        if let Some(client) = super::tmdb_client(&config, output) {
            enrich_form(&mut form, &client, output).await;
        }
    }

    let review = repository.create(form)?;

    match output.format() {
        OutputFormat::Human => {
            output.success(&format!("Added review for '{}' ({})", review.title, review.kind));
            output.println(&format!("  id: {}", review.id));
        }
        _ => output.json(&serde_json::to_value(&review)?),
    }

    Ok(())
}

/// Fill gaps in the form from the closest TMDB match. Lookup failures
/// downgrade to a warning; the review is saved either way.
async fn enrich_form(form: &mut ReviewForm, client: &TmdbClient, output: &Output) {
    let spinner = super::fetch_spinner(output, &format!("Looking up '{}' on TMDB...", form.title));
    let result = lookup(form, client).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match result {
        Ok(Some(details)) => {
            output.info(&format!(
                "Matched TMDB entry '{}' ({})",
                details.title, details.tmdb_id
            ));
            if form.tmdb_id.is_none() {
                form.tmdb_id = Some(details.tmdb_id);
            }
            if form.year.is_none() {
                form.year = details.year;
            }
            if form.director.is_none() {
                form.director = details.director;
            }
            if form.image_url.is_none() {
                form.image_url = details.poster_url;
            }
        }
        Ok(None) => output.warn(&format!("No TMDB match for '{}'", form.title)),
        Err(e) => output.warn(&format!("TMDB lookup failed: {}", e)),
    }
}

async fn lookup(form: &ReviewForm, client: &TmdbClient) -> anyhow::Result<Option<TitleDetails>> {
    if let Some(tmdb_id) = form.tmdb_id {
        return client.details(form.kind, tmdb_id).await.map(Some);
    }

    let hits = client.search(form.kind, &form.title).await?;
    let best = match pick_match(&hits, form.year) {
        Some(hit) => hit,
        None => return Ok(None),
    };
    client.details(form.kind, best.tmdb_id).await.map(Some)
}

/// Prefer a hit from the release year the user gave, otherwise take the
/// top-ranked result.
fn pick_match(hits: &[SearchHit], year: Option<u16>) -> Option<&SearchHit> {
    if let Some(year) = year {
        if let Some(hit) = hits.iter().find(|h| h.year == Some(year)) {
            return Some(hit);
        }
    }
    hits.first()
}
