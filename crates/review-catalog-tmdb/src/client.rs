use anyhow::Result;
use review_catalog_models::MediaKind;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::api::{self, MovieDetails, MovieSearchResult, TvDetails, TvSearchResult};

/// TMDB metadata for one title, flattened to what the catalog cares about.
/// Movies and series share this shape; fields that only make sense for one
/// kind stay `None` for the other.
#[derive(Debug, Clone, Serialize)]
pub struct TitleDetails {
    pub tmdb_id: u64,
    pub kind: MediaKind,
    pub title: String,
    pub year: Option<u16>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub genres: Vec<String>,
    pub director: Option<String>,
    pub top_cast: Vec<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub vote_average: Option<f32>,
    pub runtime_minutes: Option<u32>,
    pub seasons: Option<u32>,
    pub episodes: Option<u32>,
    pub trailer_url: Option<String>,
    pub watch_providers: Option<ProviderSummary>,
}

/// Where a title can be streamed, rented or bought in one country.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderSummary {
    pub country: String,
    pub flatrate: Vec<String>,
    pub rent: Vec<String>,
    pub buy: Vec<String>,
}

impl ProviderSummary {
    pub fn is_empty(&self) -> bool {
        self.flatrate.is_empty() && self.rent.is_empty() && self.buy.is_empty()
    }
}

/// One row of a title search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub tmdb_id: u64,
    pub kind: MediaKind,
    pub title: String,
    pub year: Option<u16>,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub vote_average: Option<f32>,
}

/// Thin TMDB client carrying the key and locale so call sites stay small.
pub struct TmdbClient {
    client: Client,
    api_key: String,
    language: String,
    country: String,
}

impl TmdbClient {
    pub fn new(api_key: String, language: String, country: String) -> Self {
        Self {
            client: api::create_tmdb_client(),
            api_key,
            language,
            country,
        }
    }

    /// Full details for one title, dispatching on the media kind.
    pub async fn details(&self, kind: MediaKind, tmdb_id: u64) -> Result<TitleDetails> {
        debug!("fetching TMDB details for {} {}", kind, tmdb_id);
        match kind {
            MediaKind::Movie => {
                let details =
                    api::get_movie_details(&self.client, &self.api_key, tmdb_id, &self.language)
                        .await?;
                Ok(movie_to_title(details, &self.country))
            }
            MediaKind::Series => {
                let details =
                    api::get_tv_details(&self.client, &self.api_key, tmdb_id, &self.language)
                        .await?;
                Ok(tv_to_title(details, &self.country))
            }
        }
    }

    /// Title search within one media kind.
    pub async fn search(&self, kind: MediaKind, query: &str) -> Result<Vec<SearchHit>> {
        debug!("searching TMDB {} for {:?}", kind, query);
        match kind {
            MediaKind::Movie => {
                let results =
                    api::search_movies(&self.client, &self.api_key, query, &self.language).await?;
                Ok(results.into_iter().map(movie_hit).collect())
            }
            MediaKind::Series => {
                let results =
                    api::search_tv(&self.client, &self.api_key, query, &self.language).await?;
                Ok(results.into_iter().map(tv_hit).collect())
            }
        }
    }
}

fn movie_to_title(details: MovieDetails, country: &str) -> TitleDetails {
    let credits = details.credits.unwrap_or_default();
    let director = credits
        .crew
        .iter()
        .find(|c| c.job.as_deref() == Some("Director"))
        .map(|c| c.name.clone());

    TitleDetails {
        tmdb_id: details.id,
        kind: MediaKind::Movie,
        year: api::year_from_date(details.release_date.as_deref()),
        title: details.title,
        overview: details.overview,
        tagline: details.tagline,
        genres: details.genres.into_iter().map(|g| g.name).collect(),
        director,
        top_cast: top_cast(&credits),
        poster_url: api::image_url(details.poster_path.as_deref(), api::POSTER_SIZE),
        backdrop_url: api::image_url(details.backdrop_path.as_deref(), api::BACKDROP_SIZE),
        vote_average: details.vote_average,
        runtime_minutes: details.runtime,
        seasons: None,
        episodes: None,
        trailer_url: details
            .videos
            .as_ref()
            .and_then(|v| api::trailer_url(&v.results)),
        watch_providers: providers_for(details.watch_providers.as_ref(), country),
    }
}

fn tv_to_title(details: TvDetails, country: &str) -> TitleDetails {
    let credits = details.credits.unwrap_or_default();
    // Series rarely credit a single director; fall back to the creator.
    let director = credits
        .crew
        .iter()
        .find(|c| c.job.as_deref() == Some("Director"))
        .map(|c| c.name.clone())
        .or_else(|| details.created_by.first().map(|c| c.name.clone()));

    TitleDetails {
        tmdb_id: details.id,
        kind: MediaKind::Series,
        year: api::year_from_date(details.first_air_date.as_deref()),
        title: details.name,
        overview: details.overview,
        tagline: details.tagline,
        genres: details.genres.into_iter().map(|g| g.name).collect(),
        director,
        top_cast: top_cast(&credits),
        poster_url: api::image_url(details.poster_path.as_deref(), api::POSTER_SIZE),
        backdrop_url: api::image_url(details.backdrop_path.as_deref(), api::BACKDROP_SIZE),
        vote_average: details.vote_average,
        runtime_minutes: None,
        seasons: details.number_of_seasons,
        episodes: details.number_of_episodes,
        trailer_url: details
            .videos
            .as_ref()
            .and_then(|v| api::trailer_url(&v.results)),
        watch_providers: providers_for(details.watch_providers.as_ref(), country),
    }
}

fn top_cast(credits: &api::Credits) -> Vec<String> {
    credits.cast.iter().take(5).map(|c| c.name.clone()).collect()
}

fn providers_for(providers: Option<&api::WatchProviders>, country: &str) -> Option<ProviderSummary> {
    let options = providers?.results.get(country)?;
    Some(ProviderSummary {
        country: country.to_string(),
        flatrate: provider_names(&options.flatrate),
        rent: provider_names(&options.rent),
        buy: provider_names(&options.buy),
    })
}

fn provider_names(providers: &[api::ProviderInfo]) -> Vec<String> {
    providers.iter().map(|p| p.provider_name.clone()).collect()
}

fn movie_hit(result: MovieSearchResult) -> SearchHit {
    SearchHit {
        tmdb_id: result.id,
        kind: MediaKind::Movie,
        year: api::year_from_date(result.release_date.as_deref()),
        title: result.title,
        overview: result.overview,
        poster_url: api::image_url(result.poster_path.as_deref(), api::POSTER_SIZE),
        vote_average: result.vote_average,
    }
}

fn tv_hit(result: TvSearchResult) -> SearchHit {
    SearchHit {
        tmdb_id: result.id,
        kind: MediaKind::Series,
        year: api::year_from_date(result.first_air_date.as_deref()),
        title: result.name,
        overview: result.overview,
        poster_url: api::image_url(result.poster_path.as_deref(), api::POSTER_SIZE),
        vote_average: result.vote_average,
    }
}
