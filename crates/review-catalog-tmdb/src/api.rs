use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

// TMDB API v3 base URL
const API_BASE: &str = "https://api.themoviedb.org/3";
// Image CDN; full URLs are base + size + path
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/";

// credits/videos/providers ride along on the details request, one round trip
const APPEND_TO_RESPONSE: &str = "credits,videos,watch/providers";

pub const POSTER_SIZE: &str = "w500";
pub const BACKDROP_SIZE: &str = "w780";

/// Create a reqwest Client with a bounded timeout so a slow TMDB never
/// hangs a local command.
pub fn create_tmdb_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    pub order: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    pub job: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderInfo {
    pub provider_id: u64,
    pub provider_name: String,
    pub logo_path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CountryWatchOptions {
    pub link: Option<String>,
    #[serde(default)]
    pub flatrate: Vec<ProviderInfo>,
    #[serde(default)]
    pub rent: Vec<ProviderInfo>,
    #[serde(default)]
    pub buy: Vec<ProviderInfo>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct WatchProviders {
    #[serde(default)]
    pub results: HashMap<String, CountryWatchOptions>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub runtime: Option<u32>,
    pub vote_average: Option<f32>,
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub credits: Option<Credits>,
    pub videos: Option<VideoList>,
    #[serde(rename = "watch/providers")]
    pub watch_providers: Option<WatchProviders>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Creator {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TvDetails {
    pub id: u64,
    pub name: String,
    pub first_air_date: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
    pub vote_average: Option<f32>,
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub created_by: Vec<Creator>,
    pub credits: Option<Credits>,
    pub videos: Option<VideoList>,
    #[serde(rename = "watch/providers")]
    pub watch_providers: Option<WatchProviders>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct MovieSearchResult {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct TvSearchResult {
    pub id: u64,
    pub name: String,
    pub first_air_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse<T> {
    pub page: Option<u32>,
    #[serde(default)]
    pub results: Vec<T>,
    pub total_pages: Option<u32>,
    pub total_results: Option<u32>,
}

/// Fetch movie details with credits, videos and watch providers attached.
pub async fn get_movie_details(
    client: &Client,
    api_key: &str,
    movie_id: u64,
    language: &str,
) -> Result<MovieDetails> {
    let url = format!("{}/movie/{}", API_BASE, movie_id);

    let response = client
        .get(&url)
        .query(&[
            ("api_key", api_key),
            ("language", language),
            ("append_to_response", APPEND_TO_RESPONSE),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!(
            "Failed to fetch movie details: {} - {}",
            status,
            error_text
        ));
    }

    let details: MovieDetails = response.json().await?;
    Ok(details)
}

/// Fetch TV series details with credits, videos and watch providers attached.
pub async fn get_tv_details(
    client: &Client,
    api_key: &str,
    tv_id: u64,
    language: &str,
) -> Result<TvDetails> {
    let url = format!("{}/tv/{}", API_BASE, tv_id);

    let response = client
        .get(&url)
        .query(&[
            ("api_key", api_key),
            ("language", language),
            ("append_to_response", APPEND_TO_RESPONSE),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!(
            "Failed to fetch TV details: {} - {}",
            status,
            error_text
        ));
    }

    let details: TvDetails = response.json().await?;
    Ok(details)
}

/// Search movies by title.
pub async fn search_movies(
    client: &Client,
    api_key: &str,
    query: &str,
    language: &str,
) -> Result<Vec<MovieSearchResult>> {
    let url = format!("{}/search/movie", API_BASE);

    let response = client
        .get(&url)
        .query(&[
            ("api_key", api_key),
            ("language", language),
            ("query", query),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!(
            "Failed to search movies: {} - {}",
            status,
            error_text
        ));
    }

    let data: SearchResponse<MovieSearchResult> = response.json().await?;
    Ok(data.results)
}

/// Search TV series by title.
pub async fn search_tv(
    client: &Client,
    api_key: &str,
    query: &str,
    language: &str,
) -> Result<Vec<TvSearchResult>> {
    let url = format!("{}/search/tv", API_BASE);

    let response = client
        .get(&url)
        .query(&[
            ("api_key", api_key),
            ("language", language),
            ("query", query),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!("Failed to search TV: {} - {}", status, error_text));
    }

    let data: SearchResponse<TvSearchResult> = response.json().await?;
    Ok(data.results)
}

/// Build a full image URL from a TMDB image path. A missing path stays
/// missing instead of producing a broken URL.
pub fn image_url(path: Option<&str>, size: &str) -> Option<String> {
    path.map(|p| format!("{}{}{}", IMAGE_BASE, size, p))
}

/// Pick the best trailer from a video list: an official YouTube trailer if
/// there is one, otherwise any YouTube video.
pub fn trailer_url(videos: &[Video]) -> Option<String> {
    let youtube = |v: &&Video| v.site == "YouTube";
    let pick = videos
        .iter()
        .filter(youtube)
        .find(|v| v.kind == "Trailer")
        .or_else(|| videos.iter().find(youtube))?;
    Some(format!("https://www.youtube.com/watch?v={}", pick.key))
}

/// First four digits of a TMDB date string ("2016-11-10") as a year.
pub fn year_from_date(date: Option<&str>) -> Option<u16> {
    date.and_then(|d| d.get(..4)).and_then(|y| y.parse().ok())
}
