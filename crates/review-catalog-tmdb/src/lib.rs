pub mod api;
pub mod client;

pub use client::{ProviderSummary, SearchHit, TitleDetails, TmdbClient};
