pub mod error;
pub mod repository;
pub mod seed;
pub mod stats;
pub mod store;

pub use error::{CatalogError, StoreError};
pub use repository::ReviewRepository;
pub use seed::sample_reviews;
pub use stats::{catalog_stats, rating_histogram, top_rated, CatalogStats};
pub use store::ReviewStore;
