use std::fs;
use std::path::{Path, PathBuf};

use review_catalog_models::Review;
use tracing::{debug, info, warn};

use crate::error::StoreError;

/// File-backed review collection.
///
/// The whole collection lives in a single JSON document. Every mutation
/// rewrites the file, which keeps the format trivially inspectable and
/// editable by hand.
pub struct ReviewStore {
    path: PathBuf,
}

impl ReviewStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Writes the seed collection, but only when no review file exists yet.
    ///
    /// Returns whether seeding happened. A present-but-empty file counts as
    /// initialized, so a user who deleted every review does not get the
    /// samples back on the next run.
    pub fn initialize_if_empty(&self, seed: &[Review]) -> Result<bool, StoreError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(seed)?;
        if !seed.is_empty() {
            info!("seeded review collection with {} sample reviews", seed.len());
        }
        Ok(true)
    }

    /// Loads the full collection, treating any failure as an empty catalog.
    ///
    /// A missing file is the normal first-run state. An unreadable or corrupt
    /// file is logged and set aside rather than propagated, since the caller
    /// can always keep working against an empty collection.
    pub fn load(&self) -> Vec<Review> {
        if !self.path.exists() {
            debug!("no review file at {:?} yet", self.path);
            return Vec::new();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to read review file {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Review>>(&content) {
            Ok(reviews) => {
                debug!("loaded {} reviews from {:?}", reviews.len(), self.path);
                reviews
            }
            Err(e) => {
                warn!("review file {:?} is corrupt: {}", self.path, e);
                self.backup_corrupt_file();
                Vec::new()
            }
        }
    }

    /// Persists the full collection atomically.
    ///
    /// Writes to a sibling temp file first and renames it into place, so a
    /// crash mid-write never leaves a half-written collection behind.
    pub fn save(&self, reviews: &[Review]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(reviews)?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;

        debug!("saved {} reviews to {:?}", reviews.len(), self.path);
        Ok(())
    }

    /// Moves an unparseable review file aside so the next save does not
    /// silently destroy whatever the user might still recover from it.
    fn backup_corrupt_file(&self) {
        let backup = self.path.with_extension("json.bak");
        match fs::rename(&self.path, &backup) {
            Ok(()) => warn!("moved corrupt review file to {:?}", backup),
            Err(e) => warn!("failed to back up corrupt review file: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use review_catalog_models::{MediaKind, ReviewForm};
    use tempfile::TempDir;

    fn sample_review(id: &str, title: &str) -> Review {
        let form = ReviewForm {
            title: title.to_string(),
            kind: MediaKind::Movie,
            rating: 4.0,
            body: "Solid.".to_string(),
            ..ReviewForm::default()
        };
        let created = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        Review::from_form(id.to_string(), form, created)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ReviewStore::new(dir.path().join("reviews.json"));

        assert!(!store.exists());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = ReviewStore::new(dir.path().join("reviews.json"));

        let reviews = vec![sample_review("a", "Heat"), sample_review("b", "Ronin")];
        store.save(&reviews).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, reviews);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = ReviewStore::new(dir.path().join("nested").join("deep").join("reviews.json"));

        store.save(&[sample_review("a", "Heat")]).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_corrupt_file_loads_as_empty_and_is_backed_up() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reviews.json");
        std::fs::write(&path, "this is not json {{{").unwrap();

        let store = ReviewStore::new(&path);
        assert!(store.load().is_empty());
        assert!(dir.path().join("reviews.json.bak").exists());

        // The store stays usable after corruption.
        store.save(&[sample_review("a", "Heat")]).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_initialize_if_empty_seeds_once() {
        let dir = TempDir::new().unwrap();
        let store = ReviewStore::new(dir.path().join("reviews.json"));
        let seed = vec![sample_review("a", "Heat")];

        assert!(store.initialize_if_empty(&seed).unwrap());
        assert_eq!(store.load().len(), 1);

        // Second call is a no-op even though the seed changed.
        let other_seed = vec![sample_review("b", "Ronin"), sample_review("c", "Thief")];
        assert!(!store.initialize_if_empty(&other_seed).unwrap());
        assert_eq!(store.load()[0].title, "Heat");
    }

    #[test]
    fn test_initialize_respects_emptied_collection() {
        let dir = TempDir::new().unwrap();
        let store = ReviewStore::new(dir.path().join("reviews.json"));

        store.save(&[]).unwrap();
        assert!(!store.initialize_if_empty(&[sample_review("a", "Heat")]).unwrap());
        assert!(store.load().is_empty());
    }
}
