use chrono::{Datelike, Utc};
use review_catalog_models::{Comment, CommentDraft, MediaKind, Review, ReviewForm};
use tracing::debug;
use uuid::Uuid;

use crate::error::CatalogError;
use crate::stats::{catalog_stats, CatalogStats};
use crate::store::ReviewStore;

const MIN_YEAR: u16 = 1900;

/// All catalog operations, expressed over a [`ReviewStore`].
///
/// Every operation loads the whole collection, works on it in memory and
/// writes it back. At personal-catalog sizes that is simpler and safer than
/// partial updates, and it means a single source of truth on disk.
pub struct ReviewRepository {
    store: ReviewStore,
}

impl ReviewRepository {
    pub fn new(store: ReviewStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ReviewStore {
        &self.store
    }

    /// Seeds the collection on first run. See [`ReviewStore::initialize_if_empty`].
    pub fn initialize(&self, seed: &[Review]) -> Result<bool, CatalogError> {
        Ok(self.store.initialize_if_empty(seed)?)
    }

    pub fn get_all(&self) -> Vec<Review> {
        self.store.load()
    }

    pub fn get_by_id(&self, id: &str) -> Result<Review, CatalogError> {
        self.store
            .load()
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CatalogError::ReviewNotFound { id: id.to_string() })
    }

    /// Creates a review from the form, assigning its id and timestamps.
    /// New reviews go to the front, so the collection reads as a
    /// newest-first feed.
    pub fn create(&self, form: ReviewForm) -> Result<Review, CatalogError> {
        validate_form(&form)?;

        let mut reviews = self.store.load();
        let review = Review::from_form(Uuid::new_v4().to_string(), form, Utc::now());
        reviews.insert(0, review.clone());
        self.store.save(&reviews)?;

        debug!("created review {} ({})", review.id, review.title);
        Ok(review)
    }

    /// Merges the form onto an existing review. Required fields always
    /// overwrite; optional fields only when present.
    pub fn update(&self, id: &str, form: ReviewForm) -> Result<Review, CatalogError> {
        validate_form(&form)?;
        self.with_review(id, |review| review.apply_form(form, Utc::now()))
    }

    /// Removes a review. Returns whether anything was actually deleted;
    /// the file is rewritten only when it was.
    pub fn delete(&self, id: &str) -> Result<bool, CatalogError> {
        let mut reviews = self.store.load();
        let before = reviews.len();
        reviews.retain(|r| r.id != id);
        if reviews.len() == before {
            return Ok(false);
        }
        self.store.save(&reviews)?;
        debug!("deleted review {}", id);
        Ok(true)
    }

    pub fn like(&self, id: &str) -> Result<Review, CatalogError> {
        self.with_review(id, |review| {
            review.likes = review.likes.saturating_add(1);
            review.updated_at = Some(Utc::now());
        })
    }

    pub fn add_comment(&self, id: &str, draft: CommentDraft) -> Result<Review, CatalogError> {
        if draft.content.trim().is_empty() {
            return Err(CatalogError::invalid("comment content cannot be empty"));
        }
        let now = Utc::now();
        let comment = Comment::from_draft(Uuid::new_v4().to_string(), draft, now);
        self.with_review(id, |review| {
            review.comments.push(comment);
            review.updated_at = Some(now);
        })
    }

    /// Removes one comment from a review. An unknown comment id is not an
    /// error; the review is written back either way.
    pub fn delete_comment(&self, review_id: &str, comment_id: &str) -> Result<Review, CatalogError> {
        self.with_review(review_id, |review| {
            let before = review.comments.len();
            review.comments.retain(|c| c.id != comment_id);
            if review.comments.len() != before {
                review.updated_at = Some(Utc::now());
            }
        })
    }

    pub fn by_tag(&self, tag: &str) -> Vec<Review> {
        self.get_all()
            .into_iter()
            .filter(|r| r.tags.iter().any(|t| t == tag))
            .collect()
    }

    pub fn by_kind(&self, kind: MediaKind) -> Vec<Review> {
        self.get_all().into_iter().filter(|r| r.kind == kind).collect()
    }

    pub fn by_year(&self, year: u16) -> Vec<Review> {
        self.get_all()
            .into_iter()
            .filter(|r| r.year == Some(year))
            .collect()
    }

    /// Reviews whose rating falls in `[min, max]`, bounds included.
    pub fn by_rating_range(&self, min: f32, max: f32) -> Vec<Review> {
        self.get_all()
            .into_iter()
            .filter(|r| r.rating >= min && r.rating <= max)
            .collect()
    }

    pub fn most_liked(&self, limit: usize) -> Vec<Review> {
        let mut reviews = self.get_all();
        reviews.sort_by(|a, b| b.likes.cmp(&a.likes));
        reviews.truncate(limit);
        reviews
    }

    pub fn most_commented(&self, limit: usize) -> Vec<Review> {
        let mut reviews = self.get_all();
        reviews.sort_by(|a, b| b.comments.len().cmp(&a.comments.len()));
        reviews.truncate(limit);
        reviews
    }

    pub fn most_recent(&self, limit: usize) -> Vec<Review> {
        let mut reviews = self.get_all();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews.truncate(limit);
        reviews
    }

    pub fn stats(&self) -> CatalogStats {
        catalog_stats(&self.store.load())
    }

    /// Load, mutate one review in place, save. The shared backbone of every
    /// single-review mutation.
    fn with_review<F>(&self, id: &str, mutate: F) -> Result<Review, CatalogError>
    where
        F: FnOnce(&mut Review),
    {
        let mut reviews = self.store.load();
        let review = reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CatalogError::ReviewNotFound { id: id.to_string() })?;
        mutate(review);
        let changed = review.clone();
        self.store.save(&reviews)?;
        Ok(changed)
    }
}

fn validate_form(form: &ReviewForm) -> Result<(), CatalogError> {
    if form.title.trim().is_empty() {
        return Err(CatalogError::invalid("title cannot be empty"));
    }
    if form.body.trim().is_empty() {
        return Err(CatalogError::invalid("review text cannot be empty"));
    }
    if !(1.0..=5.0).contains(&form.rating) {
        return Err(CatalogError::invalid(format!(
            "rating {} is outside 1.0-5.0",
            form.rating
        )));
    }
    if let Some(year) = form.year {
        let current = Utc::now().year();
        if year < MIN_YEAR || i32::from(year) > current {
            return Err(CatalogError::invalid(format!(
                "year {year} is outside {MIN_YEAR}-{current}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn open_repo() -> (TempDir, ReviewRepository) {
        let dir = TempDir::new().unwrap();
        let store = ReviewStore::new(dir.path().join("reviews.json"));
        (dir, ReviewRepository::new(store))
    }

    fn open_repo_with(reviews: Vec<Review>) -> (TempDir, ReviewRepository) {
        let dir = TempDir::new().unwrap();
        let store = ReviewStore::new(dir.path().join("reviews.json"));
        store.save(&reviews).unwrap();
        (dir, ReviewRepository::new(store))
    }

    fn movie_form(title: &str, rating: f32) -> ReviewForm {
        ReviewForm {
            title: title.to_string(),
            kind: MediaKind::Movie,
            rating,
            body: format!("Thoughts on {title}."),
            ..ReviewForm::default()
        }
    }

    fn full_form(title: &str, kind: MediaKind, rating: f32, year: u16, tags: &[&str]) -> ReviewForm {
        ReviewForm {
            year: Some(year),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            kind,
            ..movie_form(title, rating)
        }
    }

    fn stored(id: &str, rating: f32, day: u32) -> Review {
        let created = Utc.with_ymd_and_hms(2024, 3, day, 10, 0, 0).unwrap();
        Review::from_form(id.to_string(), movie_form(id, rating), created)
    }

    fn draft(content: &str) -> CommentDraft {
        CommentDraft {
            user_id: "me".to_string(),
            user_name: "Me".to_string(),
            user_avatar: None,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let (_dir, repo) = open_repo();
        let mut ids = HashSet::new();
        for i in 0..100 {
            let review = repo.create(movie_form(&format!("Movie {i}"), 3.0)).unwrap();
            assert!(ids.insert(review.id));
        }
        assert_eq!(repo.get_all().len(), 100);
    }

    #[test]
    fn test_create_prepends() {
        let (_dir, repo) = open_repo();
        repo.create(movie_form("First", 3.0)).unwrap();
        repo.create(movie_form("Second", 4.0)).unwrap();

        let all = repo.get_all();
        assert_eq!(all[0].title, "Second");
        assert_eq!(all[1].title, "First");
    }

    #[test]
    fn test_create_then_get_preserves_fields() {
        let (_dir, repo) = open_repo();
        let form = full_form("Arrival", MediaKind::Movie, 4.5, 2016, &["sci-fi"]);
        let created = repo.create(form).unwrap();

        let fetched = repo.get_by_id(&created.id).unwrap();
        assert_eq!(fetched, created);
        // f32 survives the JSON round trip exactly for in-range ratings.
        assert_eq!(fetched.rating, 4.5);
    }

    #[test]
    fn test_get_by_id_missing_is_not_found() {
        let (_dir, repo) = open_repo();
        let err = repo.get_by_id("nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_merges_optionals() {
        let (_dir, repo) = open_repo();
        let created = repo
            .create(full_form("Arrival", MediaKind::Movie, 4.0, 2016, &["sci-fi"]))
            .unwrap();

        // Patch only the required fields; the optionals stay.
        let updated = repo.update(&created.id, movie_form("Arrival", 5.0)).unwrap();
        assert_eq!(updated.rating, 5.0);
        assert_eq!(updated.year, Some(2016));
        assert_eq!(updated.tags, vec!["sci-fi"]);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.last_touched() >= created.last_touched());

        // And the merge is what got persisted.
        assert_eq!(repo.get_by_id(&created.id).unwrap(), updated);
    }

    #[test]
    fn test_mutations_on_missing_id_leave_collection_unchanged() {
        let (_dir, repo) = open_repo();
        repo.create(movie_form("Heat", 5.0)).unwrap();
        let before = repo.get_all();

        assert!(repo
            .update("ghost", movie_form("X", 3.0))
            .unwrap_err()
            .is_not_found());
        assert!(repo.like("ghost").unwrap_err().is_not_found());
        assert!(repo.add_comment("ghost", draft("hi")).unwrap_err().is_not_found());
        assert!(repo.delete_comment("ghost", "c1").unwrap_err().is_not_found());

        assert_eq!(repo.get_all(), before);
    }

    #[test]
    fn test_delete_reports_whether_removed() {
        let (_dir, repo) = open_repo();
        let created = repo.create(movie_form("Heat", 5.0)).unwrap();
        repo.create(movie_form("Ronin", 4.0)).unwrap();

        assert!(repo.delete(&created.id).unwrap());
        assert_eq!(repo.get_all().len(), 1);
        assert!(repo.get_by_id(&created.id).unwrap_err().is_not_found());

        // Second delete finds nothing and says so.
        assert!(!repo.delete(&created.id).unwrap());
        assert_eq!(repo.get_all().len(), 1);
    }

    #[test]
    fn test_like_increments_and_persists() {
        let (_dir, repo) = open_repo();
        let created = repo.create(movie_form("Heat", 5.0)).unwrap();
        assert_eq!(created.likes, 0);

        repo.like(&created.id).unwrap();
        let after = repo.like(&created.id).unwrap();
        assert_eq!(after.likes, 2);
        assert_eq!(repo.get_by_id(&created.id).unwrap().likes, 2);
    }

    #[test]
    fn test_comment_lifecycle() {
        let (_dir, repo) = open_repo();
        let created = repo.create(movie_form("Heat", 5.0)).unwrap();

        let with_comment = repo
            .add_comment(&created.id, draft("The diner scene."))
            .unwrap();
        assert_eq!(with_comment.comments.len(), 1);
        let comment_id = with_comment.comments[0].id.clone();
        assert!(!comment_id.is_empty());

        let after_remove = repo.delete_comment(&created.id, &comment_id).unwrap();
        assert!(after_remove.comments.is_empty());
        assert!(repo.get_by_id(&created.id).unwrap().comments.is_empty());
    }

    #[test]
    fn test_delete_unknown_comment_is_a_no_op() {
        let (_dir, repo) = open_repo();
        let created = repo.create(movie_form("Heat", 5.0)).unwrap();
        repo.add_comment(&created.id, draft("Keep me.")).unwrap();

        let review = repo.delete_comment(&created.id, "no-such-comment").unwrap();
        assert_eq!(review.comments.len(), 1);
    }

    #[test]
    fn test_blank_comment_rejected() {
        let (_dir, repo) = open_repo();
        let created = repo.create(movie_form("Heat", 5.0)).unwrap();
        let err = repo.add_comment(&created.id, draft("   ")).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { .. }));
    }

    #[test]
    fn test_validation_rejects_bad_forms() {
        let (_dir, repo) = open_repo();

        assert!(repo.create(movie_form("  ", 3.0)).is_err());
        assert!(repo.create(movie_form("Heat", 0.5)).is_err());
        assert!(repo.create(movie_form("Heat", 5.5)).is_err());

        let mut too_old = movie_form("Heat", 3.0);
        too_old.year = Some(1850);
        assert!(repo.create(too_old).is_err());

        let mut blank_body = movie_form("Heat", 3.0);
        blank_body.body = "\n  ".to_string();
        assert!(repo.create(blank_body).is_err());

        // Nothing was written by any of the rejected forms.
        assert!(repo.get_all().is_empty());
    }

    #[test]
    fn test_query_by_tag_kind_and_year() {
        let (_dir, repo) = open_repo();
        repo.create(full_form("Dune", MediaKind::Movie, 4.0, 2021, &["sci-fi"]))
            .unwrap();
        repo.create(full_form(
            "Severance",
            MediaKind::Series,
            5.0,
            2022,
            &["sci-fi", "office"],
        ))
        .unwrap();
        repo.create(full_form("Heat", MediaKind::Movie, 5.0, 1995, &["crime"]))
            .unwrap();

        let sci_fi = repo.by_tag("sci-fi");
        assert_eq!(sci_fi.len(), 2);
        // Tag match is exact containment, not substring.
        assert!(repo.by_tag("sci").is_empty());

        let series = repo.by_kind(MediaKind::Series);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].title, "Severance");

        let from_2021 = repo.by_year(2021);
        assert_eq!(from_2021.len(), 1);
        assert_eq!(from_2021[0].title, "Dune");
    }

    #[test]
    fn test_rating_range_is_inclusive() {
        let (_dir, repo) = open_repo();
        for (title, rating) in [("A", 1.0), ("B", 2.0), ("C", 3.5), ("D", 4.0), ("E", 5.0)] {
            repo.create(movie_form(title, rating)).unwrap();
        }

        let mid: Vec<String> = repo
            .by_rating_range(2.0, 4.0)
            .into_iter()
            .map(|r| r.title)
            .collect();
        // Newest-first collection order, bounds included.
        assert_eq!(mid, vec!["D", "C", "B"]);
    }

    #[test]
    fn test_most_liked_ranking() {
        let mut a = stored("a", 3.0, 1);
        let mut b = stored("b", 3.0, 2);
        let mut c = stored("c", 3.0, 3);
        let mut d = stored("d", 3.0, 4);
        a.likes = 5;
        b.likes = 1;
        c.likes = 9;
        d.likes = 3;

        let (_dir, repo) = open_repo_with(vec![a, b, c, d]);
        let top: Vec<u64> = repo.most_liked(2).into_iter().map(|r| r.likes).collect();
        assert_eq!(top, vec![9, 5]);
    }

    #[test]
    fn test_most_commented_ranking() {
        let (_dir, repo) = open_repo();
        let quiet = repo.create(movie_form("Quiet", 3.0)).unwrap();
        let busy = repo.create(movie_form("Busy", 3.0)).unwrap();
        repo.add_comment(&busy.id, draft("one")).unwrap();
        repo.add_comment(&busy.id, draft("two")).unwrap();
        repo.add_comment(&quiet.id, draft("only")).unwrap();

        let ranked: Vec<String> = repo
            .most_commented(2)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(ranked, vec!["Busy", "Quiet"]);
    }

    #[test]
    fn test_most_recent_orders_by_creation() {
        let reviews = vec![
            stored("oldest", 3.0, 1),
            stored("newest", 3.0, 20),
            stored("middle", 3.0, 10),
        ];
        let (_dir, repo) = open_repo_with(reviews);

        let ids: Vec<String> = repo.most_recent(2).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["newest", "middle"]);
    }

    #[test]
    fn test_review_lifecycle_end_to_end() {
        let (_dir, repo) = open_repo();

        let form = ReviewForm {
            title: "Arrival".to_string(),
            kind: MediaKind::Movie,
            rating: 5.0,
            body: "Language as time travel. Still hits.".to_string(),
            director: Some("Denis Villeneuve".to_string()),
            year: Some(2016),
            tags: Some(vec!["sci-fi".to_string()]),
            ..ReviewForm::default()
        };
        let created = repo.create(form).unwrap();

        assert!(repo.get_all().iter().any(|r| r.title == "Arrival"));

        repo.like(&created.id).unwrap();
        let liked = repo.like(&created.id).unwrap();
        assert_eq!(liked.likes, 2);

        let commented = repo
            .add_comment(&created.id, draft("Watched it twice in one week."))
            .unwrap();
        assert_eq!(commented.comments.len(), 1);

        let stats = repo.stats();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.movies, 1);
        assert_eq!(stats.series, 0);
        assert!((stats.avg_rating - 5.0).abs() < 1e-9);

        assert!(repo.delete(&created.id).unwrap());
        let stats = repo.stats();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.avg_rating, 0.0);
    }

    #[test]
    fn test_initialize_seeds_then_stays_quiet() {
        let (_dir, repo) = open_repo();
        let seed = vec![stored("s1", 4.0, 1)];

        assert!(repo.initialize(&seed).unwrap());
        assert!(!repo.initialize(&seed).unwrap());
        assert_eq!(repo.get_all().len(), 1);
    }
}
