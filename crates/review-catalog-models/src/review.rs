use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::comment::Comment;
use crate::kind::MediaKind;

/// A single user-authored review of a movie or series.
///
/// The whole collection is persisted as one JSON document; timestamps are
/// RFC 3339 strings on disk and `date_watched` is a plain calendar date
/// (`YYYY-MM-DD`), so reloading never shifts it across timezones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub title: String,
    pub kind: MediaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    /// Star rating in [1.0, 5.0]. Input is whole stars; fractional values
    /// are tolerated in storage so averages round-trip.
    pub rating: f32,
    /// The narrative text. May span multiple lines.
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_watched: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// TMDB catalog id used for enrichment lookups. Never validated locally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<u64>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Caller-supplied fields for creating or updating a review.
///
/// On update, the required fields always replace the stored values and the
/// optional fields replace them only when present; `None` means "keep what
/// is there".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReviewForm {
    pub title: String,
    pub kind: MediaKind,
    pub rating: f32,
    pub body: String,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub date_watched: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub tmdb_id: Option<u64>,
}

impl Review {
    /// Build a fresh review from form data. The id and timestamps are
    /// decided by the caller (the repository); every other default
    /// (`likes = 0`, no comments) is applied here, in one place.
    pub fn from_form(id: String, form: ReviewForm, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: form.title,
            kind: form.kind,
            director: form.director,
            year: form.year,
            rating: form.rating,
            body: form.body,
            image_url: form.image_url,
            date_watched: form.date_watched,
            tags: form.tags.unwrap_or_default(),
            tmdb_id: form.tmdb_id,
            likes: 0,
            comments: Vec::new(),
            created_at: now,
            updated_at: Some(now),
        }
    }

    /// Merge form data onto this review. Required fields always overwrite;
    /// optional fields overwrite only when present. `id`, `created_at`,
    /// `likes` and `comments` are untouched.
    pub fn apply_form(&mut self, form: ReviewForm, now: DateTime<Utc>) {
        self.title = form.title;
        self.kind = form.kind;
        self.rating = form.rating;
        self.body = form.body;
        if let Some(director) = form.director {
            self.director = Some(director);
        }
        if let Some(year) = form.year {
            self.year = Some(year);
        }
        if let Some(image_url) = form.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(date_watched) = form.date_watched {
            self.date_watched = Some(date_watched);
        }
        if let Some(tags) = form.tags {
            self.tags = tags;
        }
        if let Some(tmdb_id) = form.tmdb_id {
            self.tmdb_id = Some(tmdb_id);
        }
        self.updated_at = Some(now);
    }

    /// Timestamp of the last mutation, falling back to creation time for
    /// records that predate update tracking.
    pub fn last_touched(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_form() -> ReviewForm {
        ReviewForm {
            title: "Arrival".to_string(),
            kind: MediaKind::Movie,
            rating: 4.0,
            body: "Quiet, patient science fiction.".to_string(),
            director: Some("Denis Villeneuve".to_string()),
            year: Some(2016),
            image_url: None,
            date_watched: Some(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()),
            tags: Some(vec!["sci-fi".to_string(), "drama".to_string()]),
            tmdb_id: Some(329865),
        }
    }

    #[test]
    fn test_from_form_applies_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let review = Review::from_form("r1".to_string(), sample_form(), now);

        assert_eq!(review.id, "r1");
        assert_eq!(review.likes, 0);
        assert!(review.comments.is_empty());
        assert_eq!(review.created_at, now);
        assert_eq!(review.updated_at, Some(now));
        assert_eq!(review.tags, vec!["sci-fi", "drama"]);
    }

    #[test]
    fn test_apply_form_keeps_absent_optionals() {
        let created = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let mut review = Review::from_form("r1".to_string(), sample_form(), created);

        let later = Utc.with_ymd_and_hms(2024, 3, 11, 9, 30, 0).unwrap();
        let patch = ReviewForm {
            title: "Arrival".to_string(),
            kind: MediaKind::Movie,
            rating: 5.0,
            body: "Even better on rewatch.".to_string(),
            ..ReviewForm::default()
        };
        review.apply_form(patch, later);

        assert_eq!(review.rating, 5.0);
        assert_eq!(review.body, "Even better on rewatch.");
        // Absent optionals keep their previous values.
        assert_eq!(review.director.as_deref(), Some("Denis Villeneuve"));
        assert_eq!(review.year, Some(2016));
        assert_eq!(review.tags, vec!["sci-fi", "drama"]);
        // Creation time is immutable, updated_at moves forward.
        assert_eq!(review.created_at, created);
        assert_eq!(review.updated_at, Some(later));
    }

    #[test]
    fn test_serde_round_trip_preserves_watch_date() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let review = Review::from_form("r1".to_string(), sample_form(), now);

        let json = serde_json::to_string(&review).unwrap();
        assert!(json.contains("\"2024-03-09\""));

        let back: Review = serde_json::from_str(&json).unwrap();
        assert_eq!(back, review);
        assert_eq!(
            back.date_watched,
            Some(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
        );
    }

    #[test]
    fn test_deserialize_sparse_record() {
        // Records written before likes/comments existed still load.
        let json = r#"{
            "id": "old-1",
            "title": "Heat",
            "kind": "movie",
            "rating": 5.0,
            "body": "The diner scene alone.",
            "created_at": "2023-01-02T03:04:05Z"
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.likes, 0);
        assert!(review.comments.is_empty());
        assert!(review.tags.is_empty());
        assert_eq!(review.updated_at, None);
        assert_eq!(review.last_touched(), review.created_at);
    }
}
