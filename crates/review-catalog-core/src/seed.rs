use chrono::{NaiveDate, TimeZone, Utc};
use review_catalog_models::{MediaKind, Review, ReviewForm};

/// Sample reviews written into a brand-new catalog so the first `list`
/// shows something real instead of an empty table.
///
/// Readable ids make these easy to target from the command line while
/// trying the tool out (`reelog show sample-arcane`).
pub fn sample_reviews() -> Vec<Review> {
    vec![
        sample(
            "sample-invincible",
            ReviewForm {
                title: "Invincible".to_string(),
                kind: MediaKind::Series,
                year: Some(2021),
                rating: 5.0,
                body: "Starts like a standard superhero cartoon and then pulls the rug out.\nThe animation is uneven but the writing more than carries it."
                    .to_string(),
                date_watched: NaiveDate::from_ymd_opt(2024, 1, 12),
                tags: Some(vec![
                    "animation".to_string(),
                    "superhero".to_string(),
                ]),
                tmdb_id: Some(95557),
                ..ReviewForm::default()
            },
            (2024, 1, 13),
        ),
        sample(
            "sample-arcane",
            ReviewForm {
                title: "Arcane".to_string(),
                kind: MediaKind::Series,
                year: Some(2021),
                rating: 5.0,
                body: "Every frame looks hand-painted. You do not need to know anything about the game to be wrecked by the sister storyline."
                    .to_string(),
                date_watched: NaiveDate::from_ymd_opt(2023, 11, 20),
                tags: Some(vec!["animation".to_string(), "fantasy".to_string()]),
                tmdb_id: Some(94605),
                ..ReviewForm::default()
            },
            (2023, 11, 21),
        ),
        sample(
            "sample-spider-man",
            ReviewForm {
                title: "Spider-Man".to_string(),
                kind: MediaKind::Movie,
                director: Some("Sam Raimi".to_string()),
                year: Some(2002),
                rating: 4.0,
                body: "Rewatched after twenty years and the Goblin scenes still land. The effects aged, the sincerity did not."
                    .to_string(),
                date_watched: NaiveDate::from_ymd_opt(2023, 8, 5),
                tags: Some(vec!["superhero".to_string(), "rewatch".to_string()]),
                tmdb_id: Some(557),
                ..ReviewForm::default()
            },
            (2023, 8, 5),
        ),
        sample(
            "sample-spider-verse",
            ReviewForm {
                title: "Spider-Man: Into the Spider-Verse".to_string(),
                kind: MediaKind::Movie,
                director: Some("Bob Persichetti".to_string()),
                year: Some(2018),
                rating: 5.0,
                body: "The comic-panel look should not work in motion and somehow it does. Best take on the character, animated or not."
                    .to_string(),
                date_watched: NaiveDate::from_ymd_opt(2023, 9, 30),
                tags: Some(vec!["animation".to_string(), "superhero".to_string()]),
                tmdb_id: Some(324857),
                ..ReviewForm::default()
            },
            (2023, 10, 1),
        ),
    ]
}

fn sample(id: &str, form: ReviewForm, created: (i32, u32, u32)) -> Review {
    let (year, month, day) = created;
    let created_at = Utc
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    Review::from_form(id.to_string(), form, created_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_ids_are_unique() {
        let reviews = sample_reviews();
        let ids: HashSet<&str> = reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), reviews.len());
    }

    #[test]
    fn test_samples_start_without_engagement() {
        for review in sample_reviews() {
            assert_eq!(review.likes, 0);
            assert!(review.comments.is_empty());
            assert!((1.0..=5.0).contains(&review.rating));
        }
    }

    #[test]
    fn test_samples_cover_both_kinds() {
        let reviews = sample_reviews();
        assert!(reviews.iter().any(|r| r.kind == MediaKind::Movie));
        assert!(reviews.iter().any(|r| r.kind == MediaKind::Series));
    }
}
