use review_catalog_models::{MediaKind, Review};
use serde::Serialize;

/// Aggregate counters over the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub movies: usize,
    pub series: usize,
    pub avg_rating: f64,
}

/// Computes catalog-wide counts and the mean rating.
///
/// An empty catalog reports an average of 0.0 rather than NaN so the value
/// is always printable and serializable.
pub fn catalog_stats(reviews: &[Review]) -> CatalogStats {
    let total = reviews.len();
    let movies = reviews
        .iter()
        .filter(|r| r.kind == MediaKind::Movie)
        .count();
    let series = total - movies;

    let avg_rating = if total == 0 {
        0.0
    } else {
        let sum: f64 = reviews.iter().map(|r| f64::from(r.rating)).sum();
        sum / total as f64
    };

    CatalogStats {
        total,
        movies,
        series,
        avg_rating,
    }
}

/// Buckets ratings into five whole-star bins, index 0 holding one-star
/// reviews. Fractional ratings round down, so 4.5 counts as four stars.
/// Anything outside 1..=5 is skipped instead of panicking on a bad record.
pub fn rating_histogram(reviews: &[Review]) -> [usize; 5] {
    let mut buckets = [0usize; 5];
    for review in reviews {
        let bucket = review.rating.floor() as i32 - 1;
        if (0..5).contains(&bucket) {
            buckets[bucket as usize] += 1;
        }
    }
    buckets
}

/// The highest-rated reviews, at most `limit` of them.
///
/// The sort is stable, so reviews sharing a rating keep their collection
/// order and repeated calls return the same slice.
pub fn top_rated(reviews: &[Review], limit: usize) -> Vec<&Review> {
    let mut ranked: Vec<&Review> = reviews.iter().collect();
    ranked.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use review_catalog_models::ReviewForm;

    fn rated(id: &str, kind: MediaKind, rating: f32) -> Review {
        let form = ReviewForm {
            title: format!("Title {id}"),
            kind,
            rating,
            body: "Fine.".to_string(),
            ..ReviewForm::default()
        };
        let created = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        Review::from_form(id.to_string(), form, created)
    }

    #[test]
    fn test_stats_on_empty_catalog() {
        let stats = catalog_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.movies, 0);
        assert_eq!(stats.series, 0);
        assert_eq!(stats.avg_rating, 0.0);
    }

    #[test]
    fn test_stats_counts_and_average() {
        let reviews = vec![
            rated("a", MediaKind::Movie, 2.0),
            rated("b", MediaKind::Series, 4.0),
        ];
        let stats = catalog_stats(&reviews);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.movies, 1);
        assert_eq!(stats.series, 1);
        assert!((stats.avg_rating - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_floors_fractional_ratings() {
        let reviews = vec![
            rated("a", MediaKind::Movie, 1.0),
            rated("b", MediaKind::Movie, 4.5),
            rated("c", MediaKind::Series, 4.0),
            rated("d", MediaKind::Series, 5.0),
        ];
        assert_eq!(rating_histogram(&reviews), [1, 0, 0, 2, 1]);
    }

    #[test]
    fn test_histogram_skips_out_of_range_ratings() {
        // A hand-edited file can hold ratings the validator never saw.
        let mut weird = rated("a", MediaKind::Movie, 3.0);
        weird.rating = 11.0;
        let mut zero = rated("b", MediaKind::Movie, 3.0);
        zero.rating = 0.2;

        let reviews = vec![weird, zero, rated("c", MediaKind::Movie, 3.0)];
        assert_eq!(rating_histogram(&reviews), [0, 0, 1, 0, 0]);
    }

    #[test]
    fn test_top_rated_orders_and_limits() {
        let reviews = vec![
            rated("a", MediaKind::Movie, 3.0),
            rated("b", MediaKind::Movie, 5.0),
            rated("c", MediaKind::Series, 4.0),
            rated("d", MediaKind::Series, 4.5),
        ];
        let top: Vec<&str> = top_rated(&reviews, 3)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(top, vec!["b", "d", "c"]);
    }

    #[test]
    fn test_top_rated_ties_keep_collection_order() {
        let reviews = vec![
            rated("first", MediaKind::Movie, 4.0),
            rated("second", MediaKind::Movie, 4.0),
            rated("third", MediaKind::Movie, 4.0),
        ];
        let top: Vec<&str> = top_rated(&reviews, 2)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(top, vec!["first", "second"]);
    }

    #[test]
    fn test_top_rated_with_limit_beyond_len() {
        let reviews = vec![rated("a", MediaKind::Movie, 3.0)];
        assert_eq!(top_rated(&reviews, 10).len(), 1);
    }
}
