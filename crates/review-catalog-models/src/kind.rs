use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a review is about a movie or a series.
///
/// Serialized as "movie" / "series", which is also the form the TMDB
/// endpoints distinguish (movie vs. tv).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Movie,
    Series,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "series" | "show" | "tv" => Ok(MediaKind::Series),
            other => Err(format!(
                "invalid media kind '{}', expected 'movie' or 'series'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&MediaKind::Movie).unwrap(), "\"movie\"");
        assert_eq!(serde_json::to_string(&MediaKind::Series).unwrap(), "\"series\"");
        let kind: MediaKind = serde_json::from_str("\"series\"").unwrap();
        assert_eq!(kind, MediaKind::Series);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("movie".parse::<MediaKind>().unwrap(), MediaKind::Movie);
        assert_eq!("Series".parse::<MediaKind>().unwrap(), MediaKind::Series);
        assert_eq!("tv".parse::<MediaKind>().unwrap(), MediaKind::Series);
        assert!("documentary".parse::<MediaKind>().is_err());
    }
}
