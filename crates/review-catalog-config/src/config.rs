use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: Option<TmdbConfig>,
    #[serde(default)]
    pub catalog: CatalogOptions,
}

/// Settings for the TMDB enrichment client. The API key itself lives in
/// the credentials file, not here.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    pub enabled: bool,
    #[serde(default = "default_language")]
    pub language: String,
    /// ISO 3166-1 country used to pick streaming providers.
    #[serde(default = "default_country")]
    pub country: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogOptions {
    /// Write the bundled sample reviews on first run.
    #[serde(default = "default_true")]
    pub seed_samples: bool,
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_country() -> String {
    "US".to_string()
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            seed_samples: default_true(),
        }
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            language: default_language(),
            country: default_country(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config, treating a missing file as defaults.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(tmdb) = &self.tmdb {
            if tmdb.enabled {
                if tmdb.language.is_empty() {
                    return Err(anyhow::anyhow!("tmdb.language cannot be empty"));
                }
                if tmdb.country.is_empty() {
                    return Err(anyhow::anyhow!("tmdb.country cannot be empty"));
                }
            }
        }
        Ok(())
    }

    /// TMDB settings if the integration is switched on.
    pub fn tmdb_enabled(&self) -> Option<&TmdbConfig> {
        self.tmdb.as_ref().filter(|t| t.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            tmdb: Some(TmdbConfig {
                enabled: true,
                language: "en-US".to_string(),
                country: "GB".to_string(),
            }),
            catalog: CatalogOptions { seed_samples: false },
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert!(loaded.tmdb.as_ref().unwrap().enabled);
        assert_eq!(loaded.tmdb.as_ref().unwrap().country, "GB");
        assert!(!loaded.catalog.seed_samples);
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let path = PathBuf::from("/nonexistent/reelog/config.toml");
        let config = Config::load_or_default(&path).unwrap();
        assert!(config.tmdb.is_none());
        assert!(config.catalog.seed_samples);
    }

    #[test]
    fn test_validate_rejects_blank_locale() {
        let config = Config {
            tmdb: Some(TmdbConfig {
                enabled: true,
                language: String::new(),
                country: "US".to_string(),
            }),
            catalog: CatalogOptions::default(),
        };
        assert!(config.validate().is_err());

        let disabled = Config {
            tmdb: Some(TmdbConfig {
                enabled: false,
                language: String::new(),
                country: String::new(),
            }),
            catalog: CatalogOptions::default(),
        };
        // Disabled integrations are not validated.
        assert!(disabled.validate().is_ok());
        assert!(disabled.tmdb_enabled().is_none());
    }
}
