use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base path override, mainly for containers and tests.
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("REELOG_BASE_PATH").ok().map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("reelog");
        Ok(Self::from_base(base_dir))
    }

    /// Anchor every path under an explicit base directory. Config files sit
    /// at the base level, data in a subdirectory.
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            data_dir: base.join("data"),
            config_dir: base,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    /// The one file that holds the whole review collection.
    pub fn reviews_file(&self) -> PathBuf {
        self.data_dir.join("reviews.json")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }
        // Platform-specific paths (e.g. ~/.config/reelog on Linux), falling
        // back to the working directory when no home is available.
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".reelog")))
    }
}
