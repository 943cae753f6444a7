//! Configuration file (mdtidy.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ContentConfig {
    /// Content root scanned when no directory is given on the command line
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
        }
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("src/content/post/moon")
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::debug!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Resolve the content root: the command-line directory wins over config.
    pub fn content_dir(&self, arg: Option<PathBuf>) -> PathBuf {
        arg.unwrap_or_else(|| self.content.dir.clone())
    }
}
