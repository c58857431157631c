//! Site configuration for the GridShift content toolkit.
//!
//! Config lives at `<site root>/gridshift.toml`. Every field has a default, so a
//! site without a config file uses the conventional layout. Relative paths in
//! the file are resolved against the site root.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};
use crate::types::DEFAULT_FEATURED_LIMIT;

/// Config file name, looked up at the site root.
pub const CONFIG_FILE_NAME: &str = "gridshift.toml";

// ---------------------------------------------------------------------------
// Config structs (matching gridshift.toml schema)
// ---------------------------------------------------------------------------

/// Top-level site config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Content directories.
    #[serde(default)]
    pub content: ContentConfig,

    /// Public asset root used by the asset validator.
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Home page promotion settings.
    #[serde(default)]
    pub home: HomeConfig,
}

/// `[content]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory of project Markdown files.
    #[serde(default = "default_projects_dir")]
    pub projects_dir: PathBuf,

    /// Directory of member JSON files.
    #[serde(default = "default_members_dir")]
    pub members_dir: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            projects_dir: default_projects_dir(),
            members_dir: default_members_dir(),
        }
    }
}

fn default_projects_dir() -> PathBuf {
    PathBuf::from("src/content/portfolio")
}
fn default_members_dir() -> PathBuf {
    PathBuf::from("src/content/team")
}

/// `[assets]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory that root-relative asset paths (`/content/...`) map onto.
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            public_dir: default_public_dir(),
        }
    }
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

/// `[home]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeConfig {
    /// How many records the home page promotes per kind.
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            featured_limit: default_featured_limit(),
        }
    }
}

fn default_featured_limit() -> usize {
    DEFAULT_FEATURED_LIMIT
}

// ---------------------------------------------------------------------------
// Resolved paths (runtime, config joined onto the site root)
// ---------------------------------------------------------------------------

/// Absolute locations derived from a [`SiteConfig`] and a site root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    pub projects_dir: PathBuf,
    pub members_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl SiteConfig {
    /// Join every configured directory onto `root`. Absolute paths are kept as-is.
    pub fn resolve(&self, root: &Path) -> SitePaths {
        SitePaths {
            projects_dir: root.join(&self.content.projects_dir),
            members_dir: root.join(&self.content.members_dir),
            public_dir: root.join(&self.assets.public_dir),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file for a site root.
pub fn config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load the site config. Returns defaults if the file does not exist.
pub fn load_config(root: &Path) -> Result<SiteConfig> {
    let path = config_file_path(root);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(SiteConfig::default());
    }

    load_config_from(&path)
}

/// Load the site config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<SiteConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;

    let config: SiteConfig = toml::from_str(&content)
        .map_err(|e| SiteError::config(format!("failed to parse {}: {e}", path.display())))?;

    if config.home.featured_limit == 0 {
        return Err(SiteError::config(format!(
            "{}: home.featured_limit must be at least 1",
            path.display()
        )));
    }

    Ok(config)
}

/// Write a default config file at the site root.
/// Refuses to overwrite an existing file. Returns the path to the created file.
pub fn init_config(root: &Path) -> Result<PathBuf> {
    let path = config_file_path(root);
    if path.exists() {
        return Err(SiteError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&SiteConfig::default())
        .map_err(|e| SiteError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SiteError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
