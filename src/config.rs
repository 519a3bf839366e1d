//! Configuration types for tour-dl
//!
//! Settings are grouped into sub-configs by concern. Every field carries a
//! serde default so a partial (or absent) configuration file still yields a
//! usable [`Config`]. Template fields use named `{placeholder}` tokens filled
//! by [`crate::utils::fill_template`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Database connection settings for the two content schemas
///
/// The content schema holds the tour/section/page hierarchy; the media
/// schema holds the file records behind each media id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database server hostname
    #[serde(default = "default_db_host")]
    pub host: String,

    /// Name of the content schema
    #[serde(default = "default_content_db")]
    pub content_db: String,

    /// Name of the media schema
    #[serde(default = "default_media_db")]
    pub media_db: String,

    /// Username for both schemas
    #[serde(default)]
    pub username: String,

    /// Password for both schemas
    #[serde(default)]
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            content_db: default_content_db(),
            media_db: default_media_db(),
            username: String::new(),
            password: String::new(),
        }
    }
}

/// Secure-copy transfer settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Remote username substituted for `{user}`
    #[serde(default)]
    pub user: String,

    /// Remote password substituted for `{password}`
    #[serde(default)]
    pub password: String,

    /// Command template with `{password}`, `{user}`, `{remote}` and
    /// `{local}` placeholders. Split on spaces after substitution, so
    /// substituted values must not contain spaces themselves.
    #[serde(default = "default_transfer_command")]
    pub command: String,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            user: String::new(),
            password: String::new(),
            command: default_transfer_command(),
        }
    }
}

/// Media location templates and output placement
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Per-directory manifest URL template; `{path}` is the storage path
    /// trimmed of slashes
    #[serde(default = "default_manifest_url")]
    pub manifest_url: String,

    /// Base media directory template; `{path}` is the raw storage path
    #[serde(default = "default_media_dir")]
    pub media_dir: String,

    /// Archive directory template; `{file}` is the suffix captured from the
    /// manifest's archive marker line
    #[serde(default = "default_archive_dir")]
    pub archive_dir: String,

    /// Directory under which the per-run output tree is created
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            manifest_url: default_manifest_url(),
            media_dir: default_media_dir(),
            archive_dir: default_archive_dir(),
            output_root: default_output_root(),
        }
    }
}

/// Main configuration for tour-dl
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Database connection settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Secure-copy transfer settings
    #[serde(default)]
    pub transfer: TransferConfig,

    /// Media templates and output placement
    #[serde(default)]
    pub media: MediaConfig,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read {}: {}", path.display(), e),
            key: None,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Load configuration from a JSON file, falling back to defaults when
    /// the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

fn default_db_host() -> String {
    "wit.uchicago.edu".to_string()
}

fn default_content_db() -> String {
    "docent".to_string()
}

fn default_media_db() -> String {
    "docent_media".to_string()
}

fn default_transfer_command() -> String {
    "sshpass -p {password} scp {user}@wit.uchicago.edu:{remote} {local}".to_string()
}

fn default_manifest_url() -> String {
    "http://new.web-docent.org/modules/media/{path}/log.txt".to_string()
}

fn default_media_dir() -> String {
    "/var/www/vhosts/cwd/modules/media/{path}".to_string()
}

fn default_archive_dir() -> String {
    "/data/cmap/med_arc/*{file}".to_string()
}

fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}
