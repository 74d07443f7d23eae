//! Layered configuration for banis.
//!
//! Values come from (lowest to highest priority):
//! 1. Built-in defaults
//! 2. A config file: `.toml`, `.yaml`/`.yml` or `.json`, picked by extension.
//!    Without an explicit path, `config.toml` in the platform config
//!    directory is used if it exists.
//! 3. Environment variables prefixed `BANIS_`, with `__` between sections
//!    (`BANIS_API__BASE_URL`, `BANIS_DISPLAY__SHOW_SECONDARY`).

pub mod error;
mod sections;

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::error::{ErrorKind, Result};
pub use crate::sections::{ApiConfig, CacheConfig, DEFAULT_BASE_URL, DisplayConfig, LanguageConfig};

const ENV_PREFIX: &str = "BANIS_";
const ENV_SEPARATOR: &str = "__";
const CONFIG_FILE_NAME: &str = "config.toml";

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "iBanis", "banis")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub languages: LanguageConfig,
    pub cache: CacheConfig,
    pub display: DisplayConfig,
}
impl Config {
    /// Path of the config file read when none is given explicitly.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Loads and validates the configuration.
    ///
    /// An explicit `path` must exist; the default config file is optional.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(path)?.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        match path {
            Some(path) => {
                if !path.is_file() {
                    exn::bail!(ErrorKind::MissingFile(path.to_path_buf()));
                }
                figment = merge_file(figment, path)?;
            },
            None => {
                if let Some(path) = Self::default_path()
                    && path.is_file()
                {
                    figment = merge_file(figment, &path)?;
                }
            },
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR)))
    }

    /// Rejects values that deserialize fine but can't work.
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            exn::bail!(ErrorKind::InvalidValue {
                field: "api.base_url",
                reason: format!("expected an http(s) URL, found {base_url:?}"),
            });
        }
        if self.api.script.trim().is_empty() {
            exn::bail!(invalid("api.script", "must not be empty"));
        }
        if self.api.translations.is_empty() {
            exn::bail!(invalid("api.translations", "at least one language is required"));
        }
        if self.languages.translation.is_empty() {
            exn::bail!(invalid("languages.translation", "at least one language key is required"));
        }
        if self.languages.secondary.is_empty() {
            exn::bail!(invalid("languages.secondary", "at least one language key is required"));
        }
        if self.cache.path.as_os_str().is_empty() {
            exn::bail!(invalid("cache.path", "must not be empty"));
        }
        if self.cache.preload_marker.as_os_str().is_empty() {
            exn::bail!(invalid("cache.preload_marker", "must not be empty"));
        }
        if self.cache.path == self.cache.preload_marker {
            exn::bail!(invalid("cache.preload_marker", "must differ from cache.path"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ErrorKind {
    ErrorKind::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
    let figment = match extension.as_deref() {
        Some("toml") => figment.merge(Toml::file_exact(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        other => exn::bail!(ErrorKind::InvalidValue {
            field: "config file",
            reason: format!("unsupported format {:?} for {}", other.unwrap_or_default(), path.display()),
        }),
    };
    tracing::debug!(path = %path.display(), "Merged config file");
    Ok(figment)
}
