use banis_extract::Languages;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::project_dirs;

pub const DEFAULT_BASE_URL: &str = "https://api.banidb.com/v2";
const CACHE_FILE_NAME: &str = "cachedBanis.json";
const PRELOAD_MARKER_NAME: &str = "preloaded";

/// Where documents are fetched from and what the API is asked to include.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub script: String,
    pub translations: Vec<String>,
    pub transliterations: Vec<String>,
}
impl ApiConfig {
    /// URL of a single document, by its API identifier.
    ///
    /// ```
    /// use banis_config::ApiConfig;
    ///
    /// assert_eq!(
    ///     ApiConfig::default().bani_url(2),
    ///     "https://api.banidb.com/v2/banis/2?script=unicode&translation=en,hi&transliteration=hi",
    /// );
    /// ```
    pub fn bani_url(&self, id: u64) -> String {
        format!(
            "{}/banis/{id}?script={}&translation={}&transliteration={}",
            self.base_url.trim_end_matches('/'),
            self.script,
            self.translations.join(","),
            self.transliterations.join(","),
        )
    }
}
impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            script: "unicode".to_string(),
            translations: vec!["en".to_string(), "hi".to_string()],
            transliterations: vec!["hi".to_string()],
        }
    }
}

/// Response sub-keys searched for each auxiliary language, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    pub translation: Vec<String>,
    pub secondary: Vec<String>,
}
impl Default for LanguageConfig {
    fn default() -> Self {
        let Languages { translation, secondary } = Languages::default();
        Self { translation, secondary }
    }
}
impl From<&LanguageConfig> for Languages {
    fn from(config: &LanguageConfig) -> Self {
        Self {
            translation: config.translation.clone(),
            secondary: config.secondary.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// The single file holding every cached document.
    pub path: PathBuf,
    /// Presence of this file means the bulk preload has already run.
    pub preload_marker: PathBuf,
}
impl Default for CacheConfig {
    fn default() -> Self {
        // Falls back to the working directory on platforms without a home.
        let dir = project_dirs().map(|dirs| dirs.cache_dir().to_path_buf()).unwrap_or_default();
        Self {
            path: dir.join(CACHE_FILE_NAME),
            preload_marker: dir.join(PRELOAD_MARKER_NAME),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_translation: bool,
    /// Also decides whether a cached document without any secondary text
    /// counts as stale.
    pub show_secondary: bool,
}
impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_translation: true,
            show_secondary: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bani_url_uses_configured_languages() {
        let api = ApiConfig {
            base_url: "http://localhost:8080/v2/".to_string(),
            script: "gurmukhi".to_string(),
            translations: vec!["en".to_string()],
            transliterations: vec!["hi".to_string(), "en".to_string()],
        };
        assert_eq!(
            api.bani_url(31),
            "http://localhost:8080/v2/banis/31?script=gurmukhi&translation=en&transliteration=hi,en"
        );
    }

    #[test]
    fn test_languages_follow_config() {
        let config = LanguageConfig {
            translation: vec!["es".to_string()],
            secondary: vec!["pa".to_string()],
        };
        let languages = Languages::from(&config);
        assert_eq!(languages.translation, vec!["es"]);
        assert_eq!(languages.secondary, vec!["pa"]);
        assert_eq!(Languages::from(&LanguageConfig::default()), Languages::default());
    }

    #[test]
    fn test_cache_files_share_a_directory() {
        let cache = CacheConfig::default();
        assert!(cache.path.ends_with(CACHE_FILE_NAME));
        assert_eq!(cache.path.parent(), cache.preload_marker.parent());
    }
}
