use std::env::VarError;

use serde::Deserialize;

use crate::utils::Error;

const DEFAULT_CONFIG_PATH: &str = "./config.toml";

impl Config {

    pub fn init() -> Result<Self, Error> {
        let config_path = config_path_from(std::env::var("REELVIEW_CONFIG_PATH"))?;

        let config = config::Config::builder()
            // Add in config toml (optional, every section has defaults)
            .add_source(config::File::with_name(&config_path).required(false))
            // Add in settings from the environment (with a prefix of REELVIEW)
            .add_source(config::Environment::with_prefix("REELVIEW").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

// get config toml dir from env, with default; a non-unicode value is an error
fn config_path_from(var: Result<String, VarError>) -> Result<String, Error> {
    match var {
        Ok(path) => Ok(path),
        Err(VarError::NotPresent) => Ok(DEFAULT_CONFIG_PATH.to_string()),
        Err(e) => Err(e.into()),
    }
}

// ================================================================================================
// Models
// ================================================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[allow(unused)]
pub struct Config {
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub scroller: ScrollerConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
}

// ===============================================================================
// Logs
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String { "info".to_string() }

// ===============================================================================
// Storage
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct StorageConfig {
    /// Directory holding one `<key>.json` file per storage key.
    #[serde(default = "default_storage_dir")]
    pub dir: String,
    /// Key under which the whole review collection is persisted.
    #[serde(default = "default_reviews_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            key: default_reviews_key(),
        }
    }
}

fn default_storage_dir() -> String { "./data".to_string() }

fn default_reviews_key() -> String { crate::core::reviews::REVIEWS_KEY.to_string() }

// ===============================================================================
// TMDB
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct TmdbConfig {
    /// Remote posters are only fetched when a non-empty key is set.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    /// Prefix joined with each result's `poster_path`.
    #[serde(default = "default_tmdb_image_base")]
    pub image_base: String,
    #[serde(default = "default_tmdb_language")]
    pub language: String,
}

impl TmdbConfig {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_tmdb_base_url(),
            image_base: default_tmdb_image_base(),
            language: default_tmdb_language(),
        }
    }
}

fn default_tmdb_base_url() -> String { "https://api.themoviedb.org/3".to_string() }

fn default_tmdb_image_base() -> String { "https://image.tmdb.org/t/p/w500".to_string() }

fn default_tmdb_language() -> String { "en-US".to_string() }

// ===============================================================================
// Scroller
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct ScrollerConfig {
    /// When false, the marquee shows the catalog's own posters.
    #[serde(default = "default_true")]
    pub use_random_posters: bool,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self { use_random_posters: true }
    }
}

fn default_true() -> bool { true }

// ===============================================================================
// Widget
// ===============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[allow(unused)]
pub struct WidgetConfig {
    /// Search filter applied to the card grid.
    #[serde(default)]
    pub search: String,
    /// One review to submit before rendering.
    #[serde(default)]
    pub submit: Option<SubmitConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct SubmitConfig {
    #[serde(default)]
    pub movie_id: String,
    pub rating: String,
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_falls_back_to_defaults() {
        let cfg: Config = config::Config::builder()
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap();
        assert_eq!(cfg.logs.level, "info");
        assert_eq!(cfg.storage.key, "movie_reviews_v1");
        assert_eq!(cfg.storage.dir, "./data");
        assert!(cfg.tmdb.api_key().is_none());
        assert_eq!(cfg.tmdb.image_base, "https://image.tmdb.org/t/p/w500");
        assert!(cfg.scroller.use_random_posters);
        assert!(cfg.widget.submit.is_none());
    }

    #[test]
    fn config_path_defaults_when_unset() {
        assert_eq!(config_path_from(Err(VarError::NotPresent)).unwrap(), "./config.toml");
        assert_eq!(
            config_path_from(Ok("/etc/reelview.toml".to_string())).unwrap(),
            "/etc/reelview.toml"
        );
        let bad = VarError::NotUnicode(std::ffi::OsString::from("x"));
        assert!(matches!(config_path_from(Err(bad)), Err(Error::EnvVarError(_))));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let built = config::Config::builder()
            .add_source(config::File::from_str("[logs\nlevel =", config::FileFormat::Toml))
            .build()
            .map_err(Error::from);
        assert!(matches!(built, Err(Error::ConfigError(_))));
    }

    #[test]
    fn blank_api_key_counts_as_unset() {
        let tmdb = TmdbConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(tmdb.api_key().is_none());

        let tmdb = TmdbConfig {
            api_key: Some("abc123".to_string()),
            ..Default::default()
        };
        assert_eq!(tmdb.api_key(), Some("abc123"));
    }

    #[test]
    fn toml_sections_override_defaults() {
        let toml = r#"
            [logs]
            level = "debug"

            [tmdb]
            api_key = "k"
            language = "fr-FR"

            [scroller]
            use_random_posters = false

            [widget]
            search = "nobody"

            [widget.submit]
            movie_id = "m2"
            rating = "5"
            text = "Loved it"
        "#;
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap();
        assert_eq!(cfg.logs.level, "debug");
        assert_eq!(cfg.tmdb.language, "fr-FR");
        assert_eq!(cfg.tmdb.base_url, "https://api.themoviedb.org/3");
        assert!(!cfg.scroller.use_random_posters);
        assert_eq!(cfg.widget.search, "nobody");
        let submit = cfg.widget.submit.unwrap();
        assert_eq!(submit.movie_id, "m2");
        assert_eq!(submit.rating, "5");
    }
}
