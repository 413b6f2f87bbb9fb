use serde::{Deserialize, Serialize};
use statex_content_engine::{HeadingTiers, Sectionizer};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid first_heading_tag h{first} in {config_path}: must be h1, h2 or h3")]
    InvalidHeadingTier { config_path: PathBuf, first: u8 },
}

fn default_first_heading_tag() -> u8 {
    HeadingTiers::default().first_rank()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `.html`/`.json` articles
    pub articles_path: PathBuf,

    /// Title of the synthetic block for articles without headings.
    /// When unset the article's file name is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_title: Option<String>,

    /// Start with every top-level section collapsed
    #[serde(default)]
    pub initially_collapsed: bool,

    /// Rank of the shallowest section heading (2 means `h2`..=`h5`)
    #[serde(default = "default_first_heading_tag")]
    pub first_heading_tag: u8,
}

impl Config {
    pub fn new(articles_path: PathBuf) -> Self {
        Self {
            articles_path,
            fallback_title: None,
            initially_collapsed: false,
            first_heading_tag: default_first_heading_tag(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if HeadingTiers::starting_at(config.first_heading_tag).is_none() {
            return Err(ConfigError::InvalidHeadingTier {
                config_path: config_path.to_path_buf(),
                first: config.first_heading_tag,
            });
        }

        // Expand shell variables and tilde in the loaded articles path
        config.articles_path =
            Self::expand_path(&config.articles_path).unwrap_or(config.articles_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/statex-content");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Sectionizer for the configured heading tiers.
    ///
    /// Configs built in code are not validated, so an out-of-range tier falls
    /// back to the default `h2`..=`h5`.
    pub fn sectionizer(&self) -> Sectionizer {
        let tiers = HeadingTiers::starting_at(self.first_heading_tag).unwrap_or_default();
        Sectionizer::new(tiers)
    }

    /// Fallback title for an article, preferring the configured one.
    pub fn fallback_title_for<'a>(&'a self, article_name: &'a str) -> &'a str {
        self.fallback_title.as_deref().unwrap_or(article_name)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/statex-content/config.toml"));
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: Config = toml::from_str(r#"articles_path = "/srv/articles""#).unwrap();

        assert_eq!(config, Config::new(PathBuf::from("/srv/articles")));
        assert_eq!(config.first_heading_tag, 2);
        assert!(!config.initially_collapsed);
        assert_eq!(config.fallback_title, None);
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
articles_path = "/srv/articles"
fallback_title = "Article"
initially_collapsed = true
first_heading_tag = 3
"#,
        )
        .unwrap();

        assert_eq!(config.fallback_title.as_deref(), Some("Article"));
        assert!(config.initially_collapsed);
        assert_eq!(config.sectionizer().tiers().first_rank(), 3);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut original = Config::new(PathBuf::from("/tmp/test-articles"));
        original.initially_collapsed = true;

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_fallback_title_prefers_configured_value() {
        let mut config = Config::new(PathBuf::from("/a"));
        assert_eq!(config.fallback_title_for("launch-post"), "launch-post");

        config.fallback_title = Some("Article".to_string());
        assert_eq!(config.fallback_title_for("launch-post"), "Article");
    }

    #[test]
    fn test_out_of_range_tier_in_code_falls_back_to_default() {
        let mut config = Config::new(PathBuf::from("/a"));
        config.first_heading_tag = 9;
        assert_eq!(config.sectionizer().tiers(), HeadingTiers::default());
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("STATEX_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$STATEX_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path).unwrap();
        assert_eq!(expanded, PathBuf::from("/test/env/path/subdir"));

        unsafe {
            env::remove_var("STATEX_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        assert_eq!(Config::expand_path(&path).unwrap(), path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "articles_path = ").unwrap();

        let result = Config::load_from_path(&config_file);
        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_load_config_rejects_invalid_tier() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "articles_path = \"/a\"\nfirst_heading_tag = 5\n",
        )
        .unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidHeadingTier { first: 5, .. }
        ));
        assert!(err.to_string().contains("h5"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let mut test_config = Config::new(PathBuf::from("/tmp/test-articles"));
        test_config.fallback_title = Some("Article".to_string());

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_config_with_env_var_in_toml() {
        unsafe {
            env::set_var("STATEX_ARTICLES_ROOT", "/custom/articles");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "articles_path = \"$STATEX_ARTICLES_ROOT/blog\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.articles_path, PathBuf::from("/custom/articles/blog"));

        unsafe {
            env::remove_var("STATEX_ARTICLES_ROOT");
        }
    }
}
