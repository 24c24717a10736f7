//! Configuration management for claude-history.
//!
//! Handles:
//! - Highlighting preferences (detection, fallback language, user aliases)
//! - Rendering defaults for the `render` command

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};
use crate::highlight::resolve_language;
use crate::util::atomic_write;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Highlighting preferences.
    #[serde(default)]
    pub highlight: HighlightConfig,
    /// Rendering defaults.
    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    /// Load configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        let config_path = default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ViewerError::from_io_at(path, e))?;

        let config: Self = toml::from_str(&content).map_err(|e| ViewerError::InvalidConfig {
            message: format!("{}: {e}", path.display()),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that configured languages name built-in rule sets.
    pub fn validate(&self) -> Result<()> {
        if let Some(language) = &self.highlight.fallback_language {
            if resolve_language(language).is_none() {
                return Err(ViewerError::config(format!(
                    "highlight.fallback_language: unknown language '{language}'"
                )));
            }
        }
        for (alias, target) in &self.highlight.aliases {
            if resolve_language(target).is_none() {
                return Err(ViewerError::config(format!(
                    "highlight.aliases.{alias}: unknown language '{target}'"
                )));
            }
        }
        Ok(())
    }

    /// Layer an overlay on top of this config.
    ///
    /// Only keys present in the overlay file replace values here; aliases
    /// are added to the existing table.
    pub fn merge_from(&mut self, overlay: &ConfigOverlay) {
        let highlight = &overlay.highlight;
        if let Some(auto_detect) = highlight.auto_detect {
            self.highlight.auto_detect = auto_detect;
        }
        if highlight.fallback_language.is_some() {
            self.highlight.fallback_language = highlight.fallback_language.clone();
        }
        for (alias, target) in &highlight.aliases {
            self.highlight.aliases.insert(alias.clone(), target.clone());
        }

        let render = &overlay.render;
        if let Some(standalone) = render.standalone {
            self.render.standalone = standalone;
        }
        if let Some(dark_theme) = render.dark_theme {
            self.render.dark_theme = dark_theme;
        }
        if let Some(inline_code) = render.inline_code {
            self.render.inline_code = inline_code;
        }
        if render.title.is_some() {
            self.render.title = render.title.clone();
        }
    }

    /// Save configuration to a specific path.
    ///
    /// The file is written atomically; parent directories are created.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ViewerError::InvalidConfig {
            message: format!("Failed to serialize config: {e}"),
        })?;

        atomic_write(path, content.as_bytes())
    }
}

/// A config file read as a layer: absent keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigOverlay {
    /// `[highlight]` keys.
    #[serde(default)]
    pub highlight: HighlightOverlay,
    /// `[render]` keys.
    #[serde(default)]
    pub render: RenderOverlay,
}

impl ConfigOverlay {
    /// Read an overlay file. Parse errors are reported against the path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ViewerError::from_io_at(path, e))?;

        toml::from_str(&content).map_err(|e| ViewerError::InvalidConfig {
            message: format!("{}: {e}", path.display()),
        })
    }
}

/// Highlighting keys of an overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HighlightOverlay {
    /// See [`HighlightConfig::auto_detect`].
    #[serde(default)]
    pub auto_detect: Option<bool>,
    /// See [`HighlightConfig::fallback_language`].
    #[serde(default)]
    pub fallback_language: Option<String>,
    /// Aliases added to the base table.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// Rendering keys of an overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RenderOverlay {
    /// See [`RenderConfig::standalone`].
    #[serde(default)]
    pub standalone: Option<bool>,
    /// See [`RenderConfig::dark_theme`].
    #[serde(default)]
    pub dark_theme: Option<bool>,
    /// See [`RenderConfig::inline_code`].
    #[serde(default)]
    pub inline_code: Option<bool>,
    /// See [`RenderConfig::title`].
    #[serde(default)]
    pub title: Option<String>,
}

/// Highlighting preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Detect the language of untagged code blocks.
    #[serde(default = "default_true")]
    pub auto_detect: bool,
    /// Language used when nothing is declared and detection fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_language: Option<String>,
    /// Extra aliases (`alias = "language"`), resolved before built-in ones.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            auto_detect: true,
            fallback_language: None,
            aliases: BTreeMap::new(),
        }
    }
}

/// Rendering defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Wrap rendered output in a full HTML document.
    #[serde(default)]
    pub standalone: bool,
    /// Use the dark stylesheet for standalone documents.
    #[serde(default)]
    pub dark_theme: bool,
    /// Mark up inline `code` spans in message text.
    #[serde(default = "default_true")]
    pub inline_code: bool,
    /// Title for standalone documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            standalone: false,
            dark_theme: false,
            inline_code: true,
            title: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Get the default configuration path.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ViewerError::unsupported("config directory discovery"))?;

    Ok(config_dir.join("claude-history").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.highlight.auto_detect);
        assert!(config.highlight.fallback_language.is_none());
        assert!(config.render.inline_code);
        assert!(!config.render.standalone);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config
            .highlight
            .aliases
            .insert("mylang".to_string(), "python".to_string());
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: Config = toml::from_str(
            r#"
[highlight]
fallback_language = "bash"

[highlight.aliases]
tf = "bash"
"#,
        )
        .unwrap();
        assert!(parsed.highlight.auto_detect);
        assert_eq!(parsed.highlight.fallback_language.as_deref(), Some("bash"));
        assert_eq!(parsed.highlight.aliases.get("tf").map(String::as_str), Some("bash"));
        assert!(parsed.render.inline_code);
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.highlight
            .aliases
            .insert("a".to_string(), "rust".to_string());

        let mut overlay = ConfigOverlay::default();
        overlay.highlight.auto_detect = Some(false);
        overlay.highlight.fallback_language = Some("python".to_string());
        overlay
            .highlight
            .aliases
            .insert("b".to_string(), "go".to_string());
        overlay.render.dark_theme = Some(true);

        base.merge_from(&overlay);

        assert!(!base.highlight.auto_detect);
        assert_eq!(base.highlight.fallback_language.as_deref(), Some("python"));
        assert_eq!(base.highlight.aliases.len(), 2);
        assert!(base.render.dark_theme);
        assert!(base.render.inline_code);
    }

    #[test]
    fn test_merge_keeps_keys_absent_from_overlay() {
        let mut base = Config::default();
        base.highlight.auto_detect = false;
        base.render.dark_theme = true;
        base.render.inline_code = false;

        let overlay: ConfigOverlay = toml::from_str("[highlight.aliases]\ntf = \"bash\"\n").unwrap();
        assert_eq!(overlay.highlight.auto_detect, None);
        assert_eq!(overlay.render.dark_theme, None);

        base.merge_from(&overlay);

        assert!(!base.highlight.auto_detect);
        assert!(base.render.dark_theme);
        assert!(!base.render.inline_code);
        assert_eq!(base.highlight.aliases.get("tf").map(String::as_str), Some("bash"));
    }

    #[test]
    fn test_overlay_can_reset_to_default_value() {
        let mut base = Config::default();
        base.highlight.auto_detect = false;

        let overlay: ConfigOverlay = toml::from_str("[highlight]\nauto_detect = true\n").unwrap();
        base.merge_from(&overlay);

        assert!(base.highlight.auto_detect);
    }

    #[test]
    fn test_overlay_load_reports_parse_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("overlay.toml");
        std::fs::write(&path, "[render]\ndark_theme = 1\n").unwrap();

        let err = ConfigOverlay::load_from(&path).unwrap_err();
        assert!(matches!(err, ViewerError::InvalidConfig { .. }));
        assert!(err.to_string().contains("overlay.toml"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.render.standalone = true;
        config.render.title = Some("History".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[highlight]\nauto_detect = \"maybe\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ViewerError::InvalidConfig { .. }));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_unknown_alias_target_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[highlight.aliases]\ntf = \"terraform\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ViewerError::ConfigError { .. }));
        assert!(err.to_string().contains("terraform"));
    }

    #[test]
    fn test_validate_accepts_aliases_of_aliases() {
        let mut config = Config::default();
        config.highlight.fallback_language = Some("sh".to_string());
        config
            .highlight
            .aliases
            .insert("jsonc".to_string(), "json".to_string());
        assert!(config.validate().is_ok());
    }
}
