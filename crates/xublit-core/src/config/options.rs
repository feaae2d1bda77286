use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

/// Raw startup options for an application shell.
///
/// Every field is optional; [`Configuration::resolve`](crate::config::Configuration::resolve)
/// substitutes defaults and validates. When deserialized, keys use the
/// camelCase names (`baseDir`, `srcDir`, `etcDir`, `includeNpmXublits`,
/// `includeDirs`) and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppOptions {
    /// Root directory of the application (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
    /// Source directory, relative to `base_dir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_dir: Option<PathBuf>,
    /// Configuration directory, relative to `base_dir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etc_dir: Option<PathBuf>,
    /// Whether `node_modules/xublit-*` is searched for modules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_npm_xublits: Option<bool>,
    /// Extra directories searched before the source directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_dirs: Option<Vec<PathBuf>>,
}

impl AppOptions {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn with_src_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.src_dir = Some(dir.into());
        self
    }

    pub fn with_etc_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.etc_dir = Some(dir.into());
        self
    }

    pub fn with_include_npm_xublits(mut self, include: bool) -> Self {
        self.include_npm_xublits = Some(include);
        self
    }

    /// Replace the explicit include directories
    pub fn with_include_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.include_dirs = Some(dirs.into_iter().map(Into::into).collect());
        self
    }

    /// Append one explicit include directory
    pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dirs.get_or_insert_with(Vec::new).push(dir.into());
        self
    }

    /// Overlay every option that is set in `other`
    pub fn merge(&mut self, other: &AppOptions) {
        if let Some(dir) = &other.base_dir {
            self.base_dir = Some(dir.clone());
        }
        if let Some(dir) = &other.src_dir {
            self.src_dir = Some(dir.clone());
        }
        if let Some(dir) = &other.etc_dir {
            self.etc_dir = Some(dir.clone());
        }
        if let Some(include) = other.include_npm_xublits {
            self.include_npm_xublits = Some(include);
        }
        if let Some(dirs) = &other.include_dirs {
            self.include_dirs = Some(dirs.clone());
        }
    }

    /// Parse options from a string in the given format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| ConfigError::Parse {
                format: "JSON",
                source: Box::new(e),
            }),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
                format: "YAML",
                source: Box::new(e),
            }),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| ConfigError::Parse {
                format: "TOML",
                source: Box::new(e),
            }),
        }
    }

    /// Load options from a configuration file, picking the format by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Loading {} options from {}", format.extension(), path.display());
        Self::parse(&content, format)
    }
}
