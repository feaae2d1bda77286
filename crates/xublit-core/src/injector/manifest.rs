use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::injector::InjectorError;

/// Describes a module, read from its `xublit.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// Unique module name
    pub name: String,

    /// Module version
    pub version: String,

    /// Human-readable description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Names of the modules this one must be wired after
    #[serde(default)]
    pub requires: Vec<String>,
}

impl ModuleManifest {
    /// Create a new module manifest
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            description: None,
            requires: Vec::new(),
        }
    }

    /// Add a required module
    pub fn requires(mut self, name: &str) -> Self {
        self.requires.push(name.to_string());
        self
    }

    /// Parse a manifest; `path` is only used for error reporting.
    pub fn parse(content: &str, path: &Path) -> Result<Self, InjectorError> {
        let manifest: ModuleManifest =
            serde_json::from_str(content).map_err(|e| InjectorError::Manifest {
                path: path.to_path_buf(),
                message: format!("Failed to parse manifest JSON: {}", e),
                source: Some(Box::new(e)),
            })?;

        if manifest.name.trim().is_empty() {
            return Err(InjectorError::Manifest {
                path: path.to_path_buf(),
                message: "Module name must not be empty".to_string(),
                source: None,
            });
        }
        if manifest.requires.iter().any(|dep| dep == &manifest.name) {
            return Err(InjectorError::Manifest {
                path: path.to_path_buf(),
                message: format!("Module '{}' requires itself", manifest.name),
                source: None,
            });
        }
        Ok(manifest)
    }
}

/// A module found during bootstrap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredModule {
    pub manifest: ModuleManifest,
    /// Directory holding the manifest
    pub dir: PathBuf,
    /// The include directory (after glob expansion) it was found under
    pub include_dir: PathBuf,
}

impl DiscoveredModule {
    pub fn name(&self) -> &str {
        &self.manifest.name
    }
}
