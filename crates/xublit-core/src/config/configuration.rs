use std::path::{Path, PathBuf};

use crate::config::{AppOptions, ConfigError};
use crate::injector::Injector;
use crate::kernel::constants;
use crate::kernel::error::Result;
use crate::utils;

/// Finalized, read-only startup configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    base_dir: PathBuf,
    src_dir: PathBuf,
    etc_dir: PathBuf,
    include_npm_xublits: bool,
    include_dirs: Vec<PathBuf>,
}

impl Configuration {
    /// Resolve raw options into a configuration.
    ///
    /// `baseDir` is required and must be non-empty. Unset options take their
    /// defaults. The explicit include directories are checked with the
    /// injector's validator and copied, so later changes to `options` are
    /// not observed.
    pub fn resolve<I: Injector>(options: &AppOptions) -> Result<Self> {
        let base_dir = match &options.base_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir.clone(),
            _ => return Err(ConfigError::MissingOption { option: "baseDir" }.into()),
        };

        let include_dirs = options.include_dirs.clone().unwrap_or_default();
        I::assert_valid_include_dirs(&include_dirs)?;

        let config = Self {
            base_dir,
            src_dir: options
                .src_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_SRC_DIR)),
            etc_dir: options
                .etc_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_ETC_DIR)),
            include_npm_xublits: options
                .include_npm_xublits
                .unwrap_or(constants::DEFAULT_INCLUDE_NPM_XUBLITS),
            include_dirs,
        };
        log::debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn src_dir(&self) -> &Path {
        &self.src_dir
    }

    /// Reserved for collaborators; the shell itself never reads it.
    pub fn etc_dir(&self) -> &Path {
        &self.etc_dir
    }

    pub fn include_npm_xublits(&self) -> bool {
        self.include_npm_xublits
    }

    /// The explicit include directories, as configured
    pub fn include_dirs(&self) -> &[PathBuf] {
        &self.include_dirs
    }

    /// Directories searched for modules, highest priority first.
    ///
    /// Explicit include directories come first, then `base_dir/src_dir`, then
    /// `base_dir/node_modules/xublit-*` when npm xublits are included.
    pub fn derived_include_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.include_dirs.clone();
        dirs.push(utils::join(&self.base_dir, &self.src_dir));

        if self.include_npm_xublits {
            dirs.push(utils::join_all(
                &self.base_dir,
                [constants::NODE_MODULES_DIR, constants::NPM_XUBLIT_PATTERN],
            ));
        }
        dirs
    }
}
