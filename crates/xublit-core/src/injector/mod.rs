//! # Xublit Core Injector
//!
//! The injector is the collaborator that discovers modules in the include
//! directories and wires them together. The shell only relies on the
//! [`Injector`] trait:
//!
//! - a static validator for the configured include directories,
//! - construction from [`InjectorOptions`],
//! - `bootstrap()`, awaited once per `start()`.
//!
//! [`DirectoryInjector`] is the implementation shipped with the host: it reads
//! `xublit.json` module manifests and orders modules by their dependencies.
pub mod dependency;
pub mod directory;
pub mod error;
pub mod manifest;
pub mod scope;

use std::path::PathBuf;

use async_trait::async_trait;

pub use directory::DirectoryInjector;
pub use error::InjectorError;
pub use manifest::{DiscoveredModule, ModuleManifest};
pub use scope::{AppHandle, BootstrapScope};

/// Everything an injector is constructed from
#[derive(Debug, Clone)]
pub struct InjectorOptions {
    /// Root directory of the application
    pub base_dir: PathBuf,
    /// Directories (or glob patterns) to search, highest priority first
    pub include_dirs: Vec<PathBuf>,
    /// Values exposed to modules while they are bootstrapped
    pub bootstrap_scope: BootstrapScope,
}

/// Module discovery and wiring, as consumed by the application shell
#[async_trait]
pub trait Injector: Send + Sized + 'static {
    /// Reject malformed include directories before they are accepted.
    fn assert_valid_include_dirs(dirs: &[PathBuf]) -> Result<(), InjectorError>;

    /// Build the injector. Called exactly once per shell.
    fn new(options: InjectorOptions) -> Result<Self, InjectorError>;

    /// Discover, instantiate and wire the modules.
    async fn bootstrap(&mut self) -> Result<(), InjectorError>;
}

// Test module declaration
#[cfg(test)]
mod tests;
