use std::path::PathBuf;

use clap::{Parser, Subcommand};
use xublit_core::kernel::Result;
use xublit_core::AppOptions;

/// Xublit: a pluggable application host
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Read options from a JSON, YAML or TOML file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root directory of the application
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Module source directory, relative to the base directory
    #[arg(long, value_name = "DIR")]
    pub src_dir: Option<PathBuf>,

    /// Configuration directory, relative to the base directory
    #[arg(long, value_name = "DIR")]
    pub etc_dir: Option<PathBuf>,

    /// Extra directory (or glob) to search for modules; may be repeated
    #[arg(long = "include-dir", value_name = "DIR")]
    pub include_dirs: Vec<PathBuf>,

    /// Do not search node_modules/xublit-* for modules
    #[arg(long)]
    pub no_npm_xublits: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the directories searched for modules, highest priority first
    Dirs,
    /// Start the application and run until Ctrl-C
    Run {
        /// Stop right after starting
        #[arg(long)]
        once: bool,
    },
}

impl CliArgs {
    /// Options from `--config`, overlaid with the options given as flags.
    pub fn options(&self) -> Result<AppOptions> {
        let mut options = match &self.config {
            Some(path) => AppOptions::from_file(path)?,
            None => AppOptions::new(),
        };

        let mut flags = AppOptions::new();
        flags.base_dir = self.base_dir.clone();
        flags.src_dir = self.src_dir.clone();
        flags.etc_dir = self.etc_dir.clone();
        if self.no_npm_xublits {
            flags.include_npm_xublits = Some(false);
        }
        if !self.include_dirs.is_empty() {
            flags.include_dirs = Some(self.include_dirs.clone());
        }

        options.merge(&flags);
        Ok(options)
    }
}
