/// Application name
pub const APP_NAME: &str = "xublit";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default source directory, relative to the base directory
pub const DEFAULT_SRC_DIR: &str = "./src";

/// Default configuration directory, relative to the base directory
pub const DEFAULT_ETC_DIR: &str = "./etc";

/// Whether npm-installed xublit packages are searched by default
pub const DEFAULT_INCLUDE_NPM_XUBLITS: bool = true;

/// Package directory searched for npm-installed xublit modules
pub const NODE_MODULES_DIR: &str = "node_modules";

/// Glob matching npm-installed xublit packages inside `node_modules`
pub const NPM_XUBLIT_PATTERN: &str = "xublit-*";

/// File name of a module manifest
pub const MODULE_MANIFEST_FILE: &str = "xublit.json";

/// Exit code used when the host halts
pub const HALT_EXIT_CODE: i32 = 0;
