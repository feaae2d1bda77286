use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use async_trait::async_trait;
use tokio::{fs, task};

use crate::injector::dependency;
use crate::injector::{
    BootstrapScope, DiscoveredModule, Injector, InjectorError, InjectorOptions, ModuleManifest,
};
use crate::kernel::constants;

type ScanFuture<'a> = Pin<Box<dyn Future<Output = Result<(), InjectorError>> + Send + 'a>>;

/// Injector that discovers modules from `xublit.json` manifests on disk.
///
/// Each include directory is searched recursively, in priority order; glob
/// patterns such as `node_modules/xublit-*` are expanded first. A directory
/// holding a manifest is a module and is not searched any deeper. If two
/// include directories provide the same module name, the first one wins; the
/// same name twice under one include directory is an error.
#[derive(Debug)]
pub struct DirectoryInjector {
    base_dir: PathBuf,
    include_dirs: Vec<PathBuf>,
    scope: BootstrapScope,
    modules: Vec<DiscoveredModule>,
}

impl DirectoryInjector {
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn include_dirs(&self) -> &[PathBuf] {
        &self.include_dirs
    }

    pub fn scope(&self) -> &BootstrapScope {
        &self.scope
    }

    /// Wired modules, dependencies first. Empty until bootstrapped.
    pub fn modules(&self) -> &[DiscoveredModule] {
        &self.modules
    }

    pub fn module(&self, name: &str) -> Option<&DiscoveredModule> {
        self.modules.iter().find(|module| module.name() == name)
    }

    async fn discover(&self) -> Result<Vec<DiscoveredModule>, InjectorError> {
        let mut modules: Vec<DiscoveredModule> = Vec::new();
        // Module name -> (priority of the include dir it came from, its directory)
        let mut seen: HashMap<String, (usize, PathBuf)> = HashMap::new();

        for (priority, include_dir) in self.include_dirs.iter().enumerate() {
            for root in expand_include_dir(include_dir).await? {
                let mut found = Vec::new();
                scan_directory_boxed(root.clone(), &mut found).await?;

                for (dir, manifest) in found {
                    if let Some((seen_priority, seen_dir)) = seen.get(&manifest.name) {
                        if *seen_priority == priority {
                            return Err(InjectorError::Manifest {
                                path: dir.join(constants::MODULE_MANIFEST_FILE),
                                message: format!(
                                    "Module '{}' is already defined in {}",
                                    manifest.name,
                                    seen_dir.display()
                                ),
                                source: None,
                            });
                        }
                        log::warn!(
                            "Skipping module '{}' in {}: already provided by {}",
                            manifest.name,
                            dir.display(),
                            seen_dir.display()
                        );
                        continue;
                    }
                    log::debug!("Discovered module '{}' in {}", manifest.name, dir.display());
                    seen.insert(manifest.name.clone(), (priority, dir.clone()));
                    modules.push(DiscoveredModule {
                        manifest,
                        dir,
                        include_dir: root.clone(),
                    });
                }
            }
        }
        Ok(modules)
    }
}

#[async_trait]
impl Injector for DirectoryInjector {
    fn assert_valid_include_dirs(dirs: &[PathBuf]) -> Result<(), InjectorError> {
        dirs.iter().try_for_each(|dir| validate_include_dir(dir))
    }

    fn new(options: InjectorOptions) -> Result<Self, InjectorError> {
        log::debug!("Include dirs: {:?}", options.include_dirs);
        Ok(Self {
            base_dir: options.base_dir,
            include_dirs: options.include_dirs,
            scope: options.bootstrap_scope,
            modules: Vec::new(),
        })
    }

    async fn bootstrap(&mut self) -> Result<(), InjectorError> {
        log::info!("Bootstrapping modules from {} include dir(s)", self.include_dirs.len());

        let discovered = self.discover().await?;
        let order = dependency::wiring_order(&discovered)?;
        let mut slots: Vec<Option<DiscoveredModule>> = discovered.into_iter().map(Some).collect();
        self.modules = order.into_iter().filter_map(|index| slots[index].take()).collect();

        for module in &self.modules {
            log::info!(
                "Wired module {} v{} from {}",
                module.manifest.name,
                module.manifest.version,
                module.dir.display()
            );
        }

        let count = self.modules.len();
        self.scope.app().once_started(move |_| {
            log::info!("{} module(s) ready", count);
            Ok(())
        });
        Ok(())
    }
}

fn is_glob(path: &str) -> bool {
    path.contains(['*', '?', '['])
}

fn validate_include_dir(dir: &Path) -> Result<(), InjectorError> {
    let invalid = |reason: String| InjectorError::InvalidIncludeDir {
        path: dir.to_path_buf(),
        reason,
    };

    if dir.as_os_str().is_empty() {
        return Err(invalid("path is empty".to_string()));
    }
    let Some(path) = dir.to_str() else {
        return Err(invalid("path is not valid UTF-8".to_string()));
    };
    if path.contains('\0') {
        return Err(invalid("path contains a NUL byte".to_string()));
    }
    if is_glob(path) {
        glob::Pattern::new(path).map_err(|e| invalid(format!("invalid glob pattern: {}", e)))?;
    }
    Ok(())
}

/// Resolve an include dir to the existing directories it names.
///
/// The longest leading part of the path that exists on disk is taken
/// literally, so glob characters in e.g. the base directory name are not
/// mistaken for a pattern. Only the remainder is expanded as a glob.
async fn expand_include_dir(include_dir: &Path) -> Result<Vec<PathBuf>, InjectorError> {
    let (prefix, rest) = split_existing_prefix(include_dir).await;

    if rest.as_os_str().is_empty() {
        return if is_dir(include_dir).await? {
            Ok(vec![include_dir.to_path_buf()])
        } else {
            log::debug!("Skipping include dir {}: not a directory", include_dir.display());
            Ok(Vec::new())
        };
    }

    let Some(rest) = rest.to_str().filter(|rest| is_glob(rest)) else {
        log::debug!("Skipping missing include dir {}", include_dir.display());
        return Ok(Vec::new());
    };
    let Some(prefix) = prefix.to_str() else {
        log::warn!(
            "Skipping include dir {}: cannot expand a pattern under a non UTF-8 path",
            include_dir.display()
        );
        return Ok(Vec::new());
    };

    let pattern = Path::new(&glob::Pattern::escape(prefix)).join(rest);
    let matches = glob_paths(include_dir, pattern).await?;

    let mut dirs = Vec::new();
    for path in matches {
        if is_dir(&path).await? {
            dirs.push(path);
        }
    }
    if dirs.is_empty() {
        log::debug!("No directories match include dir {}", include_dir.display());
    }
    Ok(dirs)
}

/// Split `path` into its longest existing prefix and the remaining components.
async fn split_existing_prefix(path: &Path) -> (PathBuf, PathBuf) {
    let mut prefix = PathBuf::new();
    let mut components = path.components();

    while let Some(component) = components.clone().next() {
        let candidate = prefix.join(component);
        if !fs::try_exists(&candidate).await.unwrap_or(false) {
            break;
        }
        prefix = candidate;
        components.next();
    }
    (prefix, components.as_path().to_path_buf())
}

async fn is_dir(path: &Path) -> Result<bool, InjectorError> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(InjectorError::io(e, "metadata", path)),
    }
}

/// Run a glob walk on the blocking pool.
async fn glob_paths(include_dir: &Path, pattern: PathBuf) -> Result<Vec<PathBuf>, InjectorError> {
    let include_dir = include_dir.to_path_buf();
    let task_dir = include_dir.clone();

    task::spawn_blocking(move || -> Result<Vec<PathBuf>, InjectorError> {
        let pattern = pattern.to_string_lossy();
        let paths = glob::glob(&pattern).map_err(|e| InjectorError::InvalidIncludeDir {
            path: task_dir.clone(),
            reason: format!("invalid glob pattern: {}", e),
        })?;
        paths
            .map(|entry| {
                entry.map_err(|e| {
                    let path = e.path().to_path_buf();
                    InjectorError::io(e.into_error(), "glob", path)
                })
            })
            .collect()
    })
    .await
    .map_err(|e| {
        InjectorError::Other(format!(
            "Expanding include dir {} did not complete: {}",
            include_dir.display(),
            e
        ))
    })?
}

fn scan_directory_boxed<'a>(
    dir: PathBuf,
    found: &'a mut Vec<(PathBuf, ModuleManifest)>,
) -> ScanFuture<'a> {
    Box::pin(scan_directory_inner(dir, found))
}

async fn scan_directory_inner(
    dir: PathBuf,
    found: &mut Vec<(PathBuf, ModuleManifest)>,
) -> Result<(), InjectorError> {
    let manifest_path = dir.join(constants::MODULE_MANIFEST_FILE);
    let has_manifest = fs::try_exists(&manifest_path)
        .await
        .map_err(|e| InjectorError::io(e, "try_exists", &manifest_path))?;

    if has_manifest {
        let content = fs::read_to_string(&manifest_path)
            .await
            .map_err(|e| InjectorError::io(e, "read_manifest", &manifest_path))?;
        let manifest = ModuleManifest::parse(&content, &manifest_path)?;
        found.push((dir, manifest));
        return Ok(());
    }

    let mut read_dir = fs::read_dir(&dir)
        .await
        .map_err(|e| InjectorError::io(e, "read_dir", &dir))?;

    // Symlinked directories are not followed to avoid loops.
    let mut subdirs = Vec::new();
    while let Some(entry) = read_dir
        .next_entry()
        .await
        .map_err(|e| InjectorError::io(e, "read_dir", &dir))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| InjectorError::io(e, "file_type", entry.path()))?;
        if file_type.is_dir() {
            subdirs.push(entry.path());
        }
    }
    subdirs.sort();

    for subdir in subdirs {
        scan_directory_boxed(subdir, found).await?;
    }
    Ok(())
}
