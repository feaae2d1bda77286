//! Lifecycle shell of the xublit pluggable application host.
//!
//! An [`AppShell`] validates startup options, works out which directories
//! modules are discovered from, and drives a fixed sequence of lifecycle
//! events around a call to its [`Injector`]'s `bootstrap()`.
pub mod config;
pub mod event;
pub mod injector;
pub mod kernel;
pub mod utils;

// Re-export key public types/traits for easier use by the binary and modules
pub use config::{AppOptions, Configuration};
pub use event::{LifecycleEvent, ListenerError, ListenerId, ListenerResult};
pub use injector::{AppHandle, BootstrapScope, DirectoryInjector, Injector, InjectorError, InjectorOptions};
pub use kernel::error::Error as KernelError;
pub use kernel::{AppShell, LifecycleState, Terminate};
