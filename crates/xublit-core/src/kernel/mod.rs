//! # Xublit Core Kernel
//!
//! The `kernel` module holds the application shell and its lifecycle.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Application Shell**: [`AppShell`](bootstrap::AppShell) resolves the
//!   configuration, owns the injector and sequences the lifecycle events
//!   `before:start`, `bootstrapped`, `started` and `stop`.
//! - **Lifecycle State**: [`LifecycleState`](lifecycle::LifecycleState), the
//!   explicit state that guards `start()` and `stop()`.
//! - **Halting**: the [`Terminate`](halt::Terminate) seam through which the
//!   shell ends the process.
//! - **Core Constants**: defaults and well-known names in `constants`.
//! - **Error Handling**: [`Error`](error::Error) and the `Result` alias.
pub mod bootstrap;
pub mod constants;
pub mod error;
pub mod halt;
pub mod lifecycle;

pub use bootstrap::AppShell;
pub use error::{Error, Result};
pub use halt::{ProcessExit, Terminate};
pub use lifecycle::LifecycleState;
