use std::path::PathBuf;
use std::result::Result as StdResult;
use std::sync::Arc;

use crate::config::{AppOptions, Configuration};
use crate::event::emitter::SharedEmitter;
use crate::event::{LifecycleEvent, ListenerId, ListenerResult};
use crate::injector::{AppHandle, BootstrapScope, DirectoryInjector, Injector, InjectorError, InjectorOptions};
use crate::kernel::constants;
use crate::kernel::error::{Error, Result};
use crate::kernel::halt::{BoxedTerminator, ProcessExit, Terminate};
use crate::kernel::lifecycle::LifecycleState;

/// Lifecycle shell of a xublit application.
///
/// Owns the resolved [`Configuration`], the injector that discovers and wires
/// modules, and a private event emitter. Events are only ever fired by
/// [`start`](AppShell::start) and [`stop`](AppShell::stop); callers subscribe
/// through [`before_start`](AppShell::before_start),
/// [`after_bootstrap`](AppShell::after_bootstrap),
/// [`once_started`](AppShell::once_started) or the generic [`on`](AppShell::on).
///
/// The injector defaults to [`DirectoryInjector`]. Because defaults of type
/// parameters do not drive inference, name it when constructing:
/// `AppShell::<DirectoryInjector>::new(&options)`.
#[derive(Debug)]
pub struct AppShell<I: Injector = DirectoryInjector> {
    config: Arc<Configuration>,
    injector: I,
    events: SharedEmitter,
    handle: AppHandle,
    state: LifecycleState,
    terminator: BoxedTerminator,
}

impl<I: Injector> AppShell<I> {
    /// Resolve `options` and construct the injector with [`Injector::new`].
    pub fn new(options: &AppOptions) -> Result<Self> {
        Self::with_injector(options, I::new)
    }

    /// Resolve `options` and construct the injector with `build`.
    ///
    /// `build` receives the base directory, the derived include directories
    /// and the bootstrap scope. It is the only place the injector is created.
    pub fn with_injector<F>(options: &AppOptions, build: F) -> Result<Self>
    where
        F: FnOnce(InjectorOptions) -> StdResult<I, InjectorError>,
    {
        let config = Arc::new(Configuration::resolve::<I>(options)?);
        let events = SharedEmitter::new();
        let handle = AppHandle::new(Arc::clone(&config), events.clone());

        let injector = build(InjectorOptions {
            base_dir: config.base_dir().to_path_buf(),
            include_dirs: config.derived_include_dirs(),
            bootstrap_scope: BootstrapScope::new(handle.clone()),
        })?;

        log::info!(
            "Initialized {} v{} in {}",
            constants::APP_NAME,
            constants::APP_VERSION,
            config.base_dir().display()
        );

        Ok(Self {
            config,
            injector,
            events,
            handle,
            state: LifecycleState::Constructed,
            terminator: BoxedTerminator(Box::new(ProcessExit)),
        })
    }

    /// Replace how the process is ended by [`halt`](AppShell::halt).
    pub fn with_terminator(mut self, terminator: impl Terminate + 'static) -> Self {
        self.terminator = BoxedTerminator(Box::new(terminator));
        self
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Directories the injector searches, highest priority first
    pub fn include_dirs(&self) -> Vec<PathBuf> {
        self.config.derived_include_dirs()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn injector(&self) -> &I {
        &self.injector
    }

    /// Emit-less view of this shell, the same one handed to the injector
    pub fn handle(&self) -> AppHandle {
        self.handle.clone()
    }

    /// Run `listener` once, before the injector bootstraps.
    pub fn before_start<F>(&self, listener: F) -> &Self
    where
        F: FnOnce(&LifecycleEvent) -> ListenerResult + Send + 'static,
    {
        self.handle.before_start(listener);
        self
    }

    /// Run `listener` once, when every module has been bootstrapped.
    ///
    /// This is the place for modules to do their startup work: connecting to
    /// databases, binding servers and so on.
    pub fn after_bootstrap<F>(&self, listener: F) -> &Self
    where
        F: FnOnce(&LifecycleEvent) -> ListenerResult + Send + 'static,
    {
        self.handle.after_bootstrap(listener);
        self
    }

    /// Run `listener` once, when the application has started.
    pub fn once_started<F>(&self, listener: F) -> &Self
    where
        F: FnOnce(&LifecycleEvent) -> ListenerResult + Send + 'static,
    {
        self.handle.once_started(listener);
        self
    }

    /// Subscribe `listener` to every emission of `event`.
    pub fn on<F>(&self, event: impl Into<LifecycleEvent>, listener: F) -> ListenerId
    where
        F: Fn(&LifecycleEvent) -> ListenerResult + Send + Sync + 'static,
    {
        self.handle.on(event, listener)
    }

    /// Subscribe `listener` to the next emission of `event`.
    pub fn once<F>(&self, event: impl Into<LifecycleEvent>, listener: F) -> ListenerId
    where
        F: FnOnce(&LifecycleEvent) -> ListenerResult + Send + 'static,
    {
        self.handle.once(event, listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.handle.remove_listener(id)
    }

    pub fn listener_count(&self, event: impl Into<LifecycleEvent>) -> usize {
        self.handle.listener_count(event)
    }

    /// Always fails: lifecycle events only come from `start()` and `stop()`.
    pub fn emit(&self, event: impl Into<LifecycleEvent>) -> Result<()> {
        let event = event.into();
        log::warn!("Rejected external emit of '{}'", event);
        Err(Error::Misuse {
            operation: "emit",
            message: "No.".to_string(),
        })
    }

    /// Start the application.
    ///
    /// Emits `before:start`, bootstraps the injector, then emits
    /// `bootstrapped` and `started`. Any failure aborts the remaining steps.
    /// Only valid once, from [`LifecycleState::Constructed`].
    pub async fn start(&mut self) -> Result<&mut Self> {
        if !self.state.can_start() {
            return Err(Error::Lifecycle {
                operation: "start",
                state: self.state,
                message: "the application can only be started once".to_string(),
            });
        }

        log::info!("Starting {}...", constants::APP_NAME);
        self.transition(LifecycleState::Starting);
        self.events.emit(&LifecycleEvent::BeforeStart)?;

        self.injector.bootstrap().await?;
        self.transition(LifecycleState::Bootstrapped);
        self.events.emit(&LifecycleEvent::Bootstrapped)?;

        self.transition(LifecycleState::Started);
        self.events.emit(&LifecycleEvent::Started)?;
        log::info!("{} started", constants::APP_NAME);

        Ok(self)
    }

    /// Stop the application.
    ///
    /// Delivers `stop` to the listeners registered so far, then halts the
    /// process as if `halt(true)` were the last `stop` listener.
    pub fn stop(&mut self) -> Result<&mut Self> {
        if !self.state.can_stop() {
            return Err(Error::Lifecycle {
                operation: "stop",
                state: self.state,
                message: "the application is already stopping".to_string(),
            });
        }

        log::info!("Stopping {}...", constants::APP_NAME);
        self.transition(LifecycleState::Stopping);
        self.events.emit(&LifecycleEvent::Stop)?;

        Ok(self.halt(true))
    }

    /// Exit the process, but only if `confirm` is exactly `true`.
    ///
    /// `false` and `None` leave the shell untouched.
    pub fn halt(&mut self, confirm: impl Into<Option<bool>>) -> &mut Self {
        if confirm.into() != Some(true) {
            log::debug!("Ignoring unconfirmed halt");
            return self;
        }

        self.transition(LifecycleState::Halted);
        log::info!("Halting {}", constants::APP_NAME);
        self.terminator.0.terminate(constants::HALT_EXIT_CODE);
        self
    }

    fn transition(&mut self, next: LifecycleState) {
        log::debug!("Lifecycle: {} -> {}", self.state, next);
        self.state = next;
    }
}
