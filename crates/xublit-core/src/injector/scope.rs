use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Configuration;
use crate::event::emitter::SharedEmitter;
use crate::event::{LifecycleEvent, ListenerId, ListenerResult};

/// A view of the application shell that can subscribe but never emit.
///
/// Cloning is cheap; every clone shares the shell's configuration and
/// listener table.
#[derive(Debug, Clone)]
pub struct AppHandle {
    config: Arc<Configuration>,
    events: SharedEmitter,
}

impl AppHandle {
    pub(crate) fn new(config: Arc<Configuration>, events: SharedEmitter) -> Self {
        Self { config, events }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Directories the injector searches, highest priority first
    pub fn include_dirs(&self) -> Vec<PathBuf> {
        self.config.derived_include_dirs()
    }

    pub fn on<F>(&self, event: impl Into<LifecycleEvent>, listener: F) -> ListenerId
    where
        F: Fn(&LifecycleEvent) -> ListenerResult + Send + Sync + 'static,
    {
        self.events.on(event.into(), listener)
    }

    pub fn once<F>(&self, event: impl Into<LifecycleEvent>, listener: F) -> ListenerId
    where
        F: FnOnce(&LifecycleEvent) -> ListenerResult + Send + 'static,
    {
        self.events.once(event.into(), listener)
    }

    /// Same as `once(LifecycleEvent::BeforeStart, listener)`
    pub fn before_start<F>(&self, listener: F) -> &Self
    where
        F: FnOnce(&LifecycleEvent) -> ListenerResult + Send + 'static,
    {
        self.events.once(LifecycleEvent::BeforeStart, listener);
        self
    }

    /// Same as `once(LifecycleEvent::Bootstrapped, listener)`
    pub fn after_bootstrap<F>(&self, listener: F) -> &Self
    where
        F: FnOnce(&LifecycleEvent) -> ListenerResult + Send + 'static,
    {
        self.events.once(LifecycleEvent::Bootstrapped, listener);
        self
    }

    /// Same as `once(LifecycleEvent::Started, listener)`
    pub fn once_started<F>(&self, listener: F) -> &Self
    where
        F: FnOnce(&LifecycleEvent) -> ListenerResult + Send + 'static,
    {
        self.events.once(LifecycleEvent::Started, listener);
        self
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.events.remove_listener(id)
    }

    pub fn listener_count(&self, event: impl Into<LifecycleEvent>) -> usize {
        self.events.listener_count(&event.into())
    }
}

/// Values made available to modules while they are bootstrapped
#[derive(Debug, Clone)]
pub struct BootstrapScope {
    app: AppHandle,
}

impl BootstrapScope {
    pub(crate) fn new(app: AppHandle) -> Self {
        Self { app }
    }

    /// The host application
    pub fn app(&self) -> &AppHandle {
        &self.app
    }
}
