use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::event::{EventSystemError, LifecycleEvent, ListenerId, ListenerResult};

type OnceListener = Box<dyn FnOnce(&LifecycleEvent) -> ListenerResult + Send>;
type ManyListener = Arc<dyn Fn(&LifecycleEvent) -> ListenerResult + Send + Sync>;

enum Listener {
    Once(OnceListener),
    Many(ManyListener),
}

struct Entry {
    id: ListenerId,
    listener: Listener,
}

//--------------------------------------------------
// EventEmitter (Internal, wrapped by SharedEmitter)
//--------------------------------------------------

/// Listener table keyed by event name
pub(crate) struct EventEmitter {
    listeners: HashMap<String, Vec<Entry>>,
    next_listener_id: ListenerId,
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listener_count: usize = self.listeners.values().map(|v| v.len()).sum();
        f.debug_struct("EventEmitter")
            .field("event_names", &self.listeners.len())
            .field("listener_count", &listener_count)
            .field("next_listener_id", &self.next_listener_id)
            .finish()
    }
}

impl EventEmitter {
    fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            next_listener_id: 1,
        }
    }

    fn add(&mut self, event: &LifecycleEvent, listener: Listener) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners
            .entry(event.name().to_string())
            .or_default()
            .push(Entry { id, listener });
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let mut found = false;
        self.listeners.values_mut().for_each(|entries| {
            let len_before = entries.len();
            entries.retain(|entry| entry.id != id);
            if entries.len() < len_before {
                found = true;
            }
        });
        found
    }

    fn count(&self, name: &str) -> usize {
        self.listeners.get(name).map_or(0, |entries| entries.len())
    }

    /// Snapshot the listeners for `name` in registration order.
    ///
    /// One-shot listeners are moved out of the table so they cannot fire
    /// twice, multi-shot listeners are shared with the snapshot.
    fn take_for_emit(&mut self, name: &str) -> Vec<Entry> {
        let Some(entries) = self.listeners.get_mut(name) else {
            return Vec::new();
        };

        let mut snapshot = Vec::with_capacity(entries.len());
        let mut kept = Vec::with_capacity(entries.len());
        for entry in entries.drain(..) {
            if let Listener::Many(shared) = &entry.listener {
                let listener = Listener::Many(Arc::clone(shared));
                snapshot.push(Entry { id: entry.id, listener });
                kept.push(entry);
            } else {
                snapshot.push(entry);
            }
        }
        *entries = kept;
        snapshot
    }

    /// Put back one-shot listeners an aborted emission never reached.
    fn restore(&mut self, name: &str, unreached: Vec<Entry>) {
        let entries = self.listeners.entry(name.to_string()).or_default();
        entries.extend(unreached);
        entries.sort_by_key(|entry| entry.id);
    }
}

//--------------------------------------------------
// SharedEmitter (crate API)
//--------------------------------------------------

/// Cloneable handle onto one listener table.
///
/// The lock is only held while the table is read or modified, never while a
/// listener runs, so listeners may subscribe further listeners.
#[derive(Clone)]
pub(crate) struct SharedEmitter {
    inner: Arc<Mutex<EventEmitter>>,
}

impl fmt::Debug for SharedEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedEmitter")
            .field("emitter", &*self.lock())
            .finish()
    }
}

impl SharedEmitter {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventEmitter::new())),
        }
    }

    // Listeners never run under the lock, so a poisoned table is still consistent.
    fn lock(&self) -> MutexGuard<'_, EventEmitter> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn on<F>(&self, event: LifecycleEvent, listener: F) -> ListenerId
    where
        F: Fn(&LifecycleEvent) -> ListenerResult + Send + Sync + 'static,
    {
        self.lock().add(&event, Listener::Many(Arc::new(listener)))
    }

    pub(crate) fn once<F>(&self, event: LifecycleEvent, listener: F) -> ListenerId
    where
        F: FnOnce(&LifecycleEvent) -> ListenerResult + Send + 'static,
    {
        self.lock().add(&event, Listener::Once(Box::new(listener)))
    }

    pub(crate) fn remove_listener(&self, id: ListenerId) -> bool {
        self.lock().remove(id)
    }

    pub(crate) fn listener_count(&self, event: &LifecycleEvent) -> usize {
        self.lock().count(event.name())
    }

    /// Deliver `event` to its listeners, returning how many were invoked.
    ///
    /// The first failing listener aborts delivery. Listeners registered while
    /// the emission is running are not part of it.
    pub(crate) fn emit(&self, event: &LifecycleEvent) -> Result<usize, EventSystemError> {
        let snapshot = self.lock().take_for_emit(event.name());
        log::debug!("Emitting '{}' to {} listener(s)", event, snapshot.len());

        let mut delivered = 0;
        let mut pending = snapshot.into_iter();
        while let Some(entry) = pending.next() {
            let outcome = match entry.listener {
                Listener::Once(listener) => listener(event),
                Listener::Many(listener) => listener(event),
            };

            if let Err(source) = outcome {
                let unreached: Vec<Entry> = pending
                    .filter(|rest| matches!(rest.listener, Listener::Once(_)))
                    .collect();
                if !unreached.is_empty() {
                    self.lock().restore(event.name(), unreached);
                }
                return Err(EventSystemError::ListenerFailed {
                    event: event.name().to_string(),
                    listener_id: entry.id,
                    source,
                });
            }
            delivered += 1;
        }
        Ok(delivered)
    }
}
