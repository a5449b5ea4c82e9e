use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use super::voice::Voice;

pub type VoicesListener = Arc<dyn Fn(Vec<Voice>) + Send + Sync>;

/// Source of the host platform's synthesis voices.
///
/// The list may be empty at first and populated later; updates arrive through
/// [`VoiceCatalog::subscribe`] on the platform's own schedule.
pub trait VoiceCatalog: Send + Sync {
    fn list_voices(&self) -> Vec<Voice>;

    /// Register for voice list updates until the returned handle is dropped.
    fn subscribe(&self, listener: VoicesListener) -> Subscription;
}

/// Keeps a listener registered. Dropping it deregisters.
#[must_use = "dropping a Subscription deregisters the listener"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[derive(Default)]
struct CatalogInner {
    voices: Vec<Voice>,
    listeners: BTreeMap<u64, VoicesListener>,
    next_id: u64,
}

/// Voice catalog held in memory, fed by whoever owns the platform integration.
#[derive(Clone, Default)]
pub struct InMemoryVoiceCatalog {
    inner: Arc<Mutex<CatalogInner>>,
}

impl InMemoryVoiceCatalog {
    pub fn new(voices: Vec<Voice>) -> Self {
        let catalog = Self::default();
        catalog.lock().voices = voices;
        catalog
    }

    /// Replace the voice list and notify every live listener.
    pub fn set_voices(&self, voices: Vec<Voice>) {
        let listeners: Vec<VoicesListener> = {
            let mut inner = self.lock();
            inner.voices = voices.clone();
            inner.listeners.values().cloned().collect()
        };

        tracing::debug!(count = voices.len(), listeners = listeners.len(), "Voice list changed");

        for listener in listeners {
            listener(voices.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CatalogInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl VoiceCatalog for InMemoryVoiceCatalog {
    fn list_voices(&self) -> Vec<Voice> {
        self.lock().voices.clone()
    }

    fn subscribe(&self, listener: VoicesListener) -> Subscription {
        let id = {
            let mut inner = self.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.insert(id, listener);
            id
        };

        let weak: Weak<Mutex<CatalogInner>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .listeners
                    .remove(&id);
            }
        })
    }
}
