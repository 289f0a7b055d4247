//! Writable store persisted under a single storage key
//!
//! Subscribers are called once with the current value when they register and
//! again after every successful `set`. Notifications run synchronously on the
//! caller's thread, after the state lock is released, so a subscriber may
//! read the store again. Writes are serialized: storage, the in-memory value
//! and subscribers all observe the same order. A subscriber must not write to
//! or subscribe to the store it observes.

use crate::storage::{KeyValueStorage, StoreError};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Handle returned by [`PersistentStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Arc<dyn Fn(Option<&T>) + Send + Sync>;

struct State<T> {
    value: Option<T>,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
}

struct Inner<T> {
    key: String,
    storage: Arc<dyn KeyValueStorage>,
    // Held across persist, swap and notify
    writer: Mutex<()>,
    state: Mutex<State<T>>,
}

pub struct PersistentStore<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for PersistentStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for PersistentStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentStore")
            .field("key", &self.inner.key)
            .finish_non_exhaustive()
    }
}

impl<T> PersistentStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Open the store, loading whatever is currently saved under `key`.
    ///
    /// An entry that no longer decodes as `T` is dropped from storage and the
    /// store starts empty.
    pub fn open(
        key: impl Into<String>,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Result<Self, StoreError> {
        let key = key.into();

        let value = match storage.get(&key)? {
            Some(raw) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding undecodable stored value");
                    storage.remove(&key)?;
                    None
                }
            },
            None => None,
        };

        debug!(key = %key, present = value.is_some(), "Opened persistent store");

        Ok(Self {
            inner: Arc::new(Inner {
                key,
                storage,
                writer: Mutex::new(()),
                state: Mutex::new(State {
                    value,
                    next_id: 0,
                    subscribers: Vec::new(),
                }),
            }),
        })
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Current value
    pub fn get(&self) -> Option<T> {
        self.state().value.clone()
    }

    /// Persist `value` (or remove the key for `None`), then notify subscribers.
    ///
    /// If persisting fails the in-memory value is left unchanged.
    pub fn set(&self, value: Option<T>) -> Result<(), StoreError> {
        let _writer = self.writer();
        self.write(value)
    }

    /// Replace the value with a function of the current one.
    ///
    /// Runs under the write lock, so concurrent updates are not lost.
    pub fn update(&self, f: impl FnOnce(Option<T>) -> Option<T>) -> Result<(), StoreError> {
        let _writer = self.writer();
        self.write(f(self.get()))
    }

    /// Register an observer. It is called immediately with the current value.
    pub fn subscribe(
        &self,
        subscriber: impl Fn(Option<&T>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let subscriber: Subscriber<T> = Arc::new(subscriber);
        let _writer = self.writer();

        let (id, current) = {
            let mut state = self.state();
            let id = SubscriptionId(state.next_id);
            state.next_id += 1;
            state.subscribers.push((id, Arc::clone(&subscriber)));
            (id, state.value.clone())
        };

        subscriber(current.as_ref());
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.state();
        let before = state.subscribers.len();
        state.subscribers.retain(|(existing, _)| *existing != id);
        state.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.state().subscribers.len()
    }

    // Caller holds the write lock
    fn write(&self, value: Option<T>) -> Result<(), StoreError> {
        self.persist(value.as_ref())?;

        let subscribers: Vec<Subscriber<T>> = {
            let mut state = self.state();
            state.value = value.clone();
            state
                .subscribers
                .iter()
                .map(|(_, subscriber)| Arc::clone(subscriber))
                .collect()
        };

        for subscriber in subscribers {
            subscriber(value.as_ref());
        }

        Ok(())
    }

    fn persist(&self, value: Option<&T>) -> Result<(), StoreError> {
        let key = &self.inner.key;
        match value {
            Some(value) => {
                let raw = serde_json::to_string(value)?;
                self.inner.storage.set(key, &raw)
            }
            None => self.inner.storage.remove(key),
        }
    }

    fn writer(&self) -> MutexGuard<'_, ()> {
        self.inner
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn state(&self) -> MutexGuard<'_, State<T>> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
