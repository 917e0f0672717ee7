//! Per-message transient key-value store.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Transient key-value store attached to a message for the duration of handler
/// invocation. Keys are unique strings, values arbitrary. Cloning is cheap and
/// clones share the same store; nothing is persisted.
#[derive(Clone, Default)]
pub struct Context {
    inner: Arc<Mutex<HashMap<String, Arc<dyn Any + Send + Sync>>>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set<T: Any + Send + Sync>(&self, key: &str, value: T) {
        let mut map = self.inner.lock().expect("context lock poisoned");
        map.insert(key.to_string(), Arc::new(value));
    }

    /// Returns the value stored under `key`, if present and of type `T`.
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        let map = self.inner.lock().expect("context lock poisoned");
        map.get(key).cloned().and_then(|v| v.downcast::<T>().ok())
    }

    pub fn contains(&self, key: &str) -> bool {
        let map = self.inner.lock().expect("context lock poisoned");
        map.contains_key(key)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = self.inner.lock().expect("context lock poisoned");
        f.debug_struct("Context")
            .field("keys", &map.keys().collect::<Vec<_>>())
            .finish()
    }
}
