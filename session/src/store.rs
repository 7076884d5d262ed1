use std::{collections::HashMap, sync::Mutex};

/// String key-value storage scoped to one client session. Implementations
/// must treat reads of absent keys as `None`, never as an error, and writes
/// are best-effort: a failed cookie serialization is logged and dropped
/// rather than surfaced.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    fn clear(&self);
}

/// Cookie-backed store over `actix_session::Session`.
pub struct CookieSession {
    inner: actix_session::Session,
}

impl CookieSession {
    pub fn new(session: actix_session::Session) -> Self {
        CookieSession { inner: session }
    }
}

impl SessionStore for CookieSession {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get::<String>(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = self.inner.insert(key, value) {
            log::warn!("failed to write session key {}: {}", key, err);
        }
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key);
    }

    fn clear(&self) {
        self.inner.clear();
    }
}

/// In-memory store, used by tests and by flows that run without an HTTP
/// request context.
#[derive(Default)]
pub struct MemorySession {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}
