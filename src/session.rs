//! Session Snapshots
//!
//! Mirrors a workflow's working set into tab-scoped storage so a reload
//! does not lose accepted items.

use leptos::logging::{error, warn};

use crate::models::LineItem;
use crate::workflow::WorkflowKind;

/// Key/value storage scoped to the browser tab
pub trait SessionStore: Clone {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.sessionStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSession;

impl BrowserSession {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.session_storage().ok().flatten())
    }
}

impl SessionStore for BrowserSession {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        match Self::storage() {
            Some(s) => {
                if let Err(e) = s.set_item(key, value) {
                    error!("[SESSION] Failed to write {}: {:?}", key, e);
                }
            }
            None => warn!("[SESSION] sessionStorage unavailable, {} not saved", key),
        }
    }

    fn remove(&self, key: &str) {
        if let Some(s) = Self::storage() {
            let _ = s.remove_item(key);
        }
    }
}

/// Restore the working set for `kind`.
///
/// Missing or corrupt snapshots yield an empty set.
pub fn load_snapshot<S: SessionStore>(store: &S, kind: WorkflowKind) -> Vec<LineItem> {
    let Some(raw) = store.get(kind.storage_key()) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<LineItem>>(&raw) {
        Ok(mut lines) => {
            if let Some(default) = kind.default_return_type() {
                for line in lines.iter_mut() {
                    line.return_type.get_or_insert(default);
                }
            }
            lines
        }
        Err(e) => {
            error!("[SESSION] Failed to parse {}: {}", kind.storage_key(), e);
            Vec::new()
        }
    }
}

pub fn save_snapshot<S: SessionStore>(store: &S, kind: WorkflowKind, lines: &[LineItem]) {
    match serde_json::to_string(lines) {
        Ok(json) => store.set(kind.storage_key(), &json),
        Err(e) => error!("[SESSION] Failed to serialize {}: {}", kind.storage_key(), e),
    }
}

pub fn clear_snapshot<S: SessionStore>(store: &S, kind: WorkflowKind) {
    store.remove(kind.storage_key());
}

/// In-memory store for host tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    entries: std::sync::Arc<std::sync::Mutex<std::collections::HashMap<String, String>>>,
}

#[cfg(test)]
impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}
