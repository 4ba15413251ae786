//! Browser-backed key-value stores and the shared handle pages receive.
use std::fmt;
use std::rc::Rc;

use theatrum_core::{BookingStore, KeyValueStore, MemoryStore, StorageError};
use thiserror::Error;
use web_sys::Storage;

use crate::dom;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WebStorageError {
    #[error("{area} is unavailable: {reason}")]
    Unavailable { area: StorageArea, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    Local,
    Session,
}

impl fmt::Display for StorageArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "localStorage",
            Self::Session => "sessionStorage",
        })
    }
}

/// `localStorage` or `sessionStorage` behind [`KeyValueStore`].
pub struct BrowserStorage {
    area: StorageArea,
    inner: Storage,
}

impl BrowserStorage {
    /// Open one of the browser storage areas.
    ///
    /// # Errors
    /// Returns [`WebStorageError::Unavailable`] when the area cannot be
    /// opened (no window, storage disabled, sandboxed frame).
    pub fn open(area: StorageArea) -> Result<Self, WebStorageError> {
        let handle = match area {
            StorageArea::Local => dom::local_storage(),
            StorageArea::Session => dom::session_storage(),
        };
        handle
            .map(|inner| Self { area, inner })
            .map_err(|err| WebStorageError::Unavailable {
                area,
                reason: dom::js_error_message(&err),
            })
    }

    #[must_use]
    pub const fn area(&self) -> StorageArea {
        self.area
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .set_item(key, value)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                reason: dom::js_error_message(&err),
            })
    }

    fn remove_item(&self, key: &str) {
        if let Err(err) = self.inner.remove_item(key) {
            log::warn!(
                "failed to remove {key} from {}: {}",
                self.area,
                dom::js_error_message(&err)
            );
        }
    }
}

/// Cheap, clonable handle to a store, usable as a component prop.
/// Two handles are equal when they point at the same store.
#[derive(Clone)]
pub struct SharedStore {
    kv: Rc<dyn KeyValueStore>,
}

impl SharedStore {
    pub fn new(kv: impl KeyValueStore + 'static) -> Self {
        Self { kv: Rc::new(kv) }
    }

    /// A fresh in-memory store, for rendering outside a browser.
    #[must_use]
    pub fn memory() -> Self {
        Self::new(MemoryStore::new())
    }

    #[must_use]
    pub fn kv(&self) -> &dyn KeyValueStore {
        self.kv.as_ref()
    }

    #[must_use]
    pub fn booking(&self) -> BookingStore<'_> {
        BookingStore::new(self.kv.as_ref())
    }
}

impl From<MemoryStore> for SharedStore {
    fn from(store: MemoryStore) -> Self {
        Self::new(store)
    }
}

impl PartialEq for SharedStore {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.kv), Rc::as_ptr(&other.kv))
    }
}

impl fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedStore").finish_non_exhaustive()
    }
}

/// Durable and session-scoped stores for the running page.
#[derive(Clone, Debug, PartialEq)]
pub struct Stores {
    pub local: SharedStore,
    pub session: SharedStore,
}

impl Stores {
    /// Both stores in memory, sharing nothing with the browser.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            local: SharedStore::memory(),
            session: SharedStore::memory(),
        }
    }

    /// Open the browser's storage areas. An area that cannot be opened is
    /// replaced by an in-memory store so the site keeps working for the
    /// current page.
    #[must_use]
    pub fn browser() -> Self {
        Self {
            local: open_or_memory(StorageArea::Local),
            session: open_or_memory(StorageArea::Session),
        }
    }
}

fn open_or_memory(area: StorageArea) -> SharedStore {
    match BrowserStorage::open(area) {
        Ok(store) => SharedStore::new(store),
        Err(err) => {
            dom::console_error(&err.to_string());
            SharedStore::memory()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use theatrum_core::keys;

    #[test]
    fn shared_handles_compare_by_identity() {
        let a = SharedStore::memory();
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, SharedStore::memory());
    }

    #[test]
    fn clones_see_the_same_writes() {
        let memory = MemoryStore::new();
        let shared = SharedStore::from(memory.clone());
        shared.booking().set_ticket_qty(4);
        assert_eq!(memory.get_item(keys::TICKET_QTY).as_deref(), Some("4"));
        assert_eq!(shared.clone().booking().ticket_qty(), 4);
    }

    #[test]
    fn area_names_match_the_browser_globals() {
        assert_eq!(StorageArea::Local.to_string(), "localStorage");
        let err = WebStorageError::Unavailable {
            area: StorageArea::Session,
            reason: "SecurityError".into(),
        };
        assert_eq!(err.to_string(), "sessionStorage is unavailable: SecurityError");
    }
}
