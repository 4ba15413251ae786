//! Key-value persistence shared by every booking stage.
//!
//! State crosses pages only through this store. [`BookingStore`] is the typed
//! schema over it; nothing else should parse the raw values.

use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use thiserror::Error;

use crate::concessions::ConcessionOrder;
use crate::money::{Money, parse_price};
use crate::numbers::parse_qty;
use crate::upsells::UpsellCart;

/// Storage keys, compatible with data written by earlier versions of the site.
pub mod keys {
    pub const TICKET_QTY: &str = "ticketQty";
    pub const TICKET_UNIT_PRICE: &str = "ticketUnitPrice";
    pub const TICKET_TYPE: &str = "ticketType";
    pub const SELECTED_SEATS: &str = "selectedSeats";
    pub const FOOD_ORDER: &str = "foodOrder";
    pub const UPSELL_CART: &str = "upsellCart";
    pub const USERS: &str = "theatrum.users";
    pub const SESSION: &str = "theatrum.session";
    /// Session-scoped; lives in the tab's session storage, not local storage.
    pub const VERIFY_TARGET: &str = "verifyTarget";
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to encode {key}: {reason}")]
    Encode { key: String, reason: String },
}

/// String-keyed persistent storage.
///
/// Reads never fail: an unreadable backend looks the same as a missing key.
/// Writes may fail (quota, private browsing) and report why.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str);
}

/// In-memory store. Clones share the same map, like two scripts sharing one
/// browser origin.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with raw values.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into())),
        );
        store
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Write a value, logging instead of failing; storage problems never reach
/// the user.
pub(crate) fn write_or_log(kv: &dyn KeyValueStore, key: &str, value: &str) {
    if let Err(err) = kv.set_item(key, value) {
        log::warn!("dropping write to {key}: {err}");
    }
}

pub(crate) fn write_json_or_log<T: Serialize + ?Sized>(
    kv: &dyn KeyValueStore,
    key: &str,
    value: &T,
) {
    match serde_json::to_string(value) {
        Ok(text) => write_or_log(kv, key, &text),
        Err(err) => log::warn!(
            "{}",
            StorageError::Encode {
                key: key.to_string(),
                reason: err.to_string(),
            }
        ),
    }
}

/// Typed schema over the booking keys.
#[derive(Clone, Copy)]
pub struct BookingStore<'a> {
    kv: &'a dyn KeyValueStore,
}

impl<'a> BookingStore<'a> {
    #[must_use]
    pub const fn new(kv: &'a dyn KeyValueStore) -> Self {
        Self { kv }
    }

    #[must_use]
    pub const fn raw(&self) -> &'a dyn KeyValueStore {
        self.kv
    }

    /// Persisted ticket quantity; 0 when absent or unparsable.
    #[must_use]
    pub fn ticket_qty(&self) -> u32 {
        self.kv
            .get_item(keys::TICKET_QTY)
            .map_or(0, |raw| parse_qty(&raw))
    }

    pub fn set_ticket_qty(&self, qty: u32) {
        write_or_log(self.kv, keys::TICKET_QTY, &qty.to_string());
    }

    /// Persisted unit price, if one was stored and parses to a non-zero amount.
    #[must_use]
    pub fn ticket_unit_price(&self) -> Option<Money> {
        self.kv
            .get_item(keys::TICKET_UNIT_PRICE)
            .map(|raw| parse_price(&raw))
            .filter(|price| !price.is_zero())
    }

    pub fn set_ticket_unit_price(&self, price: Money) {
        write_or_log(self.kv, keys::TICKET_UNIT_PRICE, &price.to_storage_text());
    }

    #[must_use]
    pub fn ticket_type(&self) -> Option<String> {
        self.kv
            .get_item(keys::TICKET_TYPE)
            .filter(|raw| !raw.trim().is_empty())
    }

    pub fn set_ticket_type(&self, id: &str) {
        write_or_log(self.kv, keys::TICKET_TYPE, id);
    }

    /// Selected seat labels; malformed storage reads as no seats.
    #[must_use]
    pub fn seats(&self) -> Vec<String> {
        self.kv
            .get_item(keys::SELECTED_SEATS)
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .unwrap_or_default()
    }

    pub fn set_seats(&self, seats: &[String]) {
        write_json_or_log(self.kv, keys::SELECTED_SEATS, seats);
    }

    /// Canonical concession order. Always normalizes and writes the canonical
    /// shape back (read-repair).
    #[must_use]
    pub fn concession_order(&self) -> ConcessionOrder {
        let raw = self.kv.get_item(keys::FOOD_ORDER);
        let order = ConcessionOrder::from_storage_text(raw.as_deref().unwrap_or("{}"));
        self.set_concession_order(&order);
        order
    }

    pub fn set_concession_order(&self, order: &ConcessionOrder) {
        write_json_or_log(self.kv, keys::FOOD_ORDER, order);
    }

    #[must_use]
    pub fn upsell_cart(&self) -> UpsellCart {
        UpsellCart::from_storage_text(
            self.kv
                .get_item(keys::UPSELL_CART)
                .as_deref()
                .unwrap_or("[]"),
        )
    }

    pub fn set_upsell_cart(&self, cart: &UpsellCart) {
        write_json_or_log(self.kv, keys::UPSELL_CART, cart);
    }

    /// Remove every booking entity: ticket selection, seats, concessions and
    /// upsells.
    pub fn clear_booking(&self) {
        for key in [
            keys::TICKET_QTY,
            keys::TICKET_UNIT_PRICE,
            keys::TICKET_TYPE,
            keys::SELECTED_SEATS,
            keys::FOOD_ORDER,
            keys::UPSELL_CART,
        ] {
            self.kv.remove_item(key);
        }
    }
}
