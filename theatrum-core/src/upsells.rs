//! Upsell cart and the upsell stage.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::error::BookingError;
use crate::money::Money;
use crate::numbers::decimal_from_value;
use crate::storage::BookingStore;
use crate::tickets::fallback_unit_price;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsellEntry {
    pub item: String,
    pub price: Money,
}

/// Append-only list of add-ons. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpsellCart {
    entries: Vec<UpsellEntry>,
}

/// One checkout line: every occurrence of an item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpsellLine {
    pub item: String,
    pub count: u32,
    /// Price of the first occurrence.
    pub unit_price: Money,
    /// Sum of the actual prices of all occurrences.
    pub line_total: Money,
    /// Occurrences disagree on price.
    pub mixed_prices: bool,
}

impl UpsellLine {
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} × {} — {}", self.item, self.count, self.line_total)
    }
}

impl UpsellCart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse stored text. Every array element is kept so its price stays in
    /// the total. An element without a usable `item` string is named by its
    /// display text, so a bare `"candy"` is `candy` at $0.00 and `{"price":2}`
    /// is `[object Object]` at $2.00. Anything other than an array is an
    /// empty cart.
    #[must_use]
    pub fn from_storage_text(text: &str) -> Self {
        let Ok(Value::Array(values)) = serde_json::from_str::<Value>(text) else {
            log::debug!("treating unreadable upsell cart as empty");
            return Self::new();
        };
        let entries = values.iter().map(entry_from_value).collect();
        Self { entries }
    }

    pub fn push(&mut self, item: impl Into<String>, price: Money) {
        self.entries.push(UpsellEntry {
            item: item.into(),
            price,
        });
    }

    /// Remove every occurrence of `item`. Returns how many were removed.
    pub fn remove_all(&mut self, item: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.item != item);
        before - self.entries.len()
    }

    #[must_use]
    pub fn entries(&self) -> &[UpsellEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.price).sum()
    }

    /// Group entries by item name in first-appearance order.
    #[must_use]
    pub fn lines(&self) -> Vec<UpsellLine> {
        let mut lines: Vec<UpsellLine> = Vec::new();
        for entry in &self.entries {
            if let Some(line) = lines.iter_mut().find(|l| l.item == entry.item) {
                line.count += 1;
                line.line_total += entry.price;
                line.mixed_prices |= line.unit_price != entry.price;
            } else {
                lines.push(UpsellLine {
                    item: entry.item.clone(),
                    count: 1,
                    unit_price: entry.price,
                    line_total: entry.price,
                    mixed_prices: false,
                });
            }
        }
        for line in lines.iter().filter(|l| l.mixed_prices) {
            log::warn!("upsell {} was added at more than one price", line.item);
        }
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpsellOffer {
    pub id: &'static str,
    pub item: &'static str,
    pub price: Money,
}

/// Add-ons offered before checkout.
#[must_use]
pub fn upsell_offers() -> Vec<UpsellOffer> {
    vec![
        UpsellOffer {
            id: "cookie",
            item: "cookie",
            price: Money::from_dollars(4.0),
        },
        UpsellOffer {
            id: "churros",
            item: "churros",
            price: Money::from_dollars(5.0),
        },
        UpsellOffer {
            id: "candy",
            item: "candy",
            price: Money::from_dollars(3.5),
        },
        UpsellOffer {
            id: "souvenir-cup",
            item: "souvenir cup",
            price: Money::from_dollars(7.0),
        },
    ]
}

/// Upsell page: a base total fixed at load plus one-shot add-on buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsellStage {
    offers: Vec<UpsellOffer>,
    base_total: Money,
    added_total: Money,
    activated: BTreeSet<&'static str>,
}

impl UpsellStage {
    /// Compute the base total (tickets + concessions) once.
    #[must_use]
    pub fn load(store: BookingStore<'_>) -> Self {
        Self::with_offers(store, upsell_offers())
    }

    #[must_use]
    pub fn with_offers(store: BookingStore<'_>, offers: Vec<UpsellOffer>) -> Self {
        let unit_price = store.ticket_unit_price().unwrap_or_else(fallback_unit_price);
        let base_total = unit_price * store.ticket_qty() + store.concession_order().total();
        Self {
            offers,
            base_total,
            added_total: Money::ZERO,
            activated: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn offers(&self) -> &[UpsellOffer] {
        &self.offers
    }

    #[must_use]
    pub const fn base_total(&self) -> Money {
        self.base_total
    }

    /// Base total plus everything added on this page.
    #[must_use]
    pub fn running_total(&self) -> Money {
        self.base_total + self.added_total
    }

    #[must_use]
    pub fn is_activated(&self, offer_id: &str) -> bool {
        self.activated.contains(offer_id)
    }

    /// Add an offer to the persisted cart. Each offer works once per visit.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::UnknownOffer`] or
    /// [`BookingError::UpsellAlreadyAdded`]; the cart is untouched then.
    pub fn activate(
        &mut self,
        store: BookingStore<'_>,
        offer_id: &str,
    ) -> Result<Money, BookingError> {
        let offer = self
            .offers
            .iter()
            .find(|o| o.id == offer_id)
            .cloned()
            .ok_or_else(|| BookingError::UnknownOffer(offer_id.to_string()))?;
        if !self.activated.insert(offer.id) {
            return Err(BookingError::UpsellAlreadyAdded(offer.item.to_string()));
        }
        let mut cart = store.upsell_cart();
        cart.push(offer.item, offer.price);
        store.set_upsell_cart(&cart);
        self.added_total += offer.price;
        Ok(self.running_total())
    }
}

fn entry_from_value(value: &Value) -> UpsellEntry {
    let named = value.get("item").filter(|item| is_truthy(item)).map(display_text);
    let item = named.unwrap_or_else(|| {
        if !value.is_string() {
            log::debug!("upsell entry without an item name: {value}");
        }
        display_text(value)
    });
    let price = value
        .get("price")
        .map_or(Money::ZERO, |p| Money::from_dollars(decimal_from_value(p)));
    UpsellEntry { item, price }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text a browser shows for a stored value.
fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore, keys};

    fn money(d: f64) -> Money {
        Money::from_dollars(d)
    }

    #[test]
    fn stored_cart_tolerates_odd_entries() {
        let cart = UpsellCart::from_storage_text(
            r#"[{"item":"cookie","price":4},"candy",{"price":2},7,{"item":"churros","price":"5"}]"#,
        );
        let items: Vec<_> = cart.entries().iter().map(|e| e.item.as_str()).collect();
        assert_eq!(
            items,
            vec!["cookie", "candy", "[object Object]", "7", "churros"]
        );
        assert_eq!(cart.total(), money(11.0));
        let nameless = UpsellCart::from_storage_text(r#"[{"item":"","price":1.5},null,[1,2]]"#);
        let items: Vec<_> = nameless.entries().iter().map(|e| e.item.as_str()).collect();
        assert_eq!(items, vec!["[object Object]", "null", "1,2"]);
        assert_eq!(nameless.total(), money(1.5));
        assert!(UpsellCart::from_storage_text("{}").is_empty());
        assert!(UpsellCart::from_storage_text("nope").is_empty());
    }

    #[test]
    fn lines_aggregate_by_name_and_flag_price_drift() {
        let mut cart = UpsellCart::new();
        cart.push("cookie", money(4.0));
        cart.push("candy", money(3.5));
        cart.push("cookie", money(4.0));
        cart.push("cookie", money(5.0));
        let lines = cart.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].item, "cookie");
        assert_eq!(lines[0].count, 3);
        assert_eq!(lines[0].unit_price, money(4.0));
        assert_eq!(lines[0].line_total, money(13.0));
        assert!(lines[0].mixed_prices);
        assert!(!lines[1].mixed_prices);
        let line_sum: Money = lines.iter().map(|l| l.line_total).sum();
        assert_eq!(line_sum, cart.total());
    }

    #[test]
    fn remove_all_drops_every_occurrence() {
        let mut cart = UpsellCart::new();
        cart.push("cookie", money(4.0));
        cart.push("candy", money(3.5));
        cart.push("cookie", money(4.0));
        assert_eq!(cart.remove_all("cookie"), 2);
        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.remove_all("cookie"), 0);
    }

    #[test]
    fn stage_adds_each_offer_once_and_tracks_running_total() {
        let kv = MemoryStore::with_entries([
            (keys::TICKET_QTY, "2"),
            (keys::TICKET_UNIT_PRICE, "12"),
            (
                keys::FOOD_ORDER,
                r#"{"Classic Popcorn||Default":{"name":"Classic Popcorn","size":null,"qty":2,"price":6}}"#,
            ),
        ]);
        let store = BookingStore::new(&kv);
        let mut stage = UpsellStage::load(store);
        assert_eq!(stage.base_total(), money(36.0));
        assert_eq!(stage.activate(store, "cookie"), Ok(money(40.0)));
        assert!(stage.is_activated("cookie"));
        assert!(matches!(
            stage.activate(store, "cookie"),
            Err(BookingError::UpsellAlreadyAdded(_))
        ));
        assert!(matches!(
            stage.activate(store, "lobster"),
            Err(BookingError::UnknownOffer(_))
        ));
        assert_eq!(stage.running_total(), money(40.0));
        let stored = UpsellCart::from_storage_text(&kv.get_item(keys::UPSELL_CART).unwrap());
        assert_eq!(stored.entries().len(), 1);
    }

    #[test]
    fn stage_defaults_price_when_missing() {
        let kv = MemoryStore::with_entries([(keys::TICKET_QTY, "1")]);
        let stage = UpsellStage::load(BookingStore::new(&kv));
        assert_eq!(stage.base_total(), money(12.0));
    }
}
