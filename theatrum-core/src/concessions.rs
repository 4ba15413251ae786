//! Concession order: named, sized food items accumulated across visits.
//!
//! Earlier page versions stored each entry in different shapes (a bare count,
//! a count as text, partial objects). Every read goes through
//! [`ConcessionOrder::normalize`], which folds those shapes into one canonical
//! map keyed by `name||size`.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::BookingError;
use crate::money::Money;
use crate::notice::Notice;
use crate::numbers::{decimal_from_value, qty_from_value};

pub const KEY_SEPARATOR: &str = "||";
/// Size placeholder used in keys for items without a size.
pub const DEFAULT_SIZE: &str = "Default";
/// Upper bound of the per-card counter on the concession page.
pub const MAX_COUNTER: u32 = 10;

/// Canonical `name||size` key.
#[must_use]
pub fn canonical_key(name: &str, size: Option<&str>) -> String {
    format!("{name}{KEY_SEPARATOR}{}", size.unwrap_or(DEFAULT_SIZE))
}

/// One canonical concession line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub size: Option<String>,
    #[serde(rename = "qty")]
    pub quantity: u32,
    #[serde(rename = "price")]
    pub unit_price: Money,
}

impl FoodItem {
    #[must_use]
    pub fn key(&self) -> String {
        canonical_key(&self.name, self.size.as_deref())
    }

    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// `Name (Size)` or just `Name`.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.size {
            Some(size) => format!("{} ({size})", self.name),
            None => self.name.clone(),
        }
    }

    /// Confirmation shown after adding this item from a menu card.
    #[must_use]
    pub fn added_notice(&self) -> Notice {
        Notice::success(format!("{} added to your order", self.label()))
    }
}

/// The shapes a stored entry may take.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFoodValue {
    Absent,
    Number(Value),
    Text(String),
    Record(Map<String, Value>),
}

impl From<&Value> for RawFoodValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(_) => Self::Number(value.clone()),
            Value::String(text) => Self::Text(text.clone()),
            Value::Object(map) => Self::Record(map.clone()),
            Value::Array(_) => Self::Record(Map::new()),
            Value::Null | Value::Bool(_) => Self::Absent,
        }
    }
}

/// Normalize one stored entry into a canonical item. Never fails.
#[must_use]
pub fn normalize_item(key: &str, raw: &RawFoodValue) -> FoodItem {
    if let RawFoodValue::Record(record) = raw
        && let Some(name) = record.get("name").and_then(truthy_text)
    {
        return FoodItem {
            name,
            size: record.get("size").and_then(truthy_text).and_then(real_size),
            quantity: record.get("qty").map_or(0, qty_from_value),
            unit_price: record
                .get("price")
                .map_or(Money::ZERO, |p| Money::from_dollars(decimal_from_value(p))),
        };
    }

    let mut parts = key.split(KEY_SEPARATOR);
    let name = parts
        .next()
        .filter(|part| !part.is_empty())
        .unwrap_or(key)
        .to_string();
    let size = parts
        .next()
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .and_then(real_size);

    let (quantity, unit_price) = match raw {
        RawFoodValue::Absent => (0, Money::ZERO),
        RawFoodValue::Number(value) => (qty_from_value(value), Money::ZERO),
        RawFoodValue::Text(text) => (crate::numbers::parse_qty(text), Money::ZERO),
        RawFoodValue::Record(record) => (
            record.get("qty").map_or(0, qty_from_value),
            record
                .get("price")
                .map_or(Money::ZERO, |p| Money::from_dollars(decimal_from_value(p))),
        ),
    };

    FoodItem {
        name,
        size,
        quantity,
        unit_price,
    }
}

/// Text for a JSON field that the page scripts would have treated as set.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn real_size(size: String) -> Option<String> {
    (size != DEFAULT_SIZE).then_some(size)
}

/// Canonical concession order keyed by `name||size`, in the order entries
/// were first stored or added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConcessionOrder {
    items: Vec<(String, FoodItem)>,
}

impl Serialize for ConcessionOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (key, item) in &self.items {
            map.serialize_entry(key, item)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ConcessionOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|raw| Self::normalize(&raw))
    }
}

impl ConcessionOrder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a whole stored mapping, walking entries in stored order.
    ///
    /// Entries that land on the same canonical key sum their quantities; the
    /// last non-zero price in stored order wins. A non-object value yields an
    /// empty order.
    #[must_use]
    pub fn normalize(raw: &Value) -> Self {
        let Value::Object(entries) = raw else {
            if !raw.is_null() {
                log::debug!("discarding non-object concession order");
            }
            return Self::new();
        };

        let mut order = Self::new();
        for (key, value) in entries {
            let item = normalize_item(key, &RawFoodValue::from(value));
            order.merge(item);
        }
        order
    }

    /// Parse and normalize stored text; unparsable text is an empty order.
    #[must_use]
    pub fn from_storage_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(raw) => Self::normalize(&raw),
            Err(err) => {
                log::debug!("repairing unreadable concession order: {err}");
                Self::new()
            }
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|(k, _)| k == key)
    }

    /// Entry for `key`, appended with `template` (quantity zeroed) when new.
    fn entry_or_insert(&mut self, key: String, template: FoodItem) -> &mut FoodItem {
        let index = if let Some(index) = self.position(&key) {
            index
        } else {
            self.items.push((
                key,
                FoodItem {
                    quantity: 0,
                    ..template
                },
            ));
            self.items.len() - 1
        };
        &mut self.items[index].1
    }

    fn merge(&mut self, item: FoodItem) {
        let price = item.unit_price;
        let quantity = item.quantity;
        let entry = self.entry_or_insert(item.key(), item);
        entry.quantity = entry.quantity.saturating_add(quantity);
        if !price.is_zero() {
            entry.unit_price = price;
        }
    }

    /// Add `quantity` of `(name, size)` at `unit_price`. Quantities accumulate;
    /// the price is replaced by the latest one. New items go to the end.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::EmptyConcessionQuantity`] when `quantity` is 0.
    pub fn add(
        &mut self,
        name: &str,
        size: Option<&str>,
        quantity: u32,
        unit_price: Money,
    ) -> Result<&FoodItem, BookingError> {
        if quantity == 0 {
            return Err(BookingError::EmptyConcessionQuantity);
        }
        let size = size.map(str::to_string).and_then(real_size);
        let key = canonical_key(name, size.as_deref());
        let entry = self.entry_or_insert(
            key,
            FoodItem {
                name: name.to_string(),
                size,
                quantity: 0,
                unit_price,
            },
        );
        entry.quantity = entry.quantity.saturating_add(quantity);
        entry.unit_price = unit_price;
        Ok(entry)
    }

    /// Remove one canonical key. Returns the removed item, if any.
    pub fn remove(&mut self, key: &str) -> Option<FoodItem> {
        self.position(key).map(|index| self.items.remove(index).1)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FoodItem> {
        self.items.iter().find(|(k, _)| k == key).map(|(_, item)| item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FoodItem)> {
        self.items.iter().map(|(key, item)| (key, item))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> Money {
        self.items.iter().map(|(_, item)| item.line_total()).sum()
    }
}

/// A concession the menu offers, with its size options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub name: &'static str,
    pub base_price: Money,
    pub sizes: Vec<SizeOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeOption {
    pub label: &'static str,
    pub price: Money,
}

impl MenuItem {
    /// Unit price for the chosen size; unknown or absent sizes use the base price.
    #[must_use]
    pub fn price_for(&self, size: Option<&str>) -> Money {
        size.and_then(|label| self.sizes.iter().find(|s| s.label == label))
            .map_or(self.base_price, |s| s.price)
    }

    #[must_use]
    pub fn default_size(&self) -> Option<&'static str> {
        self.sizes.first().map(|s| s.label)
    }
}

/// The concession stand menu.
#[must_use]
pub fn menu() -> Vec<MenuItem> {
    let size = |label, dollars| SizeOption {
        label,
        price: Money::from_dollars(dollars),
    };
    vec![
        MenuItem {
            name: "Classic Popcorn",
            base_price: Money::from_dollars(6.0),
            sizes: vec![],
        },
        MenuItem {
            name: "Caramel Popcorn",
            base_price: Money::from_dollars(7.0),
            sizes: vec![size("Regular", 7.0), size("Large", 8.5)],
        },
        MenuItem {
            name: "Loaded Nachos",
            base_price: Money::from_dollars(9.0),
            sizes: vec![],
        },
        MenuItem {
            name: "Fountain Drink",
            base_price: Money::from_dollars(4.0),
            sizes: vec![size("Small", 4.0), size("Medium", 5.0), size("Large", 6.0)],
        },
        MenuItem {
            name: "Ultimate Combo",
            base_price: Money::from_dollars(22.0),
            sizes: vec![],
        },
    ]
}

/// Local per-card counter. Nothing is persisted until [`ConcessionCounter::add_to`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConcessionCounter {
    count: u32,
}

impl ConcessionCounter {
    #[must_use]
    pub const fn count(self) -> u32 {
        self.count
    }

    pub fn increment(&mut self) -> u32 {
        self.count = (self.count + 1).min(MAX_COUNTER);
        self.count
    }

    pub fn decrement(&mut self) -> u32 {
        self.count = self.count.saturating_sub(1);
        self.count
    }

    /// Merge the counter into `order` under `(item, size)` at that size's
    /// price and reset the counter.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::EmptyConcessionQuantity`] when the counter is
    /// zero; nothing is changed in that case.
    pub fn add_to(
        &mut self,
        order: &mut ConcessionOrder,
        item: &MenuItem,
        size: Option<&str>,
    ) -> Result<FoodItem, BookingError> {
        let size = size.filter(|s| item.sizes.iter().any(|opt| opt.label == *s));
        let added = order
            .add(item.name, size, self.count, item.price_for(size))?
            .clone();
        self.count = 0;
        Ok(added)
    }
}
