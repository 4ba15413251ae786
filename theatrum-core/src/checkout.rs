//! Checkout summary, line removal and finalize.
use serde::Serialize;

use crate::concessions::{ConcessionOrder, FoodItem};
use crate::flow::BookingStage;
use crate::money::Money;
use crate::notice::Notice;
use crate::storage::BookingStore;
use crate::tickets::fallback_unit_price;
use crate::upsells::{UpsellCart, UpsellLine};

pub const NO_SNACKS: &str = "No snacks selected.";
pub const NO_UPSELLS: &str = "No upsells.";
pub const THANK_YOU: &str = "Thank you for your purchase!";

/// A removable concession line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcessionLine {
    pub key: String,
    pub item: FoodItem,
    pub line_total: Money,
}

impl ConcessionLine {
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} × {} — {}",
            self.item.label(),
            self.item.quantity,
            self.line_total
        )
    }
}

/// Everything the checkout page shows, recomputed from storage on every load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    pub ticket_qty: u32,
    pub ticket_unit_price: Money,
    pub seats: Vec<String>,
    pub concessions: Vec<ConcessionLine>,
    pub upsells: Vec<UpsellLine>,
    #[serde(skip)]
    order: ConcessionOrder,
    #[serde(skip)]
    cart: UpsellCart,
}

impl CheckoutSummary {
    #[must_use]
    pub fn load(store: BookingStore<'_>) -> Self {
        let order = store.concession_order();
        let cart = store.upsell_cart();
        let concessions = order
            .iter()
            .filter(|(_, item)| item.quantity > 0)
            .map(|(key, item)| ConcessionLine {
                key: key.clone(),
                item: item.clone(),
                line_total: item.line_total(),
            })
            .collect();
        Self {
            ticket_qty: store.ticket_qty(),
            ticket_unit_price: store.ticket_unit_price().unwrap_or_else(fallback_unit_price),
            seats: store.seats(),
            concessions,
            upsells: cart.lines(),
            order,
            cart,
        }
    }

    #[must_use]
    pub fn ticket_subtotal(&self) -> Money {
        self.ticket_unit_price * self.ticket_qty
    }

    #[must_use]
    pub fn concession_subtotal(&self) -> Money {
        self.order.total()
    }

    #[must_use]
    pub fn upsell_subtotal(&self) -> Money {
        self.cart.total()
    }

    #[must_use]
    pub fn grand_total(&self) -> Money {
        self.ticket_subtotal() + self.concession_subtotal() + self.upsell_subtotal()
    }

    /// Seats joined for display, `-` when none.
    #[must_use]
    pub fn seat_text(&self) -> String {
        if self.seats.is_empty() {
            "-".to_string()
        } else {
            self.seats.join(", ")
        }
    }

    /// Full receipt text (also logged on finalize).
    #[must_use]
    pub fn receipt(&self) -> String {
        let snacks = if self.concessions.is_empty() {
            "None".to_string()
        } else {
            self.concessions
                .iter()
                .map(|line| {
                    format!(
                        "{}×{} ({})",
                        line.item.label(),
                        line.item.quantity,
                        line.line_total
                    )
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        let upsells = if self.cart.is_empty() {
            "None".to_string()
        } else {
            self.cart
                .entries()
                .iter()
                .map(|e| format!("{} ({})", e.item, e.price))
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "{THANK_YOU}\n\nOrder details:\nTickets: {} ({})\nSeats: {}\nSnacks: {snacks}\nUpsells: {upsells}\nTotal: {}",
            self.ticket_qty,
            self.ticket_subtotal(),
            self.seat_text(),
            self.grand_total()
        )
    }
}

/// Delete one concession key. The caller reloads the summary afterwards.
pub fn remove_concession(store: BookingStore<'_>, key: &str) -> bool {
    let mut order = store.concession_order();
    let removed = order.remove(key).is_some();
    store.set_concession_order(&order);
    removed
}

/// Delete every upsell entry named `item`.
pub fn remove_upsell(store: BookingStore<'_>, item: &str) -> usize {
    let mut cart = store.upsell_cart();
    let removed = cart.remove_all(item);
    store.set_upsell_cart(&cart);
    removed
}

/// What finalize hands back to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeOutcome {
    pub notice: Notice,
    pub receipt: String,
    pub total: Money,
    pub next: BookingStage,
}

/// Complete the purchase: log the receipt, clear all booking state and
/// return to the entry point. Cannot fail.
pub fn finalize(store: BookingStore<'_>) -> FinalizeOutcome {
    let summary = CheckoutSummary::load(store);
    let receipt = summary.receipt();
    log::info!("{receipt}");
    store.clear_booking();
    FinalizeOutcome {
        notice: Notice::success(THANK_YOU),
        receipt,
        total: summary.grand_total(),
        next: BookingStage::Home,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore, keys};

    fn seeded() -> MemoryStore {
        MemoryStore::with_entries([
            (keys::TICKET_QTY, "2"),
            (keys::TICKET_UNIT_PRICE, "12"),
            (keys::TICKET_TYPE, "standard"),
            (keys::SELECTED_SEATS, r#"["1A","1B"]"#),
            (
                keys::FOOD_ORDER,
                r#"{"Classic Popcorn||Default":{"name":"Classic Popcorn","size":null,"qty":2,"price":6},"Fountain Drink||Large":{"name":"Fountain Drink","size":"Large","qty":0,"price":6}}"#,
            ),
            (keys::UPSELL_CART, r#"[{"item":"cookie","price":4}]"#),
        ])
    }

    #[test]
    fn summary_totals_match_independent_recompute() {
        let kv = seeded();
        let summary = CheckoutSummary::load(BookingStore::new(&kv));
        assert_eq!(summary.ticket_subtotal(), Money::from_dollars(24.0));
        assert_eq!(summary.concession_subtotal(), Money::from_dollars(12.0));
        assert_eq!(summary.upsell_subtotal(), Money::from_dollars(4.0));
        assert_eq!(summary.grand_total().to_string(), "$40.00");
        assert_eq!(summary.concessions.len(), 1);
        assert_eq!(
            summary.concessions[0].label(),
            "Classic Popcorn × 2 — $12.00"
        );
        assert_eq!(summary.upsells[0].label(), "cookie × 1 — $4.00");
        assert_eq!(summary.seat_text(), "1A, 1B");
    }

    #[test]
    fn concession_lines_follow_stored_order() {
        let kv = MemoryStore::with_entries([(
            keys::FOOD_ORDER,
            r#"{"Ultimate Combo||Default":{"name":"Ultimate Combo","size":null,"qty":1,"price":22},"Classic Popcorn||Default":{"name":"Classic Popcorn","size":null,"qty":2,"price":6}}"#,
        )]);
        let store = BookingStore::new(&kv);
        let summary = CheckoutSummary::load(store);
        let names: Vec<&str> = summary
            .concessions
            .iter()
            .map(|line| line.item.name.as_str())
            .collect();
        assert_eq!(names, ["Ultimate Combo", "Classic Popcorn"]);
        assert!(summary.receipt().contains("Snacks: Ultimate Combo×1 ($22.00), Classic Popcorn×2 ($12.00)"));

        let stored = kv.get_item(keys::FOOD_ORDER).unwrap();
        assert!(stored.find("Ultimate Combo").unwrap() < stored.find("Classic Popcorn").unwrap());
    }

    #[test]
    fn empty_storage_summarizes_to_zero_tickets() {
        let kv = MemoryStore::new();
        let summary = CheckoutSummary::load(BookingStore::new(&kv));
        assert_eq!(summary.ticket_qty, 0);
        assert_eq!(summary.ticket_unit_price, Money::from_dollars(12.0));
        assert!(summary.grand_total().is_zero());
        assert_eq!(summary.seat_text(), "-");
        assert!(summary.receipt().contains("Snacks: None"));
    }

    #[test]
    fn removing_concession_only_drops_that_key() {
        let kv = seeded();
        let store = BookingStore::new(&kv);
        assert!(remove_concession(store, "Classic Popcorn||Default"));
        assert!(!remove_concession(store, "Classic Popcorn||Default"));
        let order = store.concession_order();
        assert_eq!(order.len(), 1);
        assert!(order.get("Fountain Drink||Large").is_some());
    }

    #[test]
    fn removing_upsell_drops_all_occurrences() {
        let kv = seeded();
        let store = BookingStore::new(&kv);
        let mut cart = store.upsell_cart();
        cart.push("cookie", Money::from_dollars(4.0));
        cart.push("candy", Money::from_dollars(3.5));
        store.set_upsell_cart(&cart);
        assert_eq!(remove_upsell(store, "cookie"), 2);
        let summary = CheckoutSummary::load(store);
        assert_eq!(summary.upsells.len(), 1);
        assert_eq!(summary.upsells[0].item, "candy");
    }

    #[test]
    fn nameless_upsells_stay_priced_and_survive_removals() {
        let kv = MemoryStore::with_entries([(
            keys::UPSELL_CART,
            r#"[{"item":"cookie","price":4},{"price":2}]"#,
        )]);
        let store = BookingStore::new(&kv);
        let summary = CheckoutSummary::load(store);
        assert_eq!(summary.upsell_subtotal(), Money::from_dollars(6.0));
        assert_eq!(summary.upsells[1].label(), "[object Object] × 1 — $2.00");

        assert_eq!(remove_upsell(store, "nothing"), 0);
        let cart = store.upsell_cart();
        assert_eq!(cart.entries().len(), 2);
        assert_eq!(cart.total(), Money::from_dollars(6.0));

        assert_eq!(remove_upsell(store, "[object Object]"), 1);
        assert_eq!(store.upsell_cart().total(), Money::from_dollars(4.0));
    }

    #[test]
    fn finalize_clears_everything_and_returns_home() {
        let kv = seeded();
        let outcome = finalize(BookingStore::new(&kv));
        assert_eq!(outcome.total, Money::from_dollars(40.0));
        assert_eq!(outcome.next, BookingStage::Home);
        assert_eq!(outcome.notice, Notice::success(THANK_YOU));
        assert!(outcome.receipt.contains("Seats: 1A, 1B"));
        for key in [
            keys::TICKET_QTY,
            keys::TICKET_UNIT_PRICE,
            keys::SELECTED_SEATS,
            keys::FOOD_ORDER,
            keys::UPSELL_CART,
        ] {
            assert!(kv.get_item(key).is_none(), "{key} should be cleared");
        }
    }
}
