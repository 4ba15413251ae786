//! Ticket quantity stage.
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::storage::BookingStore;

pub const MIN_TICKETS: u32 = 1;
pub const MAX_TICKETS: u32 = 10;
pub const DEFAULT_TICKET_TYPE: &str = "standard";

/// Unit price used when nothing usable was persisted.
#[must_use]
pub fn fallback_unit_price() -> Money {
    Money::from_dollars(12.0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketType {
    pub id: &'static str,
    pub label: &'static str,
    pub price: Money,
}

/// Ticket types on sale, default first.
#[must_use]
pub fn ticket_types() -> Vec<TicketType> {
    vec![
        TicketType {
            id: DEFAULT_TICKET_TYPE,
            label: "Standard",
            price: Money::from_dollars(12.0),
        },
        TicketType {
            id: "child",
            label: "Child",
            price: Money::from_dollars(9.0),
        },
        TicketType {
            id: "senior",
            label: "Senior",
            price: Money::from_dollars(10.0),
        },
        TicketType {
            id: "premium",
            label: "Premium Recliner",
            price: Money::from_dollars(16.0),
        },
    ]
}

#[must_use]
pub fn find_ticket_type(id: &str) -> Option<TicketType> {
    ticket_types().into_iter().find(|t| t.id == id)
}

/// What the quantity stage hands to later stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSelection {
    pub quantity: u32,
    pub unit_price: Money,
    pub ticket_type: String,
}

impl TicketSelection {
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.unit_price * self.quantity
    }
}

/// Quantity page state. Every mutation is persisted immediately.
pub struct QuantityStage<'a> {
    store: BookingStore<'a>,
    selection: TicketSelection,
}

impl<'a> QuantityStage<'a> {
    /// Load the stage. The count resumes from storage (1 when absent), the
    /// price follows the selected ticket type, and both are persisted so later
    /// pages see them even if the user changes nothing.
    #[must_use]
    pub fn load(store: BookingStore<'a>) -> Self {
        let quantity = match store.ticket_qty() {
            0 => MIN_TICKETS,
            n => n.clamp(MIN_TICKETS, MAX_TICKETS),
        };
        let ticket_type = store
            .ticket_type()
            .and_then(|id| find_ticket_type(&id))
            .or_else(|| find_ticket_type(DEFAULT_TICKET_TYPE));
        let (ticket_type, unit_price) = match ticket_type {
            Some(t) => (t.id.to_string(), t.price),
            None => (
                DEFAULT_TICKET_TYPE.to_string(),
                store.ticket_unit_price().unwrap_or_else(fallback_unit_price),
            ),
        };
        let stage = Self {
            store,
            selection: TicketSelection {
                quantity,
                unit_price,
                ticket_type,
            },
        };
        stage.persist_type();
        stage
    }

    /// Continue from a selection the page already holds. Nothing is written
    /// until the next mutation.
    #[must_use]
    pub const fn resume(store: BookingStore<'a>, selection: TicketSelection) -> Self {
        Self { store, selection }
    }

    #[must_use]
    pub const fn selection(&self) -> &TicketSelection {
        &self.selection
    }

    pub fn increment(&mut self) -> u32 {
        self.selection.quantity = (self.selection.quantity + 1).min(MAX_TICKETS);
        self.store.set_ticket_qty(self.selection.quantity);
        self.selection.quantity
    }

    pub fn decrement(&mut self) -> u32 {
        self.selection.quantity = self
            .selection
            .quantity
            .saturating_sub(1)
            .max(MIN_TICKETS);
        self.store.set_ticket_qty(self.selection.quantity);
        self.selection.quantity
    }

    /// Switch ticket type. Unknown ids keep the current price.
    pub fn change_ticket_type(&mut self, id: &str) -> Money {
        if let Some(t) = find_ticket_type(id) {
            self.selection.ticket_type = t.id.to_string();
            self.selection.unit_price = t.price;
        } else {
            log::debug!("ignoring unknown ticket type {id}");
        }
        self.persist_type();
        self.selection.unit_price
    }

    /// Persist the final selection before moving to seat selection.
    pub fn proceed(&self) -> TicketSelection {
        self.store.set_ticket_qty(self.selection.quantity);
        self.persist_type();
        self.selection.clone()
    }

    fn persist_type(&self) {
        self.store.set_ticket_type(&self.selection.ticket_type);
        self.store.set_ticket_unit_price(self.selection.unit_price);
    }
}
