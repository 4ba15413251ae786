use serde::Serialize;
use theatrum_core::{BookingStage, BookingStore, CheckoutSummary, ConcessionOrder, Money, UpsellEntry};

use crate::router::Route;

/// What `__theatrumTest.state()` returns: every persisted booking entity
/// plus the derived checkout total.
#[derive(Debug, Serialize)]
pub(super) struct BridgeBooking {
    pub ticket_qty: u32,
    pub ticket_unit_price: Option<Money>,
    pub ticket_type: Option<String>,
    pub seats: Vec<String>,
    pub food_order: ConcessionOrder,
    pub upsell_cart: Vec<UpsellEntry>,
    pub grand_total: Money,
    pub total_text: String,
}

pub(super) fn booking_snapshot(store: BookingStore<'_>) -> BridgeBooking {
    let grand_total = CheckoutSummary::load(store).grand_total();
    BridgeBooking {
        ticket_qty: store.ticket_qty(),
        ticket_unit_price: store.ticket_unit_price(),
        ticket_type: store.ticket_type(),
        seats: store.seats(),
        food_order: store.concession_order(),
        upsell_cart: store.upsell_cart().entries().to_vec(),
        grand_total,
        total_text: grand_total.to_string(),
    }
}

/// Route for a path typed by a test script; anything unknown is a 404.
pub(super) fn route_for_path(path: &str) -> Route {
    BookingStage::from_path(path).map_or(Route::NotFound, Route::from_stage)
}
