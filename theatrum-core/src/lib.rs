//! Theatrum Booking Engine
//!
//! Platform-agnostic core of the Theatrum cinema site: ticket quantity, seat
//! selection, concessions, upsells and checkout, plus the hero carousel,
//! movie catalog and mock account flow.
//! This crate owns every rule about persisted booking state; front ends only
//! provide a [`KeyValueStore`] and render.

pub mod auth;
pub mod carousel;
pub mod catalog;
pub mod checkout;
pub mod concessions;
pub mod error;
pub mod flow;
pub mod money;
pub mod notice;
pub mod numbers;
pub mod seats;
pub mod storage;
pub mod tickets;
pub mod upsells;

// Re-export commonly used types
pub use auth::{AuthError, AuthProgress, AuthService, AuthStep, Session, UserRecord};
pub use carousel::{FADE_DELAY_MS, FadeTicket, HeroCarousel, Slide, SlideMedia, hero_slides};
pub use catalog::{
    Movie, MovieQuery, ShowtimePicker, ShowtimeSelection, SortOrder, movies, resolve_movie,
};
pub use checkout::{
    CheckoutSummary, ConcessionLine, FinalizeOutcome, finalize, remove_concession, remove_upsell,
};
pub use concessions::{
    ConcessionCounter, ConcessionOrder, FoodItem, MenuItem, RawFoodValue, canonical_key, menu,
    normalize_item,
};
pub use error::BookingError;
pub use flow::BookingStage;
pub use money::{Money, parse_price};
pub use notice::{NOTICE_VISIBLE_MS, Notice, NoticeKind, NoticeSlot, Ticket, TicketClock};
pub use numbers::parse_qty;
pub use seats::{SeatCell, SeatMap, SeatSelection, ToggleOutcome};
pub use storage::{BookingStore, KeyValueStore, MemoryStore, StorageError, keys};
pub use tickets::{QuantityStage, TicketSelection, TicketType, ticket_types};
pub use upsells::{UpsellCart, UpsellEntry, UpsellLine, UpsellOffer, UpsellStage, upsell_offers};

/// Owns a store and hands out the stage for each page.
pub struct BookingEngine<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> BookingEngine<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn booking(&self) -> BookingStore<'_> {
        BookingStore::new(&self.storage)
    }

    pub fn quantity_stage(&self) -> QuantityStage<'_> {
        QuantityStage::load(self.booking())
    }

    pub fn seat_selection(&self) -> SeatSelection {
        SeatSelection::load(self.booking())
    }

    /// Canonical order after read-repair, for the concession page.
    pub fn concessions(&self) -> ConcessionOrder {
        self.booking().concession_order()
    }

    /// Add `qty` of a menu item and persist.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::EmptyConcessionQuantity`] when `qty` is 0.
    pub fn add_concession(
        &self,
        item: &MenuItem,
        size: Option<&str>,
        qty: u32,
    ) -> Result<FoodItem, BookingError> {
        let mut order = self.concessions();
        let added = order
            .add(item.name, size, qty, item.price_for(size))?
            .clone();
        self.booking().set_concession_order(&order);
        Ok(added)
    }

    pub fn upsell_stage(&self) -> UpsellStage {
        UpsellStage::load(self.booking())
    }

    /// Activate one offer on `stage` and persist it.
    ///
    /// # Errors
    ///
    /// See [`UpsellStage::activate`].
    pub fn add_upsell(&self, stage: &mut UpsellStage, offer_id: &str) -> Result<Money, BookingError> {
        stage.activate(self.booking(), offer_id)
    }

    pub fn checkout(&self) -> CheckoutSummary {
        CheckoutSummary::load(self.booking())
    }

    pub fn finalize(&self) -> FinalizeOutcome {
        finalize(self.booking())
    }
}
