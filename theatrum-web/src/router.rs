use theatrum_core::BookingStage;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/tickets")]
    Tickets,
    #[at("/seats")]
    Seats,
    #[at("/food")]
    Food,
    #[at("/upsell")]
    Upsell,
    #[at("/checkout")]
    Checkout,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    #[must_use]
    pub const fn from_stage(stage: BookingStage) -> Self {
        match stage {
            BookingStage::Home => Self::Home,
            BookingStage::Tickets => Self::Tickets,
            BookingStage::Seats => Self::Seats,
            BookingStage::Concessions => Self::Food,
            BookingStage::Upsells => Self::Upsell,
            BookingStage::Checkout => Self::Checkout,
        }
    }

    /// Booking stage shown on this route; the 404 page has none.
    #[must_use]
    pub const fn to_stage(&self) -> Option<BookingStage> {
        match self {
            Self::Home => Some(BookingStage::Home),
            Self::Tickets => Some(BookingStage::Tickets),
            Self::Seats => Some(BookingStage::Seats),
            Self::Food => Some(BookingStage::Concessions),
            Self::Upsell => Some(BookingStage::Upsells),
            Self::Checkout => Some(BookingStage::Checkout),
            Self::NotFound => None,
        }
    }
}
