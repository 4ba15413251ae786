//! Page order of the booking flow.
use serde::{Deserialize, Serialize};

/// Every page a visitor can be on, in booking order after `Home`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookingStage {
    /// Landing page with hero carousel and movie grid.
    #[default]
    Home,
    Tickets,
    Seats,
    Concessions,
    Upsells,
    Checkout,
}

impl BookingStage {
    pub const ALL: [Self; 6] = [
        Self::Home,
        Self::Tickets,
        Self::Seats,
        Self::Concessions,
        Self::Upsells,
        Self::Checkout,
    ];

    /// Stage reached by the page's primary "continue" action. Checkout
    /// finalizes back to `Home`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Home => Self::Tickets,
            Self::Tickets => Self::Seats,
            Self::Seats => Self::Concessions,
            Self::Concessions => Self::Upsells,
            Self::Upsells => Self::Checkout,
            Self::Checkout => Self::Home,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Home => None,
            Self::Tickets => Some(Self::Home),
            Self::Seats => Some(Self::Tickets),
            Self::Concessions => Some(Self::Seats),
            Self::Upsells => Some(Self::Concessions),
            Self::Checkout => Some(Self::Upsells),
        }
    }

    /// Route path relative to the site base.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Tickets => "/tickets",
            Self::Seats => "/seats",
            Self::Concessions => "/food",
            Self::Upsells => "/upsell",
            Self::Checkout => "/checkout",
        }
    }

    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|s| s.path() == normalized)
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Now Showing",
            Self::Tickets => "Select Tickets",
            Self::Seats => "Choose Your Seats",
            Self::Concessions => "Snacks & Drinks",
            Self::Upsells => "Treat Yourself",
            Self::Checkout => "Checkout",
        }
    }
}
