//! User-facing booking errors.
use thiserror::Error;

use crate::notice::Notice;

/// A user input violation. The operation that produced it changed nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Please select {expected} seat{}.", plural_suffix(.expected))]
    SeatCountMismatch { expected: u32, selected: u32 },
    #[error("Seat {0} is not on this seat map.")]
    UnknownSeat(String),
    #[error("Choose a quantity first")]
    EmptyConcessionQuantity,
    #[error("{0} is already in your order.")]
    UpsellAlreadyAdded(String),
    #[error("Unknown add-on: {0}")]
    UnknownOffer(String),
    #[error("Please choose a showtime.")]
    NoShowtimeSelected,
}

const fn plural_suffix(count: &u32) -> &'static str {
    if *count == 1 { "" } else { "s" }
}

impl BookingError {
    /// Blocking error notification for this violation.
    #[must_use]
    pub fn notice(&self) -> Notice {
        Notice::error(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_message_pluralizes() {
        let one = BookingError::SeatCountMismatch {
            expected: 1,
            selected: 0,
        };
        let two = BookingError::SeatCountMismatch {
            expected: 2,
            selected: 3,
        };
        assert_eq!(one.to_string(), "Please select 1 seat.");
        assert_eq!(two.to_string(), "Please select 2 seats.");
    }
}
