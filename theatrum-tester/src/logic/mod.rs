pub mod booking;
pub mod reports;
pub mod tester;

pub use booking::BookingCheck;
pub use tester::*;
