pub mod bridge;
pub mod session;

pub use bridge::{BookingState, TestBridge};
pub use session::{BrowserConfig, BrowserKind, new_session};
