use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thirtyfour::prelude::*;

/// Subset of `window.__theatrumTest.state()` the scenarios assert on.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BookingState {
    #[serde(default)]
    pub ticket_qty: u32,
    #[serde(default)]
    pub ticket_type: Option<String>,
    #[serde(default)]
    pub seats: Vec<String>,
    #[serde(default)]
    pub food_order: Value,
    #[serde(default)]
    pub upsell_cart: Vec<Value>,
    #[serde(default)]
    pub total_text: String,
}

#[derive(Debug, Clone)]
pub struct TestBridge<'a> {
    driver: &'a WebDriver,
}

impl<'a> TestBridge<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let result = self
            .driver
            .execute("return !!window.__theatrumTest", vec![])
            .await?;
        if !result.json().as_bool().unwrap_or(false) {
            bail!("__theatrumTest is not available. Did you pass ?test=1?");
        }
        Ok(())
    }

    /// Clear every booking entity and return to the movie list.
    pub async fn reset(&self) -> Result<()> {
        self.driver
            .execute("window.__theatrumTest.reset()", vec![])
            .await?;
        Ok(())
    }

    pub async fn goto(&self, path: &str) -> Result<()> {
        self.driver
            .execute("window.__theatrumTest.goto(arguments[0])", vec![path.into()])
            .await?;
        Ok(())
    }

    pub async fn state(&self) -> Result<BookingState> {
        let result = self
            .driver
            .execute("return window.__theatrumTest.state()", vec![])
            .await?;
        serde_json::from_value(result.json().clone()).context("parsing booking state")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn booking_state_tolerates_missing_fields() {
        let state: BookingState = serde_json::from_value(json!({
            "ticket_qty": 2,
            "seats": ["1A", "1B"],
            "total_text": "$40.00",
            "grand_total": 40
        }))
        .unwrap();
        assert_eq!(state.ticket_qty, 2);
        assert_eq!(state.seats, vec!["1A", "1B"]);
        assert!(state.upsell_cart.is_empty());
        assert_eq!(state.total_text, "$40.00");
    }
}
