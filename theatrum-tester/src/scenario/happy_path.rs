use anyhow::{Context, Result, ensure};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, LogicScenario, ScenarioCtx};
use crate::logic::booking;

pub struct HappyPathScenario;

async fn click(driver: &WebDriver, css: &str) -> Result<()> {
    driver
        .find(By::Css(css))
        .await
        .with_context(|| format!("finding {css}"))?
        .click()
        .await
        .with_context(|| format!("clicking {css}"))?;
    Ok(())
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(150)).await;
}

#[async_trait::async_trait]
impl BrowserScenario for HappyPathScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        ctx.bridge.ensure_available().await?;
        ctx.bridge.reset().await?;
        ctx.bridge.goto("/tickets").await?;
        settle().await;

        click(driver, "#increment").await?;
        click(driver, "#proceed-to-seats").await?;
        settle().await;

        click(driver, "[data-seat='1A']").await?;
        click(driver, "[data-seat='1B']").await?;
        click(driver, "#confirm-seats").await?;
        settle().await;

        // Two separate single adds merge into one popcorn line.
        for _ in 0..2 {
            click(driver, ".concession-card[data-item='Classic Popcorn'] .qty-increase").await?;
            click(driver, ".concession-card[data-item='Classic Popcorn'] .add-snack").await?;
        }
        click(driver, "#review-order").await?;
        settle().await;

        click(driver, ".upsell-offer[data-offer='cookie'] button").await?;
        click(driver, "#complete-purchase").await?;
        settle().await;

        let state = ctx.bridge.state().await?;
        if ctx.verbose {
            println!("  📊 Booking before finalize: {state:?}");
        }
        ensure!(state.seats == ["1A", "1B"], "unexpected seats {:?}", state.seats);
        ensure!(
            state.food_order["Classic Popcorn||Default"]["qty"] == 2,
            "popcorn did not merge: {}",
            state.food_order
        );
        let shown = driver.find(By::Id("checkout-total")).await?.text().await?;
        ensure!(shown == "$40.00", "checkout shows {shown}");
        ensure!(state.total_text == "$40.00", "stored state totals {}", state.total_text);

        click(driver, "#finalize-purchase").await?;
        settle().await;
        let after = ctx.bridge.state().await?;
        ensure!(
            after.ticket_qty == 0 && after.seats.is_empty() && after.upsell_cart.is_empty(),
            "finalize left booking state behind: {after:?}"
        );
        Ok(())
    }
}

impl CombinedScenario for HappyPathScenario {
    fn as_logic_scenario(&self) -> LogicScenario {
        LogicScenario {
            name: "happy-path",
            description: "Two tickets, two seats, popcorn and a cookie total $40.00",
            check: booking::happy_path,
        }
    }
}
