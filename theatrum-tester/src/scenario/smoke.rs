use anyhow::{Result, ensure};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, LogicScenario, ScenarioCtx};
use crate::logic::booking;

pub struct SmokeScenario;

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        driver.find(By::Css("main#main")).await?;
        ctx.bridge.ensure_available().await?;
        ctx.bridge.reset().await?;

        let cards = driver.find_all(By::Css("#moviesGrid .movie-card")).await?;
        ensure!(!cards.is_empty(), "movie grid rendered no cards");
        driver.find(By::Css("#openAuth")).await?;
        if ctx.verbose {
            println!("  🌐 Home loaded with {} movies, bridge connected", cards.len());
        }

        let state = ctx.bridge.state().await?;
        ensure!(
            state.total_text == "$0.00",
            "fresh booking should total $0.00, got {}",
            state.total_text
        );
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn as_logic_scenario(&self) -> LogicScenario {
        LogicScenario {
            name: "smoke",
            description: "Site loads and an empty booking totals $0.00",
            check: booking::smoke,
        }
    }
}
