use anyhow::Result;
use thirtyfour::prelude::*;

use crate::browser::TestBridge;
use crate::logic::BookingCheck;
use crate::logic::booking;

pub mod happy_path;
pub mod smoke;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub seed: u64,
    pub bridge: TestBridge<'a>,
    pub verbose: bool,
}

/// A booking-engine check run against an in-memory store.
#[derive(Debug, Clone, Copy)]
pub struct LogicScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub check: BookingCheck,
}

#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

/// A scenario with a logic check and, optionally, a browser run.
pub trait CombinedScenario: BrowserScenario + Send + Sync {
    fn as_logic_scenario(&self) -> LogicScenario;
}

#[async_trait::async_trait]
impl BrowserScenario for LogicScenario {
    async fn run_browser(&self, _driver: &WebDriver, _ctx: &ScenarioCtx<'_>) -> Result<()> {
        anyhow::bail!("{} has no browser run", self.name)
    }
}

impl CombinedScenario for LogicScenario {
    fn as_logic_scenario(&self) -> LogicScenario {
        *self
    }
}

const LOGIC_ONLY: [LogicScenario; 6] = [
    LogicScenario {
        name: "legacy-migration",
        description: "Legacy concession values are repaired once and rewritten as objects",
        check: booking::legacy_migration,
    },
    LogicScenario {
        name: "seat-guard",
        description: "Seat confirmation persists only an exact seat count",
        check: booking::seat_guard,
    },
    LogicScenario {
        name: "checkout-removal",
        description: "Checkout removes one concession key or every upsell with a name",
        check: booking::checkout_removal,
    },
    LogicScenario {
        name: "finalize-reset",
        description: "Finalize clears every booking entity",
        check: booking::finalize_reset,
    },
    LogicScenario {
        name: "upsell-price-drift",
        description: "An upsell stored at two prices is grouped and flagged",
        check: booking::upsell_price_drift,
    },
    LogicScenario {
        name: "random-sessions",
        description: "Seeded random bookings keep the checkout total identity",
        check: booking::random_session,
    },
];

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario>> {
    match name {
        "smoke" => Some(Box::new(smoke::SmokeScenario)),
        "happy-path" => Some(Box::new(happy_path::HappyPathScenario)),
        _ => LOGIC_ONLY
            .iter()
            .find(|s| s.name == name)
            .map(|s| Box::new(*s) as Box<dyn CombinedScenario>),
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    let mut all = vec![
        ("smoke", "Site loads and an empty booking totals $0.00"),
        ("happy-path", "Two tickets, two seats, popcorn and a cookie total $40.00"),
    ];
    all.extend(LOGIC_ONLY.iter().map(|s| (s.name, s.description)));
    all
}

/// Expand `all` into every known scenario, keeping any explicit names.
pub fn expand_scenarios(requested: &[String]) -> Vec<String> {
    let mut scenarios: Vec<String> = requested.iter().filter(|s| *s != "all").cloned().collect();
    if requested.iter().any(|s| s == "all") {
        for (name, _) in list_scenarios() {
            if !scenarios.iter().any(|s| s == name) {
                scenarios.push(name.to_string());
            }
        }
    }
    scenarios
}
