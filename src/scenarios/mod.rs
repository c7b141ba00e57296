pub mod ui;

use std::fmt;

use crate::api::{self, ApiConfig, MovieSearchClient};
use crate::browser::{BrowserSession, LaunchOptions};
use crate::error::Result;
use crate::page::ExtendedSearchPage;

pub use ui::UiScenario;

/// Result of one scenario, as printed in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub suite: &'static str,
    pub name: String,
    pub failure: Option<String>,
}

impl Outcome {
    fn from_result<T>(suite: &'static str, name: String, result: Result<T>) -> Self {
        let failure = result.err().map(|e| e.to_string());
        match &failure {
            None => tracing::info!("{}::{} passed", suite, name),
            Some(reason) => tracing::warn!("{}::{} failed: {}", suite, name, reason),
        }
        Self {
            suite,
            name,
            failure,
        }
    }

    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            None => write!(f, "PASS {}::{}", self.suite, self.name),
            Some(reason) => write!(f, "FAIL {}::{}: {}", self.suite, self.name, reason),
        }
    }
}

fn selected(name: &str, only: Option<&str>) -> bool {
    only.map_or(true, |wanted| name == wanted)
}

/// Every API scenario name followed by every UI scenario name.
pub fn catalogue() -> Vec<String> {
    api::scenarios()
        .iter()
        .map(|s| format!("api::{}", s.name))
        .chain(UiScenario::all().iter().map(|s| format!("ui::{}", s.name())))
        .collect()
}

/// Run the API scenarios, each with a fresh client.
pub async fn run_api_suite(config: &ApiConfig, only: Option<&str>) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    for scenario in api::scenarios().iter().filter(|s| selected(s.name, only)) {
        let result = match MovieSearchClient::new(config.clone()) {
            Ok(client) => api::run_scenario(&client, scenario).await,
            Err(err) => Err(err),
        };
        outcomes.push(Outcome::from_result("api", scenario.name.to_string(), result));
    }
    outcomes
}

/// Run the UI scenarios, each in its own browser session.
pub async fn run_ui_suite(
    options: &LaunchOptions,
    site_url: &str,
    only: Option<&str>,
) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    for scenario in UiScenario::all() {
        let name = scenario.name();
        if !selected(&name, only) {
            continue;
        }
        let site_url = site_url.to_string();
        let result = BrowserSession::scoped(options, |locator| async move {
            let page = ExtendedSearchPage::with_site_url(locator, site_url);
            scenario.run(&page).await
        })
        .await;
        outcomes.push(Outcome::from_result("ui", name, result));
    }
    outcomes
}
