pub mod client;
pub mod scenarios;

pub use client::{ApiConfig, ApiResponse, MovieSearchClient, SearchParams};
pub use scenarios::{run_scenario, scenarios, ApiScenario};
