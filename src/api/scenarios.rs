use super::client::{MovieSearchClient, SearchParams};
use crate::error::{ProbeError, Result};

/// One parametrized search call and the statuses it may answer with.
#[derive(Debug, Clone)]
pub struct ApiScenario {
    pub name: &'static str,
    pub params: SearchParams,
    pub expected: &'static [u16],
}

const OK: &[u16] = &[200];
const REJECTED: &[u16] = &[400, 401];

pub fn scenarios() -> Vec<ApiScenario> {
    vec![
        ApiScenario {
            name: "search_by_title",
            params: SearchParams::query("Мумия").paged(1, 5),
            expected: OK,
        },
        ApiScenario {
            name: "search_by_genre",
            params: SearchParams::genre("комедия").paged(1, 5),
            expected: OK,
        },
        ApiScenario {
            name: "search_by_year",
            params: SearchParams::year(2020).paged(1, 5),
            expected: OK,
        },
        ApiScenario {
            name: "search_by_actor",
            params: SearchParams::query("Том Хэнкс").paged(1, 5),
            expected: OK,
        },
        ApiScenario {
            name: "search_by_age_rating",
            params: SearchParams::age_rating("18").paged(1, 5),
            expected: OK,
        },
        ApiScenario {
            name: "empty_query",
            params: SearchParams::query(""),
            expected: REJECTED,
        },
    ]
}

/// Run a scenario and return the status when it is one of the expected ones.
#[tracing::instrument(skip_all, fields(scenario = scenario.name))]
pub async fn run_scenario(client: &MovieSearchClient, scenario: &ApiScenario) -> Result<u16> {
    let response = client.search(&scenario.params).await?;
    if scenario.expected.contains(&response.status) {
        Ok(response.status)
    } else {
        Err(ProbeError::UnexpectedStatus {
            expected: scenario.expected.to_vec(),
            actual: response.status,
        })
    }
}
