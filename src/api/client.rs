use std::time::Duration;

use serde::Serialize;

use crate::error::Result;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Where the search API lives and how to authenticate against it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn movie_url(&self) -> String {
        format!("{}/movie", self.base_url.trim_end_matches('/'))
    }
}

/// Query parameters of `GET /movie`. Unset fields are left out of the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(rename = "genres.name", skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(rename = "ageRating", skip_serializing_if = "Option::is_none")]
    pub age_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SearchParams {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn genre(genre: impl Into<String>) -> Self {
        Self {
            genre: Some(genre.into()),
            ..Self::default()
        }
    }

    pub fn year(year: u16) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn age_rating(rating: impl Into<String>) -> Self {
        Self {
            age_rating: Some(rating.into()),
            ..Self::default()
        }
    }

    pub fn paged(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }
}

/// Status and raw body of one search call. The body is kept for logging only.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

pub struct MovieSearchClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl MovieSearchClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// One `GET /movie` call. Any status is a successful call; only transport
    /// failures are errors.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, params: &SearchParams) -> Result<ApiResponse> {
        let response = self
            .http
            .get(self.config.movie_url())
            .header(API_KEY_HEADER, &self.config.token)
            .query(params)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::info!("GET /movie -> {}", status);
        tracing::debug!("Response body: {} bytes", body.len());

        Ok(ApiResponse { status, body })
    }
}
