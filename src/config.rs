use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use crate::api::client::{ApiConfig, DEFAULT_TIMEOUT};
use crate::browser::LaunchOptions;
use crate::error::{ProbeError, Result};
use crate::page::DEFAULT_SITE_URL;

/// Search API settings, from flags or the environment.
#[derive(Debug, Clone, Args)]
pub struct ApiArgs {
    /// Base URL of the movie search API
    #[arg(long, env = "KINOPROBE_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Token sent in the X-API-KEY header
    #[arg(long, env = "KINOPROBE_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub api_timeout: u64,
}

impl ApiArgs {
    pub fn to_config(&self) -> Result<ApiConfig> {
        let base_url = self
            .api_base_url
            .clone()
            .ok_or_else(|| ProbeError::Config("API base URL is not set (--api-base-url)".into()))?;
        let token = self
            .api_token
            .clone()
            .ok_or_else(|| ProbeError::Config("API token is not set (--api-token)".into()))?;

        let mut config = ApiConfig::new(base_url, token);
        config.timeout = Duration::from_secs(self.api_timeout);
        Ok(config)
    }
}

/// Browser and site settings for the UI scenarios.
#[derive(Debug, Clone, Args)]
pub struct UiArgs {
    /// Site under test
    #[arg(long, env = "KINOPROBE_SITE_URL", default_value = DEFAULT_SITE_URL)]
    pub site_url: String,

    /// Run Chrome with a visible window (default: headless)
    #[arg(long)]
    pub headed: bool,

    /// Disable the Chrome sandbox (needed in most containers)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Path to the Chrome/Chromium binary
    #[arg(long, env = "KINOPROBE_CHROME")]
    pub chrome: Option<PathBuf>,
}

impl UiArgs {
    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            headless: !self.headed,
            sandbox: !self.no_sandbox,
            chrome: self.chrome.clone(),
            ..LaunchOptions::default()
        }
    }
}
