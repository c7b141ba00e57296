use std::future::Future;
use std::path::PathBuf;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tempfile::TempDir;

use super::launcher;
use crate::error::{ProbeError, Result};
use crate::locator::CdpLocator;

/// How a probe browser is started.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    pub sandbox: bool,
    /// Explicit Chrome binary; discovered when `None`.
    pub chrome: Option<PathBuf>,
    pub window_size: (u32, u32),
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: true,
            chrome: None,
            window_size: (1920, 1080),
        }
    }
}

/// One browser process with a single page, owned by one scenario.
pub struct BrowserSession {
    browser: Browser,
    handler_task: tokio::task::JoinHandle<()>,
    page: Page,
    // Removed on drop, after the browser is gone
    _user_data_dir: TempDir,
}

impl BrowserSession {
    /// Launch a new browser and establish the CDP connection.
    pub async fn launch(options: &LaunchOptions) -> Result<Self> {
        let user_data_dir = tempfile::tempdir()?;
        let chrome = match &options.chrome {
            Some(path) => path.clone(),
            None => launcher::find_chrome_binary()?,
        };

        let (width, height) = options.window_size;
        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome)
            .user_data_dir(user_data_dir.path())
            .window_size(width, height);

        if !options.headless {
            builder = builder.with_head();
        }
        for arg in launcher::default_chrome_args(options.headless, options.sandbox) {
            builder = builder.arg(arg);
        }

        let config = builder.build().map_err(ProbeError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ProbeError::Browser(format!("Failed to launch Chrome: {}", e)))?;

        let handler_task = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ProbeError::Browser(format!("Failed to create initial page: {}", e)))?;

        tracing::info!("Browser session started (headless: {})", options.headless);

        Ok(Self {
            browser,
            handler_task,
            page,
            _user_data_dir: user_data_dir,
        })
    }

    /// Run `f` against a fresh session and close it afterwards, whatever `f` returned.
    pub async fn scoped<F, Fut, T>(options: &LaunchOptions, f: F) -> Result<T>
    where
        F: FnOnce(CdpLocator) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let session = Self::launch(options).await?;
        let outcome = f(session.locator()).await;
        if let Err(err) = session.close().await {
            tracing::warn!("Failed to close browser session: {}", err);
        }
        outcome
    }

    pub fn locator(&self) -> CdpLocator {
        CdpLocator::new(self.page.clone())
    }

    /// Close the browser and wait for the process to exit.
    pub async fn close(mut self) -> Result<()> {
        let closed = self.browser.close().await.map_err(ProbeError::browser);
        if let Err(err) = self.browser.wait().await {
            tracing::debug!("Waiting for Chrome to exit: {}", err);
        }
        self.handler_task.abort();
        // Cancelled or finished, either way the CDP connection is gone after this
        let _ = (&mut self.handler_task).await;
        tracing::info!("Browser session closed");
        closed.map(|_| ())
    }
}
