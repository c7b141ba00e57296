pub mod cdp;
#[cfg(test)]
pub(crate) mod fake;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::{ProbeError, Result};
use crate::selectors::Selector;

pub use cdp::CdpLocator;

/// Delay between two readiness probes while waiting.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Condition an element must satisfy before it is handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Attached to the DOM.
    Present,
    /// Attached, rendered with a non-empty box, not hidden.
    Visible,
    /// Visible and not disabled.
    Clickable,
}

impl Readiness {
    pub fn is_met_by(self, element: &Element) -> bool {
        match self {
            Readiness::Present => true,
            Readiness::Visible => element.displayed,
            Readiness::Clickable => element.displayed && element.enabled,
        }
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Readiness::Present => "present",
            Readiness::Visible => "visible",
            Readiness::Clickable => "clickable",
        })
    }
}

/// Snapshot of a located element.
///
/// Actions re-resolve the node through `(selector, index)`, so a snapshot
/// can go stale when the page changes underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub selector: Selector,
    pub index: usize,
    pub tag: String,
    pub text: String,
    pub displayed: bool,
    pub enabled: bool,
}

/// Capability interface over a browser automation backend.
#[async_trait]
pub trait ElementLocator: Send + Sync {
    /// Every element matching `selector`, in document order.
    async fn find_all(&self, selector: &Selector) -> Result<Vec<Element>>;

    async fn clear_and_type(&self, element: &Element, text: &str) -> Result<()>;

    async fn click(&self, element: &Element) -> Result<()>;

    /// Select every option of a choice control whose visible text equals `label`.
    /// Fails with [`ProbeError::NoMatchingOption`] when none does.
    async fn select_by_visible_text(&self, element: &Element, label: &str) -> Result<()>;

    async fn navigate(&self, url: &str) -> Result<()>;

    async fn page_source(&self) -> Result<String>;

    /// First element matching `selector`, if any.
    async fn find(&self, selector: &Selector) -> Result<Option<Element>> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    /// One-shot readiness check against the first match.
    async fn probe(&self, selector: &Selector, readiness: Readiness) -> Result<Option<Element>> {
        Ok(self
            .find(selector)
            .await?
            .filter(|element| readiness.is_met_by(element)))
    }

    /// Poll until the first match satisfies `readiness`, or fail with
    /// [`ProbeError::Timeout`] once `timeout` has elapsed.
    ///
    /// Backend errors during a probe count as "not ready yet". A probe that
    /// is still running at the deadline is abandoned.
    async fn wait_until(
        &self,
        selector: &Selector,
        readiness: Readiness,
        timeout: Duration,
    ) -> Result<Element> {
        let deadline = Instant::now() + timeout;
        let timed_out = || ProbeError::Timeout {
            selector: selector.to_string(),
            readiness,
            timeout,
        };
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match tokio::time::timeout(remaining, self.probe(selector, readiness)).await {
                Ok(Ok(Some(element))) => return Ok(element),
                Ok(Ok(None)) => {}
                Ok(Err(err)) => tracing::debug!("Probe of {} failed: {}", selector, err),
                Err(_) => return Err(timed_out()),
            }

            if Instant::now() >= deadline {
                return Err(timed_out());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
