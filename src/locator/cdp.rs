use async_trait::async_trait;
use chromiumoxide::page::Page;
use serde::Deserialize;

use super::{Element, ElementLocator};
use crate::error::{ProbeError, Result};
use crate::interaction::{click, keyboard, select};
use crate::selectors::{self, Selector};

#[derive(Debug, Deserialize)]
struct ElementSnapshot {
    index: usize,
    tag: String,
    text: String,
    displayed: bool,
    enabled: bool,
}

/// [`ElementLocator`] over a live CDP page.
#[derive(Debug, Clone)]
pub struct CdpLocator {
    page: Page,
}

impl CdpLocator {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}

#[async_trait]
impl ElementLocator for CdpLocator {
    async fn find_all(&self, selector: &Selector) -> Result<Vec<Element>> {
        let js = selectors::snapshot_js(&selector.all_js()?);
        let snapshots: Vec<ElementSnapshot> = self
            .page
            .evaluate(js)
            .await
            .map_err(ProbeError::browser)?
            .into_value()?;

        Ok(snapshots
            .into_iter()
            .map(|s| Element {
                selector: selector.clone(),
                index: s.index,
                tag: s.tag,
                text: s.text,
                displayed: s.displayed,
                enabled: s.enabled,
            })
            .collect())
    }

    async fn clear_and_type(&self, element: &Element, text: &str) -> Result<()> {
        keyboard::clear_and_type(&self.page, element, text).await
    }

    async fn click(&self, element: &Element) -> Result<()> {
        let method = click::hybrid_click(&self.page, element).await?;
        tracing::debug!("Clicked {} via {:?}", element.selector, method);
        Ok(())
    }

    async fn select_by_visible_text(&self, element: &Element, label: &str) -> Result<()> {
        select::select_by_visible_text(&self.page, element, label).await
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        tracing::info!("Navigating to: {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| ProbeError::Browser(format!("Failed to navigate to {}: {}", url, e)))?;
        Ok(())
    }

    async fn page_source(&self) -> Result<String> {
        self.page.content().await.map_err(ProbeError::browser)
    }
}
