use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use super::{Element, ElementLocator};
use crate::error::{ProbeError, Result};
use crate::selectors::Selector;

#[derive(Debug, Clone)]
pub(crate) struct FakeOption {
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeNode {
    selector: Selector,
    tag: String,
    text: String,
    value: String,
    displayed: bool,
    enabled: bool,
    appears_after: Duration,
    options: Vec<FakeOption>,
}

impl FakeNode {
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            tag: "div".into(),
            text: String::new(),
            value: String::new(),
            displayed: true,
            enabled: true,
            appears_after: Duration::ZERO,
            options: Vec::new(),
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.into();
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = value.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn appears_after(mut self, delay: Duration) -> Self {
        self.appears_after = delay;
        self
    }

    pub fn options(mut self, labels: &[&str]) -> Self {
        self.tag = "select".into();
        self.options = labels
            .iter()
            .map(|label| FakeOption {
                label: (*label).into(),
                selected: false,
            })
            .collect();
        self
    }
}

#[derive(Debug, Default)]
struct FakeState {
    nodes: Vec<FakeNode>,
    clicked: Vec<Selector>,
    visited: Vec<String>,
    source: String,
}

/// In-memory page model standing in for a browser.
#[derive(Debug)]
pub(crate) struct FakeLocator {
    started: Instant,
    state: Mutex<FakeState>,
}

impl FakeLocator {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            state: Mutex::new(FakeState::default()),
        }
    }

    pub fn with(self, node: FakeNode) -> Self {
        self.state.lock().unwrap().nodes.push(node);
        self
    }

    pub fn with_source(self, source: &str) -> Self {
        self.state.lock().unwrap().source = source.into();
        self
    }

    pub fn value_of(&self, selector: &Selector) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .nodes
            .iter()
            .find(|node| &node.selector == selector)
            .map(|node| node.value.clone())
    }

    pub fn selected_options(&self, selector: &Selector) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .nodes
            .iter()
            .filter(|node| &node.selector == selector)
            .flat_map(|node| node.options.iter())
            .filter(|option| option.selected)
            .map(|option| option.label.clone())
            .collect()
    }

    pub fn clicked(&self) -> Vec<Selector> {
        self.state.lock().unwrap().clicked.clone()
    }

    pub fn visited(&self) -> Vec<String> {
        self.state.lock().unwrap().visited.clone()
    }

    fn attached(&self, node: &FakeNode) -> bool {
        self.started.elapsed() >= node.appears_after
    }

    fn with_node<T>(
        &self,
        element: &Element,
        f: impl FnOnce(&mut FakeNode) -> Result<T>,
    ) -> Result<T> {
        let mut state = self.state.lock().unwrap();
        let started = self.started;
        let node = state
            .nodes
            .iter_mut()
            .filter(|node| node.selector == element.selector)
            .filter(|node| started.elapsed() >= node.appears_after)
            .nth(element.index)
            .ok_or_else(|| ProbeError::ElementNotFound(element.selector.to_string()))?;
        f(node)
    }
}

#[async_trait]
impl ElementLocator for FakeLocator {
    async fn find_all(&self, selector: &Selector) -> Result<Vec<Element>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .nodes
            .iter()
            .filter(|node| &node.selector == selector && self.attached(node))
            .enumerate()
            .map(|(index, node)| Element {
                selector: selector.clone(),
                index,
                tag: node.tag.clone(),
                text: node.text.clone(),
                displayed: node.displayed,
                enabled: node.enabled,
            })
            .collect())
    }

    async fn clear_and_type(&self, element: &Element, text: &str) -> Result<()> {
        self.with_node(element, |node| {
            node.value = text.into();
            Ok(())
        })
    }

    async fn click(&self, element: &Element) -> Result<()> {
        self.with_node(element, |_| Ok(()))?;
        self.state
            .lock()
            .unwrap()
            .clicked
            .push(element.selector.clone());
        Ok(())
    }

    async fn select_by_visible_text(&self, element: &Element, label: &str) -> Result<()> {
        self.with_node(element, |node| {
            let mut matched = false;
            for option in node.options.iter_mut().filter(|o| o.label == label) {
                option.selected = true;
                matched = true;
            }
            if matched {
                Ok(())
            } else {
                Err(ProbeError::NoMatchingOption {
                    selector: element.selector.to_string(),
                    label: label.into(),
                })
            }
        })
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        self.state.lock().unwrap().visited.push(url.into());
        Ok(())
    }

    async fn page_source(&self) -> Result<String> {
        Ok(self.state.lock().unwrap().source.clone())
    }
}
