pub mod css;
pub mod xpath;

use std::fmt;

use crate::error::Result;

/// An element lookup strategy plus the selector string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    Id(String),
    Css(String),
    Xpath(String),
}

impl Selector {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn css(css: impl Into<String>) -> Self {
        Self::Css(css.into())
    }

    pub fn xpath(xpath: impl Into<String>) -> Self {
        Self::Xpath(xpath.into())
    }

    /// JS expression evaluating to an array of every matching element, in document order.
    pub fn all_js(&self) -> Result<String> {
        match self {
            Selector::Id(id) => Ok(format!(
                r#"(() => {{ const el = document.getElementById({id}); return el ? [el] : []; }})()"#,
                id = serde_json::to_string(id)?
            )),
            Selector::Css(css) => css::all_js(css),
            Selector::Xpath(xpath) => xpath::all_js(xpath),
        }
    }

    /// JS expression evaluating to the `index`-th match, or null.
    pub fn nth_js(&self, index: usize) -> Result<String> {
        Ok(format!(
            "(({all})[{index}] || null)",
            all = self.all_js()?,
            index = index
        ))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "id `{}`", id),
            Selector::Css(css) => write!(f, "css `{}`", css),
            Selector::Xpath(xpath) => write!(f, "xpath `{}`", xpath),
        }
    }
}

/// Snapshot script applied to every matched element.
pub(crate) fn snapshot_js(all_js: &str) -> String {
    format!(
        r#"(() => {{
            const nodes = {all_js};
            return nodes.map((el, index) => {{
                const style = getComputedStyle(el);
                const rect = el.getBoundingClientRect();
                const displayed = style.display !== 'none'
                    && style.visibility !== 'hidden'
                    && parseFloat(style.opacity) > 0
                    && rect.width > 0
                    && rect.height > 0;
                const text = (el.innerText !== undefined ? el.innerText : el.textContent) || '';
                return {{
                    index: index,
                    tag: el.tagName.toLowerCase(),
                    text: text.trim(),
                    displayed: displayed,
                    enabled: !el.disabled
                }};
            }});
        }})()"#,
        all_js = all_js
    )
}
