use chromiumoxide::page::Page;
use serde::Deserialize;

use crate::error::{ProbeError, Result};
use crate::locator::Element;

#[derive(Debug, Deserialize)]
struct SelectOutcome {
    found: bool,
    matched: usize,
}

/// Select options of a `<select>` by their visible text.
///
/// Multi-selects gain every matching option and keep earlier selections;
/// single selects switch to the first match. Option text is compared with
/// whitespace collapsed.
pub async fn select_by_visible_text(page: &Page, element: &Element, label: &str) -> Result<()> {
    let element_js = element.selector.nth_js(element.index)?;

    let js = format!(
        r#"(() => {{
            const el = {element_js};
            if (!el || el.tagName !== 'SELECT') return {{ found: false, matched: 0 }};
            const label = {label};
            const normalize = (s) => s.replace(/\s+/g, ' ').trim();
            let matched = 0;
            for (const option of el.options) {{
                if (normalize(option.text) !== label) continue;
                option.selected = true;
                matched++;
                if (!el.multiple) break;
            }}
            if (matched > 0) {{
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            }}
            return {{ found: true, matched: matched }};
        }})()"#,
        element_js = element_js,
        label = serde_json::to_string(label)?
    );

    let outcome: SelectOutcome = page
        .evaluate(js.as_str())
        .await
        .map_err(ProbeError::browser)?
        .into_value()?;

    if !outcome.found {
        return Err(ProbeError::ElementNotFound(format!(
            "<select> at {}",
            element.selector
        )));
    }
    if outcome.matched == 0 {
        return Err(ProbeError::NoMatchingOption {
            selector: element.selector.to_string(),
            label: label.to_string(),
        });
    }
    tracing::debug!("Selected {} option(s) labelled {:?}", outcome.matched, label);
    Ok(())
}
