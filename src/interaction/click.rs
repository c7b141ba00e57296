use chromiumoxide::page::Page;
use serde::Deserialize;

use crate::error::{ProbeError, Result};
use crate::locator::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickMethod {
    MouseEvent,
    JsClick,
}

#[derive(Debug, Deserialize)]
struct ClickCheck {
    error: Option<String>,
    #[serde(default)]
    visible: bool,
    #[serde(default)]
    unobscured: bool,
}

/// Hybrid click strategy:
/// 1. Re-resolve the element and scroll it into view
/// 2. Check visibility and obstruction at its center point
/// 3. Dispatch mouse events if it is reachable, fall back to `el.click()`
pub async fn hybrid_click(page: &Page, element: &Element) -> Result<ClickMethod> {
    let element_js = element.selector.nth_js(element.index)?;

    let check_js = format!(
        r#"(() => {{
            const el = {element_js};
            if (!el) return {{ error: 'Element not found: ' + {sel_str} }};

            el.scrollIntoView({{ block: 'center', inline: 'center', behavior: 'instant' }});

            const rect = el.getBoundingClientRect();
            if (rect.width === 0 && rect.height === 0) {{
                return {{ visible: false }};
            }}

            const centerX = rect.left + rect.width / 2;
            const centerY = rect.top + rect.height / 2;

            const style = getComputedStyle(el);
            if (style.display === 'none' || style.visibility === 'hidden' || parseFloat(style.opacity) === 0) {{
                return {{ visible: false }};
            }}

            const topEl = document.elementFromPoint(centerX, centerY);
            const isUnobscured = topEl && (el === topEl || el.contains(topEl) || topEl.contains(el));

            return {{ visible: true, unobscured: !!isUnobscured }};
        }})()"#,
        element_js = element_js,
        sel_str = serde_json::to_string(&element.selector.to_string())?
    );

    let check: ClickCheck = page
        .evaluate(check_js.as_str())
        .await
        .map_err(ProbeError::browser)?
        .into_value()?;

    if let Some(error) = check.error {
        return Err(ProbeError::ElementNotFound(error));
    }

    // Let scroll/layout settle
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    if check.visible && check.unobscured {
        let click_js = format!(
            r#"(() => {{
                const el = {element_js};
                const rect = el.getBoundingClientRect();
                const x = rect.left + rect.width / 2;
                const y = rect.top + rect.height / 2;
                const opts = {{ bubbles: true, cancelable: true, clientX: x, clientY: y, button: 0 }};
                el.dispatchEvent(new MouseEvent('mousemove', opts));
                el.dispatchEvent(new MouseEvent('mousedown', opts));
                el.dispatchEvent(new MouseEvent('mouseup', opts));
                el.click();
                return true;
            }})()"#,
            element_js = element_js
        );

        page.evaluate(click_js.as_str())
            .await
            .map_err(ProbeError::browser)?;
        Ok(ClickMethod::MouseEvent)
    } else {
        let js_click = format!(
            r#"(() => {{
                const el = {element_js};
                if (!el) throw new Error('Element not found');
                el.click();
                return true;
            }})()"#,
            element_js = element_js
        );

        page.evaluate(js_click.as_str())
            .await
            .map_err(ProbeError::browser)?;
        Ok(ClickMethod::JsClick)
    }
}
