use chromiumoxide::page::Page;

use crate::error::{ProbeError, Result};
use crate::locator::Element;

/// Focus a text control, clear it, and type `text` into it verbatim.
pub async fn clear_and_type(page: &Page, element: &Element, text: &str) -> Result<()> {
    let element_js = element.selector.nth_js(element.index)?;

    let js = format!(
        r#"(() => {{
            const el = {element_js};
            if (!el) return false;
            el.scrollIntoView({{ block: 'center', behavior: 'instant' }});
            el.focus();
            const text = {text};
            if (el.tagName === 'INPUT' || el.tagName === 'TEXTAREA') {{
                const proto = el.tagName === 'INPUT'
                    ? window.HTMLInputElement.prototype
                    : window.HTMLTextAreaElement.prototype;
                const setter = Object.getOwnPropertyDescriptor(proto, 'value')?.set;
                if (setter) {{
                    setter.call(el, '');
                }} else {{
                    el.value = '';
                }}
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                if (setter) {{
                    setter.call(el, text);
                }} else {{
                    el.value = text;
                }}
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            }} else {{
                // contenteditable
                el.textContent = '';
                document.execCommand('insertText', false, text);
            }}
            return true;
        }})()"#,
        element_js = element_js,
        text = serde_json::to_string(text)?
    );

    let typed: bool = page
        .evaluate(js.as_str())
        .await
        .map_err(ProbeError::browser)?
        .into_value()?;

    if !typed {
        return Err(ProbeError::ElementNotFound(element.selector.to_string()));
    }
    Ok(())
}
