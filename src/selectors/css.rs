use crate::error::Result;

/// Array of elements matching a CSS selector.
pub fn all_js(selector: &str) -> Result<String> {
    Ok(format!(
        "Array.from(document.querySelectorAll({sel}))",
        sel = serde_json::to_string(selector)?
    ))
}
