use crate::error::Result;

/// Array of element nodes matching an XPath expression.
pub fn all_js(xpath: &str) -> Result<String> {
    Ok(format!(
        r#"(() => {{
            const results = [];
            const xpathResult = document.evaluate(
                {xpath},
                document,
                null,
                XPathResult.ORDERED_NODE_SNAPSHOT_TYPE,
                null
            );
            for (let i = 0; i < xpathResult.snapshotLength; i++) {{
                const el = xpathResult.snapshotItem(i);
                if (el.nodeType === Node.ELEMENT_NODE) {{
                    results.push(el);
                }}
            }}
            return results;
        }})()"#,
        xpath = serde_json::to_string(xpath)?
    ))
}

/// Quote arbitrary text as an XPath string literal.
///
/// XPath 1.0 has no escape sequences, so text holding both quote kinds is
/// assembled with `concat()`.
pub fn literal(text: &str) -> String {
    if !text.contains('\'') {
        return format!("'{}'", text);
    }
    if !text.contains('"') {
        return format!("\"{}\"", text);
    }
    let parts: Vec<String> = text
        .split('\'')
        .map(|part| format!("'{}'", part))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_plain() {
        assert_eq!(literal("«Россия»"), "'«Россия»'");
    }

    #[test]
    fn test_literal_single_quote() {
        assert_eq!(literal("Кот-д'Ивуар"), "\"Кот-д'Ивуар\"");
    }

    #[test]
    fn test_literal_both_quotes() {
        assert_eq!(literal(r#"a'b"c"#), r#"concat('a', "'", 'b"c')"#);
    }
}
